/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: `*`)
/// - `PRODUCTION`: Enables strict security headers (default: false)
/// - `API_KEYS`: Comma-separated `name:secret` pairs (required)
/// - `GEMINI_API_KEY`: Gemini API key (required)
/// - `GEMINI_MODEL` / `GEMINI_BASE_URL` / `GEMINI_TIMEOUT_SECS`: see
///   [`snaptosell_gemini::client::GeminiConfig`]
/// - `RATE_LIMIT_PER_MINUTE`: Outbound Gemini calls per minute (default: 30)
/// - `CACHE_SWEEP_INTERVAL_SECS`: Proactive cache sweep interval
///   (default: 900)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use snaptosell_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```
use snaptosell_gemini::client::GeminiConfig;
use std::env;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Gemini client configuration
    pub gemini: GeminiConfig,

    /// API key authentication configuration
    pub auth: AuthConfig,

    /// Rate limiting and cache maintenance settings
    pub limits: LimitsConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` enables permissive CORS)
    pub cors_origins: Vec<String>,

    /// Whether production hardening (HSTS) is enabled
    pub production: bool,
}

/// A configured API key
#[derive(Debug, Clone)]
pub struct ApiKeyEntry {
    /// Key name, used as the owner of cached content and history
    pub name: String,

    /// The secret presented by clients
    pub secret: String,
}

/// API key authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Accepted API keys
    pub api_keys: Vec<ApiKeyEntry>,
}

/// Rate limiting and cache maintenance settings
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Outbound Gemini calls allowed per minute
    pub requests_per_minute: u32,

    /// Seconds between proactive cache sweeps
    pub cache_sweep_interval_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (`API_KEYS`,
    ///   `GEMINI_API_KEY`)
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let production = env::var("PRODUCTION")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let raw_keys = env::var("API_KEYS")
            .map_err(|_| anyhow::anyhow!("API_KEYS environment variable is required"))?;
        let api_keys = parse_api_keys(&raw_keys)?;

        let gemini = GeminiConfig::from_env()?;

        let requests_per_minute = env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u32>()?;
        if requests_per_minute == 0 {
            anyhow::bail!("RATE_LIMIT_PER_MINUTE must be at least 1");
        }

        let cache_sweep_interval_secs = env::var("CACHE_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "900".to_string())
            .parse::<u64>()?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            gemini,
            auth: AuthConfig { api_keys },
            limits: LimitsConfig {
                requests_per_minute,
                cache_sweep_interval_secs,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Parses `name:secret` pairs from the `API_KEYS` variable
fn parse_api_keys(raw: &str) -> anyhow::Result<Vec<ApiKeyEntry>> {
    let mut keys = Vec::new();

    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, secret) = pair
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("API_KEYS entries must be name:secret pairs"))?;

        if name.is_empty() || secret.is_empty() {
            anyhow::bail!("API_KEYS entries must be name:secret pairs");
        }

        keys.push(ApiKeyEntry {
            name: name.to_string(),
            secret: secret.to_string(),
        });
    }

    if keys.is_empty() {
        anyhow::bail!("API_KEYS must contain at least one name:secret pair");
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaptosell_gemini::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            gemini: GeminiConfig {
                api_key: "test-key".to_string(),
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 30,
            },
            auth: AuthConfig {
                api_keys: vec![ApiKeyEntry {
                    name: "test".to_string(),
                    secret: "secret".to_string(),
                }],
            },
            limits: LimitsConfig {
                requests_per_minute: 30,
                cache_sweep_interval_secs: 900,
            },
        }
    }

    #[test]
    fn test_bind_address() {
        let config = test_config();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_api_keys() {
        let keys = parse_api_keys("acme:sk-one,globex:sk-two").unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].name, "acme");
        assert_eq!(keys[0].secret, "sk-one");
        assert_eq!(keys[1].name, "globex");
    }

    #[test]
    fn test_parse_api_keys_trims_whitespace() {
        let keys = parse_api_keys(" acme:sk-one , globex:sk-two ").unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].name, "globex");
    }

    #[test]
    fn test_parse_api_keys_rejects_malformed_entries() {
        assert!(parse_api_keys("no-separator").is_err());
        assert!(parse_api_keys(":missing-name").is_err());
        assert!(parse_api_keys("missing-secret:").is_err());
        assert!(parse_api_keys("").is_err());
    }
}
