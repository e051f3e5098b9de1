/// API key authentication middleware
///
/// Every `/api` route requires one of the keys configured via `API_KEYS`.
/// Clients present the secret either in the `X-Api-Key` header or as a
/// `Bearer` token in the `Authorization` header. On success the key's name
/// is attached to the request as [`AuthContext`]; handlers use it to scope
/// cached content and history to the caller.
///
/// Keys are static configuration; there is no registration, session, or
/// token issuance here. Secrets are compared by SHA-256 digest.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use snaptosell_api::middleware::auth::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Caller: {}", auth.key_name)
/// }
/// ```
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::app::AppState;
use crate::error::ApiError;

/// Authentication context added to request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Name of the API key the caller presented
    pub key_name: String,
}

/// API key authentication middleware layer
///
/// # Errors
///
/// - 401 Unauthorized: missing or unknown API key
pub async fn api_key_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = extract_key(&req)
        .ok_or_else(|| ApiError::Unauthorized("Missing API key".to_string()))?;

    let presented_digest = digest(&presented);

    let entry = state
        .config
        .auth
        .api_keys
        .iter()
        .find(|key| digest(&key.secret) == presented_digest)
        .ok_or_else(|| {
            tracing::warn!("Rejected request with unknown API key");
            ApiError::Unauthorized("Invalid API key".to_string())
        })?;

    req.extensions_mut().insert(AuthContext {
        key_name: entry.name.clone(),
    });

    Ok(next.run(req).await)
}

/// Pulls the API key from `X-Api-Key` or `Authorization: Bearer`
fn extract_key(req: &Request) -> Option<String> {
    if let Some(value) = req.headers().get("x-api-key") {
        return value.to_str().ok().map(str::to_string);
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn digest(secret: &str) -> [u8; 32] {
    Sha256::digest(secret.as_bytes()).into()
}
