/// Content-generation options and platform constraints
///
/// This module defines the user-selected parameters that shape a generation
/// request (content type, tone, platform, length, keywords) and the logic
/// that merges them with platform-specific limits.
///
/// # Platform Character Limits
///
/// Social captions: Instagram 2200, TikTok 2200, Facebook 63206, Twitter 280
/// (platforms without a published social limit fall back to 2000).
///
/// Video captions: Instagram 2200, TikTok 2200, Facebook 8000, YouTube 5000
/// (requests without an applicable platform default to 500).
///
/// The effective limit is always `min(requested, platform default)`: a caller
/// may tighten a platform's budget but never exceed it.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback social caption limit for platforms without a published one
pub const DEFAULT_SOCIAL_LIMIT: u32 = 2000;

/// Default video caption length when no platform constraint applies
pub const DEFAULT_VIDEO_LIMIT: u32 = 500;

/// Kind of marketing copy being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// E-commerce website product description
    Website,

    /// Social media post
    Social,

    /// Video title and description
    Video,
}

impl ContentType {
    /// Wire/display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Website => "website",
            ContentType::Social => "social",
            ContentType::Video => "video",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voice the generated copy should take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Enthusiastic,
    Formal,
}

impl Tone {
    /// Wire/display name, as interpolated into prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Enthusiastic => "enthusiastic",
            Tone::Formal => "formal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target publishing platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Facebook,
    Twitter,
    Youtube,
}

impl Platform {
    /// Wire/display name, as interpolated into prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Youtube => "youtube",
        }
    }

    /// Published character limit for social posts, where one exists
    pub fn social_char_limit(&self) -> Option<u32> {
        match self {
            Platform::Instagram => Some(2200),
            Platform::Tiktok => Some(2200),
            Platform::Facebook => Some(63_206),
            Platform::Twitter => Some(280),
            Platform::Youtube => None,
        }
    }

    /// Caption limit for video descriptions, where one exists
    pub fn video_char_limit(&self) -> Option<u32> {
        match self {
            Platform::Instagram => Some(2200),
            Platform::Tiktok => Some(2200),
            Platform::Facebook => Some(8000),
            Platform::Youtube => Some(5000),
            Platform::Twitter => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-selected parameters for a generation request
///
/// Deserialized from request bodies. Routes force `content_type` to match
/// the endpoint before generation, so a caller posting website options to
/// the social endpoint still gets a social post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Kind of copy to produce
    pub content_type: ContentType,

    /// Target platform, where relevant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Voice of the copy
    pub tone: Tone,

    /// Caller-requested character budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Keywords the copy should work in where appropriate
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_keywords: Vec<String>,
}

impl GenerationOptions {
    /// Returns a copy with the content type forced to `content_type`
    ///
    /// Each endpoint pins the kind of copy it produces regardless of what
    /// the caller put in the options payload.
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Platform-imposed character budget for this request, if any
    ///
    /// Website copy has no platform budget. Social posts use the platform's
    /// published limit (2000 for platforms without one). Video captions use
    /// the platform's caption limit when it has one.
    pub fn platform_limit(&self) -> Option<u32> {
        let platform = self.platform?;
        match self.content_type {
            ContentType::Website => None,
            ContentType::Social => {
                Some(platform.social_char_limit().unwrap_or(DEFAULT_SOCIAL_LIMIT))
            }
            ContentType::Video => platform.video_char_limit(),
        }
    }

    /// Character budget actually applied to the prompt
    ///
    /// The requested `max_length` is clamped to the platform budget:
    /// `min(requested, platform default)`. Video captions without a platform
    /// budget still default to [`DEFAULT_VIDEO_LIMIT`].
    pub fn effective_max_length(&self) -> Option<u32> {
        let platform_limit = self.platform_limit();

        match (self.max_length, platform_limit) {
            (Some(requested), Some(limit)) => Some(requested.min(limit)),
            (None, Some(limit)) => Some(limit),
            (Some(requested), None) => Some(requested),
            (None, None) => match self.content_type {
                ContentType::Video => Some(DEFAULT_VIDEO_LIMIT),
                _ => None,
            },
        }
    }
}
