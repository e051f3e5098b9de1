/// Prompt construction from content-generation options
///
/// This module turns [`GenerationOptions`] into the text prompts sent to the
/// model. Image-driven requests open with a product-analysis instruction;
/// text-driven requests extend the caller's prompt. Both append the same
/// option-derived clauses (tone, length budget, keywords).
///
/// Video requests additionally carry platform formatting instructions
/// (hashtags, emoji, call-to-action style) appended by the route before the
/// prompt reaches the model.
use crate::models::options::{ContentType, GenerationOptions, Platform};

/// Builds the prompt for an image-driven generation request
///
/// # Example
///
/// ```
/// use snaptosell_shared::models::options::{ContentType, GenerationOptions, Tone};
/// use snaptosell_shared::prompt;
///
/// let options = GenerationOptions {
///     content_type: ContentType::Website,
///     platform: None,
///     tone: Tone::Professional,
///     max_length: None,
///     include_keywords: vec![],
/// };
///
/// let text = prompt::image_prompt(&options);
/// assert!(text.starts_with("Analyze this product image and "));
/// ```
pub fn image_prompt(options: &GenerationOptions) -> String {
    let mut text = String::from("Analyze this product image and ");

    match options.content_type {
        ContentType::Website => {
            text.push_str("create a professional product description for an e-commerce website. ");
        }
        ContentType::Social => {
            let platform = options
                .platform
                .map(|p| p.as_str())
                .unwrap_or("social media");
            text.push_str(&format!(
                "create a compelling {} post to sell this product. ",
                platform
            ));
        }
        ContentType::Video => {
            text.push_str("create an engaging video title and description for this product. ");
        }
    }

    text.push_str(&option_clauses(options));
    text
}

/// Builds the prompt for a text-driven generation request
///
/// The caller's prompt comes first, followed by the option clauses.
pub fn text_prompt(user_prompt: &str, options: &GenerationOptions) -> String {
    let mut text = format!("{} ", user_prompt);
    text.push_str(&option_clauses(options));
    text
}

/// Tone, length, and keyword clauses shared by every prompt shape
fn option_clauses(options: &GenerationOptions) -> String {
    let mut clauses = format!("Use a {} tone. ", options.tone);

    if let Some(max_length) = options.effective_max_length() {
        clauses.push_str(&format!("Keep the text under {} characters. ", max_length));
    }

    if !options.include_keywords.is_empty() {
        clauses.push_str(&format!(
            "Include these keywords if appropriate: {}. ",
            options.include_keywords.join(", ")
        ));
    }

    clauses
}

/// Platform-specific formatting instructions for video captions
///
/// Returned text is appended to the prompt by the video endpoint. Platforms
/// without a dedicated video style get no extra instructions.
pub fn video_format_instructions(platform: Platform) -> Option<&'static str> {
    match platform {
        Platform::Instagram => Some(
            "Create a short, engaging caption for Instagram Reels that includes emojis \
             and 5-7 relevant hashtags at the end. Focus on hooking viewers in the first \
             sentence.",
        ),
        Platform::Tiktok => Some(
            "Create a short, catchy TikTok caption with trending hashtags and \
             call-to-action. Keep it casual and use relevant emojis. Include 3-5 trending \
             hashtags.",
        ),
        Platform::Facebook => Some(
            "Write an engaging Facebook video description that tells a story about the \
             product. Include a clear call-to-action and 1-2 relevant hashtags. Structure \
             it with proper paragraphs.",
        ),
        Platform::Youtube => Some(
            "Create a detailed YouTube video description with timestamps for key \
             sections, product details, and a strong call-to-action. Include links and \
             relevant keywords for SEO. Format with proper paragraph breaks.",
        ),
        Platform::Twitter => None,
    }
}

/// Strips a `data:image/...;base64,` prefix, leaving the raw payload
///
/// Inputs without a data-URL prefix are returned unchanged.
pub fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:image") {
        if let Some(comma) = data.find(',') {
            return &data[comma + 1..];
        }
    }
    data
}

/// Checks that a string is a plausible base64-encoded image
///
/// Accepts either a `data:image/...` URL or a bare base64 payload. The
/// check is a character-class scan, not a decode.
pub fn is_valid_base64_image(data: &str) -> bool {
    let payload = if data.starts_with("data:image/") {
        match data.split_once(',') {
            Some((_, payload)) if !payload.is_empty() => payload,
            _ => return false,
        }
    } else {
        data
    };

    let padding = payload.chars().rev().take_while(|c| *c == '=').count();
    if padding > 2 {
        return false;
    }

    payload[..payload.len() - padding]
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
}
