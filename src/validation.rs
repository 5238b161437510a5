use url::Url;

use crate::error::AppError;
use crate::models::ClipType;

pub fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Reject anything that does not parse as an absolute URL.
pub fn require_valid_url(field: &str, value: &str) -> Result<(), AppError> {
    Url::parse(value.trim())
        .map_err(|_| AppError::Validation(format!("{field} must be a valid absolute URL")))?;
    Ok(())
}

/// Gate clip content before submission: media clips carry URLs, everything
/// else just needs a non-empty payload.
pub fn require_valid_clip_content(clip_type: ClipType, content: &str) -> Result<(), AppError> {
    require_non_empty("content", content)?;
    if clip_type.requires_url() {
        require_valid_url("content", content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("name", "hello").is_ok());
        assert!(require_non_empty("name", "").is_err());
        assert!(require_non_empty("name", "   ").is_err());
    }

    #[test]
    fn test_require_valid_url() {
        assert!(require_valid_url("content", "https://example.com/a.png").is_ok());
        assert!(require_valid_url("content", "not a url").is_err());
        // Relative paths are not absolute URLs.
        assert!(require_valid_url("content", "/images/a.png").is_err());
    }

    #[test]
    fn test_media_clips_require_urls() {
        assert!(require_valid_clip_content(ClipType::Image, "https://example.com/a.png").is_ok());
        assert!(require_valid_clip_content(ClipType::Image, "just text").is_err());
        assert!(require_valid_clip_content(ClipType::Text, "just text").is_ok());
        assert!(require_valid_clip_content(ClipType::Code, "fn main() {}").is_ok());
        assert!(require_valid_clip_content(ClipType::Link, "").is_err());
    }
}
