use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============================================================================
// Clips
// ============================================================================

/// Closed set of clip payload kinds. The media kinds carry a URL in `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ClipType {
    Text,
    Image,
    Video,
    Code,
    Link,
}

impl ClipType {
    /// Media kinds whose `content` must be a syntactically valid absolute URL.
    pub fn requires_url(self) -> bool {
        matches!(self, ClipType::Image | ClipType::Video | ClipType::Link)
    }
}

/// A single saved piece of content belonging to an idea.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: String,
    #[serde(rename = "type")]
    pub clip_type: ClipType,
    pub content: String,
    /// Creation timestamp, display-only.
    pub created: String,
    pub tags: Vec<String>,
    /// Only meaningful for code clips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

// ============================================================================
// Ideas
// ============================================================================

/// A named collection of clips, the unit of organization.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

// ============================================================================
// Generation parameters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Script,
    Social,
    Outline,
    Email,
    Blog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Academic,
    Creative,
    Persuasive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    Medium,
    Long,
}

/// Style parameters for a generation call. All three are required and
/// independently selectable; there are no cross-field constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub content_type: ContentType,
    pub tone: Tone,
    pub length: Length,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            content_type: ContentType::Article,
            tone: Tone::Professional,
            length: Length::Medium,
        }
    }
}

// ============================================================================
// Clip filter
// ============================================================================

/// Pure type predicate over the clip list. Filtering only affects the view;
/// it never touches selection or order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ClipFilter {
    #[default]
    All,
    Text,
    Image,
    Video,
    Code,
    Link,
}

impl ClipFilter {
    pub fn matches(self, clip_type: ClipType) -> bool {
        match self {
            ClipFilter::All => true,
            ClipFilter::Text => clip_type == ClipType::Text,
            ClipFilter::Image => clip_type == ClipType::Image,
            ClipFilter::Video => clip_type == ClipType::Video,
            ClipFilter::Code => clip_type == ClipType::Code,
            ClipFilter::Link => clip_type == ClipType::Link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_all_matches_everything() {
        for t in [
            ClipType::Text,
            ClipType::Image,
            ClipType::Video,
            ClipType::Code,
            ClipType::Link,
        ] {
            assert!(ClipFilter::All.matches(t));
        }
    }

    #[test]
    fn test_filter_by_type() {
        assert!(ClipFilter::Image.matches(ClipType::Image));
        assert!(!ClipFilter::Image.matches(ClipType::Text));
    }

    #[test]
    fn test_clip_type_url_requirement() {
        assert!(ClipType::Image.requires_url());
        assert!(ClipType::Video.requires_url());
        assert!(ClipType::Link.requires_url());
        assert!(!ClipType::Text.requires_url());
        assert!(!ClipType::Code.requires_url());
    }

    #[test]
    fn test_params_serialize_lowercase() {
        let params = GenerationParams::default();
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json["contentType"], "article");
        assert_eq!(json["tone"], "professional");
        assert_eq!(json["length"], "medium");
    }
}
