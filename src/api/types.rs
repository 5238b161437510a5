//! Wire shapes for the ClipKit backend and their mapping onto local models.
//!
//! The backend speaks `{ id, name, category, tags[] }` for ideas and
//! `{ id, type, value, created_at, tags: [{name}] }` for clips; locally we
//! use `title`/`description`/`content`/`created`.

use serde::{Deserialize, Serialize};

use crate::models::{Clip, ClipType, ContentType, Idea, Length, Tone};

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Registration returns a user object; token fields are present only when
/// the backend issues a session immediately.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub user: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
pub(crate) struct RegisterBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RefreshBody<'a> {
    pub refresh_token: &'a str,
}

// ============================================================================
// Ideas
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct IdeaWire {
    pub id: IdOrNumber,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<IdeaWire> for Idea {
    fn from(w: IdeaWire) -> Self {
        Idea {
            id: w.id.into_string(),
            title: w.name,
            description: w.category.unwrap_or_default(),
            tags: w.tags,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct IdeaBody<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdeaUpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
}

// ============================================================================
// Clips
// ============================================================================

/// Tags arrive as objects on read (`[{name}]`) but are sent as plain strings.
#[derive(Debug, Deserialize)]
pub(crate) struct TagWire {
    pub name: String,
}

/// Clip ids have historically been numeric or string depending on backend
/// version; normalize everything to strings locally.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum IdOrNumber {
    Text(String),
    Number(i64),
}

impl IdOrNumber {
    pub fn into_string(self) -> String {
        match self {
            IdOrNumber::Text(s) => s,
            IdOrNumber::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClipWire {
    pub id: IdOrNumber,
    #[serde(rename = "type")]
    pub clip_type: ClipType,
    #[serde(alias = "content")]
    pub value: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub tags: Vec<TagWire>,
    #[serde(default)]
    pub lang: Option<String>,
}

impl From<ClipWire> for Clip {
    fn from(w: ClipWire) -> Self {
        Clip {
            id: w.id.into_string(),
            clip_type: w.clip_type,
            content: w.value,
            created: w.created_at,
            tags: w.tags.into_iter().map(|t| t.name).collect(),
            lang: w.lang,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ClipCreateBody<'a> {
    #[serde(rename = "type")]
    pub clip_type: ClipType,
    pub content: &'a str,
    pub idea_id: &'a str,
    pub tags: &'a [String],
    pub lang: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClipUpdateBody<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub clip_type: Option<ClipType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
}

// ============================================================================
// Generation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub idea_id: String,
    pub clip_ids: Vec<String>,
    pub content_type: ContentType,
    pub tone: Tone,
    pub length: Length,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub content: String,
}

/// FastAPI error envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idea_wire_maps_to_local_names() {
        let wire: IdeaWire = serde_json::from_str(
            r#"{"id":"i1","name":"Launch plan","category":"marketing","tags":["q3"]}"#,
        )
        .unwrap();
        let idea = Idea::from(wire);
        assert_eq!(idea.id, "i1");
        assert_eq!(idea.title, "Launch plan");
        assert_eq!(idea.description, "marketing");
        assert_eq!(idea.tags, vec!["q3".to_string()]);
    }

    #[test]
    fn test_clip_wire_maps_tags_and_numeric_id() {
        let wire: ClipWire = serde_json::from_str(
            r#"{"id":7,"type":"text","value":"note","created_at":"2026-01-01T00:00:00Z","tags":[{"name":"a"},{"name":"b"}]}"#,
        )
        .unwrap();
        let clip = Clip::from(wire);
        assert_eq!(clip.id, "7");
        assert_eq!(clip.content, "note");
        assert_eq!(clip.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_clip_wire_accepts_content_alias() {
        let wire: ClipWire =
            serde_json::from_str(r#"{"id":"c1","type":"link","content":"https://x.dev"}"#).unwrap();
        assert_eq!(Clip::from(wire).content, "https://x.dev");
    }

    #[test]
    fn test_generate_request_snake_case_body() {
        let req = GenerateRequest {
            idea_id: "i1".into(),
            clip_ids: vec!["a".into(), "b".into()],
            content_type: ContentType::Blog,
            tone: Tone::Casual,
            length: Length::Short,
            custom_instructions: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["idea_id"], "i1");
        assert_eq!(json["content_type"], "blog");
        assert_eq!(json["tone"], "casual");
        assert_eq!(json["length"], "short");
        assert!(json.get("custom_instructions").is_none());
    }
}
