//! Generation request construction and failure classification.
//!
//! The request's `clip_ids` is always Order State filtered to Selection
//! State membership, in order. Failures map onto the fixed taxonomy in
//! `AppError`; exactly one is surfaced per attempt.

use crate::api::client::ApiFailure;
use crate::api::types::GenerateRequest;
use crate::error::AppError;
use crate::models::GenerationParams;
use crate::workspace::collection::ClipCollection;

/// Assemble the generation request body for one attempt.
pub fn build_request(
    idea_id: &str,
    collection: &ClipCollection,
    params: &GenerationParams,
    custom_instructions: Option<String>,
) -> GenerateRequest {
    GenerateRequest {
        idea_id: idea_id.to_string(),
        clip_ids: collection.ordered_selected_ids(),
        content_type: params.content_type,
        tone: params.tone,
        length: params.length,
        custom_instructions: custom_instructions.filter(|s| !s.trim().is_empty()),
    }
}

/// Map a raw API failure onto the user-facing taxonomy.
///
/// The 404 detail strings are the backend's own
/// ("Idea not found", "No clips found...", "No matching clips found...");
/// matching on them is what distinguishes stale-client-state from a simply
/// empty idea.
pub fn classify_failure(failure: ApiFailure, idea_id: &str) -> AppError {
    match failure {
        ApiFailure::Status { status: 401, detail } => {
            tracing::error!(detail = %detail, "Generation rejected: authentication failed");
            AppError::Unauthenticated
        }
        ApiFailure::Status { status: 404, detail } => {
            if detail.contains("Idea not found") {
                AppError::IdeaNotFound(idea_id.to_string())
            } else if detail.contains("No matching clips") {
                AppError::ClipIdMismatch
            } else if detail.contains("No clips found") {
                AppError::NoClipsForIdea
            } else {
                AppError::NotFound(detail)
            }
        }
        ApiFailure::Status { status, detail } => AppError::Server { status, detail },
        ApiFailure::Transport(e) if e.is_builder() => {
            AppError::RequestConstruction(e.to_string())
        }
        ApiFailure::Transport(e) => AppError::Network(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClipType, ContentType, Length, Tone};
    use crate::workspace::collection::clip;

    fn params() -> GenerationParams {
        GenerationParams {
            content_type: ContentType::Blog,
            tone: Tone::Casual,
            length: Length::Short,
        }
    }

    #[test]
    fn test_request_lists_ordered_selection() {
        let mut collection = ClipCollection::new(vec![
            clip("a", ClipType::Text),
            clip("b", ClipType::Image),
            clip("c", ClipType::Link),
        ]);
        collection.toggle_selection("b");

        let req = build_request("i1", &collection, &params(), None);
        assert_eq!(req.clip_ids, vec!["a", "c"]);

        // Moving c before a must be reflected in the next request.
        collection.drag_start("c");
        collection.drag_over("a");
        collection.drag_end();
        let req = build_request("i1", &collection, &params(), None);
        assert_eq!(req.clip_ids, vec!["c", "a"]);
    }

    #[test]
    fn test_filtering_does_not_shrink_request() {
        // Idea I1: user filters to image and selects nothing extra; the
        // default select-all still sends all three ids, order preserved.
        let mut collection = ClipCollection::new(vec![
            clip("t1", ClipType::Text),
            clip("i1", ClipType::Image),
            clip("l1", ClipType::Link),
        ]);
        collection.set_filter(crate::models::ClipFilter::Image);

        let req = build_request("I1", &collection, &params(), None);
        assert_eq!(req.clip_ids, vec!["t1", "i1", "l1"]);
    }

    #[test]
    fn test_blank_instructions_are_dropped() {
        let collection = ClipCollection::new(vec![clip("a", ClipType::Text)]);
        let req = build_request("i1", &collection, &params(), Some("   ".into()));
        assert_eq!(req.custom_instructions, None);

        let req = build_request(
            "i1",
            &collection,
            &params(),
            Some("shorter intro".into()),
        );
        assert_eq!(req.custom_instructions.as_deref(), Some("shorter intro"));
    }

    #[test]
    fn test_classify_401() {
        let err = classify_failure(
            ApiFailure::Status {
                status: 401,
                detail: "Could not validate credentials".into(),
            },
            "i1",
        );
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[test]
    fn test_classify_404_variants() {
        let idea = classify_failure(
            ApiFailure::Status {
                status: 404,
                detail: "Idea not found".into(),
            },
            "i1",
        );
        assert!(matches!(idea, AppError::IdeaNotFound(ref id) if id == "i1"));

        let clips = classify_failure(
            ApiFailure::Status {
                status: 404,
                detail: "No clips found in this idea".into(),
            },
            "i1",
        );
        assert!(matches!(clips, AppError::NoClipsForIdea));

        let mismatch = classify_failure(
            ApiFailure::Status {
                status: 404,
                detail: "No matching clips found for the provided IDs".into(),
            },
            "i1",
        );
        assert!(matches!(mismatch, AppError::ClipIdMismatch));

        let other = classify_failure(
            ApiFailure::Status {
                status: 404,
                detail: "User not found".into(),
            },
            "i1",
        );
        assert!(matches!(other, AppError::NotFound(_)));
    }

    #[test]
    fn test_classify_server_error_keeps_detail() {
        let err = classify_failure(
            ApiFailure::Status {
                status: 500,
                detail: "Error fetching clips: db down".into(),
            },
            "i1",
        );
        match err {
            AppError::Server { status, detail } => {
                assert_eq!(status, 500);
                assert!(detail.contains("db down"));
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }
}
