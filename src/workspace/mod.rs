//! Per-idea content workspace: clip collection state, generation
//! coordination, and the editor over generated content.

pub mod collection;
pub mod coordinator;
pub mod editor;
pub mod export;

use serde::Serialize;
use ts_rs::TS;

use crate::models::{Clip, ClipFilter, GenerationParams, Idea};
use collection::ClipCollection;
use editor::Editor;

/// One workspace view instance. Owned exclusively by `AppState`'s workspace
/// map; every mutation happens on a discrete IPC command.
pub struct Workspace {
    pub idea: Idea,
    pub collection: ClipCollection,
    pub editor: Editor,
    pub params: GenerationParams,
    /// Last failure message shown in the single inline message area.
    /// Replaced, never accumulated; cleared when a new attempt starts.
    pub last_error: Option<String>,
    generating: bool,
    /// Monotonic attempt counter backing the latest-request-wins policy.
    generation_seq: u64,
}

impl Workspace {
    /// Open a workspace for an idea. Selection defaults to all clips; the
    /// cached draft seeds the editor when present.
    pub fn new(idea: Idea, clips: Vec<Clip>, cached_draft: Option<String>) -> Self {
        Self {
            idea,
            collection: ClipCollection::new(clips),
            editor: Editor::new(cached_draft.unwrap_or_default()),
            params: GenerationParams::default(),
            last_error: None,
            generating: false,
            generation_seq: 0,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Start a generation attempt: clears the previous error and returns the
    /// attempt's sequence number. Any still-in-flight older attempt becomes
    /// stale from this moment.
    pub fn begin_generation(&mut self) -> u64 {
        self.generation_seq += 1;
        self.generating = true;
        self.last_error = None;
        self.generation_seq
    }

    fn is_current(&self, seq: u64) -> bool {
        seq == self.generation_seq
    }

    /// Apply a successful result. Returns false (and changes nothing) when a
    /// newer attempt has superseded this one.
    pub fn finish_success(&mut self, seq: u64, content: String) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.generating = false;
        self.last_error = None;
        self.editor.set_content(content);
        true
    }

    /// Record a failed attempt. Returns false when superseded.
    pub fn finish_failure(&mut self, seq: u64, message: String) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.generating = false;
        self.last_error = Some(message);
        true
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            idea: self.idea.clone(),
            clips: self.collection.ordered_clips().into_iter().cloned().collect(),
            filtered_clip_ids: self
                .collection
                .filtered_clips()
                .into_iter()
                .map(|c| c.id.clone())
                .collect(),
            selected_clip_ids: self.collection.ordered_selected_ids(),
            filter: self.collection.filter(),
            params: self.params,
            content: self.editor.content().to_string(),
            edit_buffer: self.editor.edit_buffer().map(str::to_string),
            is_editing: self.editor.is_editing(),
            is_generating: self.generating,
            error_message: self.last_error.clone(),
        }
    }
}

/// Full view-model the frontend renders from.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub idea: Idea,
    /// All clips in display order.
    pub clips: Vec<Clip>,
    /// Ids visible under the active filter, in display order.
    pub filtered_clip_ids: Vec<String>,
    /// Selected ids in display order.
    pub selected_clip_ids: Vec<String>,
    pub filter: ClipFilter,
    pub params: GenerationParams,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_buffer: Option<String>,
    pub is_editing: bool,
    pub is_generating: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClipType;
    use collection::clip;

    fn idea() -> Idea {
        Idea {
            id: "i1".into(),
            title: "Test idea".into(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_open_seeds_from_cached_draft() {
        let ws = Workspace::new(idea(), vec![clip("a", ClipType::Text)], Some("Hello".into()));
        assert_eq!(ws.editor.content(), "Hello");

        let empty = Workspace::new(idea(), vec![], None);
        assert_eq!(empty.editor.content(), "");
    }

    #[test]
    fn test_begin_generation_clears_previous_error() {
        let mut ws = Workspace::new(idea(), vec![clip("a", ClipType::Text)], None);
        let seq = ws.begin_generation();
        ws.finish_failure(seq, "boom".into());
        assert_eq!(ws.last_error.as_deref(), Some("boom"));

        ws.begin_generation();
        assert_eq!(ws.last_error, None);
        assert!(ws.is_generating());
    }

    #[test]
    fn test_latest_request_wins() {
        let mut ws = Workspace::new(idea(), vec![clip("a", ClipType::Text)], None);
        let first = ws.begin_generation();
        let second = ws.begin_generation();

        // The superseded attempt's result is dropped.
        assert!(!ws.finish_success(first, "old".into()));
        assert_eq!(ws.editor.content(), "");
        assert!(ws.is_generating());

        assert!(ws.finish_success(second, "new".into()));
        assert_eq!(ws.editor.content(), "new");
        assert!(!ws.is_generating());
    }

    #[test]
    fn test_stale_failure_does_not_clobber_newer_attempt() {
        let mut ws = Workspace::new(idea(), vec![clip("a", ClipType::Text)], None);
        let first = ws.begin_generation();
        let second = ws.begin_generation();

        assert!(!ws.finish_failure(first, "network".into()));
        assert_eq!(ws.last_error, None);

        assert!(ws.finish_success(second, "content".into()));
        assert_eq!(ws.last_error, None);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut ws = Workspace::new(
            idea(),
            vec![clip("a", ClipType::Text), clip("b", ClipType::Image)],
            None,
        );
        ws.collection.toggle_selection("a");
        ws.collection.set_filter(crate::models::ClipFilter::Image);

        let snap = ws.snapshot();
        assert_eq!(snap.clips.len(), 2);
        assert_eq!(snap.filtered_clip_ids, vec!["b"]);
        assert_eq!(snap.selected_clip_ids, vec!["b"]);
        assert!(!snap.is_generating);
        assert!(!snap.is_editing);
    }
}
