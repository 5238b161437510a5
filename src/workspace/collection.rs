//! Clip collection state for one workspace: the clip list plus the purely
//! local view state layered on top of it (display order, selection set, type
//! filter, in-progress drag).
//!
//! Order and selection are independent: filtering changes neither, and a
//! clip can stay selected while filtered out of view.

use std::collections::HashSet;

use crate::models::{Clip, ClipFilter, ClipType};

#[derive(Debug, Default, Clone)]
pub struct ClipCollection {
    clips: Vec<Clip>,
    /// Permutation of clip ids; drives display and request sequence.
    order: Vec<String>,
    selected: HashSet<String>,
    filter: ClipFilter,
    /// Id of the clip being dragged, while a gesture is in progress.
    dragged: Option<String>,
}

impl ClipCollection {
    pub fn new(clips: Vec<Clip>) -> Self {
        let mut collection = Self::default();
        collection.replace(clips);
        collection
    }

    /// Fully replace the held collection (idea switch or re-fetch).
    /// Order resets to input order; selection defaults back to all clips.
    pub fn replace(&mut self, clips: Vec<Clip>) {
        self.order = clips.iter().map(|c| c.id.clone()).collect();
        self.selected = clips.iter().map(|c| c.id.clone()).collect();
        self.clips = clips;
        self.dragged = None;
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    fn get(&self, id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Clips in display order.
    pub fn ordered_clips(&self) -> Vec<&Clip> {
        self.order.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Clips in display order, restricted by the active filter.
    pub fn filtered_clips(&self) -> Vec<&Clip> {
        self.ordered_clips()
            .into_iter()
            .filter(|c| self.filter.matches(c.clip_type))
            .collect()
    }

    // --------------------------------------------------------------------
    // Filter
    // --------------------------------------------------------------------

    pub fn filter(&self) -> ClipFilter {
        self.filter
    }

    /// Pure view predicate; never mutates selection or order.
    pub fn set_filter(&mut self, filter: ClipFilter) {
        self.filter = filter;
    }

    // --------------------------------------------------------------------
    // Selection
    // --------------------------------------------------------------------

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Flip membership of `id` in the selection set. Unknown ids are ignored.
    /// Returns the new membership state.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            tracing::debug!(clip_id = %id, "Ignoring selection toggle for unknown clip");
            return false;
        }
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Select every clip in the full, unfiltered collection.
    pub fn select_all(&mut self) {
        self.selected = self.clips.iter().map(|c| c.id.clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // --------------------------------------------------------------------
    // Drag reordering
    // --------------------------------------------------------------------

    /// Begin a drag gesture. Unknown ids leave the gesture unarmed.
    pub fn drag_start(&mut self, id: &str) {
        if self.get(id).is_some() {
            self.dragged = Some(id.to_string());
        } else {
            tracing::debug!(clip_id = %id, "Ignoring drag start for unknown clip");
        }
    }

    /// Dragging over a new target commits the reorder immediately (live
    /// reordering, not deferred to drop). No-op outside a gesture.
    pub fn drag_over(&mut self, target_id: &str) {
        let Some(dragged) = self.dragged.clone() else {
            return;
        };
        if dragged == target_id {
            return;
        }
        self.reorder(&dragged, target_id);
    }

    /// End the gesture; the order already reflects the last drag-over.
    pub fn drag_end(&mut self) {
        self.dragged = None;
    }

    pub fn dragged_id(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    /// Splice `dragged_id` out of the order and reinsert it at `target_id`'s
    /// pre-removal position; elements between the two shift by one slot.
    /// No-op when either id is absent or they are equal.
    fn reorder(&mut self, dragged_id: &str, target_id: &str) {
        if dragged_id == target_id {
            return;
        }
        let Some(dragged_idx) = self.order.iter().position(|id| id == dragged_id) else {
            return;
        };
        let Some(target_idx) = self.order.iter().position(|id| id == target_id) else {
            return;
        };
        let id = self.order.remove(dragged_idx);
        self.order.insert(target_idx, id);
    }

    // --------------------------------------------------------------------
    // Generation input
    // --------------------------------------------------------------------

    /// The ids that participate in the next generation call: Order State
    /// filtered to Selection State membership, in order. Selection alone is
    /// not enough; a reorder after selecting must show up here.
    pub fn ordered_selected_ids(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| self.selected.contains(*id))
            .cloned()
            .collect()
    }

    /// Selected clips in display order (editor reference list).
    pub fn selected_clips(&self) -> Vec<&Clip> {
        self.order
            .iter()
            .filter(|id| self.selected.contains(*id))
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Ids present in the collection, in display order.
    pub fn ordered_ids(&self) -> &[String] {
        &self.order
    }
}

#[cfg(test)]
pub(crate) fn clip(id: &str, clip_type: ClipType) -> Clip {
    Clip {
        id: id.to_string(),
        clip_type,
        content: format!("content of {id}"),
        created: "2026-01-01T00:00:00Z".to_string(),
        tags: Vec::new(),
        lang: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClipCollection {
        ClipCollection::new(vec![
            clip("a", ClipType::Text),
            clip("b", ClipType::Image),
            clip("c", ClipType::Link),
        ])
    }

    #[test]
    fn test_replace_resets_order_and_selects_all() {
        let c = sample();
        assert_eq!(c.ordered_ids(), &["a", "b", "c"]);
        assert_eq!(c.selected_count(), 3);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut c = sample();
        let before: Vec<String> = c.ordered_selected_ids();
        c.toggle_selection("b");
        assert!(!c.is_selected("b"));
        c.toggle_selection("b");
        assert_eq!(c.ordered_selected_ids(), before);
    }

    #[test]
    fn test_toggle_unknown_id_is_ignored() {
        let mut c = sample();
        c.toggle_selection("nope");
        assert_eq!(c.selected_count(), 3);
        assert!(!c.is_selected("nope"));
    }

    #[test]
    fn test_filter_never_touches_selection() {
        let mut c = sample();
        c.toggle_selection("a");
        let selected_before = c.ordered_selected_ids();

        c.set_filter(ClipFilter::Image);
        assert_eq!(c.filtered_clips().len(), 1);
        assert_eq!(c.ordered_selected_ids(), selected_before);

        c.set_filter(ClipFilter::All);
        assert_eq!(c.ordered_selected_ids(), selected_before);
        // A selected-but-hidden clip stays selected.
        c.set_filter(ClipFilter::Text);
        assert!(c.is_selected("b"));
    }

    #[test]
    fn test_select_all_covers_full_collection_not_filtered_view() {
        let mut c = sample();
        c.clear_selection();
        c.set_filter(ClipFilter::Image);
        c.select_all();
        assert_eq!(c.selected_count(), 3);
    }

    #[test]
    fn test_reorder_moves_before_target() {
        let mut c = sample();
        // Move c before a -> [c, a, b].
        c.drag_start("c");
        c.drag_over("a");
        c.drag_end();
        assert_eq!(c.ordered_ids(), &["c", "a", "b"]);
    }

    #[test]
    fn test_reorder_is_splice_not_swap() {
        let mut c = ClipCollection::new(vec![
            clip("a", ClipType::Text),
            clip("b", ClipType::Text),
            clip("c", ClipType::Text),
            clip("d", ClipType::Text),
        ]);
        c.drag_start("d");
        c.drag_over("b");
        // d lands at b's old slot; b and c shift down one.
        assert_eq!(c.ordered_ids(), &["a", "d", "b", "c"]);
    }

    #[test]
    fn test_reorder_preserves_permutation() {
        let mut c = sample();
        c.drag_start("a");
        c.drag_over("c");
        c.drag_over("b");
        c.drag_end();
        let mut ids: Vec<&String> = c.ordered_ids().iter().collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_drag_over_without_gesture_is_noop() {
        let mut c = sample();
        c.drag_over("a");
        assert_eq!(c.ordered_ids(), &["a", "b", "c"]);
    }

    #[test]
    fn test_drag_over_self_is_noop() {
        let mut c = sample();
        c.drag_start("b");
        c.drag_over("b");
        assert_eq!(c.ordered_ids(), &["a", "b", "c"]);
    }

    #[test]
    fn test_ordered_selected_follows_order_state() {
        let mut c = sample();
        c.toggle_selection("b");
        assert_eq!(c.ordered_selected_ids(), vec!["a", "c"]);

        // Reorder after selection must be reflected.
        c.drag_start("c");
        c.drag_over("a");
        c.drag_end();
        assert_eq!(c.ordered_selected_ids(), vec!["c", "a"]);
    }

    #[test]
    fn test_replace_clears_drag_state() {
        let mut c = sample();
        c.drag_start("a");
        c.replace(vec![clip("x", ClipType::Code)]);
        assert_eq!(c.dragged_id(), None);
        assert_eq!(c.ordered_ids(), &["x"]);
    }
}
