//! Property tests for clip ordering: any sequence of drag gestures keeps the
//! order a permutation of the collection, and the generation id list always
//! follows display order.

use proptest::prelude::*;

use clipkit_lib::models::{Clip, ClipType};
use clipkit_lib::workspace::collection::ClipCollection;

fn clip(id: String) -> Clip {
    Clip {
        id,
        clip_type: ClipType::Text,
        content: "x".to_string(),
        created: "2026-01-01T00:00:00Z".to_string(),
        tags: Vec::new(),
        lang: None,
    }
}

fn collection_of(n: usize) -> ClipCollection {
    ClipCollection::new((0..n).map(|i| clip(format!("clip-{i}"))).collect())
}

proptest! {
    #[test]
    fn drag_sequences_preserve_permutation(
        n in 1usize..12,
        gestures in proptest::collection::vec((0usize..12, proptest::collection::vec(0usize..12, 0..4)), 0..8),
    ) {
        let mut c = collection_of(n);

        for (start, overs) in gestures {
            c.drag_start(&format!("clip-{}", start % n));
            for over in overs {
                c.drag_over(&format!("clip-{}", over % n));
            }
            c.drag_end();
        }

        let mut ids: Vec<&String> = c.ordered_ids().iter().collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), n);
        prop_assert_eq!(c.len(), n);
    }

    #[test]
    fn selection_toggles_and_drags_keep_request_ids_ordered(
        n in 1usize..10,
        toggles in proptest::collection::vec(0usize..10, 0..12),
        drags in proptest::collection::vec((0usize..10, 0usize..10), 0..6),
    ) {
        let mut c = collection_of(n);

        for t in toggles {
            c.toggle_selection(&format!("clip-{}", t % n));
        }
        for (from, to) in drags {
            c.drag_start(&format!("clip-{}", from % n));
            c.drag_over(&format!("clip-{}", to % n));
            c.drag_end();
        }

        // The request list is the order restricted to selected members.
        let expected: Vec<String> = c
            .ordered_ids()
            .iter()
            .filter(|id| c.is_selected(id))
            .cloned()
            .collect();
        prop_assert_eq!(c.ordered_selected_ids(), expected);
    }
}
