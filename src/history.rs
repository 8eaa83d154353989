use log::trace;

use crate::document::Snapshot;

/// Hard bound on retained snapshots. Recording a sixth state evicts the
/// oldest, so undo depth from the newest state never exceeds
/// `MAX_SNAPSHOTS - 1` steps.
pub const MAX_SNAPSHOTS: usize = 5;

/// Bounded undo/redo history over whole-document snapshots.
///
/// The cursor always points at the snapshot matching the current document
/// state, or is `None` while nothing has been recorded. Recording after an
/// undo discards the states after the cursor; branching history is not
/// supported.
#[derive(Debug, Default)]
pub struct SnapshotHistory {
    snapshots: Vec<Snapshot>,
    cursor: Option<usize>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new snapshot as the current state. This is the only
    /// mutating entry point besides `undo`/`redo`.
    pub fn record(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > MAX_SNAPSHOTS {
            self.snapshots.remove(0);
        }
        self.cursor = Some(self.snapshots.len() - 1);
        trace!(
            "recorded snapshot {}/{}",
            self.snapshots.len(),
            MAX_SNAPSHOTS
        );
    }

    /// Step back one state and return the snapshot to restore. A no-op at
    /// the oldest retained state or while empty.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.snapshots.get(cursor - 1).cloned()
    }

    /// Step forward one state and return the snapshot to restore. A no-op
    /// at the newest state.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.snapshots.get(cursor + 1).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Position of the current state within the retained snapshots.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::element::factory;
    use egui::{Color32, pos2, vec2};

    fn snapshot_with_elements(count: usize) -> Snapshot {
        let mut document = Document::new();
        for i in 0..count {
            document.add_element(factory::create_rectangle(
                pos2(i as f32, 0.0),
                vec2(10.0, 10.0),
                Color32::BLUE,
            ));
        }
        document.serialize()
    }

    #[test]
    fn empty_history_is_inert() {
        let mut history = SnapshotHistory::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn undo_at_oldest_state_is_a_noop() {
        let mut history = SnapshotHistory::new();
        history.record(snapshot_with_elements(1));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn sixth_record_evicts_the_oldest() {
        let mut history = SnapshotHistory::new();
        for i in 0..6 {
            history.record(snapshot_with_elements(i));
        }
        assert_eq!(history.len(), MAX_SNAPSHOTS);
        assert_eq!(history.cursor(), Some(MAX_SNAPSHOTS - 1));

        // Undo depth from the newest state is bounded at 4 steps.
        let mut steps = 0;
        while history.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, MAX_SNAPSHOTS - 1);
    }

    #[test]
    fn record_after_undo_discards_newer_states() {
        let mut history = SnapshotHistory::new();
        let first = snapshot_with_elements(1);
        let second = snapshot_with_elements(2);
        history.record(first.clone());
        history.record(second);
        assert_eq!(history.undo(), Some(first));

        history.record(snapshot_with_elements(3));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
    }
}
