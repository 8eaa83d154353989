use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::error;

use crate::document::Document;
use crate::event::{DocumentEvent, DocumentObserver};
use crate::history::SnapshotHistory;
use crate::layer::{self, LayerEntry};

/// Records a snapshot after every document mutation except `Restored`
/// (which is produced by undo/redo navigation itself).
struct HistoryRecorder {
    history: Rc<RefCell<SnapshotHistory>>,
}

impl DocumentObserver for HistoryRecorder {
    fn document_changed(&mut self, event: &DocumentEvent, document: &Document) {
        if matches!(event, DocumentEvent::Restored) {
            return;
        }
        self.history.borrow_mut().record(document.serialize());
    }
}

/// Recomputes the layer list in full after every document change,
/// including restores.
struct LayerSync {
    layers: Rc<RefCell<Vec<LayerEntry>>>,
}

impl DocumentObserver for LayerSync {
    fn document_changed(&mut self, _event: &DocumentEvent, document: &Document) {
        *self.layers.borrow_mut() = layer::project(document);
    }
}

/// Facade over the document, its history, and the derived layer list.
///
/// Construction wires the two observers onto the document's bus, so any
/// mutation applied through [`Editor::document_mut`] is snapshotted and
/// projected before the call returns. Also carries the premium flag that
/// gates HD export.
pub struct Editor {
    document: Document,
    history: Rc<RefCell<SnapshotHistory>>,
    layers: Rc<RefCell<Vec<LayerEntry>>>,
    premium: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        let document = Document::new();
        let history = Rc::new(RefCell::new(SnapshotHistory::new()));
        let layers = Rc::new(RefCell::new(Vec::new()));

        document.subscribe(Box::new(HistoryRecorder {
            history: Rc::clone(&history),
        }));
        document.subscribe(Box::new(LayerSync {
            layers: Rc::clone(&layers),
        }));

        Self {
            document,
            history,
            layers,
            premium: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The current layer projection, topmost-first.
    pub fn layers(&self) -> Ref<'_, Vec<LayerEntry>> {
        self.layers.borrow()
    }

    pub fn can_undo(&self) -> bool {
        self.history.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.borrow().can_redo()
    }

    /// Steps back one recorded state. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let snapshot = self.history.borrow_mut().undo();
        let Some(snapshot) = snapshot else {
            return false;
        };
        match self.document.restore(&snapshot) {
            Ok(()) => true,
            Err(err) => {
                error!("undo failed to restore snapshot: {err}");
                false
            }
        }
    }

    /// Steps forward one recorded state. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let snapshot = self.history.borrow_mut().redo();
        let Some(snapshot) = snapshot else {
            return false;
        };
        match self.document.restore(&snapshot) {
            Ok(()) => true,
            Err(err) => {
                error!("redo failed to restore snapshot: {err}");
                false
            }
        }
    }

    /// Number of retained history snapshots and the cursor position,
    /// for the history readout in the tools panel.
    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history.borrow().cursor()
    }

    // ---- paywall ----------------------------------------------------

    /// Whether HD export is unlocked.
    pub fn premium(&self) -> bool {
        self.premium
    }

    /// Subscription stub: unlocks HD export for the session.
    pub fn subscribe_premium(&mut self) {
        self.premium = true;
    }
}
