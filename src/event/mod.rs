mod bus;
mod events;

pub use bus::EventBus;
pub use events::{DocumentEvent, ReorderDirection};

use crate::document::Document;

/// Receives a notification after every document mutation, with the
/// document exactly as it exists immediately after that mutation.
pub trait DocumentObserver {
    fn document_changed(&mut self, event: &DocumentEvent, document: &Document);
}
