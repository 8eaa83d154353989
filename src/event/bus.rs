use std::cell::RefCell;

use crate::document::Document;
use crate::event::{DocumentEvent, DocumentObserver};

/// A simple event bus broadcasting document mutations to registered
/// observers. Interior mutability lets the document notify while it is
/// borrowed immutably by the observers themselves; observers must not
/// re-enter the bus from inside a notification.
pub struct EventBus {
    observers: RefCell<Vec<Box<dyn DocumentObserver>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.borrow().len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe an observer to receive all future notifications
    pub fn subscribe(&self, observer: Box<dyn DocumentObserver>) {
        self.observers.borrow_mut().push(observer);
    }

    /// Notify all registered observers of a completed mutation
    pub fn emit(&self, event: &DocumentEvent, document: &Document) {
        for observer in &mut *self.observers.borrow_mut() {
            observer.document_changed(event, document);
        }
    }
}
