use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::{Element, ElementId, ElementType};
use crate::event::{DocumentEvent, DocumentObserver, EventBus, ReorderDirection};

/// Opaque, fully self-contained serialization of the document state
/// (elements plus active selection). Producing and consuming one is the
/// document's job alone; history just stores them.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(String);

#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("snapshot could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    elements: &'a [ElementType],
    active: Option<ElementId>,
}

#[derive(Deserialize)]
struct SnapshotData {
    elements: Vec<ElementType>,
    active: Option<ElementId>,
}

/// The document: an ordered collection of drawable elements (back-to-front,
/// index order is z-order) plus the active selection.
///
/// Every mutating method emits exactly one [`DocumentEvent`] on the bus
/// before returning, with the document in exactly the state the mutation
/// left it. `restore` emits [`DocumentEvent::Restored`], which history
/// recording ignores; everything else is recorded.
pub struct Document {
    elements: Vec<ElementType>,
    active: Option<ElementId>,
    bus: EventBus,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements.len())
            .field("active", &self.active)
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            active: None,
            bus: EventBus::new(),
        }
    }

    /// Subscribe an observer to every future mutation.
    pub fn subscribe(&self, observer: Box<dyn DocumentObserver>) {
        self.bus.subscribe(observer);
    }

    fn notify(&self, event: DocumentEvent) {
        self.bus.emit(&event, self);
    }

    // ---- queries ----------------------------------------------------

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    /// Mutable access for per-frame texture preparation only; document
    /// state changes must go through the mutation API below.
    pub(crate) fn elements_mut(&mut self) -> impl Iterator<Item = &mut ElementType> {
        self.elements.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn active_id(&self) -> Option<ElementId> {
        self.active
    }

    pub fn active_element(&self) -> Option<&ElementType> {
        self.active.and_then(|id| self.find_element(id))
    }

    pub fn find_element(&self, id: ElementId) -> Option<&ElementType> {
        self.elements.iter().find(|el| el.id() == id)
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Topmost element containing the given document-space position.
    pub fn hit_test(&self, pos: Pos2) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|el| el.hit_test(pos))
            .map(|el| el.id())
    }

    // ---- mutations --------------------------------------------------

    /// Appends the element as the new front-most entry and makes it active.
    pub fn add_element(&mut self, element: ElementType) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        self.active = Some(id);
        self.notify(DocumentEvent::ElementAdded { id });
        id
    }

    /// Removes the referenced element if present. Removing the active
    /// element clears the selection. Absent references are a no-op.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.elements.remove(index);
        if self.active == Some(id) {
            self.active = None;
        }
        self.notify(DocumentEvent::ElementRemoved { id });
        true
    }

    /// Sets (or clears) the active selection. Selecting an element that is
    /// not in the document is a caller bug and fails loudly.
    pub fn set_active(&mut self, id: Option<ElementId>) {
        if let Some(id) = id {
            assert!(
                self.contains(id),
                "set_active: element {id} is not in the document"
            );
        }
        if self.active == id {
            return;
        }
        self.active = id;
        self.notify(DocumentEvent::ActiveChanged { id });
    }

    /// Translates the referenced element in document space. Absent
    /// references are a no-op.
    pub fn translate_element(&mut self, id: ElementId, delta: Vec2) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.elements[index].translate(delta);
        self.notify(DocumentEvent::ElementMoved { id });
        true
    }

    /// Moves the referenced element to the front or back of the z-order.
    /// Absent references are a no-op.
    pub fn reorder(&mut self, id: ElementId, direction: ReorderDirection) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let element = self.elements.remove(index);
        match direction {
            ReorderDirection::ToFront => self.elements.push(element),
            ReorderDirection::ToBack => self.elements.insert(0, element),
        }
        self.notify(DocumentEvent::Reordered { id, direction });
        true
    }

    /// Serializes the complete document state. Plain data structures to a
    /// JSON string cannot fail to encode.
    pub fn serialize(&self) -> Snapshot {
        let data = SnapshotRef {
            elements: &self.elements,
            active: self.active,
        };
        Snapshot(serde_json::to_string(&data).expect("document state serializes to JSON"))
    }

    /// Replaces the entire document state with a previously serialized
    /// snapshot. Emits `Restored` so that history navigation does not
    /// record itself.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RestoreError> {
        let data: SnapshotData = serde_json::from_str(&snapshot.0)?;
        self.elements = data.elements;
        self.active = data.active;
        self.notify(DocumentEvent::Restored);
        Ok(())
    }
}
