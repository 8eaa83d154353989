use crate::element::ElementId;

/// Direction for a layer reorder: all the way to the front (top of the
/// stack) or all the way to the back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    ToFront,
    ToBack,
}

/// Emitted by the document after each mutation. `Restored` is the one
/// variant that history recording must ignore, since it is produced by
/// undo/redo navigation itself.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    ElementAdded { id: ElementId },
    ElementRemoved { id: ElementId },
    ElementMoved { id: ElementId },
    ActiveChanged { id: Option<ElementId> },
    Reordered { id: ElementId, direction: ReorderDirection },
    Restored,
}
