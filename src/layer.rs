use crate::document::Document;
use crate::element::{Element, ElementId, ElementType};

/// UI-facing projection of one element: identity, display name, type tag,
/// and whether it is the active selection. Derived on every document
/// change, never persisted or patched incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub id: ElementId,
    pub name: String,
    pub kind: &'static str,
    pub active: bool,
}

/// Projects the document into its layer list, topmost-first (the reverse
/// of storage order).
pub fn project(document: &Document) -> Vec<LayerEntry> {
    document
        .elements()
        .iter()
        .rev()
        .map(|element| LayerEntry {
            id: element.id(),
            name: display_name(element),
            kind: element.element_type(),
            active: document.active_id() == Some(element.id()),
        })
        .collect()
}

/// Naming policy: images get a fixed label, text layers show their content
/// when non-empty, everything else is a plain "Layer" (the type tag shown
/// alongside disambiguates).
fn display_name(element: &ElementType) -> String {
    match element {
        ElementType::Image(_) => "Image Layer".to_owned(),
        ElementType::Text(text) if !text.content().is_empty() => text.content().to_owned(),
        _ => "Layer".to_owned(),
    }
}
