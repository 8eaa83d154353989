use egui::{Painter, Pos2, Rect as EguiRect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod common;
pub(crate) mod image;
pub(crate) mod shape;
pub(crate) mod text;

pub use common::MIN_ELEMENT_SIZE;
pub(crate) use common::clamp_size;

use crate::renderer::Viewport;

/// Unique identity of a drawable element. Assigned once at creation and
/// stable across snapshot/restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Common trait that all document elements implement
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string tag (shown in the layers panel)
    fn element_type(&self) -> &'static str;

    /// Get the bounding rectangle in document coordinates
    fn rect(&self) -> EguiRect;

    /// Draw the element using the provided painter, mapped through the view
    fn draw(&self, painter: &Painter, view: &Viewport);

    /// Test if the element contains the given document-space position
    fn hit_test(&self, pos: Pos2) -> bool;

    /// Translate the element by the given delta in document coordinates
    fn translate(&mut self, delta: Vec2);
}

/// Enumeration of all element types in the document
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub enum ElementType {
    Rect(shape::Rect),
    Circle(shape::Circle),
    Text(text::Text),
    Image(image::Image),
}

impl std::fmt::Debug for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementType::Rect(r) => f.debug_tuple("Rect").field(r).finish(),
            ElementType::Circle(c) => f.debug_tuple("Circle").field(c).finish(),
            ElementType::Text(t) => f.debug_tuple("Text").field(t).finish(),
            ElementType::Image(i) => f.debug_tuple("Image").field(i).finish(),
        }
    }
}

impl ElementType {
    /// Upload any pending texture data for this element. Only images carry
    /// textures; everything else is a no-op.
    pub fn prepare(&mut self, ctx: &egui::Context) {
        if let ElementType::Image(img) = self {
            img.ensure_texture(ctx);
        }
    }

    pub fn as_image(&self) -> Option<&image::Image> {
        match self {
            ElementType::Image(img) => Some(img),
            _ => None,
        }
    }
}

impl Element for ElementType {
    fn id(&self) -> ElementId {
        match self {
            ElementType::Rect(r) => r.id(),
            ElementType::Circle(c) => c.id(),
            ElementType::Text(t) => t.id(),
            ElementType::Image(i) => i.id(),
        }
    }

    fn element_type(&self) -> &'static str {
        match self {
            ElementType::Rect(_) => "rectangle",
            ElementType::Circle(_) => "circle",
            ElementType::Text(_) => "text",
            ElementType::Image(_) => "image",
        }
    }

    fn rect(&self) -> EguiRect {
        match self {
            ElementType::Rect(r) => r.rect(),
            ElementType::Circle(c) => c.rect(),
            ElementType::Text(t) => t.rect(),
            ElementType::Image(i) => i.rect(),
        }
    }

    fn draw(&self, painter: &Painter, view: &Viewport) {
        match self {
            ElementType::Rect(r) => r.draw(painter, view),
            ElementType::Circle(c) => c.draw(painter, view),
            ElementType::Text(t) => t.draw(painter, view),
            ElementType::Image(i) => i.draw(painter, view),
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        match self {
            ElementType::Rect(r) => r.hit_test(pos),
            ElementType::Circle(c) => c.hit_test(pos),
            ElementType::Text(t) => t.hit_test(pos),
            ElementType::Image(i) => i.hit_test(pos),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            ElementType::Rect(r) => r.translate(delta),
            ElementType::Circle(c) => c.translate(delta),
            ElementType::Text(t) => t.translate(delta),
            ElementType::Image(i) => i.translate(delta),
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;
    use egui::Color32;

    pub fn create_rectangle(position: Pos2, size: Vec2, fill: Color32) -> ElementType {
        ElementType::Rect(shape::Rect::new(ElementId::new(), position, size, fill))
    }

    pub fn create_circle(position: Pos2, radius: f32, fill: Color32) -> ElementType {
        ElementType::Circle(shape::Circle::new(ElementId::new(), position, radius, fill))
    }

    pub fn create_text(
        content: impl Into<String>,
        position: Pos2,
        font_size: f32,
        fill: Color32,
    ) -> ElementType {
        ElementType::Text(text::Text::new(
            ElementId::new(),
            content.into(),
            position,
            font_size,
            fill,
        ))
    }

    /// Create a new image element from encoded source bytes. `size` is the
    /// display size in document coordinates; the encoded bytes are kept so
    /// the image survives serialize/restore.
    pub fn create_image(data: Vec<u8>, size: Vec2, position: Pos2) -> ElementType {
        ElementType::Image(image::Image::new(ElementId::new(), data, size, position))
    }
}
