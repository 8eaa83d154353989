use egui::{Align2, Color32, FontId, Painter, Pos2, Rect as EguiRect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ElementId};
use crate::renderer::Viewport;

/// Text element. The bounding rectangle is an estimate based on font
/// metrics; exact glyph layout happens at paint time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    id: ElementId,
    content: String,
    position: Pos2,
    font_size: f32,
    fill: Color32,
}

impl Text {
    pub(crate) fn new(
        id: ElementId,
        content: String,
        position: Pos2,
        font_size: f32,
        fill: Color32,
    ) -> Self {
        Self {
            id,
            content,
            position,
            font_size,
            fill,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl Element for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "text"
    }

    fn rect(&self) -> EguiRect {
        // Rough advance-width estimate, good enough for hit testing and
        // layer thumbnails without a font pass.
        let width = (self.content.chars().count() as f32 * self.font_size * 0.55).max(self.font_size);
        EguiRect::from_min_size(self.position, Vec2::new(width, self.font_size * 1.2))
    }

    fn draw(&self, painter: &Painter, view: &Viewport) {
        painter.text(
            view.pos_to_screen(self.position),
            Align2::LEFT_TOP,
            &self.content,
            FontId::proportional(view.scale(self.font_size)),
            self.fill,
        );
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
