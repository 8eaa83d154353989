use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::document::Document;
use crate::element::{Element, ElementId};

/// Background color of the design canvas.
const CANVAS_FILL: Color32 = Color32::from_rgb(0xfe, 0xfe, 0xfe);
const SELECTION_STROKE: Stroke = Stroke {
    width: 1.5,
    color: Color32::from_rgb(0x33, 0x99, 0xff),
};

/// Maps document coordinates to screen coordinates: the canvas origin on
/// screen plus a uniform zoom factor.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub origin: Pos2,
    pub zoom: f32,
}

impl Viewport {
    pub fn new(origin: Pos2, zoom: f32) -> Self {
        Self { origin, zoom }
    }

    pub fn pos_to_screen(&self, pos: Pos2) -> Pos2 {
        self.origin + pos.to_vec2() * self.zoom
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.pos_to_screen(rect.min), self.pos_to_screen(rect.max))
    }

    pub fn scale(&self, value: f32) -> f32 {
        value * self.zoom
    }

    pub fn pos_from_screen(&self, pos: Pos2) -> Pos2 {
        ((pos - self.origin) / self.zoom).to_pos2()
    }

    pub fn vec_from_screen(&self, vec: Vec2) -> Vec2 {
        vec / self.zoom
    }

    /// A viewport shifted by a document-space delta, used to preview an
    /// in-progress drag without mutating the document.
    fn shifted(&self, delta: Vec2) -> Self {
        Self {
            origin: self.origin + delta * self.zoom,
            zoom: self.zoom,
        }
    }
}

/// Paints the document onto an egui painter each frame: canvas backdrop,
/// elements back-to-front, and the selection outline.
pub struct Renderer;

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        ctx: &egui::Context,
        painter: &Painter,
        document: &mut Document,
        view: &Viewport,
        canvas_size: Vec2,
        drag_preview: Option<(ElementId, Vec2)>,
    ) {
        painter.rect_filled(
            view.rect_to_screen(Rect::from_min_size(Pos2::ZERO, canvas_size)),
            0.0,
            CANVAS_FILL,
        );

        // Upload any image textures that are not resident yet.
        for element in document.elements_mut() {
            element.prepare(ctx);
        }

        for element in document.elements() {
            match drag_preview {
                Some((id, delta)) if id == element.id() => {
                    element.draw(painter, &view.shifted(delta));
                }
                _ => element.draw(painter, view),
            }
        }

        if let Some(active) = document.active_element() {
            let mut rect = active.rect();
            if let Some((id, delta)) = drag_preview {
                if id == active.id() {
                    rect = rect.translate(delta);
                }
            }
            painter.rect_stroke(view.rect_to_screen(rect).expand(2.0), 0.0, SELECTION_STROKE);
        }
    }
}
