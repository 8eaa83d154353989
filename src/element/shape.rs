use egui::{Color32, Painter, Pos2, Rect as EguiRect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ElementId};
use crate::renderer::Viewport;

/// Filled rectangle element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    id: ElementId,
    position: Pos2,
    size: Vec2,
    fill: Color32,
}

impl Rect {
    pub(crate) fn new(id: ElementId, position: Pos2, size: Vec2, fill: Color32) -> Self {
        Self {
            id,
            position,
            size,
            fill,
        }
    }

    pub fn fill(&self) -> Color32 {
        self.fill
    }
}

impl Element for Rect {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "rectangle"
    }

    fn rect(&self) -> EguiRect {
        EguiRect::from_min_size(self.position, self.size)
    }

    fn draw(&self, painter: &Painter, view: &Viewport) {
        painter.rect_filled(view.rect_to_screen(self.rect()), 0.0, self.fill);
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

/// Filled circle element. `position` is the top-left corner of the
/// bounding box, matching how the rest of the document is positioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    id: ElementId,
    position: Pos2,
    radius: f32,
    fill: Color32,
}

impl Circle {
    pub(crate) fn new(id: ElementId, position: Pos2, radius: f32, fill: Color32) -> Self {
        Self {
            id,
            position,
            radius,
            fill,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    fn center(&self) -> Pos2 {
        self.position + Vec2::splat(self.radius)
    }
}

impl Element for Circle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "circle"
    }

    fn rect(&self) -> EguiRect {
        EguiRect::from_min_size(self.position, Vec2::splat(self.radius * 2.0))
    }

    fn draw(&self, painter: &Painter, view: &Viewport) {
        painter.circle_filled(
            view.pos_to_screen(self.center()),
            view.scale(self.radius),
            self.fill,
        );
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        (pos - self.center()).length() <= self.radius
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
