use egui::Vec2;

// Common constants for all element types
pub const MIN_ELEMENT_SIZE: f32 = 2.0;

/// Clamp a freshly computed display size so degenerate images cannot
/// produce an unselectable element.
pub(crate) fn clamp_size(size: Vec2) -> Vec2 {
    egui::vec2(size.x.max(MIN_ELEMENT_SIZE), size.y.max(MIN_ELEMENT_SIZE))
}
