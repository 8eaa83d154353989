use egui::{Color32, Context, Painter, Pos2, Rect as EguiRect, TextureHandle, Vec2};
use log::warn;
use serde::{Deserialize, Serialize};

use super::{Element, ElementId};
use crate::renderer::Viewport;

/// Image element backed by its encoded source bytes.
///
/// The bytes are the element's identity for serialization and for the
/// enhancement service; the GPU texture is a per-session cache rebuilt on
/// demand after restore.
#[derive(Clone, Serialize, Deserialize)]
pub struct Image {
    id: ElementId,
    data: Vec<u8>,
    size: Vec2,
    position: Pos2,

    #[serde(skip)]
    texture: Option<TextureHandle>,
    #[serde(skip)]
    decode_failed: bool,
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.data == other.data
            && self.size == other.size
            && self.position == other.position
    }
}

// Custom Debug implementation since the texture handle is noise
impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("data_len", &self.data.len())
            .field("size", &self.size)
            .field("position", &self.position)
            .finish()
    }
}

impl Image {
    pub(crate) fn new(id: ElementId, data: Vec<u8>, size: Vec2, position: Pos2) -> Self {
        Self {
            id,
            data,
            size,
            position,
            texture: None,
            decode_failed: false,
        }
    }

    /// The encoded source bytes, as submitted to the enhancement service.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Decode and upload the texture if it is not resident yet. Stored
    /// bytes were validated at creation, so a failure here is logged once
    /// and the placeholder is drawn instead.
    pub(crate) fn ensure_texture(&mut self, ctx: &Context) {
        if self.texture.is_some() || self.decode_failed {
            return;
        }

        match image::load_from_memory(&self.data) {
            Ok(decoded) => {
                let size = [decoded.width() as usize, decoded.height() as usize];
                let rgba = decoded.to_rgba8();
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());
                let name = format!("image_{}", self.id);
                self.texture = Some(ctx.load_texture(&name, color_image, egui::TextureOptions::LINEAR));
            }
            Err(err) => {
                warn!("failed to decode image {}: {}", self.id, err);
                self.decode_failed = true;
            }
        }
    }
}

impl Element for Image {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "image"
    }

    fn rect(&self) -> EguiRect {
        EguiRect::from_min_size(self.position, self.size)
    }

    fn draw(&self, painter: &Painter, view: &Viewport) {
        let rect = view.rect_to_screen(self.rect());
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                EguiRect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        } else {
            // Placeholder until the texture is resident
            painter.rect_filled(rect, 0.0, Color32::from_gray(200));
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::from_gray(100)));
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
