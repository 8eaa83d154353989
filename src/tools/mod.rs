use egui::{Color32, Pos2, Vec2, pos2, vec2};
use log::info;
use thiserror::Error;

use crate::editor::Editor;
use crate::element::{Element, ElementId, factory};
use crate::event::ReorderDirection;
use crate::services::{EnhanceImage, FetchImage, ServiceError};

/// New images are scaled to this display width, preserving aspect ratio.
pub const IMAGE_TARGET_WIDTH: f32 = 200.0;

const TEXT_DEFAULT_CONTENT: &str = "New Text";
const TEXT_DEFAULT_POS: Pos2 = pos2(100.0, 100.0);
const TEXT_DEFAULT_SIZE: f32 = 24.0;
const TEXT_DEFAULT_FILL: Color32 = Color32::from_rgb(0x00, 0x2b, 0x80);

const RECT_DEFAULT_POS: Pos2 = pos2(150.0, 150.0);
const RECT_DEFAULT_SIZE: Vec2 = vec2(100.0, 100.0);
const RECT_DEFAULT_FILL: Color32 = Color32::from_rgb(0x00, 0x56, 0xb3);

const CIRCLE_DEFAULT_POS: Pos2 = pos2(200.0, 200.0);
const CIRCLE_DEFAULT_RADIUS: f32 = 50.0;
const CIRCLE_DEFAULT_FILL: Color32 = Color32::from_rgb(0x52, 0xa0, 0xff);

/// Where an image's bytes come from: a remote URL or an already-read file.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Url(String),
    Bytes(Vec<u8>),
}

/// Non-fatal failures surfaced to the user as a notification. The
/// document and history are untouched when any of these occur.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("service request failed: {0}")]
    Service(#[from] ServiceError),
    #[error("could not decode image data: {0}")]
    Decode(#[from] image::ImageError),
    #[error("select an image to enhance")]
    EnhanceRequiresImage,
}

/// An enhancement in flight: which element it replaces and the bytes that
/// were submitted. Produced by [`ToolDispatcher::begin_enhance`] and
/// consumed by [`ToolDispatcher::finish_enhance`] once the service
/// responds.
#[derive(Debug, Clone)]
pub struct EnhanceJob {
    pub id: ElementId,
    pub data: Vec<u8>,
}

/// Translates discrete toolbar intents into document mutations. Holds the
/// fill colors the toolbar's pickers can adjust; geometry defaults are
/// fixed.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    pub text_fill: Color32,
    pub rect_fill: Color32,
    pub circle_fill: Color32,
}

impl Default for ToolDispatcher {
    fn default() -> Self {
        Self {
            text_fill: TEXT_DEFAULT_FILL,
            rect_fill: RECT_DEFAULT_FILL,
            circle_fill: CIRCLE_DEFAULT_FILL,
        }
    }
}

impl ToolDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text element with default content and makes it active.
    pub fn add_text(&self, editor: &mut Editor) -> ElementId {
        editor.document_mut().add_element(factory::create_text(
            TEXT_DEFAULT_CONTENT,
            TEXT_DEFAULT_POS,
            TEXT_DEFAULT_SIZE,
            self.text_fill,
        ))
    }

    /// Adds a default-sized rectangle and makes it active.
    pub fn add_rectangle(&self, editor: &mut Editor) -> ElementId {
        editor.document_mut().add_element(factory::create_rectangle(
            RECT_DEFAULT_POS,
            RECT_DEFAULT_SIZE,
            self.rect_fill,
        ))
    }

    /// Adds a default-sized circle and makes it active.
    pub fn add_circle(&self, editor: &mut Editor) -> ElementId {
        editor.document_mut().add_element(factory::create_circle(
            CIRCLE_DEFAULT_POS,
            CIRCLE_DEFAULT_RADIUS,
            self.circle_fill,
        ))
    }

    /// Resolves an image source, scales it to the target width, centers it
    /// in the canvas, adds it, and makes it active. On any fetch or decode
    /// failure the document is left unchanged.
    pub fn add_image(
        &self,
        editor: &mut Editor,
        source: ImageSource,
        fetcher: &dyn FetchImage,
        canvas_size: Vec2,
    ) -> Result<ElementId, ToolError> {
        let bytes = match source {
            ImageSource::Url(url) => fetcher.fetch_image(&url)?,
            ImageSource::Bytes(bytes) => bytes,
        };
        self.insert_image(editor, bytes, canvas_size)
    }

    fn insert_image(
        &self,
        editor: &mut Editor,
        bytes: Vec<u8>,
        canvas_size: Vec2,
    ) -> Result<ElementId, ToolError> {
        // Validate and measure before touching the document.
        let decoded = image::load_from_memory(&bytes)?;
        let scale = IMAGE_TARGET_WIDTH / decoded.width() as f32;
        let size = crate::element::clamp_size(vec2(
            IMAGE_TARGET_WIDTH,
            decoded.height() as f32 * scale,
        ));
        let position = ((canvas_size - size) / 2.0).to_pos2();
        info!(
            "adding image {}x{} scaled to {:.0}x{:.0}",
            decoded.width(),
            decoded.height(),
            size.x,
            size.y
        );
        Ok(editor
            .document_mut()
            .add_element(factory::create_image(bytes, size, position)))
    }

    /// Removes the active element, if any.
    pub fn delete_active(&self, editor: &mut Editor) -> bool {
        match editor.document().active_id() {
            Some(id) => editor.document_mut().remove_element(id),
            None => false,
        }
    }

    /// Moves the referenced element to the front or back of the z-order.
    pub fn reorder(&self, editor: &mut Editor, id: ElementId, direction: ReorderDirection) -> bool {
        editor.document_mut().reorder(id, direction)
    }

    /// Starts an enhancement of the active element. Valid only when the
    /// active element is an image; rejected without mutating otherwise.
    pub fn begin_enhance(&self, editor: &Editor) -> Result<EnhanceJob, ToolError> {
        let Some(element) = editor.document().active_element() else {
            return Err(ToolError::EnhanceRequiresImage);
        };
        let Some(image) = element.as_image() else {
            return Err(ToolError::EnhanceRequiresImage);
        };
        Ok(EnhanceJob {
            id: element.id(),
            data: image.data().to_vec(),
        })
    }

    /// Applies a completed enhancement: removes the original element and
    /// appends the enhanced image, which therefore becomes the front-most
    /// layer regardless of where the original sat in the z-order. The
    /// original's position and display size are reused when it still
    /// exists; a late response after the original was deleted falls back
    /// to centered placement.
    pub fn finish_enhance(
        &self,
        editor: &mut Editor,
        old_id: ElementId,
        enhanced: Vec<u8>,
        canvas_size: Vec2,
    ) -> Result<ElementId, ToolError> {
        // Decode first so a bad payload leaves the document unchanged.
        let decoded = image::load_from_memory(&enhanced)?;
        let placement = editor.document().find_element(old_id).map(|el| el.rect());

        editor.document_mut().remove_element(old_id);
        let (size, position) = match placement {
            Some(rect) => (rect.size(), rect.min),
            None => {
                let scale = IMAGE_TARGET_WIDTH / decoded.width() as f32;
                let size = crate::element::clamp_size(vec2(
                    IMAGE_TARGET_WIDTH,
                    decoded.height() as f32 * scale,
                ));
                (size, ((canvas_size - size) / 2.0).to_pos2())
            }
        };
        Ok(editor
            .document_mut()
            .add_element(factory::create_image(enhanced, size, position)))
    }

    /// Blocking convenience over `begin_enhance` + `finish_enhance` for
    /// callers that are not on the UI thread.
    pub fn enhance_active(
        &self,
        editor: &mut Editor,
        service: &dyn EnhanceImage,
        canvas_size: Vec2,
    ) -> Result<ElementId, ToolError> {
        let job = self.begin_enhance(editor)?;
        let enhanced = service.enhance_image(&job.data)?;
        self.finish_enhance(editor, job.id, enhanced, canvas_size)
    }
}
