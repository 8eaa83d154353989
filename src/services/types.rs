use serde::Serialize;

/// Shape overlay baked into the generated banner by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShapeOverlay {
    pub shape_type: ShapeKind,
    pub position: [i32; 2],
    /// Width/height for rectangles; `[radius, _]` for circles.
    pub size: [u32; 2],
    pub color: [u8; 3],
}

/// Body of `POST /api/generate-banner`. Field names and units follow the
/// backend contract; colors are `[r, g, b]` triples in 0–255.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
    pub width: u32,
    pub height: u32,
    pub overlay_text: String,
    pub text_position: [i32; 2],
    pub text_color: [u8; 3],
    pub text_bold: bool,
    pub text_outline_color: [u8; 3],
    pub text_outline_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeOverlay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_position: Option<[i32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_resize: Option<[u32; 2]>,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            prompt: "A stunning eCommerce product banner".to_owned(),
            num_inference_steps: 250,
            guidance_scale: 7.5,
            width: 1200,
            height: 400,
            overlay_text: "SALE!".to_owned(),
            text_position: [50, 50],
            text_color: [255, 0, 0],
            text_bold: false,
            text_outline_color: [0, 0, 0],
            text_outline_width: 2,
            shape: None,
            logo_path: None,
            logo_position: None,
            logo_resize: None,
        }
    }
}
