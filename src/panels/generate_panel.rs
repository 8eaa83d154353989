use log::warn;

use crate::app::{BannerApp, JobKind};
use crate::color;
use crate::services::{GenerateRequest, ShapeKind, ShapeOverlay};

/// Everything the generation form collects. Colors are edited as hex
/// strings and converted to `[r, g, b]` triples when the request is built.
#[derive(Debug, Clone)]
pub struct GenerateForm {
    pub prompt: String,
    pub steps: u32,
    pub guidance: f32,
    pub width: u32,
    pub height: u32,

    pub overlay_text: String,
    pub text_x: i32,
    pub text_y: i32,
    pub text_color: String,
    pub text_bold: bool,
    pub outline_color: String,
    pub outline_width: u32,

    pub with_shape: bool,
    pub shape_kind: ShapeKind,
    pub shape_x: i32,
    pub shape_y: i32,
    pub shape_w: u32,
    pub shape_h: u32,
    pub shape_color: String,

    pub logo_path: Option<String>,
    pub logo_x: i32,
    pub logo_y: i32,
    pub logo_resize: bool,
    pub logo_w: u32,
    pub logo_h: u32,
}

impl Default for GenerateForm {
    fn default() -> Self {
        Self {
            prompt: "A stunning eCommerce product banner".to_owned(),
            steps: 250,
            guidance: 7.5,
            width: 1200,
            height: 400,
            overlay_text: "SALE!".to_owned(),
            text_x: 50,
            text_y: 50,
            text_color: "#ff0000".to_owned(),
            text_bold: false,
            outline_color: "#000000".to_owned(),
            outline_width: 2,
            with_shape: false,
            shape_kind: ShapeKind::Rectangle,
            shape_x: 300,
            shape_y: 100,
            shape_w: 200,
            shape_h: 100,
            shape_color: "#00ff00".to_owned(),
            logo_path: None,
            logo_x: 10,
            logo_y: 10,
            logo_resize: false,
            logo_w: 100,
            logo_h: 100,
        }
    }
}

impl GenerateForm {
    /// Builds the request body, or a user-facing message when a hex color
    /// does not parse.
    pub fn to_request(&self) -> Result<GenerateRequest, String> {
        let text_color = color::parse_hex(&self.text_color)
            .ok_or_else(|| format!("Invalid text color: {}", self.text_color))?;
        let text_outline_color = color::parse_hex(&self.outline_color)
            .ok_or_else(|| format!("Invalid outline color: {}", self.outline_color))?;

        let shape = if self.with_shape {
            let shape_color = color::parse_hex(&self.shape_color)
                .ok_or_else(|| format!("Invalid shape color: {}", self.shape_color))?;
            Some(ShapeOverlay {
                shape_type: self.shape_kind,
                position: [self.shape_x, self.shape_y],
                size: [self.shape_w, self.shape_h],
                color: shape_color,
            })
        } else {
            None
        };

        Ok(GenerateRequest {
            prompt: self.prompt.clone(),
            num_inference_steps: self.steps,
            guidance_scale: self.guidance,
            width: self.width,
            height: self.height,
            overlay_text: self.overlay_text.clone(),
            text_position: [self.text_x, self.text_y],
            text_color,
            text_bold: self.text_bold,
            text_outline_color,
            text_outline_width: self.outline_width,
            shape,
            logo_path: self.logo_path.clone(),
            logo_position: self.logo_path.as_ref().map(|_| [self.logo_x, self.logo_y]),
            logo_resize: self
                .logo_path
                .as_ref()
                .filter(|_| self.logo_resize)
                .map(|_| [self.logo_w, self.logo_h]),
        })
    }
}

/// The AI banner configuration form.
pub fn generate_panel(app: &mut BannerApp, ctx: &egui::Context) {
    egui::SidePanel::left("generate_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("AI Banner Config");

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label("Prompt");
                ui.text_edit_singleline(&mut app.form.prompt);

                ui.horizontal(|ui| {
                    ui.label("Steps:");
                    ui.add(egui::DragValue::new(&mut app.form.steps).range(1..=1000));
                    ui.label("Guidance:");
                    ui.add(
                        egui::DragValue::new(&mut app.form.guidance)
                            .range(1.0..=20.0)
                            .speed(0.1),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Size:");
                    ui.add(egui::DragValue::new(&mut app.form.width).range(64..=4096));
                    ui.label("x");
                    ui.add(egui::DragValue::new(&mut app.form.height).range(64..=4096));
                });

                ui.separator();

                ui.label("Overlay Text");
                ui.text_edit_singleline(&mut app.form.overlay_text);
                ui.horizontal(|ui| {
                    ui.label("Position:");
                    ui.add(egui::DragValue::new(&mut app.form.text_x));
                    ui.add(egui::DragValue::new(&mut app.form.text_y));
                    ui.checkbox(&mut app.form.text_bold, "Bold");
                });
                hex_color_row(ui, "Color:", &mut app.form.text_color);
                hex_color_row(ui, "Outline:", &mut app.form.outline_color);
                ui.horizontal(|ui| {
                    ui.label("Outline width:");
                    ui.add(egui::DragValue::new(&mut app.form.outline_width).range(0..=20));
                });

                ui.separator();

                ui.checkbox(&mut app.form.with_shape, "Shape overlay");
                if app.form.with_shape {
                    ui.horizontal(|ui| {
                        ui.selectable_value(
                            &mut app.form.shape_kind,
                            ShapeKind::Rectangle,
                            "Rectangle",
                        );
                        ui.selectable_value(&mut app.form.shape_kind, ShapeKind::Circle, "Circle");
                    });
                    ui.horizontal(|ui| {
                        ui.label("Position:");
                        ui.add(egui::DragValue::new(&mut app.form.shape_x));
                        ui.add(egui::DragValue::new(&mut app.form.shape_y));
                    });
                    ui.horizontal(|ui| {
                        ui.label("Size:");
                        ui.add(egui::DragValue::new(&mut app.form.shape_w).range(1..=4096));
                        ui.add(egui::DragValue::new(&mut app.form.shape_h).range(1..=4096));
                    });
                    hex_color_row(ui, "Color:", &mut app.form.shape_color);
                }

                ui.separator();

                match &app.form.logo_path {
                    Some(path) => {
                        ui.label(format!("Logo: {path}"));
                        if ui.button("Remove logo").clicked() {
                            app.form.logo_path = None;
                        }
                    }
                    None => {
                        if ui.button("Upload Logo…").clicked() {
                            upload_logo(app);
                        }
                    }
                }
                if app.form.logo_path.is_some() {
                    ui.horizontal(|ui| {
                        ui.label("Position:");
                        ui.add(egui::DragValue::new(&mut app.form.logo_x));
                        ui.add(egui::DragValue::new(&mut app.form.logo_y));
                    });
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut app.form.logo_resize, "Resize to");
                        ui.add(egui::DragValue::new(&mut app.form.logo_w).range(1..=2048));
                        ui.add(egui::DragValue::new(&mut app.form.logo_h).range(1..=2048));
                    });
                }

                ui.separator();

                let generating = app.is_busy(JobKind::Generate);
                let label = if generating {
                    "Generating..."
                } else {
                    "Generate AI Banner"
                };
                if ui
                    .add_enabled(!generating, egui::Button::new(label))
                    .clicked()
                {
                    app.start_generate();
                }
                if generating {
                    ui.spinner();
                }
            });
        });
}

/// A hex color input with a live swatch when the value parses.
fn hex_color_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::TextEdit::singleline(value).desired_width(70.0));
        if let Some(rgb) = color::parse_hex(value) {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color::to_color32(rgb));
        } else {
            ui.colored_label(egui::Color32::RED, "?");
        }
    });
}

fn upload_logo(app: &mut BannerApp) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("image", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
        .pick_file()
    else {
        return;
    };
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("failed to read {}: {}", path.display(), err);
            app.status = Some(format!("Could not read {}: {err}", path.display()));
            return;
        }
    };
    match app.client.upload_logo(&bytes) {
        Ok(token) => {
            app.status = Some("Logo uploaded".to_owned());
            app.form.logo_path = Some(token);
        }
        Err(err) => {
            warn!("logo upload failed: {err}");
            app.status = Some(format!("Logo upload failed: {err}"));
        }
    }
}
