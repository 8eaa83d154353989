use eframe::egui;
use log::warn;

/// Turns image files dropped onto the window into canvas images.
pub struct FileHandler {
    processed_files: Vec<String>,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            processed_files: Vec::new(),
        }
    }

    /// Collects the bytes of any image files dropped this frame. Files
    /// already handled in this session are skipped, so holding a file over
    /// the window cannot add it twice.
    pub fn take_dropped_images(&mut self, ctx: &egui::Context) -> Vec<Vec<u8>> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut images = Vec::new();

        for file in &dropped {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            if self.processed_files.contains(&file_name) {
                continue;
            }

            if !is_image_file(file) {
                warn!("dropped file is not a supported image type: {file_name}");
                continue;
            }

            if let Some(bytes) = &file.bytes {
                images.push(bytes.to_vec());
                self.processed_files.push(file_name);
            } else if let Some(path) = &file.path {
                match std::fs::read(path) {
                    Ok(bytes) => {
                        images.push(bytes);
                        self.processed_files.push(file_name);
                    }
                    Err(err) => {
                        warn!("failed to read dropped file {}: {}", path.display(), err);
                    }
                }
            } else {
                warn!("dropped file has no accessible data: {file_name}");
            }
        }

        images
    }

    /// Dims the window and lists the files while a drag hovers over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Dropping files:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            egui::TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        path.extension().is_some_and(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        })
    } else {
        false
    }
}
