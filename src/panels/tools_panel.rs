use log::warn;

use crate::app::{BannerApp, JobKind};
use crate::element::Element as _;
use crate::tools::ImageSource;

/// Left-hand toolbar: add elements, delete, AI enhance, fill colors, and
/// the history readout.
pub fn tools_panel(app: &mut BannerApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            if ui.button("Text").clicked() {
                app.dispatcher.add_text(&mut app.editor);
            }
            if ui.button("Rectangle").clicked() {
                app.dispatcher.add_rectangle(&mut app.editor);
            }
            if ui.button("Circle").clicked() {
                app.dispatcher.add_circle(&mut app.editor);
            }

            ui.separator();

            ui.label("Image URL:");
            ui.text_edit_singleline(&mut app.image_url);
            let fetching = app.is_busy(JobKind::Fetch);
            if ui
                .add_enabled(!fetching, egui::Button::new("Add from URL"))
                .clicked()
            {
                let url = app.image_url.trim().to_owned();
                if url.is_empty() {
                    app.status = Some("Enter an image URL first".to_owned());
                } else {
                    app.start_fetch_image(url);
                }
            }

            if ui.button("Image File…").clicked() {
                add_image_from_disk(app);
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Text fill:");
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut app.dispatcher.text_fill,
                    egui::color_picker::Alpha::Opaque,
                );
            });
            ui.horizontal(|ui| {
                ui.label("Rect fill:");
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut app.dispatcher.rect_fill,
                    egui::color_picker::Alpha::Opaque,
                );
            });
            ui.horizontal(|ui| {
                ui.label("Circle fill:");
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut app.dispatcher.circle_fill,
                    egui::color_picker::Alpha::Opaque,
                );
            });

            ui.separator();

            let has_active = app.editor.document().active_id().is_some();
            if ui
                .add_enabled(has_active, egui::Button::new("Delete"))
                .clicked()
            {
                app.dispatcher.delete_active(&mut app.editor);
            }

            let active_is_image = app
                .editor
                .document()
                .active_element()
                .is_some_and(|el| el.element_type() == "image");
            let enhancing = app.is_busy(JobKind::Enhance);
            if ui
                .add_enabled(active_is_image && !enhancing, egui::Button::new("AI Enhance"))
                .clicked()
            {
                app.start_enhance();
            }
            if enhancing {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Enhancing…");
                });
            }

            ui.separator();

            let cursor = app.editor.history_cursor().map_or(0, |c| c + 1);
            ui.label(format!("History: {}/{}", cursor, app.editor.history_len()));
        });
}

fn add_image_from_disk(app: &mut BannerApp) {
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
    if let Err(err) = app.dispatcher.add_image(
        &mut app.editor,
        ImageSource::Bytes(bytes),
        &*app.client,
        app.canvas_size,
    ) {
        app.status = Some(format!("Could not add image: {err}"));
    }
}
