pub mod central_panel;
pub mod generate_panel;
pub mod layers_panel;
pub mod tools_panel;

use crate::app::BannerApp;

/// Top bar: undo/redo, zoom controls, canvas size, subscription notice,
/// and the one-shot status message.
pub fn top_bar(app: &mut BannerApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let can_undo = app.editor.can_undo();
            let can_redo = app.editor.can_redo();
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                app.editor.undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                app.editor.redo();
            }

            ui.separator();

            if ui.button("-").clicked() {
                app.zoom_out();
            }
            ui.label(format!("{:.0}%", app.zoom * 100.0));
            if ui.button("+").clicked() {
                app.zoom_in();
            }
            if ui.button("Reset").clicked() {
                app.reset_zoom();
            }

            ui.separator();

            ui.label("W:");
            let mut width = app.canvas_size.x as u32;
            ui.add(egui::DragValue::new(&mut width).range(100..=4096));
            ui.label("H:");
            let mut height = app.canvas_size.y as u32;
            ui.add(egui::DragValue::new(&mut height).range(100..=4096));
            app.canvas_size = egui::vec2(width as f32, height as f32);

            ui.separator();

            if !app.editor.premium() {
                ui.label("FREE plan");
                if ui.button("Subscribe Now").clicked() {
                    app.editor.subscribe_premium();
                    app.status =
                        Some("Subscription activated: enjoy HD exports and more tools!".to_owned());
                }
                ui.separator();
            }

            if let Some(status) = &app.status {
                ui.label(status.clone());
            }
        });
    });
}
