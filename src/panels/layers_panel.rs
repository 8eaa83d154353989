use crate::app::BannerApp;
use crate::event::ReorderDirection;
use crate::layer::LayerEntry;

/// Right-hand panel: the layer list (topmost-first) with selection and
/// front/back reordering, plus the paywalled HD export button.
pub fn layers_panel(app: &mut BannerApp, ctx: &egui::Context) {
    egui::SidePanel::right("layers_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Layers");

            let entries: Vec<LayerEntry> = app.editor.layers().clone();
            if entries.is_empty() {
                ui.label("No layers yet...");
            }

            for entry in entries {
                ui.horizontal(|ui| {
                    let label = format!("{} ({})", entry.name, entry.kind);
                    if ui.selectable_label(entry.active, label).clicked() {
                        app.editor.document_mut().set_active(Some(entry.id));
                    }
                    if ui.small_button("Front").clicked() {
                        app.dispatcher
                            .reorder(&mut app.editor, entry.id, ReorderDirection::ToFront);
                    }
                    if ui.small_button("Back").clicked() {
                        app.dispatcher
                            .reorder(&mut app.editor, entry.id, ReorderDirection::ToBack);
                    }
                });
            }

            ui.separator();

            let label = if app.editor.premium() {
                "Export HD"
            } else {
                "Export (Locked)"
            };
            if ui.button(label).clicked() {
                app.start_export(ctx);
            }
        });
}
