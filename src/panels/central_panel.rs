use egui::Vec2;

use crate::app::{BannerApp, DragState};
use crate::renderer::Viewport;

/// The canvas: paints the document and handles selection and drag-to-move.
/// A drag is previewed visually and committed as a single document
/// mutation when the pointer is released.
pub fn central_panel(app: &mut BannerApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let desired = app.canvas_size * app.zoom;
            let (response, painter) =
                ui.allocate_painter(desired, egui::Sense::click_and_drag());
            app.canvas_screen_rect = response.rect;
            let view = Viewport::new(response.rect.min, app.zoom);

            if response.clicked() {
                if let Some(pointer) = response.interact_pointer_pos() {
                    let hit = app.editor.document().hit_test(view.pos_from_screen(pointer));
                    app.editor.document_mut().set_active(hit);
                }
            }

            if response.drag_started() {
                if let Some(pointer) = response.interact_pointer_pos() {
                    match app.editor.document().hit_test(view.pos_from_screen(pointer)) {
                        Some(id) => {
                            app.editor.document_mut().set_active(Some(id));
                            app.drag = Some(DragState {
                                id,
                                delta: Vec2::ZERO,
                            });
                        }
                        None => app.editor.document_mut().set_active(None),
                    }
                }
            }

            if response.dragged() {
                if let Some(drag) = &mut app.drag {
                    drag.delta += view.vec_from_screen(response.drag_delta());
                }
            }

            if response.drag_stopped() {
                if let Some(drag) = app.drag.take() {
                    if drag.delta != Vec2::ZERO {
                        app.editor.document_mut().translate_element(drag.id, drag.delta);
                    }
                }
            }

            let drag_preview = app.drag.as_ref().map(|drag| (drag.id, drag.delta));
            app.renderer.render(
                ctx,
                &painter,
                app.editor.document_mut(),
                &view,
                app.canvas_size,
                drag_preview,
            );
        });
    });
}
