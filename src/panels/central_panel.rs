use crate::SketchApp;
use crate::target::PainterTarget;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Sketchpad");

        let size = egui::Vec2::splat(app.config().canvas_size);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        // Handle input before painting so the frame shows its effect
        app.handle_input(ctx, canvas_rect);

        let painter = painter.with_clip_rect(canvas_rect);
        let mut target = PainterTarget::new(&painter, canvas_rect);
        app.sketchpad().render(&mut target);

        painter.rect_stroke(
            canvas_rect,
            0.0,
            egui::Stroke::new(1.0, egui::Color32::GRAY),
        );

        // The tool ghost stands in for the cursor
        if app.sketchpad().preview().is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }
    });
}
