use crate::SketchApp;
use crate::command::Command;
use crate::components::ToolButton;
use crate::tool::ToolSelection;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Markers");

            let markers = app.config().markers.clone();
            ui.horizontal(|ui| {
                for preset in &markers {
                    let selected = matches!(
                        app.sketchpad().active_tool(),
                        ToolSelection::Marker { thickness } if *thickness == preset.thickness
                    );
                    if ui.selectable_label(selected, &preset.label).clicked() {
                        if let Err(err) = app.sketchpad_mut().select_marker(preset.thickness) {
                            log::warn!("Marker preset {} rejected: {err}", preset.label);
                        }
                    }
                }
            });
            ui.separator();

            ui.heading("Stickers");

            // Collect the palette first to avoid borrowing issues
            let stickers = app.config().stickers.clone();
            ui.horizontal_wrapped(|ui| {
                for symbol in &stickers {
                    let selected = matches!(
                        app.sketchpad().active_tool(),
                        ToolSelection::Stamp { symbol: active } if active == symbol
                    );
                    if ToolButton::new(symbol, selected).show(ui).clicked() {
                        if let Err(err) = app.sketchpad_mut().set_stamp_symbol(symbol) {
                            log::warn!("Sticker {symbol:?} rejected: {err}");
                        }
                    }
                }
            });

            ui.horizontal(|ui| {
                let field = ui.add(
                    egui::TextEdit::singleline(app.custom_sticker_mut())
                        .hint_text("Custom sticker")
                        .desired_width(100.0),
                );
                let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    app.add_custom_sticker();
                }
            });

            let mut rotation = app.sketchpad().tools().rotation();
            ui.horizontal(|ui| {
                ui.label("Rotation:");
                if ui
                    .add(egui::Slider::new(&mut rotation, 0.0..=360.0).suffix("°"))
                    .changed()
                {
                    if let Err(err) = app.sketchpad_mut().set_rotation(rotation) {
                        log::warn!("Rotation rejected: {err}");
                    }
                }
            });
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.sketchpad().history().can_undo();
                let can_redo = app.sketchpad().history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.execute_command(Command::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.execute_command(Command::Redo);
                }
                if ui.button("Clear").clicked() {
                    app.execute_command(Command::Clear);
                }
            });

            let exporting = app.is_exporting();
            if ui.add_enabled(!exporting, egui::Button::new("Export")).clicked() {
                app.execute_command(Command::Export);
            }
            if let Some(status) = app.status() {
                ui.label(status);
            }
            ui.separator();

            let history = app.sketchpad().history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo stack size: {}", history.committed().len()));
                ui.label(format!("Redo stack size: {}", history.redo_buffer().len()));
            });
            ui.label(format!(
                "Tool: {} ({})",
                app.sketchpad().active_tool().name(),
                if app.sketchpad().state().is_drawing() { "drawing" } else { "idle" }
            ));
        });
}
