use crate::command::Command;
use crate::config::{STORAGE_KEY, SketchConfig};
#[cfg(not(target_arch = "wasm32"))]
use crate::export::ExportJob;
use crate::input::{InputHandler, route_event};
use crate::panels::{central_panel, tools_panel};
use crate::sketchpad::Sketchpad;

/// The host application: tools panel on the left, canvas in the middle.
///
/// Only [`SketchConfig`] is persisted between runs; drawings are not.
pub struct SketchApp {
    config: SketchConfig,
    sketchpad: Sketchpad,
    input: InputHandler,
    /// Text typed into the custom sticker field
    custom_sticker: String,
    #[cfg(not(target_arch = "wasm32"))]
    export_job: Option<ExportJob>,
    status: Option<String>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::with_config(SketchConfig::default())
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<SketchConfig>(storage, STORAGE_KEY))
            .unwrap_or_default()
            .sanitized();

        let app = Self::with_config(config);

        // Any change to the drawing or the tool ghost needs a fresh frame
        let ctx = cc.egui_ctx.clone();
        app.sketchpad.on_change(move |_| ctx.request_repaint());

        app
    }

    pub fn with_config(config: SketchConfig) -> Self {
        let sketchpad = Sketchpad::new(&config);
        Self {
            config,
            sketchpad,
            input: InputHandler::new(),
            custom_sticker: String::new(),
            #[cfg(not(target_arch = "wasm32"))]
            export_job: None,
            status: None,
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn sketchpad(&self) -> &Sketchpad {
        &self.sketchpad
    }

    pub fn sketchpad_mut(&mut self) -> &mut Sketchpad {
        &mut self.sketchpad
    }

    pub fn custom_sticker_mut(&mut self) -> &mut String {
        &mut self.custom_sticker
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_exporting(&self) -> bool {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.export_job.is_some()
        }
        #[cfg(target_arch = "wasm32")]
        {
            false
        }
    }

    /// Feed this frame's pointer and keyboard input into the sketchpad
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        for event in self.input.process_input(ctx, canvas_rect) {
            if let Some(command) = route_event(&event, &mut self.sketchpad) {
                self.execute_command(command);
            }
        }
    }

    pub fn execute_command(&mut self, command: Command) {
        log::debug!("Command: {}", command.label());
        if let Some(Command::Export) = self.sketchpad.execute(command) {
            self.start_export();
        }
    }

    /// Select the custom sticker typed by the user and add it to the palette.
    /// Blank input is ignored.
    pub fn add_custom_sticker(&mut self) {
        let symbol = std::mem::take(&mut self.custom_sticker);
        match self.sketchpad.set_stamp_symbol(&symbol) {
            Ok(()) => {
                if self.config.add_sticker(&symbol) {
                    log::info!("Added custom sticker {}", symbol.trim());
                }
            }
            Err(err) => log::debug!("Ignoring custom sticker: {err}"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn start_export(&mut self) {
        if self.export_job.is_some() {
            log::warn!("Export already running");
            return;
        }
        self.status = Some("Exporting…".to_owned());
        self.export_job = Some(ExportJob::spawn(
            self.sketchpad.history().snapshot(),
            self.sketchpad.exporter().clone(),
            self.sketchpad.renderer().clone(),
        ));
    }

    #[cfg(target_arch = "wasm32")]
    fn start_export(&mut self) {
        let watch = crate::util::time::Stopwatch::start();
        let outcome = self.sketchpad.export().and_then(|artifact| {
            log::info!("Export took {:.3}s", watch.elapsed_secs());
            artifact.download().map(|()| artifact)
        });
        self.status = Some(match outcome {
            Ok(artifact) => format!("Downloaded {} ({} bytes)", artifact.file_name, artifact.bytes.len()),
            Err(err) => {
                log::error!("Export failed: {err}");
                format!("Export failed: {err}")
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn poll_export(&mut self, ctx: &egui::Context) {
        let Some(job) = &mut self.export_job else {
            return;
        };
        let Some(result) = job.poll() else {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
            return;
        };
        self.export_job = None;

        let outcome = result.and_then(|artifact| artifact.save_to(std::path::Path::new(".")));
        self.status = Some(match outcome {
            Ok(path) => format!("Saved {}", path.display()),
            Err(err) => {
                log::error!("Export failed: {err}");
                format!("Export failed: {err}")
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn poll_export(&mut self, _ctx: &egui::Context) {}
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.poll_export(ctx);
    }
}
