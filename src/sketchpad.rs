use egui::Pos2;

use crate::command::{Command, History};
use crate::config::SketchConfig;
use crate::drawable::{Drawable, Stroke};
use crate::error::SketchResult;
use crate::event::{EventBus, SketchEvent};
use crate::export::{ExportArtifact, Exporter};
use crate::preview::{PointerTracker, ToolPreview};
use crate::renderer::Renderer;
use crate::state::EditorState;
use crate::target::PaintTarget;
use crate::tool::{ToolSelection, ToolState};

/// The drawing engine: committed log, undo/redo, tool state and preview.
///
/// All mutation happens through the pointer and tool methods below. Each one
/// that changes anything notifies the [`Sketchpad::on_change`] handlers before
/// returning, so a host that re-renders from its handler is always in sync.
#[derive(Debug)]
pub struct Sketchpad {
    history: History,
    tools: ToolState,
    state: EditorState,
    pointer: PointerTracker,
    renderer: Renderer,
    exporter: Exporter,
    event_bus: EventBus,
}

impl Default for Sketchpad {
    fn default() -> Self {
        Self::new(&SketchConfig::default())
    }
}

impl Sketchpad {
    pub fn new(config: &SketchConfig) -> Self {
        let config = config.clone().sanitized();
        Self {
            history: History::new(),
            tools: ToolState::new(config.default_thickness(), config.stamp_size),
            state: EditorState::Idle,
            pointer: PointerTracker::default(),
            renderer: Renderer::default(),
            exporter: config.exporter(),
            event_bus: EventBus::new(),
        }
    }

    /// Register a handler called synchronously after every change
    pub fn on_change(&self, handler: impl FnMut(&SketchEvent) + 'static) {
        self.event_bus.subscribe(Box::new(handler));
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    pub fn set_exporter(&mut self, exporter: Exporter) {
        self.exporter = exporter;
    }

    // --- pointer input ---

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.pointer.move_to(pos);

        if self.state.is_drawing() {
            // The release for the previous gesture never arrived
            log::warn!("Pointer down while drawing; closing the open stroke first");
            self.finish_stroke();
        }

        if let Some(stroke) = self.tools.begin_stroke(pos) {
            let next = EditorState::Drawing { stroke };
            debug_assert!(self.state.can_transition_to(&next));
            self.history.discard_redo();
            self.state = next;
            log::debug!("Stroke started at {pos:?}");
            self.emit(SketchEvent::DrawingChanged);
        } else if let Some(stamp) = self.tools.place_stamp(pos) {
            log::debug!("Placed sticker {:?} at {pos:?}", stamp.symbol());
            self.commit(Drawable::from(stamp));
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        self.pointer.move_to(pos);

        if let Some(stroke) = self.state.in_progress_mut() {
            stroke.drag(pos);
            self.emit(SketchEvent::DrawingChanged);
        } else if self.pointer.is_inside() {
            self.emit(SketchEvent::ToolMoved);
        }
    }

    /// Finish the current gesture. Must be delivered even when the release
    /// happens outside the canvas.
    pub fn pointer_up(&mut self, pos: Pos2) {
        self.pointer.move_to(pos);

        if let Some(stroke) = self.state.in_progress_mut() {
            // Ink reaches the release point, but a click stays a single dot
            if stroke.points().last() != Some(&pos) {
                stroke.drag(pos);
            }
            self.finish_stroke();
        }
    }

    pub fn pointer_enter(&mut self, pos: Pos2) {
        self.pointer.enter(pos);
        self.emit(SketchEvent::ToolMoved);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
        self.emit(SketchEvent::ToolMoved);
    }

    fn finish_stroke(&mut self) {
        if let Some(stroke) = self.state.finish() {
            log::debug!("Stroke finished with {} points", stroke.points().len());
            self.commit(Drawable::from(stroke));
        }
    }

    fn commit(&mut self, drawable: Drawable) {
        self.history.commit(drawable.into_ref());
        log::trace!(
            "Committed {} ({} in log)",
            self.history.committed().last().map_or("?", |d| d.kind()),
            self.history.committed().len()
        );
        self.emit(SketchEvent::DrawingChanged);
    }

    // --- tool selection ---

    /// Switch to the marker. An in-progress stroke keeps its own thickness.
    pub fn select_marker(&mut self, thickness: f32) -> SketchResult<()> {
        self.tools.select_marker(thickness)?;
        log::info!("Marker selected ({thickness})");
        self.emit(SketchEvent::ToolChanged);
        Ok(())
    }

    /// Switch to a sticker. Empty input leaves everything untouched and emits nothing.
    pub fn set_stamp_symbol(&mut self, symbol: &str) -> SketchResult<()> {
        self.tools.select_stamp(symbol)?;
        log::info!("Sticker selected ({})", symbol.trim());
        self.emit(SketchEvent::ToolChanged);
        Ok(())
    }

    pub fn set_rotation(&mut self, degrees: f32) -> SketchResult<()> {
        self.tools.set_rotation(degrees)?;
        self.emit(SketchEvent::ToolChanged);
        Ok(())
    }

    // --- commands ---

    /// Undo the newest drawable. Silently does nothing when the log is empty.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        if changed {
            self.emit(SketchEvent::DrawingChanged);
        }
        changed
    }

    /// Redo the last undone drawable. Silently does nothing when there is none.
    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        if changed {
            self.emit(SketchEvent::DrawingChanged);
        }
        changed
    }

    /// Wipe the log and the redo buffer
    pub fn clear(&mut self) {
        self.history.clear();
        log::info!("Canvas cleared");
        self.emit(SketchEvent::DrawingChanged);
    }

    /// Apply a canvas command. Returns the command back when the host has to
    /// carry it out itself (export needs somewhere to put the file).
    pub fn execute(&mut self, command: Command) -> Option<Command> {
        match command {
            Command::Clear => self.clear(),
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::Export => return Some(command),
        }
        None
    }

    /// Export the committed log on the calling thread
    pub fn export(&self) -> SketchResult<ExportArtifact> {
        self.exporter.export(self.history.committed(), &self.renderer)
    }

    // --- rendering ---

    /// The tool ghost, shown only while idle and hovering the canvas
    pub fn preview(&self) -> Option<ToolPreview> {
        if !self.state.is_idle() {
            return None;
        }
        self.pointer
            .hover_position()
            .map(|pos| self.tools.preview_at(pos))
    }

    pub fn in_progress(&self) -> Option<&Stroke> {
        self.state.in_progress()
    }

    pub fn active_tool(&self) -> &ToolSelection {
        self.tools.selection()
    }

    /// Replay everything onto `target`
    pub fn render(&self, target: &mut dyn PaintTarget) {
        let preview = self.preview();
        self.renderer.render(
            target,
            self.history.committed(),
            self.state.in_progress(),
            preview.as_ref(),
        );
    }

    fn emit(&self, event: SketchEvent) {
        if event.affects_drawing() {
            log::trace!("Drawing changed, redo depth {}", self.history.redo_buffer().len());
        }
        self.event_bus.emit(event);
    }
}
