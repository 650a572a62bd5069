/// Notifications emitted synchronously after the sketchpad changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchEvent {
    /// The committed log or the in-progress stroke changed
    DrawingChanged,
    /// The pointer moved while idle, or entered/left the canvas
    ToolMoved,
    /// The tool selection or rotation changed
    ToolChanged,
}

impl SketchEvent {
    /// Whether the event changes what an export would contain
    pub fn affects_drawing(&self) -> bool {
        matches!(self, SketchEvent::DrawingChanged)
    }
}
