mod history;

pub use history::History;

/// Canvas-wide commands issued from buttons or keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Wipe the log and the redo buffer
    Clear,
    Undo,
    Redo,
    /// Render the log offscreen and save it as an image
    Export,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Clear => "Clear",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Export => "Export",
        }
    }
}
