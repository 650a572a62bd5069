#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod drawable;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod preview;
pub mod renderer;
pub mod sketchpad;
pub mod state;
pub mod target;
pub mod tool;
pub mod util;

pub use app::SketchApp;
pub use command::{Command, History};
pub use config::SketchConfig;
pub use drawable::{Drawable, DrawableRef, Stamp, Stroke};
pub use error::{SketchError, SketchResult};
pub use event::SketchEvent;
pub use export::{ExportArtifact, Exporter};
pub use input::{InputEvent, InputHandler};
pub use preview::ToolPreview;
pub use renderer::Renderer;
pub use sketchpad::Sketchpad;
pub use state::EditorState;
pub use target::{DisplayList, PaintOp, PaintTarget};
pub use tool::{ToolSelection, ToolState};
