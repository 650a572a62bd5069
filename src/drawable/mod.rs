use std::sync::Arc;

use egui::Color32;

mod stamp;
mod stroke;

pub use stamp::Stamp;
pub use stroke::Stroke;

use crate::target::PaintTarget;

/// Every drawable is inked in the same color
pub const INK: Color32 = Color32::BLACK;

/// A committed unit of ink
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Stroke(Stroke),
    Stamp(Stamp),
}

/// Committed drawables are shared, never copied, between the history stacks
pub type DrawableRef = Arc<Drawable>;

impl Drawable {
    /// Paint this drawable onto the target
    pub fn display(&self, target: &mut dyn PaintTarget) {
        match self {
            Drawable::Stroke(stroke) => stroke.display(target),
            Drawable::Stamp(stamp) => stamp.display(target),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Drawable::Stroke(_) => "stroke",
            Drawable::Stamp(_) => "stamp",
        }
    }

    pub fn into_ref(self) -> DrawableRef {
        Arc::new(self)
    }
}

impl From<Stroke> for Drawable {
    fn from(stroke: Stroke) -> Self {
        Drawable::Stroke(stroke)
    }
}

impl From<Stamp> for Drawable {
    fn from(stamp: Stamp) -> Self {
        Drawable::Stamp(stamp)
    }
}
