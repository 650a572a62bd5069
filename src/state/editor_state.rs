//! The gesture state machine for the sketchpad.
//!
//! Only a marker gesture ever leaves `Idle`; stamps are placed instantly.
//!
//! # State Transitions
//!
//! ```text
//!                 pointer-down (marker)
//!  ┌──────────┐ ────────────────────────► ┌─────────────┐
//!  │          │                           │             │ ◄─┐
//!  │   Idle   │                           │   Drawing   │   │ pointer-move
//!  │          │ ◄──────────────────────── │             │ ──┘ (append point)
//!  └──────────┘       pointer-up          └─────────────┘
//!     │    ▲          (commit stroke)
//!     └────┘
//!  pointer-down (stamp): commit stamp
//!  pointer-move: move preview
//! ```
use crate::drawable::Stroke;

/// The possible states of the editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    /// Pointer up, nothing in progress
    #[default]
    Idle,
    /// Pointer down with the marker, accumulating a stroke
    Drawing { stroke: Stroke },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            (EditorState::Idle, _) => true,
            // A stroke has to be finished before another begins
            (EditorState::Drawing { .. }, EditorState::Idle) => true,
            (EditorState::Drawing { .. }, EditorState::Drawing { .. }) => false,
        }
    }

    /// Returns true if the editor is currently in an idle state
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    /// Returns true if the editor is currently in a drawing state
    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    /// The stroke being drawn, if any
    pub fn in_progress(&self) -> Option<&Stroke> {
        match self {
            EditorState::Drawing { stroke } => Some(stroke),
            EditorState::Idle => None,
        }
    }

    pub fn in_progress_mut(&mut self) -> Option<&mut Stroke> {
        match self {
            EditorState::Drawing { stroke } => Some(stroke),
            EditorState::Idle => None,
        }
    }

    /// Return to idle, handing back the stroke that was being drawn
    pub fn finish(&mut self) -> Option<Stroke> {
        match std::mem::take(self) {
            EditorState::Drawing { stroke } => Some(stroke),
            EditorState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn test_transitions() {
        let idle = EditorState::Idle;
        let drawing = EditorState::Drawing {
            stroke: Stroke::begin(Pos2::ZERO, 1.0),
        };

        assert!(idle.can_transition_to(&drawing));
        assert!(drawing.can_transition_to(&idle));
        assert!(!drawing.can_transition_to(&drawing));
    }

    #[test]
    fn test_finish_moves_stroke_out() {
        let mut state = EditorState::Drawing {
            stroke: Stroke::begin(Pos2::new(1.0, 1.0), 2.0),
        };
        let stroke = state.finish();

        assert!(state.is_idle());
        assert_eq!(stroke.map(|s| s.points().len()), Some(1));
        assert_eq!(state.finish(), None);
    }
}
