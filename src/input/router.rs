use crate::command::Command;
use crate::sketchpad::Sketchpad;

use super::InputEvent;

/// Apply an input event to the sketchpad.
///
/// Returns a command the host still has to carry out (currently only export).
pub fn route_event(event: &InputEvent, sketchpad: &mut Sketchpad) -> Option<Command> {
    match *event {
        InputEvent::PointerDown { position } => sketchpad.pointer_down(position),
        InputEvent::PointerMove { position } => sketchpad.pointer_move(position),
        InputEvent::PointerUp { position } => sketchpad.pointer_up(position),
        InputEvent::PointerEnter { position } => sketchpad.pointer_enter(position),
        InputEvent::PointerLeave => sketchpad.pointer_leave(),
        InputEvent::Shortcut(command) => return sketchpad.execute(command),
    }
    None
}
