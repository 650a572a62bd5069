use egui::{Context, Key, KeyboardShortcut, Modifiers, Pos2, Rect};

use crate::command::Command;

mod router;
pub use router::route_event;

/// Input the sketchpad reacts to, with positions in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved (with or without the button held)
    PointerMove { position: Pos2 },
    /// Primary button released, wherever the pointer is
    PointerUp { position: Pos2 },
    /// Pointer entered the canvas
    PointerEnter { position: Pos2 },
    /// Pointer left the canvas
    PointerLeave,
    /// Keyboard shortcut for a canvas command
    Shortcut(Command),
}

/// Pointer state sampled from egui once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    /// Position while the pointer is over the window
    pub hover: Option<Pos2>,
    /// Last known position, kept after the pointer leaves the window
    pub latest: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
}

/// Handles converting raw egui input into sketchpad [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    inside: bool,
    /// A press started on the canvas and has not been released yet
    gesture_active: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process raw egui input for a canvas occupying `canvas_rect` on screen
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        let snapshot = ctx.input(|input| PointerSnapshot {
            hover: input.pointer.hover_pos(),
            latest: input.pointer.latest_pos(),
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
        });

        let mut events = self.translate(snapshot, canvas_rect);
        events.extend(Self::shortcuts(ctx));
        events
    }

    /// Turn one frame's pointer state into events, in the order they apply
    pub fn translate(&mut self, snapshot: PointerSnapshot, canvas_rect: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let local = |pos: Pos2| (pos - canvas_rect.min).to_pos2();

        let now_inside = snapshot.hover.is_some_and(|pos| canvas_rect.contains(pos));
        if now_inside && !self.inside {
            if let Some(pos) = snapshot.hover {
                events.push(InputEvent::PointerEnter { position: local(pos) });
            }
        }

        let current = snapshot.hover.or(snapshot.latest);
        if let Some(pos) = current {
            if Some(pos) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove { position: local(pos) });
            }
        }

        if snapshot.pressed && now_inside {
            if let Some(pos) = current {
                events.push(InputEvent::PointerDown { position: local(pos) });
                self.gesture_active = true;
            }
        }

        // Releases count anywhere so a stroke dragged off the canvas still ends
        if snapshot.released && self.gesture_active {
            if let Some(pos) = current.or(self.last_pointer_pos) {
                events.push(InputEvent::PointerUp { position: local(pos) });
            }
            self.gesture_active = false;
        }

        if !now_inside && self.inside {
            events.push(InputEvent::PointerLeave);
        }

        self.inside = now_inside;
        if current.is_some() {
            self.last_pointer_pos = current;
        }
        events
    }

    fn shortcuts(ctx: &Context) -> Vec<InputEvent> {
        let redo_shift = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
        let redo_y = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);

        ctx.input_mut(|input| {
            let mut events = Vec::new();
            // The shifted shortcut has to be consumed before the plain one
            if input.consume_shortcut(&redo_shift) || input.consume_shortcut(&redo_y) {
                events.push(InputEvent::Shortcut(Command::Redo));
            }
            if input.consume_shortcut(&undo) {
                events.push(InputEvent::Shortcut(Command::Undo));
            }
            events
        })
    }
}
