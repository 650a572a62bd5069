use std::cell::RefCell;

use crate::event::{EventHandler, SketchEvent};

/// A simple event bus for broadcasting sketchpad events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers, in registration order
    pub fn emit(&self, event: SketchEvent) {
        log::trace!("Emitting {event:?}");
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_every_handler() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in 0..2 {
            let seen = Rc::clone(&seen);
            bus.subscribe(Box::new(move |event: &SketchEvent| {
                seen.borrow_mut().push((tag, *event));
            }));
        }
        bus.emit(SketchEvent::DrawingChanged);

        assert_eq!(
            *seen.borrow(),
            vec![(0, SketchEvent::DrawingChanged), (1, SketchEvent::DrawingChanged)]
        );
    }
}
