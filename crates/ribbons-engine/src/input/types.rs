use crate::host::ListenerKind;

/// Pointer move event in logical pixels, relative to the window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Touch event in logical pixels.
///
/// `id` is stable for the lifetime of one finger contact.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchEvent {
    pub id: u64,
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerMoveEvent),
    Touch(TouchEvent),
}

impl InputEvent {
    /// The listener a container must have attached for this event to be delivered.
    pub fn listener_kind(&self) -> ListenerKind {
        match self {
            InputEvent::PointerMoved(_) => ListenerKind::PointerMove,
            InputEvent::Touch(t) => match t.phase {
                TouchPhase::Started => ListenerKind::TouchStart,
                TouchPhase::Moved => ListenerKind::TouchMove,
                TouchPhase::Ended | TouchPhase::Cancelled => ListenerKind::TouchEnd,
            },
        }
    }
}
