use winit::dpi::PhysicalPosition;
use winit::event::{TouchPhase as WinitTouchPhase, WindowEvent};
use winit::window::Window;

use crate::input::{InputEvent, PointerMoveEvent, TouchEvent, TouchPhase};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events the ribbon engine does not listen to.
pub fn translate_window_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        WindowEvent::Touch(touch) => {
            let (x, y) = to_logical_f32(window, touch.location);
            Some(InputEvent::Touch(TouchEvent {
                id: touch.id,
                phase: map_touch_phase(touch.phase),
                x,
                y,
            }))
        }

        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let scale = window.scale_factor();
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

fn map_touch_phase(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Started,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Ended,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}
