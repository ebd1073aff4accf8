use winit::event::WindowEvent;

use super::ctx::FrameCtx;
use crate::window::RuntimeCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application hooks around the ribbon engine.
///
/// The runtime owns the engine; an app only observes events and frames and
/// asks for changes through [`RuntimeCtx`].
pub trait App {
    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent, runtime: &mut RuntimeCtx) -> AppControl {
        let _ = (event, runtime);
        AppControl::Continue
    }

    /// Called after each frame the engine drew.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }
}
