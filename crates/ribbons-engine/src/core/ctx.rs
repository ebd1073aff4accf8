use crate::time::FrameTime;
use crate::window::RuntimeCtx;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    /// Timing of the frame that was just drawn.
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}
