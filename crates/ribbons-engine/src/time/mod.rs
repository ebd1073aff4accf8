//! Time subsystem.
//!
//! Provides stable, testable frame timing without coupling to the runtime:
//! - one `FrameClock` per engine instance
//! - `tick_at(now)` once per frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
