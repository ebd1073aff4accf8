//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window system events into `InputEvent`s;
//! `InputTracker` folds them into the shared pointer target.

pub mod platform;

mod tracker;
mod types;

pub use tracker::InputTracker;
pub use types::{InputEvent, PointerMoveEvent, TouchEvent, TouchPhase};
