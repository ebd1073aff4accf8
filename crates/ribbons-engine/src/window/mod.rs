//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the window, and drives one ribbon engine
//! inside it.

mod host;
mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
