//! Engine lifecycle.
//!
//! A [`RibbonEngine`] goes `Uninitialized → Running → TornDown` exactly once.
//! While running it owns the render surface and the scene, holds its listener
//! registrations on the host container, and keeps one frame scheduled at a
//! time. Configuration changes are never applied in place: the caller stops
//! the engine and starts a fresh one.

mod engine;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{EnginePhase, RibbonEngine};
