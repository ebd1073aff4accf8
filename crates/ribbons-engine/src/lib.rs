//! Ribbons engine crate.
//!
//! Pointer-following ribbon trails: spring physics per ribbon, strip geometry
//! extruded in a wgpu vertex shader, and a small lifecycle that binds one
//! bundle of ribbons to one host window.

pub mod config;
pub mod coords;
pub mod core;
pub mod device;
pub mod geometry;
pub mod host;
pub mod input;
pub mod lifecycle;
pub mod logging;
pub mod paint;
pub mod render;
pub mod ribbon;
pub mod time;
pub mod window;
