//! Color model shared by configuration, scene, and renderer.
//!
//! Scope:
//! - linear premultiplied RGBA (`Color`)
//! - parsing of user-facing color strings (hex literals and a few names)

pub mod color;

pub use color::{Color, DEFAULT_RIBBON_COLOR};
