//! Ribbon simulation: per-ribbon spring physics and trailing samples, plus
//! the scene that owns a whole bundle.

pub mod params;
pub mod scene;
pub mod state;

pub use params::RibbonParams;
pub use scene::{Camera, Scene};
pub use state::{Ribbon, TrailSettings};
