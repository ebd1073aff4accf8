//! GPU rendering subsystem.
//!
//! The scene's ribbons are drawn as extruded strips by [`StripRenderer`];
//! [`GpuSurface`] owns the device and window surface and presents one render
//! pass per frame.
//!
//! Convention:
//! - strip positions are in clip space
//! - thickness and resolution uniforms are in logical pixels

mod ctx;
mod strip;
mod surface;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use strip::StripRenderer;
pub use surface::{DrawOutcome, GpuSurface, RenderSurface};
pub use uniforms::{StripStyle, StripUniforms};
