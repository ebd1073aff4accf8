//! GPU device + surface management.
//!
//! Creates the wgpu device/queue, configures the window surface, and hands out
//! frames (encoder + view) to the render surface.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
