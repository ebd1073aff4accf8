//! Coordinate and geometry types shared by the input, physics, and render layers.
//!
//! Two spaces are in play:
//! - logical pixels (DPI-aware, origin top-left, +Y down) for container bounds
//!   and raw pointer positions
//! - simulation space (`[-1, 1]` on both axes, +Y up) for ribbon points, which
//!   is also the clip space the strip shader emits

mod rect;
mod vec2;
mod vec3;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use viewport::Viewport;
