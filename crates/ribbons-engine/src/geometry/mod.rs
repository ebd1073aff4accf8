//! Strip geometry for ribbons.
//!
//! `strip` turns a point sequence into a two-vertices-per-point strip whose
//! vertices carry their neighbors, so the vertex shader can extrude without a
//! host-side tangent pass. `extrude` mirrors that shader math on the CPU.

pub mod extrude;
pub mod strip;

pub use strip::{StripGeometry, StripVertex, strip_index_count, strip_indices};
