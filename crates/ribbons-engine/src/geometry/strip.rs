use bytemuck::{Pod, Zeroable};

use crate::coords::Vec3;

/// Strip vertex (48 bytes):
///
///  offset  0  position [f32; 3]   loc 0
///  offset 12  prev     [f32; 3]   loc 1
///  offset 24  next     [f32; 3]   loc 2
///  offset 36  uv       [f32; 2]   loc 3  (.x = side 0/1, .y = 0 head .. 1 tail)
///  offset 44  side     f32        loc 4  (-1 or +1)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct StripVertex {
    pub position: [f32; 3],
    pub prev: [f32; 3],
    pub next: [f32; 3],
    pub uv: [f32; 2],
    pub side: f32,
}

impl StripVertex {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // prev
        2 => Float32x3, // next
        3 => Float32x2, // uv
        4 => Float32    // side
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StripVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Host-side vertex array for one ribbon.
///
/// Sized once for a fixed point count; [`rebuild`](Self::rebuild) rewrites the
/// positions in place every frame. UVs and sides never change.
#[derive(Debug, Clone)]
pub struct StripGeometry {
    vertices: Vec<StripVertex>,
}

impl StripGeometry {
    pub fn new(point_count: usize) -> Self {
        let n = point_count.max(1);
        let vertices = (0..n)
            .flat_map(|i| {
                let v = along(i, n);
                [
                    StripVertex { uv: [0.0, v], side: -1.0, ..Zeroable::zeroed() },
                    StripVertex { uv: [1.0, v], side: 1.0, ..Zeroable::zeroed() },
                ]
            })
            .collect();
        Self { vertices }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.vertices.len() / 2
    }

    #[inline]
    pub fn vertices(&self) -> &[StripVertex] {
        &self.vertices
    }

    /// Rewrites positions and neighbors from `points`.
    ///
    /// The head's `prev` and the tail's `next` are mirrored through the end
    /// point so the end tangents follow the first/last segment. A single point
    /// is its own neighbor on both sides.
    pub fn rebuild(&mut self, points: &[Vec3]) {
        debug_assert_eq!(points.len(), self.point_count());
        let n = points.len().min(self.point_count());
        if n == 0 {
            return;
        }

        for i in 0..n {
            let p = points[i];
            let prev = match i {
                0 if n > 1 => p + (p - points[1]),
                0 => p,
                _ => points[i - 1],
            };
            let next = if i + 1 < n {
                points[i + 1]
            } else if n > 1 {
                p + (p - points[i - 1])
            } else {
                p
            };

            for vert in &mut self.vertices[2 * i..2 * i + 2] {
                vert.position = p.to_array();
                vert.prev = prev.to_array();
                vert.next = next.to_array();
            }
        }
    }
}

/// Along-strip coordinate of point `i` out of `n`.
#[inline]
fn along(i: usize, n: usize) -> f32 {
    if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 }
}

/// Triangle-list indices for a strip of `point_count` points: two triangles
/// per segment.
pub fn strip_indices(point_count: usize) -> Vec<u32> {
    let segments = point_count.saturating_sub(1) as u32;
    (0..segments)
        .flat_map(|i| {
            let a = i * 2;
            [a, a + 1, a + 2, a + 2, a + 1, a + 3]
        })
        .collect()
}

#[inline]
pub fn strip_index_count(point_count: usize) -> u32 {
    (point_count.saturating_sub(1) * 6) as u32
}
