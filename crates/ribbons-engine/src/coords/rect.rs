use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// Used as the container bounding box when normalizing pointer positions.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Maps a logical-pixel point to simulation space.
    ///
    /// The rect's left/right edges map to `-1`/`1` on X; its top/bottom edges map
    /// to `1`/`-1` on Y (screen-down becomes simulation-up). Points outside the
    /// rect map outside `[-1, 1]`.
    ///
    /// Returns `None` for empty or non-finite rects.
    #[inline]
    pub fn to_unit(self, p: Vec2) -> Option<Vec2> {
        if self.is_empty() || !self.is_finite() {
            return None;
        }
        let x = (p.x - self.origin.x) / self.size.x * 2.0 - 1.0;
        let y = (p.y - self.origin.y) / self.size.y * -2.0 + 1.0;
        Some(Vec2::new(x, y))
    }
}
