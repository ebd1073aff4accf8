use crate::coords::Vec3;
use crate::geometry::StripGeometry;
use crate::paint::Color;
use crate::render::{StripStyle, StripUniforms};

use super::RibbonParams;

/// How fast motion travels from the head to the tail.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrailSettings {
    /// Milliseconds for a perturbation at the head to reach the tail.
    pub max_age: f32,
    pub speed_multiplier: f32,
}

impl TrailSettings {
    /// Per-frame interpolation factor for trailing points, in `[0, 1]`.
    ///
    /// A non-positive `max_age` propagates instantly. The segment count is
    /// floored at 1 so a head-only ribbon never divides by zero.
    pub fn alpha(&self, dt_ms: f32, point_count: usize) -> f32 {
        if !(self.max_age > 0.0) {
            return 1.0;
        }
        let segments = point_count.saturating_sub(1).max(1) as f32;
        let a = dt_ms * self.speed_multiplier / (self.max_age / segments);
        if a.is_finite() { a.clamp(0.0, 1.0) } else { 1.0 }
    }
}

/// One pointer-following ribbon.
#[derive(Debug, Clone)]
pub struct Ribbon {
    params: RibbonParams,
    color: Color,
    velocity: Vec3,
    points: Vec<Vec3>,
    geometry: StripGeometry,
    uniforms: StripUniforms,
}

impl Ribbon {
    /// A ribbon at rest at the origin. `point_count` is floored at 1.
    pub fn new(params: RibbonParams, point_count: usize, color: Color, style: &StripStyle) -> Self {
        let n = point_count.max(1);
        let mut geometry = StripGeometry::new(n);
        let points = vec![Vec3::zero(); n];
        geometry.rebuild(&points);

        Self {
            params,
            color,
            velocity: Vec3::zero(),
            points,
            geometry,
            uniforms: StripUniforms::new(color, params.thickness, style),
        }
    }

    /// Where the head is pulled towards for a given pointer position.
    #[inline]
    pub fn target(&self, pointer: Vec3) -> Vec3 {
        pointer + self.params.target_offset
    }

    /// Advances the ribbon by one frame of `dt_ms` milliseconds.
    pub fn step(&mut self, pointer: Vec3, dt_ms: f32, trail: TrailSettings) {
        let target = self.target(pointer);
        self.integrate_head(target);
        let alpha = trail.alpha(dt_ms, self.points.len());
        propagate_trail(&mut self.points, alpha);
    }

    /// Damped spring, one semi-implicit Euler step.
    fn integrate_head(&mut self, target: Vec3) {
        let head = self.points[0];
        self.velocity = (self.velocity + (target - head) * self.params.spring) * self.params.friction;
        self.points[0] += self.velocity;
    }

    /// Refreshes the strip vertices from the current points.
    pub fn rebuild_geometry(&mut self) {
        self.geometry.rebuild(&self.points);
    }

    #[inline]
    pub fn params(&self) -> &RibbonParams {
        &self.params
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn head(&self) -> Vec3 {
        self.points[0]
    }

    #[inline]
    pub fn geometry(&self) -> &StripGeometry {
        &self.geometry
    }

    #[inline]
    pub fn uniforms(&self) -> &StripUniforms {
        &self.uniforms
    }

    #[inline]
    pub fn uniforms_mut(&mut self) -> &mut StripUniforms {
        &mut self.uniforms
    }
}

/// Pulls every trailing point towards its already-updated predecessor.
pub fn propagate_trail(points: &mut [Vec3], alpha: f32) {
    for i in 1..points.len() {
        let lead = points[i - 1];
        points[i] = points[i].lerp(lead, alpha);
    }
}
