//! CPU mirror of the strip shader in `render/shaders/ribbon.wgsl`.
//!
//! Keep the two in lockstep; the tests here are the only place the extrusion
//! math runs without a GPU.

use crate::coords::Vec2;
use crate::geometry::StripVertex;
use crate::render::StripUniforms;

/// Below this screen-space neighbor distance the tangent is undefined and the
/// strip collapses to its centerline.
const DEGENERATE_DIST: f32 = 1e-6;

/// Narrowest the strip gets at either end, relative to the middle.
const END_WIDTH: f32 = 0.1;

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Width multiplier along the strip: 1 in the middle, [`END_WIDTH`] at both ends.
#[inline]
pub fn end_taper(v: f32) -> f32 {
    let t = (v - 0.5).abs() * 2.0;
    1.0 + (END_WIDTH - 1.0) * (t * t)
}

/// Clip-space xy of `vertex` after extrusion.
pub fn extrude(vertex: &StripVertex, u: &StripUniforms) -> Vec2 {
    let res_y = u.resolution[1].max(1.0);
    let aspect = Vec2::new(u.resolution[0].max(1.0) / res_y, 1.0);

    let next = Vec2::new(vertex.next[0], vertex.next[1]).scale(aspect);
    let prev = Vec2::new(vertex.prev[0], vertex.prev[1]).scale(aspect);
    let delta = next - prev;
    let dist = delta.length();

    let tangent = if dist > DEGENERATE_DIST { delta * (1.0 / dist) } else { Vec2::zero() };
    let mut normal = tangent.perp().unscale(aspect);
    normal = normal * end_taper(vertex.uv[1]);
    normal = normal * smoothstep(0.0, 0.02, dist);

    let dpr = if u.dpr.is_finite() && u.dpr > 0.0 { u.dpr } else { 1.0 };
    normal = normal * (dpr / res_y * u.thickness);

    let mut xy = Vec2::new(vertex.position[0], vertex.position[1]) - normal * vertex.side;
    if u.wave_enabled() {
        xy = xy + normal * ((u.time + xy.x * 10.0).sin() * u.wave_amplitude);
    }
    xy
}

/// Fragment alpha at along-strip coordinate `v`, before premultiplication.
pub fn fade(v: f32, u: &StripUniforms) -> f32 {
    let base = u.color[3];
    if u.fade_enabled() {
        base * (1.0 - smoothstep(0.0, 1.0, v))
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;
    use crate::geometry::StripGeometry;
    use crate::paint::Color;
    use crate::render::StripStyle;

    fn uniforms(fade: bool, wave: bool) -> StripUniforms {
        let style = StripStyle { opacity: 1.0, enable_fade: fade, enable_wave: wave, wave_amplitude: 2.0 };
        let mut u = StripUniforms::new(Color::from_straight(1.0, 1.0, 1.0, 1.0), 30.0, &style);
        u.resolution = [800.0, 600.0];
        u.dpr = 1.0;
        u
    }

    fn horizontal(n: usize) -> StripGeometry {
        let pts: Vec<Vec3> = (0..n).map(|i| Vec3::new(-0.5 + i as f32 * 0.25, 0.0, 0.0)).collect();
        let mut g = StripGeometry::new(n);
        g.rebuild(&pts);
        g
    }

    fn half_width(g: &StripGeometry, point: usize, u: &StripUniforms) -> f32 {
        let v = g.vertices();
        let a = extrude(&v[2 * point], u);
        let b = extrude(&v[2 * point + 1], u);
        (a - b).length() * 0.5
    }

    // ── extrusion ─────────────────────────────────────────────────────────

    #[test]
    fn coincident_points_stay_finite_on_centerline() {
        let p = Vec3::new(0.3, -0.2, 0.0);
        let mut g = StripGeometry::new(4);
        g.rebuild(&[p; 4]);
        let u = uniforms(false, true);
        for v in g.vertices() {
            let xy = extrude(v, &u);
            assert!(xy.is_finite());
            assert_eq!(xy, Vec2::new(p.x, p.y));
        }
    }

    #[test]
    fn sides_straddle_centerline() {
        let g = horizontal(5);
        let u = uniforms(false, false);
        let v = g.vertices();
        let a = extrude(&v[4], &u);
        let b = extrude(&v[5], &u);
        assert!(a.y * b.y < 0.0);
        assert!((a.y + b.y).abs() < 1e-6);
    }

    #[test]
    fn ends_are_narrower_than_middle() {
        let g = horizontal(5);
        let u = uniforms(false, false);
        let mid = half_width(&g, 2, &u);
        let head = half_width(&g, 0, &u);
        let tail = half_width(&g, 4, &u);
        assert!(mid > 0.0);
        assert!((head / mid - END_WIDTH).abs() < 1e-4);
        assert!((tail / mid - END_WIDTH).abs() < 1e-4);
    }

    #[test]
    fn middle_width_matches_thickness_in_pixels() {
        let g = horizontal(5);
        let u = uniforms(false, false);
        // 30 logical px on a 600 px tall surface is 0.05 of clip height per side.
        assert!((half_width(&g, 2, &u) - 0.05).abs() < 1e-5);
    }

    #[test]
    fn width_is_stable_across_pixel_density() {
        let g = horizontal(5);
        let u1 = uniforms(false, false);
        let mut u2 = u1;
        u2.dpr = 2.0;
        u2.resolution = [1600.0, 1200.0];
        assert!((half_width(&g, 2, &u1) - half_width(&g, 2, &u2)).abs() < 1e-6);
    }

    #[test]
    fn zero_resolution_does_not_produce_nan() {
        let g = horizontal(3);
        let mut u = uniforms(false, true);
        u.resolution = [0.0, 0.0];
        u.dpr = f32::NAN;
        for v in g.vertices() {
            assert!(extrude(v, &u).is_finite());
        }
    }

    #[test]
    fn wave_pushes_along_normal() {
        let g = horizontal(5);
        let mut flat = uniforms(false, false);
        flat.time = 1.0;
        let mut wavy = uniforms(false, true);
        wavy.time = 1.0;

        for vertex in g.vertices() {
            let base = extrude(vertex, &flat);
            let pos = Vec2::new(vertex.position[0], vertex.position[1]);
            // Undo `pos - normal * side` to recover the normal.
            let normal = (pos - base) * (1.0 / vertex.side);
            let expected = base + normal * ((flat.time + base.x * 10.0).sin() * flat.wave_amplitude);
            let got = extrude(vertex, &wavy);
            assert!((got - expected).length() < 1e-6, "{got:?} vs {expected:?}");
        }

        let mid = &g.vertices()[4];
        assert!((extrude(mid, &wavy) - extrude(mid, &flat)).length() > 1e-3);
    }

    #[test]
    fn wave_vanishes_where_sine_is_zero() {
        let g = horizontal(5);
        // Middle point sits at x = 0, so the phase is just `time`.
        let mid = &g.vertices()[4];
        let flat = uniforms(false, false);
        let wavy = uniforms(false, true);
        assert_eq!(wavy.time, 0.0);
        assert_eq!(extrude(mid, &wavy), extrude(mid, &flat));
    }

    // ── fade ──────────────────────────────────────────────────────────────

    #[test]
    fn fade_goes_from_opaque_head_to_clear_tail() {
        let u = uniforms(true, false);
        assert!((fade(0.0, &u) - 1.0).abs() < 1e-6);
        assert!(fade(1.0, &u).abs() < 1e-6);
        assert!(fade(0.25, &u) > fade(0.75, &u));
    }

    #[test]
    fn fade_disabled_is_uniform() {
        let u = uniforms(false, false);
        assert_eq!(fade(0.0, &u), fade(1.0, &u));
    }
}
