use rand::Rng;

use crate::config::RibbonConfig;
use crate::coords::{Vec2, Vec3, Viewport};
use crate::paint::Color;
use crate::paint::color::srgb_to_linear;
use crate::render::StripStyle;

use super::{Ribbon, RibbonParams, TrailSettings};

/// Scene camera. Strip positions are already in clip space, so the camera is
/// fixed and never animates; it is kept as scene data for hosts that want to
/// project into the same frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub fov_y_degrees: f32,
    pub depth: f32,
}

impl Camera {
    pub const FIXED: Camera = Camera { fov_y_degrees: 45.0, depth: 800.0 };
}

/// A bundle of ribbons following one pointer.
///
/// Ribbon points are already in clip space, so the [`Camera`] is never turned
/// into a projection; the renderer has no camera uniform.
#[derive(Debug, Clone)]
pub struct Scene {
    ribbons: Vec<Ribbon>,
    camera: Camera,
    background: Color,
    trail: TrailSettings,
    viewport: Viewport,
    dpr: f32,
}

impl Scene {
    /// Builds one ribbon per configured color, drawing jitter from `rng`.
    pub fn build<R: Rng + ?Sized>(config: &RibbonConfig, rng: &mut R) -> Self {
        config.warn_if_degenerate();

        let style = StripStyle {
            opacity: config.opacity,
            enable_fade: config.enable_fade,
            enable_wave: config.enable_shader_effect,
            wave_amplitude: config.effect_amplitude,
        };
        let count = config.colors.len();
        let point_count = config.effective_point_count();

        let ribbons = config
            .colors
            .iter()
            .enumerate()
            .map(|(index, src)| {
                let params = RibbonParams::jittered(config, index, count, rng);
                Ribbon::new(params, point_count, Color::parse_or_default(src), &style)
            })
            .collect();

        // Same sRGB encoding as the ribbon colors.
        let [r, g, b, a] = config.background_color;
        let background = Color::from_straight(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a);
        Self {
            ribbons,
            camera: Camera::FIXED,
            background,
            trail: TrailSettings { max_age: config.max_age, speed_multiplier: config.speed_multiplier },
            viewport: Viewport::default(),
            dpr: 1.0,
        }
    }

    /// Applies a new logical viewport and pixel ratio to every ribbon's shader
    /// inputs. Points are untouched.
    ///
    /// An empty or non-finite viewport is ignored and `false` is returned; the
    /// last good values stay in place.
    pub fn resize(&mut self, viewport: Viewport, dpr: f32) -> bool {
        if !viewport.is_valid() || !(dpr.is_finite() && dpr > 0.0) {
            return false;
        }
        self.viewport = viewport;
        self.dpr = dpr;
        for ribbon in &mut self.ribbons {
            let u = ribbon.uniforms_mut();
            u.resolution = [viewport.width, viewport.height];
            u.dpr = dpr;
        }
        true
    }

    /// Advances every ribbon towards `pointer` (normalized device coordinates).
    pub fn update(&mut self, pointer: Vec2, dt_ms: f32, time_s: f32) {
        let pointer = Vec3::from(pointer);
        for ribbon in &mut self.ribbons {
            ribbon.step(pointer, dt_ms, self.trail);
            ribbon.uniforms_mut().time = time_s;
        }
    }

    pub fn rebuild_geometry(&mut self) {
        for ribbon in &mut self.ribbons {
            ribbon.rebuild_geometry();
        }
    }

    #[inline]
    pub fn ribbons(&self) -> &[Ribbon] {
        &self.ribbons
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ribbons.is_empty()
    }

    #[inline]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    #[inline]
    pub fn trail(&self) -> TrailSettings {
        self.trail
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }
}
