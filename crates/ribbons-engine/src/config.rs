//! Ribbon bundle configuration.
//!
//! Every field is optional when deserializing; missing keys take the defaults
//! below. A configuration is consumed whole when an engine starts; changing it
//! means tearing the engine down and starting a new one.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::paint::DEFAULT_RIBBON_COLOR;

/// Configuration for one ribbon bundle.
///
/// # Builder Pattern
/// ```
/// use ribbons_engine::config::RibbonConfig;
///
/// let config = RibbonConfig::default()
///     .with_colors(["#ffffff", "#5227FF"])
///     .with_point_count(40)
///     .with_fade(true);
/// assert_eq!(config.colors.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RibbonConfig {
    /// One ribbon per entry, in draw order.
    pub colors: Vec<String>,
    /// Spring constant base; each ribbon is jittered by ±0.025.
    pub base_spring: f32,
    /// Friction base; each ribbon is jittered by ±0.025. Must stay in (0, 1) to converge.
    pub base_friction: f32,
    /// Thickness base in logical pixels; each ribbon is jittered by ±1.5.
    pub base_thickness: f32,
    /// Sideways spread of each ribbon's target, per index away from the bundle center.
    pub offset_factor: f32,
    /// Milliseconds for motion to propagate from head to tail.
    pub max_age: f32,
    /// Samples per ribbon, including the head.
    pub point_count: usize,
    /// Scales the trail propagation rate.
    pub speed_multiplier: f32,
    pub enable_fade: bool,
    pub enable_shader_effect: bool,
    pub effect_amplitude: f32,
    /// Flat ribbon opacity in `[0, 1]`.
    pub opacity: f32,
    /// Straight-alpha RGBA clear color.
    pub background_color: [f32; 4],
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            colors: vec![DEFAULT_RIBBON_COLOR.to_string()],
            base_spring: 0.03,
            base_friction: 0.9,
            base_thickness: 30.0,
            offset_factor: 0.05,
            max_age: 500.0,
            point_count: 50,
            speed_multiplier: 0.6,
            enable_fade: false,
            enable_shader_effect: false,
            effect_amplitude: 2.0,
            opacity: 1.0,
            background_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

impl RibbonConfig {
    /// Parses a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).context("invalid ribbon config")
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("in {}", path.display()))
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_spring(mut self, spring: f32) -> Self {
        self.base_spring = spring;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.base_friction = friction;
        self
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.base_thickness = thickness;
        self
    }

    pub fn with_offset_factor(mut self, factor: f32) -> Self {
        self.offset_factor = factor;
        self
    }

    pub fn with_max_age(mut self, ms: f32) -> Self {
        self.max_age = ms;
        self
    }

    pub fn with_point_count(mut self, count: usize) -> Self {
        self.point_count = count;
        self
    }

    pub fn with_speed_multiplier(mut self, speed: f32) -> Self {
        self.speed_multiplier = speed;
        self
    }

    pub fn with_fade(mut self, enabled: bool) -> Self {
        self.enable_fade = enabled;
        self
    }

    pub fn with_wave(mut self, enabled: bool, amplitude: f32) -> Self {
        self.enable_shader_effect = enabled;
        self.effect_amplitude = amplitude;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_background(mut self, rgba: [f32; 4]) -> Self {
        self.background_color = rgba;
        self
    }

    /// Number of points each ribbon will hold. A ribbon always has a head.
    #[inline]
    pub fn effective_point_count(&self) -> usize {
        self.point_count.max(1)
    }

    /// Logs values that will make the simulation misbehave.
    ///
    /// Out-of-range values are not rejected; the simulation runs with them.
    pub fn warn_if_degenerate(&self) {
        if !(self.base_friction > 0.0 && self.base_friction < 1.0) {
            log::warn!(
                "base_friction {} is outside (0, 1); ribbons will not settle",
                self.base_friction
            );
        }
        if self.point_count == 0 {
            log::warn!("point_count 0 promoted to 1");
        }
        if self.max_age <= 0.0 {
            log::warn!("max_age {} <= 0; trails will snap to the head", self.max_age);
        }
        if self.base_thickness <= 0.0 {
            log::warn!("base_thickness {} <= 0; ribbons may be invisible", self.base_thickness);
        }
    }
}
