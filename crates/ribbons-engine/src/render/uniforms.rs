use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// Look switches shared by every ribbon of a bundle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StripStyle {
    pub opacity: f32,
    pub enable_fade: bool,
    pub enable_wave: bool,
    pub wave_amplitude: f32,
}

/// Per-ribbon shader inputs (48 bytes, matches `Ribbon` in `ribbon.wgsl`):
///
///  offset  0  color       [f32; 4]   straight linear rgb, .a = opacity
///  offset 16  resolution  [f32; 2]   logical px
///  offset 24  dpr         f32
///  offset 28  thickness   f32
///  offset 32  time        f32        seconds
///  offset 36  enable_fade f32        0 or 1
///  offset 40  enable_wave f32        0 or 1
///  offset 44  wave_amp    f32
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct StripUniforms {
    pub color: [f32; 4],
    pub resolution: [f32; 2],
    pub dpr: f32,
    pub thickness: f32,
    pub time: f32,
    pub enable_fade: f32,
    pub enable_wave: f32,
    pub wave_amplitude: f32,
}

impl StripUniforms {
    /// Builds the uniforms for one ribbon. Resolution and time start neutral and
    /// are filled in by the scene.
    pub fn new(color: Color, thickness: f32, style: &StripStyle) -> Self {
        let (r, g, b, _) = color.to_straight();
        Self {
            color: [r, g, b, style.opacity.clamp(0.0, 1.0)],
            resolution: [1.0, 1.0],
            dpr: 1.0,
            thickness,
            time: 0.0,
            enable_fade: flag(style.enable_fade),
            enable_wave: flag(style.enable_wave),
            wave_amplitude: style.wave_amplitude,
        }
    }

    #[inline]
    pub fn fade_enabled(&self) -> bool {
        self.enable_fade > 0.5
    }

    #[inline]
    pub fn wave_enabled(&self) -> bool {
        self.enable_wave > 0.5
    }
}

#[inline]
fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}
