/// Color used when a configured ribbon color cannot be parsed.
pub const DEFAULT_RIBBON_COLOR: &str = "#FC8EAC";

/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// Colors parsed from strings are sRGB-encoded and are converted to linear
/// light, since the surface prefers an sRGB format that re-encodes on write.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 0.0 };
        let ch = |c: f32| if c.is_finite() { c.clamp(0.0, 1.0) * a } else { 0.0 };
        Self { r: ch(r), g: ch(g), b: ch(b), a }
    }

    /// Creates an opaque linear color from sRGB-encoded bytes.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            1.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` or one of the named colors
    /// (`black`, `white`, `red`, `green`, `blue`, `fuchsia`, `cyan`, `yellow`,
    /// `orange`).
    ///
    /// The alpha byte of `#rrggbbaa` is accepted but ignored: ribbon opacity is
    /// configured separately. Parsed colors are always opaque.
    pub fn parse(src: &str) -> Option<Self> {
        let s = src.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => "000000",
            "white" => "ffffff",
            "red" => "ff0000",
            "green" => "00ff00",
            "blue" => "0000ff",
            "fuchsia" => "ff00ff",
            "cyan" => "00ffff",
            "yellow" => "ffff00",
            "orange" => "ff8000",
            _ => return None,
        };
        parse_hex(named)
    }

    /// Like [`parse`](Self::parse), falling back to [`DEFAULT_RIBBON_COLOR`] for
    /// malformed input.
    pub fn parse_or_default(src: &str) -> Self {
        match Self::parse(src) {
            Some(c) => c,
            None => {
                log::warn!("unrecognized color {src:?}; using {DEFAULT_RIBBON_COLOR}");
                Self::parse(DEFAULT_RIBBON_COLOR).unwrap_or(Self::from_straight(1.0, 1.0, 1.0, 1.0))
            }
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let nibble = |i: usize| {
        let v = u8::from_str_radix(hex.get(i..i + 1)?, 16).ok()?;
        Some(v * 17)
    };
    let (r, g, b) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?),
        6 | 8 => (byte(0)?, byte(2)?, byte(4)?),
        _ => return None,
    };
    Some(Color::from_srgb_u8(r, g, b))
}

/// sRGB transfer function, decoded to linear light.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool { (a - b).abs() < 1e-5 }

    // ── parse ─────────────────────────────────────────────────────────────

    #[test]
    fn parse_long_hex() {
        let c = Color::parse("#ffffff").unwrap();
        assert_eq!(c, Color::from_straight(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn parse_short_hex_expands_nibbles() {
        assert_eq!(Color::parse("#f00"), Color::parse("#ff0000"));
    }

    #[test]
    fn parse_alpha_byte_is_ignored() {
        assert_eq!(Color::parse("#00ff0080"), Color::parse("#00ff00"));
    }

    #[test]
    fn parse_names_case_insensitive() {
        assert_eq!(Color::parse("White"), Color::parse("#ffffff"));
        assert_eq!(Color::parse(" cyan "), Color::parse("#00ffff"));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#gggggg"), None);
        assert_eq!(Color::parse("rebeccapurple"), None);
        assert_eq!(Color::parse(""), None);
    }

    #[test]
    fn malformed_falls_back_to_default_ribbon_color() {
        let fallback = Color::parse_or_default("not a color");
        assert_eq!(Some(fallback), Color::parse(DEFAULT_RIBBON_COLOR));
        assert_eq!(fallback.a, 1.0);
    }

    // ── conversions ───────────────────────────────────────────────────────

    #[test]
    fn srgb_midpoint_is_darker_in_linear() {
        assert!(close(srgb_to_linear(0.0), 0.0));
        assert!(close(srgb_to_linear(1.0), 1.0));
        assert!(srgb_to_linear(0.5) < 0.25);
    }

    #[test]
    fn from_straight_premultiplies() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert!(close(c.r, 0.5));
        assert!(close(c.g, 0.25));
        let (r, g, _, a) = c.to_straight();
        assert!(close(r, 1.0) && close(g, 0.5) && close(a, 0.5));
    }

    #[test]
    fn from_straight_sanitizes_nan() {
        let c = Color::from_straight(f32::NAN, 0.0, 0.0, 1.0);
        assert_eq!(c.r, 0.0);
    }
}
