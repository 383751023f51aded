//! Linear RGB colors used by the visual mapper and by display helpers.
//!
//! Channels are stored as `f32` in [0.0, 1.0], matching what shader
//! uniforms expect. Hex conversion follows the `0xRRGGBB` convention.

use serde::{Deserialize, Serialize};

/// An RGB color with channels in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    /// Create a color from raw channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self { r, g, b }
    }

    /// Pack the color back into `0xRRGGBB`.
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// CSS form, e.g. `#2E8CE0`.
    pub fn to_css(self) -> String {
        format!("#{:06X}", self.to_hex())
    }

    /// GLSL `mix(self, other, t)`: `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Multiply every channel by `factor`.
    pub fn scale(self, factor: f32) -> Rgb {
        Rgb {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    /// Channel-wise sum, unclamped (additive blending saturates later).
    pub fn add(self, other: Rgb) -> Rgb {
        Rgb {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }

    /// Convert to an array for uniform upload.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_preserves_value() {
        for hex in [0x000000, 0x2E8CE0, 0xFF3300, 0x00FF88, 0xFFFFFF] {
            assert_eq!(Rgb::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_css_format_is_upper_hex() {
        assert_eq!(Rgb::from_hex(0x2e8ce0).to_css(), "#2E8CE0");
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Rgb::from_hex(0xFF3300);
        let b = Rgb::from_hex(0x0066FF);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);

        let mid = a.mix(b, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
    }
}
