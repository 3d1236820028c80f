use core::fmt;
use core::hash::{Hash, Hasher};

use bytemuck::{Pod, Zeroable};

use crate::coords::{canonical_bits, lerp};

/// Straight-alpha sRGB color with channels in `[0, 1]`.
///
/// Straight alpha keeps "transparent white" and "transparent black" distinct,
/// which the fill resolver relies on for its unresolved-paint sentinel.
/// Use [`to_premul`](Self::to_premul) when handing colors to a compositor.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from straight components. Values are stored as given.
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::TRANSPARENT
    }

    /// Creates a color from straight sRGB bytes (`0`–`255`).
    ///
    /// This is the constructor used for hex literals coming from the fill grammar.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a color from a packed `0xRRGGBB` value (opaque).
    #[inline]
    pub fn from_rgb_hex(hex: u32) -> Self {
        Self::from_srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
    }

    /// Quantizes to straight sRGB bytes.
    #[inline]
    pub fn to_srgb_u8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Returns premultiplied `(r, g, b, a)`.
    #[inline]
    pub fn to_premul(self) -> (f32, f32, f32, f32) {
        let c = self.clamped();
        (c.r * c.a, c.g * c.a, c.b * c.a, c.a)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Clamps all channels to `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Channel-wise linear blend; the result is clamped to `[0, 1]`.
    ///
    /// `t` is not clamped, callers decide how endpoints are handled.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
        .clamped()
    }

    /// Canonical bit words of the four channels, used for hashing.
    #[inline]
    pub fn to_bits(self) -> [u32; 4] {
        let channels: [f32; 4] = bytemuck::cast(self);
        channels.map(canonical_bits)
    }

    /// Channels as `[r, g, b, a]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        bytemuck::cast(self)
    }
}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bits().hash(state);
    }
}

impl fmt::Display for Color {
    /// `#rrggbbaa`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_srgb_u8();
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_through_bytes() {
        let c = Color::from_rgb_hex(0x00ff80);
        assert_eq!(c.to_srgb_u8(), [0, 255, 128, 255]);
        assert_eq!(c.to_string(), "#00ff80ff");
    }

    #[test]
    fn lerp_midpoint_of_red_and_green() {
        let m = Color::rgb(1.0, 0.0, 0.0).lerp(Color::rgb(0.0, 1.0, 0.0), 0.5);
        assert_eq!(m, Color::rgb(0.5, 0.5, 0.0));
    }

    #[test]
    fn lerp_clamps_overshoot() {
        let m = Color::BLACK.lerp(Color::WHITE, 1.5);
        assert_eq!(m, Color::WHITE);
    }

    #[test]
    fn transparent_white_differs_from_transparent_black() {
        assert_ne!(Color::rgba(1.0, 1.0, 1.0, 0.0), Color::TRANSPARENT);
    }

    #[test]
    fn negative_zero_has_canonical_bits() {
        assert_eq!(Color::rgba(-0.0, 0.0, 0.0, 1.0).to_bits(), Color::BLACK.to_bits());
    }

    #[test]
    fn premul_scales_rgb_by_alpha() {
        let (r, g, b, a) = Color::rgba(1.0, 0.5, 0.0, 0.5).to_premul();
        assert_eq!((r, g, b, a), (0.5, 0.25, 0.0, 0.5));
    }
}
