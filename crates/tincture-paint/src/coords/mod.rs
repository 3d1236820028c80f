//! Geometry types used by gradient and style definitions.
//!
//! Canonical space:
//! - Logical pixels, or unit fractions for proportional gradients
//! - Origin top-left
//! - +X right, +Y down

mod corner_radii;
mod insets;
mod vec2;

pub use corner_radii::CornerRadii;
pub use insets::Insets;
pub use vec2::Vec2;

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Bit pattern of `v` with `-0.0` folded onto `0.0` and every NaN onto one payload,
/// so equal values always hash equally.
#[inline]
pub fn canonical_bits(v: f32) -> u32 {
    if v.is_nan() { f32::NAN.to_bits() } else { (v + 0.0).to_bits() }
}
