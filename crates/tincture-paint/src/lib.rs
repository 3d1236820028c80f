//! Tincture paint crate.
//!
//! This crate owns the value types every other tincture crate speaks:
//! colors, gradients, image paints and the per-element style slots
//! (background fills, border strokes, shape paints) that fills are applied to.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod style;

pub use paint::{Color, ColorStop, ImagePaint, LinearGradient, Paint, PaintKind, RadialGradient, SpreadMode};
pub use style::{BackgroundFill, BorderStroke, BorderStyle, ShapeStyle, Side};
