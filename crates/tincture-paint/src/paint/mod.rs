//! Paint model shared between fills, style slots and renderers.
//!
//! Scope:
//! - color representation (straight-alpha sRGB)
//! - paint sources (solid, linear / radial gradients, images)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::coords::Vec2;

pub use color::Color;
pub use gradient::{ColorStop, LinearGradient, RadialGradient, SpreadMode};

/// Image used as a paint. Fills never blend images; they are carried as opaque values.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePaint {
    pub url: Arc<str>,
    pub origin: Vec2,
    pub size: Vec2,
    pub proportional: bool,
}

impl ImagePaint {
    /// Image stretched over the whole filled box.
    pub fn new(url: impl Into<Arc<str>>) -> Self {
        Self {
            url: url.into(),
            origin: Vec2::zero(),
            size: Vec2::new(1.0, 1.0),
            proportional: true,
        }
    }
}

impl Hash for ImagePaint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
        self.origin.hash(state);
        self.size.hash(state);
        self.proportional.hash(state);
    }
}

/// Discriminant of [`Paint`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PaintKind {
    Solid,
    LinearGradient,
    RadialGradient,
    Image,
}

/// Paint source for filling geometry.
///
/// Equality is by value. Float fields hash by canonical bit pattern, so
/// `Paint` can key hash maps; NaN channels never compare equal and are
/// therefore never shared.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
    Image(ImagePaint),
}

impl Eq for Paint {}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    #[inline]
    pub fn transparent() -> Self {
        Paint::Solid(Color::TRANSPARENT)
    }

    #[inline]
    pub fn kind(&self) -> PaintKind {
        match self {
            Paint::Solid(_) => PaintKind::Solid,
            Paint::LinearGradient(_) => PaintKind::LinearGradient,
            Paint::RadialGradient(_) => PaintKind::RadialGradient,
            Paint::Image(_) => PaintKind::Image,
        }
    }

    #[inline]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Paint::Solid(c) => Some(*c),
            _ => None,
        }
    }

    #[inline]
    pub fn is_gradient(&self) -> bool {
        matches!(self, Paint::LinearGradient(_) | Paint::RadialGradient(_))
    }

    /// Gradient stops, or `None` for solid and image paints.
    pub fn stops(&self) -> Option<&[ColorStop]> {
        match self {
            Paint::LinearGradient(g) => Some(&g.stops),
            Paint::RadialGradient(g) => Some(&g.stops),
            _ => None,
        }
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Solid(c) => c.is_opaque(),
            Paint::LinearGradient(g) => g.stops.iter().all(|s| s.color.is_opaque()),
            Paint::RadialGradient(g) => g.stops.iter().all(|s| s.color.is_opaque()),
            // Conservative: image alpha is unknown here.
            Paint::Image(_) => false,
        }
    }
}

impl Hash for Paint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Paint::Solid(c) => c.hash(state),
            Paint::LinearGradient(g) => g.hash(state),
            Paint::RadialGradient(g) => g.hash(state),
            Paint::Image(i) => i.hash(state),
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::LinearGradient(g)
    }
}

impl From<RadialGradient> for Paint {
    fn from(g: RadialGradient) -> Self {
        Paint::RadialGradient(g)
    }
}

impl From<ImagePaint> for Paint {
    fn from(i: ImagePaint) -> Self {
        Paint::Image(i)
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_stops = |f: &mut fmt::Formatter<'_>, stops: &[ColorStop]| -> fmt::Result {
            for s in stops {
                write!(f, ", {} {}%", s.color, s.offset * 100.0)?;
            }
            Ok(())
        };
        match self {
            Paint::Solid(c) => write!(f, "{c}"),
            Paint::LinearGradient(g) => {
                write!(f, "linear-gradient(from {} {} to {} {}", g.start.x, g.start.y, g.end.x, g.end.y)?;
                write_stops(f, &g.stops)?;
                write!(f, ")")
            }
            Paint::RadialGradient(g) => {
                write!(f, "radial-gradient(center {} {}, radius {}", g.center.x, g.center.y, g.radius)?;
                write_stops(f, &g.stops)?;
                write!(f, ")")
            }
            Paint::Image(i) => write!(f, "url({})", i.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equal_paints_share_a_hash_slot() {
        let mut set = HashSet::new();
        set.insert(Paint::solid(Color::rgb(1.0, 0.0, 0.0)));
        assert!(set.contains(&Paint::solid(Color::rgb(1.0, 0.0, 0.0))));
        assert!(!set.contains(&Paint::solid(Color::rgb(0.0, 1.0, 0.0))));
    }

    #[test]
    fn kinds_discriminate() {
        let lg = LinearGradient::new(
            Vec2::zero(),
            Vec2::new(1.0, 0.0),
            vec![ColorStop::new(0.0, Color::BLACK), ColorStop::new(1.0, Color::WHITE)],
        );
        assert_eq!(Paint::from(lg).kind(), PaintKind::LinearGradient);
        assert_eq!(Paint::from(ImagePaint::new("a.png")).kind(), PaintKind::Image);
    }

    #[test]
    fn opaque_checks_every_stop() {
        let g = LinearGradient::new(
            Vec2::zero(),
            Vec2::new(1.0, 0.0),
            vec![ColorStop::new(0.0, Color::BLACK), ColorStop::new(1.0, Color::TRANSPARENT)],
        );
        assert!(!Paint::from(g).is_opaque());
        assert!(Paint::solid(Color::WHITE).is_opaque());
    }
}
