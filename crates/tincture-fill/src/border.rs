use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use std::sync::Arc;

use tincture_paint::{Paint, Side};

use crate::cache::SpanCache;
use crate::span::ColorSpan;

/// Structural shape of a [`BorderSpan`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BorderShape {
    /// All four sides share one span.
    Uniform,
    /// Top equals bottom, right equals left.
    Bi,
    Quad,
}

#[derive(Debug, Eq, PartialEq)]
enum Sides {
    Uniform(ColorSpan),
    Bi { top_bottom: ColorSpan, right_left: ColorSpan },
    Quad { top: ColorSpan, right: ColorSpan, bottom: ColorSpan, left: ColorSpan },
}

/// Shared payload of a [`BorderSpan`].
#[derive(Debug)]
pub(crate) struct BorderData {
    sides: Sides,
    special: bool,
    hash: u64,
}

impl BorderData {
    fn new(sides: Sides) -> Self {
        let mut h = DefaultHasher::new();
        let special = match &sides {
            Sides::Uniform(s) => {
                0u8.hash(&mut h);
                s.hash(&mut h);
                s.is_special()
            }
            Sides::Bi { top_bottom, right_left } => {
                1u8.hash(&mut h);
                top_bottom.hash(&mut h);
                right_left.hash(&mut h);
                top_bottom.is_special() || right_left.is_special()
            }
            Sides::Quad { top, right, bottom, left } => {
                2u8.hash(&mut h);
                for s in [top, right, bottom, left] {
                    s.hash(&mut h);
                }
                [top, right, bottom, left].iter().any(|s| s.is_special())
            }
        };
        Self { sides, special, hash: h.finish() }
    }
}

impl PartialEq for BorderData {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.sides == other.sides
    }
}

impl Eq for BorderData {}

impl Hash for BorderData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

/// Four per-side [`ColorSpan`]s of one border stroke, stored in the smallest
/// shape that is structurally equal to the input.
#[derive(Clone)]
pub struct BorderSpan(pub(crate) Arc<BorderData>);

impl BorderSpan {
    fn intern(sides: Sides) -> BorderSpan {
        BorderSpan(SpanCache::global().intern_border_data(BorderData::new(sides)))
    }

    pub fn uniform(all: ColorSpan) -> BorderSpan {
        Self::intern(Sides::Uniform(all))
    }

    pub fn pair(top_bottom: ColorSpan, right_left: ColorSpan) -> BorderSpan {
        if top_bottom == right_left {
            return Self::uniform(top_bottom);
        }
        Self::intern(Sides::Bi { top_bottom, right_left })
    }

    pub fn quad(top: ColorSpan, right: ColorSpan, bottom: ColorSpan, left: ColorSpan) -> BorderSpan {
        if top == bottom && right == left {
            return Self::pair(top, right);
        }
        Self::intern(Sides::Quad { top, right, bottom, left })
    }

    /// CSS shorthand: 1 value (all), 2 (top/bottom, right/left),
    /// 3 (top, right/left, bottom) or 4 (top, right, bottom, left).
    pub fn from_sides(sides: &[ColorSpan]) -> Option<BorderSpan> {
        match sides {
            [all] => Some(Self::uniform(all.clone())),
            [tb, rl] => Some(Self::pair(tb.clone(), rl.clone())),
            [t, rl, b] => Some(Self::quad(t.clone(), rl.clone(), b.clone(), rl.clone())),
            [t, r, b, l] => Some(Self::quad(t.clone(), r.clone(), b.clone(), l.clone())),
            _ => None,
        }
    }

    pub fn shape(&self) -> BorderShape {
        match self.0.sides {
            Sides::Uniform(_) => BorderShape::Uniform,
            Sides::Bi { .. } => BorderShape::Bi,
            Sides::Quad { .. } => BorderShape::Quad,
        }
    }

    /// True when all four sides resolve to the same span.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.shape() == BorderShape::Uniform
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        self.0.special
    }

    pub fn side(&self, side: Side) -> &ColorSpan {
        match &self.0.sides {
            Sides::Uniform(s) => s,
            Sides::Bi { top_bottom, right_left } => match side {
                Side::Top | Side::Bottom => top_bottom,
                Side::Right | Side::Left => right_left,
            },
            Sides::Quad { top, right, bottom, left } => match side {
                Side::Top => top,
                Side::Right => right,
                Side::Bottom => bottom,
                Side::Left => left,
            },
        }
    }

    /// `[top, right, bottom, left]`
    pub fn sides(&self) -> [ColorSpan; 4] {
        Side::ALL.map(|s| self.side(s).clone())
    }

    /// Paints at fraction `t`, always in `[top, right, bottom, left]` order.
    pub fn interpolate(&self, t: f32) -> [Paint; 4] {
        match &self.0.sides {
            Sides::Uniform(s) => {
                let p = s.interpolate(t);
                [p.clone(), p.clone(), p.clone(), p]
            }
            Sides::Bi { top_bottom, right_left } => {
                let v = top_bottom.interpolate(t);
                let h = right_left.interpolate(t);
                [v.clone(), h.clone(), v, h]
            }
            Sides::Quad { top, right, bottom, left } => [
                top.interpolate(t),
                right.interpolate(t),
                bottom.interpolate(t),
                left.interpolate(t),
            ],
        }
    }

    #[inline]
    pub fn ptr_eq(a: &BorderSpan, b: &BorderSpan) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    #[inline]
    pub fn hash_code(&self) -> u64 {
        self.0.hash
    }
}

impl PartialEq for BorderSpan {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for BorderSpan {}

impl Hash for BorderSpan {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl fmt::Debug for BorderSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.sides {
            Sides::Uniform(s) => write!(f, "BorderSpan::Uniform({s})"),
            Sides::Bi { top_bottom, right_left } => write!(f, "BorderSpan::Bi({top_bottom}, {right_left})"),
            Sides::Quad { top, right, bottom, left } => {
                write!(f, "BorderSpan::Quad({top}, {right}, {bottom}, {left})")
            }
        }
    }
}
