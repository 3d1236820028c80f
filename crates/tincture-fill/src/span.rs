use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use std::sync::Arc;

use tincture_paint::Paint;

use crate::cache::SpanCache;
use crate::law::Law;
use crate::placeholder::{Placeholder, SpanEnd};
use crate::resolve::unresolved_paint;

/// Shared payload of a [`ColorSpan`]. Equality and hashing only look at the ends.
#[derive(Debug)]
pub(crate) struct SpanData {
    from: SpanEnd,
    to: SpanEnd,
    law: Law,
    hash: u64,
}

impl SpanData {
    pub(crate) fn new(from: SpanEnd, to: SpanEnd) -> Self {
        let mut h = DefaultHasher::new();
        from.hash(&mut h);
        to.hash(&mut h);
        let law = Law::between(&from, &to);
        Self { from, to, law, hash: h.finish() }
    }
}

impl PartialEq for SpanData {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.from == other.from && self.to == other.to
    }
}

impl Eq for SpanData {}

impl Hash for SpanData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

/// Immutable `(from, to)` paint pair with an interpolation law.
///
/// Spans are interned through [`SpanCache`]; cloning is a reference-count bump.
/// Equality is always by value, sharing is only a memory optimization.
///
/// ```
/// use tincture_fill::ColorSpan;
/// use tincture_paint::{Color, Paint};
///
/// let span = ColorSpan::new(Color::BLACK, Color::WHITE);
/// assert_eq!(span.interpolate(0.0), Paint::solid(Color::BLACK));
/// assert_eq!(span.interpolate(1.0), Paint::solid(Color::WHITE));
/// ```
#[derive(Clone)]
pub struct ColorSpan(pub(crate) Arc<SpanData>);

impl ColorSpan {
    /// Builds a span from optional ends.
    ///
    /// - both absent: the canonical transparent span
    /// - one absent: both ends take the present value
    pub fn of(from: Option<SpanEnd>, to: Option<SpanEnd>) -> ColorSpan {
        let (from, to) = match (from, to) {
            (None, None) => return ColorSpan::transparent(),
            (Some(f), None) => (f.clone(), f),
            (None, Some(t)) => (t.clone(), t),
            (Some(f), Some(t)) => (f, t),
        };
        ColorSpan(SpanCache::global().intern_data(SpanData::new(from, to)))
    }

    pub fn new(from: impl Into<SpanEnd>, to: impl Into<SpanEnd>) -> ColorSpan {
        Self::of(Some(from.into()), Some(to.into()))
    }

    /// Span that stays on `end` for every fraction.
    pub fn constant(end: impl Into<SpanEnd>) -> ColorSpan {
        Self::of(Some(end.into()), None)
    }

    /// Fully transparent constant span.
    pub fn transparent() -> ColorSpan {
        Self::constant(Paint::transparent())
    }

    #[inline]
    pub fn from(&self) -> &SpanEnd {
        &self.0.from
    }

    #[inline]
    pub fn to(&self) -> &SpanEnd {
        &self.0.to
    }

    #[inline]
    pub fn from_equals_to(&self) -> bool {
        matches!(self.0.law, Law::Constant) || self.0.from == self.0.to
    }

    /// True when either end is a placeholder that needs resolving.
    #[inline]
    pub fn is_special(&self) -> bool {
        matches!(self.0.law, Law::Special)
    }

    /// Placeholders of `(from, to)`.
    pub fn placeholders(&self) -> (Option<Placeholder>, Option<Placeholder>) {
        (self.0.from.as_placeholder(), self.0.to.as_placeholder())
    }

    /// Paint at fraction `t`.
    ///
    /// `t <= 0` (or NaN) yields `from` and `t >= 1` yields `to`, exactly.
    /// Unresolved placeholder ends read as the unresolved-paint sentinel.
    pub fn interpolate(&self, t: f32) -> Paint {
        let data = &*self.0;
        if t.is_nan() || t <= 0.0 {
            return end_paint(&data.from);
        }
        if t >= 1.0 {
            return end_paint(&data.to);
        }
        match &data.law {
            Law::Constant => end_paint(&data.from),
            Law::Rgba(a, b) => Paint::Solid(a.lerp(*b, t)),
            Law::Gradient(plan) => plan.interpolate(t),
            Law::Discrete | Law::Special => {
                if t < 0.5 { end_paint(&data.from) } else { end_paint(&data.to) }
            }
        }
    }

    /// True when both handles share one allocation.
    #[inline]
    pub fn ptr_eq(a: &ColorSpan, b: &ColorSpan) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Precomputed hash of the span's ends.
    #[inline]
    pub fn hash_code(&self) -> u64 {
        self.0.hash
    }
}

fn end_paint(end: &SpanEnd) -> Paint {
    match end {
        SpanEnd::Paint(p) => p.clone(),
        SpanEnd::Placeholder(_) => unresolved_paint(),
    }
}

impl PartialEq for ColorSpan {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for ColorSpan {}

impl Hash for ColorSpan {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl fmt::Debug for ColorSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorSpan({} -> {})", self.0.from, self.0.to)
    }
}

impl fmt::Display for ColorSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from_equals_to() {
            write!(f, "{}", self.0.from)
        } else {
            write!(f, "{} -> {}", self.0.from, self.0.to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_paint::coords::Vec2;
    use tincture_paint::{Color, ColorStop, ImagePaint, LinearGradient};

    use crate::resolve::is_unresolved;

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn both_absent_is_transparent() {
        let s = ColorSpan::of(None, None);
        assert_eq!(s, ColorSpan::transparent());
        assert_eq!(s.interpolate(0.5), Paint::transparent());
    }

    #[test]
    fn one_absent_copies_the_other() {
        let s = ColorSpan::of(None, Some(RED.into()));
        assert!(s.from_equals_to());
        assert_eq!(s.from(), &SpanEnd::from(RED));
    }

    #[test]
    fn equal_ends_collapse() {
        let s = ColorSpan::new(RED, RED);
        assert!(s.from_equals_to());
        assert_eq!(s.interpolate(0.3), Paint::solid(RED));
    }

    #[test]
    fn equal_spans_share_an_allocation() {
        let a = ColorSpan::new(Color::rgb(0.1, 0.2, 0.3), Color::rgb(0.3, 0.2, 0.1));
        let b = ColorSpan::new(Color::rgb(0.1, 0.2, 0.3), Color::rgb(0.3, 0.2, 0.1));
        assert_eq!(a, b);
        assert!(ColorSpan::ptr_eq(&a, &b));
    }

    #[test]
    fn placeholder_end_makes_special() {
        let s = ColorSpan::new(Placeholder::Text, RED);
        assert!(s.is_special());
        assert_eq!(s.placeholders(), (Some(Placeholder::Text), None));
        assert!(!ColorSpan::new(RED, BLUE).is_special());
    }

    // ── interpolate ───────────────────────────────────────────────────────

    #[test]
    fn endpoints_are_exact() {
        let s = ColorSpan::new(Color::rgb(0.1, 0.7, 0.3), Color::rgba(0.9, 0.2, 0.4, 0.5));
        assert_eq!(s.interpolate(0.0), Paint::solid(Color::rgb(0.1, 0.7, 0.3)));
        assert_eq!(s.interpolate(1.0), Paint::solid(Color::rgba(0.9, 0.2, 0.4, 0.5)));
    }

    #[test]
    fn out_of_range_fractions_clamp() {
        let s = ColorSpan::new(RED, BLUE);
        assert_eq!(s.interpolate(-3.0), Paint::solid(RED));
        assert_eq!(s.interpolate(7.0), Paint::solid(BLUE));
        assert_eq!(s.interpolate(f32::NAN), Paint::solid(RED));
    }

    #[test]
    fn solid_midpoint() {
        let s = ColorSpan::new(RED, BLUE);
        assert_eq!(s.interpolate(0.5), Paint::solid(Color::rgb(0.5, 0.0, 0.5)));
    }

    #[test]
    fn images_flip_at_midpoint() {
        let img: Paint = ImagePaint::new("noise.png").into();
        let s = ColorSpan::new(img.clone(), RED);
        assert_eq!(s.interpolate(0.49), img);
        assert_eq!(s.interpolate(0.5), Paint::solid(RED));
    }

    #[test]
    fn unresolved_special_reads_as_sentinel() {
        let s = ColorSpan::new(Placeholder::background(), RED);
        assert!(is_unresolved(&s.interpolate(0.0)));
        assert_eq!(s.interpolate(1.0), Paint::solid(RED));
    }

    #[test]
    fn gradient_endpoints_are_exact() {
        let from: Paint = LinearGradient::new(
            Vec2::zero(),
            Vec2::new(1.0, 0.0),
            vec![ColorStop::new(0.0, RED), ColorStop::new(1.0, BLUE)],
        )
        .into();
        let s = ColorSpan::new(from.clone(), Color::WHITE);
        assert_eq!(s.interpolate(0.0), from);
        assert_eq!(s.interpolate(1.0), Paint::solid(Color::WHITE));
        assert!(s.interpolate(0.5).is_gradient());
    }
}
