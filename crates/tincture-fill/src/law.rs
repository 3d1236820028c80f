//! Interpolation laws between two concrete paints.
//!
//! A law is chosen once, when a span is built, and replayed on every frame:
//!
//! | from \ to   | solid    | linear   | radial   | image    |
//! |-------------|----------|----------|----------|----------|
//! | solid       | rgba     | gradient | gradient | discrete |
//! | linear      | gradient | gradient | discrete | discrete |
//! | radial      | gradient | discrete | gradient | discrete |
//! | image       | discrete | discrete | discrete | discrete |
//!
//! Against a solid color, a gradient's partner is synthesized from the
//! gradient's own geometry and offsets, every stop painted with the color.

use core::cmp::Ordering;

use tincture_paint::coords::lerp;
use tincture_paint::paint::gradient::same_offsets;
use tincture_paint::{Color, ColorStop, LinearGradient, Paint, RadialGradient};

use crate::placeholder::SpanEnd;

/// How a span moves from `from` to `to` for `t` strictly inside `(0, 1)`.
#[derive(Debug)]
pub(crate) enum Law {
    /// `from ≡ to`.
    Constant,
    /// Solid to solid.
    Rgba(Color, Color),
    Gradient(Box<GradientPlan>),
    /// Paints that cannot blend flip at the midpoint.
    Discrete,
    /// At least one end is a placeholder.
    Special,
}

impl Law {
    pub(crate) fn between(from: &SpanEnd, to: &SpanEnd) -> Law {
        let (SpanEnd::Paint(a), SpanEnd::Paint(b)) = (from, to) else {
            return Law::Special;
        };
        if a == b {
            return Law::Constant;
        }
        let pair = match (a, b) {
            (Paint::Solid(x), Paint::Solid(y)) => return Law::Rgba(*x, *y),
            (Paint::Solid(c), Paint::LinearGradient(g)) => GradientPair::Linear(tint_linear(g, *c), g.clone()),
            (Paint::LinearGradient(g), Paint::Solid(c)) => GradientPair::Linear(g.clone(), tint_linear(g, *c)),
            (Paint::Solid(c), Paint::RadialGradient(g)) => GradientPair::Radial(tint_radial(g, *c), g.clone()),
            (Paint::RadialGradient(g), Paint::Solid(c)) => GradientPair::Radial(g.clone(), tint_radial(g, *c)),
            (Paint::LinearGradient(x), Paint::LinearGradient(y)) => GradientPair::Linear(x.clone(), y.clone()),
            (Paint::RadialGradient(x), Paint::RadialGradient(y)) => GradientPair::Radial(x.clone(), y.clone()),
            _ => return Law::Discrete,
        };
        Law::Gradient(Box::new(GradientPlan::new(pair)))
    }
}

fn tinted(stops: &[ColorStop], color: Color) -> Vec<ColorStop> {
    stops.iter().map(|s| ColorStop::new(s.offset, color)).collect()
}

fn tint_linear(g: &LinearGradient, color: Color) -> LinearGradient {
    g.with_stops(tinted(&g.stops, color))
}

fn tint_radial(g: &RadialGradient, color: Color) -> RadialGradient {
    g.with_stops(tinted(&g.stops, color))
}

#[derive(Debug)]
pub(crate) enum GradientPair {
    Linear(LinearGradient, LinearGradient),
    Radial(RadialGradient, RadialGradient),
}

/// Precomputed gradient-to-gradient interpolation.
#[derive(Debug)]
pub(crate) struct GradientPlan {
    pair: GradientPair,
    /// `None` when both sides already share the same offsets.
    merge: Option<StopMerge>,
}

impl GradientPlan {
    pub(crate) fn new(pair: GradientPair) -> Self {
        let (a, b) = match &pair {
            GradientPair::Linear(a, b) => (&a.stops, &b.stops),
            GradientPair::Radial(a, b) => (&a.stops, &b.stops),
        };
        let merge = (!same_offsets(a, b)).then(|| StopMerge::new(a, b));
        Self { pair, merge }
    }

    pub(crate) fn interpolate(&self, t: f32) -> Paint {
        match &self.pair {
            GradientPair::Linear(a, b) => {
                let stops = self.stops(&a.stops, &b.stops, t);
                if a.same_geometry(b) {
                    Paint::LinearGradient(b.with_stops(stops))
                } else {
                    Paint::LinearGradient(LinearGradient {
                        start: a.start.lerp(b.start, t),
                        end: a.end.lerp(b.end, t),
                        proportional: b.proportional,
                        spread: b.spread,
                        stops,
                    })
                }
            }
            GradientPair::Radial(a, b) => {
                let stops = self.stops(&a.stops, &b.stops, t);
                if a.same_geometry(b) {
                    Paint::RadialGradient(b.with_stops(stops))
                } else {
                    Paint::RadialGradient(RadialGradient {
                        focus_angle: lerp(a.focus_angle, b.focus_angle, t),
                        focus_distance: lerp(a.focus_distance, b.focus_distance, t),
                        center: a.center.lerp(b.center, t),
                        radius: lerp(a.radius, b.radius, t),
                        proportional: b.proportional,
                        spread: b.spread,
                        stops,
                    })
                }
            }
        }
    }

    fn stops(&self, from: &[ColorStop], to: &[ColorStop], t: f32) -> Vec<ColorStop> {
        match &self.merge {
            Some(merge) => merge.replay(from, to, t),
            None => from
                .iter()
                .zip(to)
                .map(|(a, b)| ColorStop::new(a.offset, a.color.lerp(b.color, t)))
                .collect(),
        }
    }
}

/// Which side contributes a fresh stop at each merged offset.
#[derive(Debug, Clone, PartialEq)]
enum FreshStops {
    /// Bit `32 + k` = "from" has a stop at merged offset `k`, bit `k` = "to" has one.
    Packed(u64),
    /// Fallback for merges longer than 32 offsets: `(from, to)` per offset.
    Wide(Vec<(bool, bool)>),
}

/// Union of two sorted stop-offset sequences.
///
/// Built once per span with a three-way merge, then replayed in O(n) for
/// every interpolated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StopMerge {
    offsets: Vec<f32>,
    fresh: FreshStops,
}

impl StopMerge {
    pub fn new(from: &[ColorStop], to: &[ColorStop]) -> Self {
        let mut offsets = Vec::with_capacity(from.len() + to.len());
        let mut flags = Vec::with_capacity(from.len() + to.len());
        let (mut i, mut j) = (0, 0);

        while i < from.len() || j < to.len() {
            let step = match (from.get(i), to.get(j)) {
                (Some(a), Some(b)) => a.offset.total_cmp(&b.offset),
                (Some(_), None) => Ordering::Less,
                _ => Ordering::Greater,
            };
            match step {
                Ordering::Equal => {
                    offsets.push(from[i].offset);
                    flags.push((true, true));
                    i += 1;
                    j += 1;
                }
                Ordering::Less => {
                    offsets.push(from[i].offset);
                    flags.push((true, false));
                    i += 1;
                }
                Ordering::Greater => {
                    offsets.push(to[j].offset);
                    flags.push((false, true));
                    j += 1;
                }
            }
        }

        let fresh = if flags.len() <= 32 {
            let mut bits = 0u64;
            for (k, (f, t)) in flags.iter().enumerate() {
                if *f {
                    bits |= 1u64 << (32 + k);
                }
                if *t {
                    bits |= 1u64 << k;
                }
            }
            FreshStops::Packed(bits)
        } else {
            FreshStops::Wide(flags)
        };

        Self { offsets, fresh }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// Whether the "from" gradient has a real stop at merged offset `k`.
    pub fn from_has_stop(&self, k: usize) -> bool {
        match &self.fresh {
            FreshStops::Packed(bits) => k < 32 && bits & (1u64 << (32 + k)) != 0,
            FreshStops::Wide(flags) => flags.get(k).is_some_and(|f| f.0),
        }
    }

    /// Whether the "to" gradient has a real stop at merged offset `k`.
    pub fn to_has_stop(&self, k: usize) -> bool {
        match &self.fresh {
            FreshStops::Packed(bits) => k < 32 && bits & (1u64 << k) != 0,
            FreshStops::Wide(flags) => flags.get(k).is_some_and(|f| f.1),
        }
    }

    /// Stops at every merged offset, colored `lerp(from_active, to_active, t)`.
    ///
    /// A side without a stop at an offset holds the color of its last real stop;
    /// before its first stop it uses that first stop's color.
    pub fn replay(&self, from: &[ColorStop], to: &[ColorStop], t: f32) -> Vec<ColorStop> {
        let mut out = Vec::with_capacity(self.offsets.len());
        let (mut i, mut j) = (0, 0);
        let mut a = from.first().map_or(Color::TRANSPARENT, |s| s.color);
        let mut b = to.first().map_or(Color::TRANSPARENT, |s| s.color);

        for (k, &offset) in self.offsets.iter().enumerate() {
            if self.from_has_stop(k) {
                if let Some(s) = from.get(i) {
                    a = s.color;
                }
                i += 1;
            }
            if self.to_has_stop(k) {
                if let Some(s) = to.get(j) {
                    b = s.color;
                }
                j += 1;
            }
            out.push(ColorStop::new(offset, a.lerp(b, t)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_paint::coords::Vec2;

    fn stops(offsets: &[f32]) -> Vec<ColorStop> {
        offsets.iter().map(|&o| ColorStop::new(o, Color::rgb(o, 0.0, 0.0))).collect()
    }

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    fn linear(stops: Vec<ColorStop>) -> LinearGradient {
        LinearGradient::new(Vec2::zero(), Vec2::new(1.0, 0.0), stops)
    }

    // ── StopMerge ─────────────────────────────────────────────────────────

    #[test]
    fn disjoint_offsets_merge_to_sum() {
        let m = StopMerge::new(&stops(&[0.0, 0.4, 1.0]), &stops(&[0.1, 0.5]));
        assert_eq!(m.len(), 5);
        assert_eq!(m.offsets(), &[0.0, 0.1, 0.4, 0.5, 1.0]);
    }

    #[test]
    fn shared_offsets_are_counted_once() {
        // m = 4, n = 3, k = 2 shared (0.0 and 1.0)
        let m = StopMerge::new(&stops(&[0.0, 0.2, 0.6, 1.0]), &stops(&[0.0, 0.5, 1.0]));
        assert_eq!(m.len(), 4 + 3 - 2);
    }

    #[test]
    fn fresh_bits_track_contributing_side() {
        let m = StopMerge::new(&stops(&[0.0, 1.0]), &stops(&[0.0, 0.5, 1.0]));
        assert!(m.from_has_stop(0) && m.to_has_stop(0));
        assert!(!m.from_has_stop(1) && m.to_has_stop(1));
        assert!(m.from_has_stop(2) && m.to_has_stop(2));
    }

    #[test]
    fn long_merges_fall_back_to_wide_flags() {
        let a: Vec<f32> = (0..20).map(|k| k as f32 / 40.0).collect();
        let b: Vec<f32> = (0..20).map(|k| 0.5 + k as f32 / 40.0 + 0.01).collect();
        let m = StopMerge::new(&stops(&a), &stops(&b));
        assert_eq!(m.len(), 40);
        assert!(m.from_has_stop(19) && !m.to_has_stop(19));
        assert!(m.to_has_stop(39) && !m.from_has_stop(39));
    }

    #[test]
    fn missing_side_holds_last_color() {
        let from = vec![ColorStop::new(0.0, RED), ColorStop::new(1.0, BLUE)];
        let to = vec![ColorStop::new(0.0, RED), ColorStop::new(0.5, GREEN), ColorStop::new(1.0, BLUE)];
        let m = StopMerge::new(&from, &to);
        let at0 = m.replay(&from, &to, 0.0);
        assert_eq!(at0.iter().map(|s| s.color).collect::<Vec<_>>(), vec![RED, RED, BLUE]);
        let at1 = m.replay(&from, &to, 1.0);
        assert_eq!(at1.iter().map(|s| s.color).collect::<Vec<_>>(), vec![RED, GREEN, BLUE]);
    }

    #[test]
    fn side_starting_late_uses_its_first_color() {
        let from = vec![ColorStop::new(0.0, RED), ColorStop::new(1.0, RED)];
        let to = vec![ColorStop::new(0.5, GREEN), ColorStop::new(1.0, BLUE)];
        let m = StopMerge::new(&from, &to);
        let out = m.replay(&from, &to, 1.0);
        assert_eq!(out[0], ColorStop::new(0.0, GREEN));
    }

    // ── Law selection ─────────────────────────────────────────────────────

    #[test]
    fn equal_paints_are_constant() {
        let p = SpanEnd::Paint(Paint::solid(RED));
        assert!(matches!(Law::between(&p, &p.clone()), Law::Constant));
    }

    #[test]
    fn linear_against_radial_is_discrete() {
        let a = SpanEnd::Paint(linear(vec![ColorStop::new(0.0, RED), ColorStop::new(1.0, BLUE)]).into());
        let b = SpanEnd::Paint(
            RadialGradient::new(Vec2::new(0.5, 0.5), 0.5, vec![ColorStop::new(0.0, RED)]).into(),
        );
        assert!(matches!(Law::between(&a, &b), Law::Discrete));
    }

    #[test]
    fn color_against_gradient_synthesizes_matching_stops() {
        let g = linear(vec![ColorStop::new(0.0, RED), ColorStop::new(0.3, GREEN), ColorStop::new(1.0, BLUE)]);
        let law = Law::between(&SpanEnd::Paint(Paint::solid(Color::WHITE)), &SpanEnd::Paint(g.clone().into()));
        let Law::Gradient(plan) = law else { panic!("expected gradient law") };
        assert!(plan.merge.is_none());
        let Paint::LinearGradient(mid) = plan.interpolate(0.5) else { panic!("expected linear") };
        assert_eq!(mid.stops.len(), 3);
        assert_eq!(mid.stops[1].offset, 0.3);
        assert_eq!(mid.stops[1].color, Color::WHITE.lerp(GREEN, 0.5));
        assert!(mid.same_geometry(&g));
    }

    fn radial() -> RadialGradient {
        RadialGradient::new(
            Vec2::new(0.4, 0.6),
            0.7,
            vec![ColorStop::new(0.0, RED), ColorStop::new(0.25, GREEN), ColorStop::new(1.0, BLUE)],
        )
        .focus(0.5, 0.2)
    }

    #[test]
    fn color_into_radial_synthesizes_the_from_side() {
        let g = radial();
        let law = Law::between(&SpanEnd::Paint(Paint::solid(Color::WHITE)), &SpanEnd::Paint(g.clone().into()));
        let Law::Gradient(plan) = law else { panic!("expected gradient law") };
        let GradientPair::Radial(from, _) = &plan.pair else { panic!("expected radial pair") };
        assert!(from.same_geometry(&g));
        assert_eq!(from.stops.len(), g.stops.len());
        assert!(from.stops.iter().zip(&g.stops).all(|(a, b)| a.offset == b.offset && a.color == Color::WHITE));

        let Paint::RadialGradient(mid) = plan.interpolate(0.5) else { panic!("expected radial") };
        assert!(mid.same_geometry(&g));
        assert_eq!(mid.stops[1].offset, 0.25);
        assert_eq!(mid.stops[1].color, Color::WHITE.lerp(GREEN, 0.5));
    }

    #[test]
    fn radial_into_color_synthesizes_the_to_side() {
        let g = radial();
        let law = Law::between(&SpanEnd::Paint(g.clone().into()), &SpanEnd::Paint(Paint::solid(Color::BLACK)));
        let Law::Gradient(plan) = law else { panic!("expected gradient law") };
        assert!(plan.merge.is_none());
        let GradientPair::Radial(_, to) = &plan.pair else { panic!("expected radial pair") };
        assert!(to.same_geometry(&g));
        assert_eq!(to.stops.len(), 3);
        assert!(to.stops.iter().zip(&g.stops).all(|(a, b)| a.offset == b.offset && a.color == Color::BLACK));

        let Paint::RadialGradient(mid) = plan.interpolate(0.5) else { panic!("expected radial") };
        assert_eq!(mid.stops.len(), 3);
        assert_eq!(mid.stops[2].color, BLUE.lerp(Color::BLACK, 0.5));
    }

    #[test]
    fn linear_into_color_synthesizes_the_to_side() {
        let g = linear(vec![ColorStop::new(0.0, RED), ColorStop::new(0.6, GREEN), ColorStop::new(1.0, BLUE)]);
        let law = Law::between(&SpanEnd::Paint(g.clone().into()), &SpanEnd::Paint(Paint::solid(Color::WHITE)));
        let Law::Gradient(plan) = law else { panic!("expected gradient law") };
        let GradientPair::Linear(_, to) = &plan.pair else { panic!("expected linear pair") };
        assert!(to.same_geometry(&g));
        assert!(to.stops.iter().zip(&g.stops).all(|(a, b)| a.offset == b.offset && a.color == Color::WHITE));

        let Paint::LinearGradient(mid) = plan.interpolate(0.5) else { panic!("expected linear") };
        assert!(mid.same_geometry(&g));
        assert_eq!(mid.stops.len(), 3);
        assert_eq!(mid.stops[1].offset, 0.6);
        assert_eq!(mid.stops[1].color, GREEN.lerp(Color::WHITE, 0.5));
    }

    #[test]
    fn non_uniform_geometry_interpolates_scalars_and_snaps_enums() {
        let a = linear(vec![ColorStop::new(0.0, RED), ColorStop::new(1.0, BLUE)]);
        let b = LinearGradient::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), a.stops.clone())
            .spread(tincture_paint::SpreadMode::Repeat)
            .proportional(false);
        let plan = GradientPlan::new(GradientPair::Linear(a, b));
        let Paint::LinearGradient(mid) = plan.interpolate(0.25) else { panic!("expected linear") };
        assert_eq!(mid.start, Vec2::new(0.0, 0.25));
        assert_eq!(mid.spread, tincture_paint::SpreadMode::Repeat);
        assert!(!mid.proportional);
    }

    #[test]
    fn radial_radius_interpolates() {
        let s = vec![ColorStop::new(0.0, RED), ColorStop::new(1.0, BLUE)];
        let a = RadialGradient::new(Vec2::new(0.5, 0.5), 0.2, s.clone());
        let b = RadialGradient::new(Vec2::new(0.5, 0.5), 0.6, s);
        let plan = GradientPlan::new(GradientPair::Radial(a, b));
        let Paint::RadialGradient(mid) = plan.interpolate(0.5) else { panic!("expected radial") };
        assert!((mid.radius - 0.4).abs() < 1e-6);
    }
}
