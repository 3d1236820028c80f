use core::hash::{Hash, Hasher};

use crate::coords::{canonical_bits, Vec2};

use super::Color;

/// Gradient spread behavior outside the `[0, 1]` range (the CSS "cycle method").
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

impl Hash for ColorStop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.offset).hash(state);
        self.color.hash(state);
    }
}

/// Clamps offsets into `[0, 1]` and orders stops by offset.
///
/// The sort is stable, so coincident offsets keep their authored order and
/// still produce a hard color edge.
pub fn normalize_stops(mut stops: Vec<ColorStop>) -> Vec<ColorStop> {
    for s in &mut stops {
        s.offset = if s.offset.is_finite() { s.offset.clamp(0.0, 1.0) } else { 0.0 };
    }
    stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    stops
}

/// Returns `true` when both stop lists have the same length and offsets.
pub fn same_offsets(a: &[ColorStop], b: &[ColorStop]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.offset == y.offset)
}

/// Linear gradient along `start → end`.
///
/// Semantics:
/// - `start` and `end` are unit fractions of the filled box when `proportional`,
///   logical pixels otherwise.
/// - Stops are sorted by offset at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub proportional: bool,
    pub spread: SpreadMode,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Proportional, padded gradient.
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>) -> Self {
        Self {
            start,
            end,
            proportional: true,
            spread: SpreadMode::Pad,
            stops: normalize_stops(stops),
        }
    }

    pub fn proportional(mut self, v: bool) -> Self { self.proportional = v; self }
    pub fn spread(mut self, v: SpreadMode) -> Self { self.spread = v; self }

    /// Same geometry, different stops.
    pub fn with_stops(&self, stops: Vec<ColorStop>) -> Self {
        Self { stops, ..self.clone_geometry() }
    }

    /// True when every non-stop field matches `other`.
    pub fn same_geometry(&self, other: &LinearGradient) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.proportional == other.proportional
            && self.spread == other.spread
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.offset.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }

    fn clone_geometry(&self) -> Self {
        Self {
            start: self.start,
            end: self.end,
            proportional: self.proportional,
            spread: self.spread,
            stops: Vec::new(),
        }
    }
}

impl Hash for LinearGradient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.proportional.hash(state);
        self.spread.hash(state);
        self.stops.hash(state);
    }
}

/// Radial gradient around `center`, optionally with a displaced focus point.
///
/// `focus_angle` is in degrees; `focus_distance` is a fraction of `radius`
/// in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub focus_angle: f32,
    pub focus_distance: f32,
    pub center: Vec2,
    pub radius: f32,
    pub proportional: bool,
    pub spread: SpreadMode,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Proportional, padded, unfocused gradient.
    pub fn new(center: Vec2, radius: f32, stops: Vec<ColorStop>) -> Self {
        Self {
            focus_angle: 0.0,
            focus_distance: 0.0,
            center,
            radius,
            proportional: true,
            spread: SpreadMode::Pad,
            stops: normalize_stops(stops),
        }
    }

    pub fn focus(mut self, angle: f32, distance: f32) -> Self {
        self.focus_angle = angle;
        self.focus_distance = distance;
        self
    }
    pub fn proportional(mut self, v: bool) -> Self { self.proportional = v; self }
    pub fn spread(mut self, v: SpreadMode) -> Self { self.spread = v; self }

    /// Same geometry, different stops.
    pub fn with_stops(&self, stops: Vec<ColorStop>) -> Self {
        Self {
            focus_angle: self.focus_angle,
            focus_distance: self.focus_distance,
            center: self.center,
            radius: self.radius,
            proportional: self.proportional,
            spread: self.spread,
            stops,
        }
    }

    /// True when every non-stop field matches `other`.
    pub fn same_geometry(&self, other: &RadialGradient) -> bool {
        self.focus_angle == other.focus_angle
            && self.focus_distance == other.focus_distance
            && self.center == other.center
            && self.radius == other.radius
            && self.proportional == other.proportional
            && self.spread == other.spread
    }

    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.radius.is_finite()
            && self.radius > 0.0
            && self.stops.iter().all(|s| s.offset.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
    }
}

impl Hash for RadialGradient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.focus_angle).hash(state);
        canonical_bits(self.focus_distance).hash(state);
        self.center.hash(state);
        canonical_bits(self.radius).hash(state);
        self.proportional.hash(state);
        self.spread.hash(state);
        self.stops.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(offset: f32) -> ColorStop {
        ColorStop::new(offset, Color::BLACK)
    }

    #[test]
    fn stops_are_sorted_and_clamped() {
        let g = LinearGradient::new(
            Vec2::zero(),
            Vec2::new(1.0, 0.0),
            vec![stop(1.4), stop(0.5), stop(-1.0)],
        );
        let offsets: Vec<f32> = g.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn geometry_ignores_stops() {
        let a = LinearGradient::new(Vec2::zero(), Vec2::new(1.0, 0.0), vec![stop(0.0), stop(1.0)]);
        let b = a.with_stops(vec![stop(0.0), stop(0.3), stop(1.0)]);
        assert!(a.same_geometry(&b));
        assert!(!a.same_geometry(&b.clone().spread(SpreadMode::Reflect)));
    }

    #[test]
    fn degenerate_linear_is_invalid() {
        let g = LinearGradient::new(Vec2::zero(), Vec2::zero(), vec![stop(0.0), stop(1.0)]);
        assert!(!g.is_valid());
    }

    #[test]
    fn radial_needs_positive_radius() {
        let g = RadialGradient::new(Vec2::new(0.5, 0.5), 0.0, vec![stop(0.0), stop(1.0)]);
        assert!(!g.is_valid());
        let g = RadialGradient::new(Vec2::new(0.5, 0.5), 0.5, vec![stop(0.0), stop(1.0)]);
        assert!(g.is_valid());
    }
}
