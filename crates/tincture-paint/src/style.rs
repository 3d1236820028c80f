//! Paint-bearing style slots of an element.
//!
//! Fills only ever swap the paints of these values. Radii, insets, widths
//! and stroke styles are carried through untouched.

use crate::coords::{CornerRadii, Insets};
use crate::paint::Paint;

/// One edge of a box, in CSS order.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Side {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides in `[top, right, bottom, left]` order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    pub fn from_name(name: &str) -> Option<Side> {
        match name {
            "top" => Some(Side::Top),
            "right" => Some(Side::Right),
            "bottom" => Some(Side::Bottom),
            "left" => Some(Side::Left),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

/// A single background layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundFill {
    pub paint: Paint,
    pub radii: CornerRadii,
    pub insets: Insets,
}

impl BackgroundFill {
    #[inline]
    pub fn new(paint: impl Into<Paint>) -> Self {
        Self { paint: paint.into(), radii: CornerRadii::zero(), insets: Insets::zero() }
    }

    pub fn radii(mut self, radii: CornerRadii) -> Self { self.radii = radii; self }
    pub fn insets(mut self, insets: Insets) -> Self { self.insets = insets; self }

    /// Copy of this layer with a different paint.
    pub fn with_paint(&self, paint: Paint) -> Self {
        Self { paint, radii: self.radii, insets: self.insets }
    }
}

/// Line style of a border stroke.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BorderStyle {
    None,
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// A single border layer with one paint per side.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderStroke {
    /// `[top, right, bottom, left]`
    pub paints: [Paint; 4],
    pub style: BorderStyle,
    pub widths: Insets,
    pub radii: CornerRadii,
    pub insets: Insets,
}

impl BorderStroke {
    /// Solid stroke of `width` with the same paint on all sides.
    pub fn uniform(paint: impl Into<Paint>, width: f32) -> Self {
        let paint = paint.into();
        Self {
            paints: [paint.clone(), paint.clone(), paint.clone(), paint],
            style: BorderStyle::Solid,
            widths: Insets::all(width),
            radii: CornerRadii::zero(),
            insets: Insets::zero(),
        }
    }

    /// Solid stroke of `width` with per-side paints.
    pub fn sides(paints: [Paint; 4], width: f32) -> Self {
        Self {
            paints,
            style: BorderStyle::Solid,
            widths: Insets::all(width),
            radii: CornerRadii::zero(),
            insets: Insets::zero(),
        }
    }

    pub fn style(mut self, style: BorderStyle) -> Self { self.style = style; self }
    pub fn widths(mut self, widths: Insets) -> Self { self.widths = widths; self }
    pub fn radii(mut self, radii: CornerRadii) -> Self { self.radii = radii; self }
    pub fn insets(mut self, insets: Insets) -> Self { self.insets = insets; self }

    #[inline]
    pub fn paint(&self, side: Side) -> &Paint {
        &self.paints[side.index()]
    }

    /// Copy of this stroke with different paints.
    pub fn with_paints(&self, paints: [Paint; 4]) -> Self {
        Self {
            paints,
            style: self.style,
            widths: self.widths,
            radii: self.radii,
            insets: self.insets,
        }
    }
}

/// Paints of the element's shape, when it has one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
}

impl ShapeStyle {
    pub fn new(fill: Option<Paint>, stroke: Option<Paint>) -> Self {
        Self { fill, stroke }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn with_paints_preserves_geometry() {
        let stroke = BorderStroke::uniform(Color::BLACK, 2.0)
            .style(BorderStyle::Dashed)
            .radii(CornerRadii::all(4.0));
        let white = Paint::solid(Color::WHITE);
        let swapped = stroke.with_paints([white.clone(), white.clone(), white.clone(), white.clone()]);
        assert_eq!(swapped.style, BorderStyle::Dashed);
        assert_eq!(swapped.radii, CornerRadii::all(4.0));
        assert_eq!(swapped.widths, Insets::all(2.0));
        assert_eq!(swapped.paint(Side::Left), &white);
    }

    #[test]
    fn side_names_round_trip() {
        for side in Side::ALL {
            assert_eq!(Side::from_name(side.name()), Some(side));
        }
        assert_eq!(Side::from_name("middle"), None);
    }
}
