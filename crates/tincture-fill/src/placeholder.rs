use core::fmt;

use tincture_paint::{Color, Paint, Side};

/// Abstract stand-in for a paint, resolved against the element's live style.
///
/// `index` counts from the innermost (last) background fill or border stroke.
/// `None` means "unset": the resolver picks a positional default.
/// A `None` border side means "the side this span sits on" (top outside borders).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Placeholder {
    /// The element's current text paint.
    Text,
    /// The element's shape fill.
    Shape,
    /// The element's shape stroke.
    Stroke,
    Background { index: Option<u8> },
    Border { index: Option<u8>, side: Option<Side> },
    /// Keep whatever paint currently occupies the slot, unconverted.
    Skip,
}

impl Placeholder {
    #[inline]
    pub const fn background() -> Self {
        Placeholder::Background { index: None }
    }

    #[inline]
    pub const fn background_at(index: u8) -> Self {
        Placeholder::Background { index: Some(index) }
    }

    #[inline]
    pub const fn border() -> Self {
        Placeholder::Border { index: None, side: None }
    }

    #[inline]
    pub const fn border_at(index: u8, side: Side) -> Self {
        Placeholder::Border { index: Some(index), side: Some(side) }
    }

    /// Same placeholder with its index reset to the positional default.
    pub const fn unindexed(self) -> Self {
        match self {
            Placeholder::Background { .. } => Placeholder::Background { index: None },
            Placeholder::Border { side, .. } => Placeholder::Border { index: None, side },
            other => other,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Placeholder::Text => f.write_str("text"),
            Placeholder::Shape => f.write_str("shape"),
            Placeholder::Stroke => f.write_str("stroke"),
            Placeholder::Skip => f.write_str("skip"),
            Placeholder::Background { index: None } => f.write_str("bg"),
            Placeholder::Background { index: Some(i) } => write!(f, "bg[{i}]"),
            Placeholder::Border { index, side } => {
                f.write_str("border")?;
                if index.is_none() && side.is_none() {
                    return Ok(());
                }
                f.write_str("[")?;
                if let Some(i) = index {
                    write!(f, "{i}")?;
                }
                if let Some(s) = side {
                    write!(f, ":{}", s.name())?;
                }
                f.write_str("]")
            }
        }
    }
}

/// One end of a span: a concrete paint or a placeholder.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum SpanEnd {
    Paint(Paint),
    Placeholder(Placeholder),
}

impl SpanEnd {
    #[inline]
    pub fn as_paint(&self) -> Option<&Paint> {
        match self {
            SpanEnd::Paint(p) => Some(p),
            SpanEnd::Placeholder(_) => None,
        }
    }

    #[inline]
    pub fn as_placeholder(&self) -> Option<Placeholder> {
        match self {
            SpanEnd::Paint(_) => None,
            SpanEnd::Placeholder(p) => Some(*p),
        }
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, SpanEnd::Placeholder(_))
    }
}

impl From<Paint> for SpanEnd {
    fn from(p: Paint) -> Self {
        SpanEnd::Paint(p)
    }
}

impl From<Color> for SpanEnd {
    fn from(c: Color) -> Self {
        SpanEnd::Paint(Paint::Solid(c))
    }
}

impl From<Placeholder> for SpanEnd {
    fn from(p: Placeholder) -> Self {
        SpanEnd::Placeholder(p)
    }
}

impl fmt::Display for SpanEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanEnd::Paint(p) => write!(f, "{p}"),
            SpanEnd::Placeholder(p) => write!(f, "{p}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_grammar() {
        assert_eq!(Placeholder::background().to_string(), "bg");
        assert_eq!(Placeholder::background_at(2).to_string(), "bg[2]");
        assert_eq!(Placeholder::border().to_string(), "border");
        assert_eq!(Placeholder::border_at(1, Side::Left).to_string(), "border[1:left]");
        assert_eq!(
            Placeholder::Border { index: None, side: Some(Side::Bottom) }.to_string(),
            "border[:bottom]"
        );
    }

    #[test]
    fn unindexed_keeps_side() {
        let p = Placeholder::border_at(3, Side::Right).unindexed();
        assert_eq!(p, Placeholder::Border { index: None, side: Some(Side::Right) });
        assert_eq!(Placeholder::Text.unindexed(), Placeholder::Text);
    }
}
