use tincture_paint::Side;

use crate::border::BorderSpan;
use crate::fill::Fill;
use crate::placeholder::SpanEnd;
use crate::span::ColorSpan;

/// One parsed side of a text / shape / stroke / background span.
pub type FillSpanHalf = SpanEnd;

/// One parsed side of a border span, expanded to four values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BorderFillSpanHalf {
    sides: [FillSpanHalf; 4],
}

impl BorderFillSpanHalf {
    pub fn uniform(half: impl Into<FillSpanHalf>) -> Self {
        let h = half.into();
        Self { sides: [h.clone(), h.clone(), h.clone(), h] }
    }

    /// Expands 1 to 4 values with the CSS shorthand rule.
    pub fn from_values(values: &[FillSpanHalf]) -> Option<Self> {
        let sides = match values {
            [a] => [a.clone(), a.clone(), a.clone(), a.clone()],
            [tb, rl] => [tb.clone(), rl.clone(), tb.clone(), rl.clone()],
            [t, rl, b] => [t.clone(), rl.clone(), b.clone(), rl.clone()],
            [t, r, b, l] => [t.clone(), r.clone(), b.clone(), l.clone()],
            _ => return None,
        };
        Some(Self { sides })
    }

    #[inline]
    pub fn side(&self, side: Side) -> &FillSpanHalf {
        &self.sides[side.index()]
    }

    /// `[top, right, bottom, left]`
    #[inline]
    pub fn sides(&self) -> &[FillSpanHalf; 4] {
        &self.sides
    }

    fn partner_default(&self) -> Self {
        Self { sides: self.sides.clone().map(|h| partner_default(&h)) }
    }
}

/// Every parsed half for one side (`from` or `to`) of a fill.
/// Lists are outermost first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillHalves {
    pub text: Option<FillSpanHalf>,
    pub shape: Option<FillSpanHalf>,
    pub stroke: Option<FillSpanHalf>,
    pub background: Vec<FillSpanHalf>,
    pub border: Vec<BorderFillSpanHalf>,
}

impl FillHalves {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.shape.is_none()
            && self.stroke.is_none()
            && self.background.is_empty()
            && self.border.is_empty()
    }
}

/// Stand-in for a missing partner of `half`.
///
/// Concrete paints and slot specials pair with themselves; an indexed
/// `bg`/`border` placeholder pairs with its unindexed form, which resolves to
/// the member's own position.
fn partner_default(half: &FillSpanHalf) -> FillSpanHalf {
    match half {
        SpanEnd::Placeholder(p) => SpanEnd::Placeholder(p.unindexed()),
        other => other.clone(),
    }
}

fn from_inner<T>(list: &[T], k: usize) -> Option<&T> {
    list.len().checked_sub(k + 1).map(|i| &list[i])
}

/// Pairs `from` and `to` lists from their innermost (last) entries.
/// The result is outermost first and as long as the longer input.
fn pair_from_inner<T, R>(from: &[T], to: &[T], mut pair: impl FnMut(Option<&T>, Option<&T>) -> R) -> Vec<R> {
    let n = from.len().max(to.len());
    let mut out: Vec<R> = (0..n).map(|k| pair(from_inner(from, k), from_inner(to, k))).collect();
    out.reverse();
    out
}

/// Builds [`Fill`]s from parsed from/to halves.
#[derive(Debug, Copy, Clone, Default)]
pub struct FillAssembler;

impl FillAssembler {
    pub fn assemble(from: &FillHalves, to: &FillHalves) -> Fill {
        let mut builder = Fill::builder()
            .text(Self::assemble_span(from.text.as_ref(), to.text.as_ref()))
            .shape(Self::assemble_span(from.shape.as_ref(), to.shape.as_ref()))
            .stroke(Self::assemble_span(from.stroke.as_ref(), to.stroke.as_ref()));
        if !from.background.is_empty() || !to.background.is_empty() {
            builder = builder.background(Self::assemble_background(&from.background, &to.background));
        }
        if !from.border.is_empty() || !to.border.is_empty() {
            builder = builder.border(Self::assemble_border(&from.border, &to.border));
        }
        builder.build()
    }

    /// Span for a single slot; a missing side copies the present one.
    pub fn assemble_span(from: Option<&FillSpanHalf>, to: Option<&FillSpanHalf>) -> Option<ColorSpan> {
        match (from, to) {
            (None, None) => None,
            (f, t) => Some(ColorSpan::of(f.cloned(), t.cloned())),
        }
    }

    pub fn assemble_background(from: &[FillSpanHalf], to: &[FillSpanHalf]) -> Vec<ColorSpan> {
        pair_from_inner(from, to, |f, t| match (f, t) {
            (Some(f), Some(t)) => ColorSpan::new(f.clone(), t.clone()),
            (Some(f), None) => ColorSpan::new(f.clone(), partner_default(f)),
            (None, Some(t)) => ColorSpan::new(partner_default(t), t.clone()),
            (None, None) => ColorSpan::transparent(),
        })
    }

    pub fn assemble_border(from: &[BorderFillSpanHalf], to: &[BorderFillSpanHalf]) -> Vec<BorderSpan> {
        pair_from_inner(from, to, |f, t| {
            let (f, t) = match (f, t) {
                (Some(f), Some(t)) => (f.clone(), t.clone()),
                (Some(f), None) => (f.clone(), f.partner_default()),
                (None, Some(t)) => (t.partner_default(), t.clone()),
                (None, None) => return BorderSpan::uniform(ColorSpan::transparent()),
            };
            let [top, right, bottom, left] =
                Side::ALL.map(|s| ColorSpan::new(f.side(s).clone(), t.side(s).clone()));
            BorderSpan::quad(top, right, bottom, left)
        })
    }
}
