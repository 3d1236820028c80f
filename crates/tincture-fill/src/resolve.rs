//! Placeholder resolution against a snapshot of an element's style.
//!
//! Resolution never fails. Whatever cannot be looked up (missing text paint,
//! no shape, an index past the end of a list) becomes the unresolved-paint
//! sentinel, fully transparent white, so a transient style inconsistency
//! shows up as a wrong frame instead of an error in the animation path.

use tincture_paint::{BackgroundFill, BorderStroke, Color, Paint, ShapeStyle, Side};

use crate::border::BorderSpan;
use crate::fill::Fill;
use crate::placeholder::{Placeholder, SpanEnd};
use crate::span::ColorSpan;

/// Color of the unresolved-paint sentinel.
pub const UNRESOLVED: Color = Color::rgba(1.0, 1.0, 1.0, 0.0);

#[inline]
pub fn unresolved_paint() -> Paint {
    Paint::Solid(UNRESOLVED)
}

/// True when `paint` is the unresolved-paint sentinel.
///
/// The check is by value, so an authored `#ffffff00` also reports true. Both
/// draw nothing, but callers that count lookup misses should compare against
/// paints they authored themselves.
#[inline]
pub fn is_unresolved(paint: &Paint) -> bool {
    matches!(paint, Paint::Solid(c) if *c == UNRESOLVED)
}

/// Borrowed read view of the paints an element currently shows.
///
/// Background fills and border strokes are ordered outermost first, so the
/// innermost layer is the last entry.
#[derive(Debug, Copy, Clone, Default)]
pub struct StyleSnapshot<'a> {
    pub text: Option<&'a Paint>,
    pub shape: Option<&'a ShapeStyle>,
    pub background: &'a [BackgroundFill],
    pub border: &'a [BorderStroke],
}

impl<'a> StyleSnapshot<'a> {
    fn background_paint(&self, from_inner: usize) -> Option<&'a Paint> {
        let i = self.background.len().checked_sub(from_inner + 1)?;
        Some(&self.background[i].paint)
    }

    fn border_paint(&self, from_inner: usize, side: Side) -> Option<&'a Paint> {
        let i = self.border.len().checked_sub(from_inner + 1)?;
        Some(self.border[i].paint(side))
    }

    fn shape_fill(&self) -> Option<&'a Paint> {
        self.shape.and_then(|s| s.fill.as_ref())
    }

    fn shape_stroke(&self) -> Option<&'a Paint> {
        self.shape.and_then(|s| s.stroke.as_ref())
    }

    /// Paint currently shown at `slot`.
    pub fn paint_at(&self, slot: Slot) -> Option<&'a Paint> {
        match slot {
            Slot::Text => self.text,
            Slot::Shape => self.shape_fill(),
            Slot::Stroke => self.shape_stroke(),
            Slot::Background(i) => self.background_paint(i),
            Slot::Border(i, side) => self.border_paint(i, side),
        }
    }
}

/// Where a span sits inside a [`Fill`].
///
/// List positions count from the innermost (last) member.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Slot {
    Text,
    Shape,
    Stroke,
    Background(usize),
    Border(usize, Side),
}

impl Slot {
    /// Index an unset `bg`/`border` placeholder falls back to.
    fn default_index(self) -> usize {
        match self {
            Slot::Text | Slot::Shape | Slot::Stroke => 0,
            Slot::Background(i) | Slot::Border(i, _) => i,
        }
    }

    fn default_side(self) -> Side {
        match self {
            Slot::Border(_, side) => side,
            _ => Side::Top,
        }
    }
}

fn lookup(placeholder: Placeholder, slot: Slot, snapshot: &StyleSnapshot<'_>) -> Option<Paint> {
    let paint = match placeholder {
        Placeholder::Text => snapshot.text,
        Placeholder::Shape => snapshot.shape_fill(),
        Placeholder::Stroke => snapshot.shape_stroke(),
        Placeholder::Background { index } => {
            snapshot.background_paint(index.map_or(slot.default_index(), usize::from))
        }
        Placeholder::Border { index, side } => snapshot.border_paint(
            index.map_or(slot.default_index(), usize::from),
            side.unwrap_or(slot.default_side()),
        ),
        Placeholder::Skip => snapshot.paint_at(slot),
    };
    paint.cloned()
}

fn resolve_end(end: &SpanEnd, slot: Slot, snapshot: &StyleSnapshot<'_>) -> Paint {
    match end {
        SpanEnd::Paint(p) => p.clone(),
        SpanEnd::Placeholder(ph) => lookup(*ph, slot, snapshot).unwrap_or_else(|| {
            log::debug!("placeholder {ph} at {slot:?} unresolved; using sentinel");
            unresolved_paint()
        }),
    }
}

/// Concrete span for `span` sitting at `slot`.
///
/// A `skip` end collapses the whole span onto the slot's current paint.
pub fn resolve_span(span: &ColorSpan, slot: Slot, snapshot: &StyleSnapshot<'_>) -> ColorSpan {
    if !span.is_special() {
        return span.clone();
    }
    let (from, to) = span.placeholders();
    if from == Some(Placeholder::Skip) || to == Some(Placeholder::Skip) {
        return ColorSpan::constant(resolve_end(&Placeholder::Skip.into(), slot, snapshot));
    }
    ColorSpan::new(resolve_end(span.from(), slot, snapshot), resolve_end(span.to(), slot, snapshot))
}

/// Concrete border span for the border member `from_inner` positions from
/// the innermost stroke.
pub fn resolve_border(span: &BorderSpan, from_inner: usize, snapshot: &StyleSnapshot<'_>) -> BorderSpan {
    if !span.is_special() {
        return span.clone();
    }
    let [top, right, bottom, left] =
        Side::ALL.map(|side| resolve_span(span.side(side), Slot::Border(from_inner, side), snapshot));
    BorderSpan::quad(top, right, bottom, left)
}

/// Fill with every placeholder replaced. A fill without placeholders is
/// returned as is, sharing its allocation.
pub fn resolve(fill: &Fill, snapshot: &StyleSnapshot<'_>) -> Fill {
    if !fill.has_special() {
        return fill.clone();
    }
    let single = |span: Option<&ColorSpan>, slot| span.map(|s| resolve_span(s, slot, snapshot));

    let mut builder = Fill::builder()
        .text(single(fill.text(), Slot::Text))
        .shape(single(fill.shape(), Slot::Shape))
        .stroke(single(fill.stroke(), Slot::Stroke));
    if let Some(list) = fill.background() {
        let n = list.len();
        builder = builder.background(
            list.iter().enumerate().map(|(i, s)| resolve_span(s, Slot::Background(n - 1 - i), snapshot)),
        );
    }
    if let Some(list) = fill.border() {
        let n = list.len();
        builder = builder.border(list.iter().enumerate().map(|(i, b)| resolve_border(b, n - 1 - i, snapshot)));
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_paint::logging::{init_logging, LoggingConfig};

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    fn fills(colors: &[Color]) -> Vec<BackgroundFill> {
        colors.iter().map(|c| BackgroundFill::new(*c)).collect()
    }

    // ── no-op ─────────────────────────────────────────────────────────────

    #[test]
    fn fill_without_specials_is_returned_as_is() {
        let fill = Fill::builder().text(ColorSpan::new(RED, BLUE)).build();
        let out = resolve(&fill, &StyleSnapshot::default());
        assert!(Fill::ptr_eq(&fill, &out));
    }

    #[test]
    fn resolving_twice_is_stable() {
        let bg = fills(&[GREEN]);
        let snap = StyleSnapshot { background: &bg, ..Default::default() };
        let fill = Fill::builder().background([ColorSpan::new(Placeholder::background(), RED)]).build();
        let once = resolve(&fill, &snap);
        assert!(!once.has_special());
        assert!(Fill::ptr_eq(&once, &resolve(&once, &snap)));
    }

    // ── lookups ───────────────────────────────────────────────────────────

    #[test]
    fn background_placeholder_blends_with_live_fill() {
        let bg = fills(&[Color::from_rgb_hex(0x00ff00)]);
        let snap = StyleSnapshot { background: &bg, ..Default::default() };
        let fill = Fill::builder()
            .background([ColorSpan::new(Placeholder::background(), Color::from_rgb_hex(0xff0000))])
            .build();
        let resolved = resolve(&fill, &snap);
        let span = &resolved.background().unwrap()[0];
        assert_eq!(span.interpolate(0.5), Paint::solid(Color::rgb(0.5, 0.5, 0.0)));
    }

    #[test]
    fn unset_background_index_follows_list_position() {
        let bg = fills(&[RED, GREEN, BLUE]);
        let snap = StyleSnapshot { background: &bg, ..Default::default() };
        let spans = (0..3).map(|_| ColorSpan::new(Placeholder::background(), Color::BLACK));
        let resolved = resolve(&Fill::builder().background(spans).build(), &snap);
        let froms: Vec<_> = resolved.background().unwrap().iter().map(|s| s.interpolate(0.0)).collect();
        assert_eq!(froms, vec![Paint::solid(RED), Paint::solid(GREEN), Paint::solid(BLUE)]);
    }

    #[test]
    fn single_span_defaults_to_innermost_background() {
        let bg = fills(&[RED, GREEN]);
        let snap = StyleSnapshot { background: &bg, ..Default::default() };
        let fill = Fill::builder().text(ColorSpan::new(Placeholder::background(), BLUE)).build();
        let text = resolve(&fill, &snap).text().cloned().unwrap();
        assert_eq!(text.interpolate(0.0), Paint::solid(GREEN));
    }

    #[test]
    fn explicit_index_counts_from_innermost() {
        let bg = fills(&[RED, GREEN, BLUE]);
        let snap = StyleSnapshot { background: &bg, ..Default::default() };
        let span = resolve_span(&ColorSpan::new(Placeholder::background_at(2), BLUE), Slot::Text, &snap);
        assert_eq!(span.from(), &SpanEnd::from(RED));
    }

    #[test]
    fn border_side_defaults_to_the_occupied_side() {
        let strokes = [BorderStroke::sides(
            [Paint::solid(RED), Paint::solid(GREEN), Paint::solid(BLUE), Paint::solid(Color::WHITE)],
            1.0,
        )];
        let snap = StyleSnapshot { border: &strokes, ..Default::default() };
        let border = BorderSpan::uniform(ColorSpan::new(Placeholder::border(), Color::BLACK));
        let out = resolve_border(&border, 0, &snap);
        assert_eq!(out.interpolate(0.0), strokes[0].paints);
    }

    #[test]
    fn text_and_shape_lookups() {
        let text = Paint::solid(RED);
        let shape = ShapeStyle::new(Some(Paint::solid(GREEN)), None);
        let snap = StyleSnapshot { text: Some(&text), shape: Some(&shape), ..Default::default() };
        let t = resolve_span(&ColorSpan::new(Placeholder::Text, BLUE), Slot::Text, &snap);
        assert_eq!(t.interpolate(0.0), text);
        let s = resolve_span(&ColorSpan::new(BLUE, Placeholder::Shape), Slot::Shape, &snap);
        assert_eq!(s.interpolate(1.0), Paint::solid(GREEN));
        let k = resolve_span(&ColorSpan::new(BLUE, Placeholder::Stroke), Slot::Stroke, &snap);
        assert!(is_unresolved(&k.interpolate(1.0)));
    }

    // ── fallbacks ─────────────────────────────────────────────────────────

    #[test]
    fn missing_state_yields_sentinel() {
        init_logging(LoggingConfig::for_tests());
        let snap = StyleSnapshot::default();
        for ph in [Placeholder::Text, Placeholder::Shape, Placeholder::background_at(4), Placeholder::border()] {
            let span = resolve_span(&ColorSpan::new(ph, RED), Slot::Text, &snap);
            assert!(is_unresolved(&span.interpolate(0.0)), "{ph}");
        }
    }

    #[test]
    fn sentinel_is_matched_by_value() {
        assert!(is_unresolved(&unresolved_paint()));
        assert!(is_unresolved(&Paint::solid(Color::rgba(1.0, 1.0, 1.0, 0.0))));
        assert!(!is_unresolved(&Paint::solid(Color::TRANSPARENT)));
        assert!(!is_unresolved(&Paint::solid(Color::WHITE)));
    }

    #[test]
    fn skip_keeps_current_slot_paint() {
        let bg = fills(&[RED, GREEN]);
        let snap = StyleSnapshot { background: &bg, ..Default::default() };
        let span = resolve_span(&ColorSpan::new(Placeholder::Skip, BLUE), Slot::Background(1), &snap);
        assert!(span.from_equals_to());
        assert_eq!(span.interpolate(0.7), Paint::solid(RED));
    }
}
