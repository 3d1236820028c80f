use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use std::sync::Arc;

use crate::border::BorderSpan;
use crate::span::ColorSpan;

#[derive(Debug)]
struct FillData {
    text: Option<ColorSpan>,
    shape: Option<ColorSpan>,
    stroke: Option<ColorSpan>,
    background: Option<Box<[ColorSpan]>>,
    border: Option<Box<[BorderSpan]>>,
    has_special: bool,
    hash: u64,
}

impl PartialEq for FillData {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.text == other.text
            && self.shape == other.shape
            && self.stroke == other.stroke
            && self.background == other.background
            && self.border == other.border
    }
}

/// Immutable aggregate of every span an element transitions through.
///
/// Lists are stored outermost first, matching the element's background and
/// border layers. An absent list means the slot does not take part in the
/// transition, which is different from a list of transparent spans.
#[derive(Clone)]
pub struct Fill(Arc<FillData>);

impl Fill {
    pub fn builder() -> FillBuilder {
        FillBuilder::default()
    }

    /// A fill with no spans at all.
    pub fn empty() -> Fill {
        FillBuilder::default().build()
    }

    /// Builder pre-populated with this fill's spans.
    pub fn to_builder(&self) -> FillBuilder {
        let d = &*self.0;
        FillBuilder {
            text: d.text.clone(),
            shape: d.shape.clone(),
            stroke: d.stroke.clone(),
            background: d.background.as_ref().map(|l| l.iter().cloned().map(Some).collect()),
            border: d.border.as_ref().map(|l| l.iter().cloned().map(Some).collect()),
        }
    }

    #[inline] pub fn text(&self) -> Option<&ColorSpan> { self.0.text.as_ref() }
    #[inline] pub fn shape(&self) -> Option<&ColorSpan> { self.0.shape.as_ref() }
    #[inline] pub fn stroke(&self) -> Option<&ColorSpan> { self.0.stroke.as_ref() }

    #[inline]
    pub fn background(&self) -> Option<&[ColorSpan]> {
        self.0.background.as_deref()
    }

    #[inline]
    pub fn border(&self) -> Option<&[BorderSpan]> {
        self.0.border.as_deref()
    }

    /// True when any slot takes part in the transition.
    pub fn has_fill_spans(&self) -> bool {
        self.has_text_span()
            || self.has_shape_span()
            || self.has_stroke_span()
            || self.has_background_spans()
            || self.has_border_spans()
    }

    #[inline] pub fn has_text_span(&self) -> bool { self.0.text.is_some() }
    #[inline] pub fn has_shape_span(&self) -> bool { self.0.shape.is_some() }
    #[inline] pub fn has_stroke_span(&self) -> bool { self.0.stroke.is_some() }
    #[inline] pub fn has_background_spans(&self) -> bool { self.0.background.is_some() }
    #[inline] pub fn has_border_spans(&self) -> bool { self.0.border.is_some() }

    /// True when some span still holds a placeholder end.
    #[inline]
    pub fn has_special(&self) -> bool {
        self.0.has_special
    }

    #[inline]
    pub fn ptr_eq(a: &Fill, b: &Fill) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    #[inline]
    pub fn hash_code(&self) -> u64 {
        self.0.hash
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill::empty()
    }
}

impl PartialEq for Fill {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for Fill {}

impl Hash for Fill {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl fmt::Debug for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &*self.0;
        f.debug_struct("Fill")
            .field("text", &d.text)
            .field("shape", &d.shape)
            .field("stroke", &d.stroke)
            .field("background", &d.background)
            .field("border", &d.border)
            .field("has_special", &d.has_special)
            .finish()
    }
}

// ── builder ───────────────────────────────────────────────────────────────

/// Collects spans for a [`Fill`]. List slots accept absent members, which are
/// normalized at [`FillBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct FillBuilder {
    text: Option<ColorSpan>,
    shape: Option<ColorSpan>,
    stroke: Option<ColorSpan>,
    background: Option<Vec<Option<ColorSpan>>>,
    border: Option<Vec<Option<BorderSpan>>>,
}

impl FillBuilder {
    pub fn text(mut self, span: impl Into<Option<ColorSpan>>) -> Self { self.text = span.into(); self }
    pub fn shape(mut self, span: impl Into<Option<ColorSpan>>) -> Self { self.shape = span.into(); self }
    pub fn stroke(mut self, span: impl Into<Option<ColorSpan>>) -> Self { self.stroke = span.into(); self }

    /// Background spans, outermost first.
    pub fn background(self, spans: impl IntoIterator<Item = ColorSpan>) -> Self {
        self.background_slots(spans.into_iter().map(Some))
    }

    pub fn background_slots(mut self, spans: impl IntoIterator<Item = Option<ColorSpan>>) -> Self {
        self.background = Some(spans.into_iter().collect());
        self
    }

    /// Border spans, outermost first.
    pub fn border(self, spans: impl IntoIterator<Item = BorderSpan>) -> Self {
        self.border_slots(spans.into_iter().map(Some))
    }

    pub fn border_slots(mut self, spans: impl IntoIterator<Item = Option<BorderSpan>>) -> Self {
        self.border = Some(spans.into_iter().collect());
        self
    }

    pub fn build(self) -> Fill {
        let background = normalize(self.background, ColorSpan::transparent);
        let border = normalize(self.border, || BorderSpan::uniform(ColorSpan::transparent()));

        let has_special = [&self.text, &self.shape, &self.stroke]
            .into_iter()
            .flatten()
            .any(ColorSpan::is_special)
            || background.iter().flat_map(|l| l.iter()).any(ColorSpan::is_special)
            || border.iter().flat_map(|l| l.iter()).any(BorderSpan::is_special);

        let mut h = DefaultHasher::new();
        self.text.hash(&mut h);
        self.shape.hash(&mut h);
        self.stroke.hash(&mut h);
        background.hash(&mut h);
        border.hash(&mut h);

        Fill(Arc::new(FillData {
            text: self.text,
            shape: self.shape,
            stroke: self.stroke,
            background,
            border,
            has_special,
            hash: h.finish(),
        }))
    }
}

/// Empty or all-absent lists become `None`; absent members become `blank()`.
fn normalize<T>(list: Option<Vec<Option<T>>>, blank: impl Fn() -> T) -> Option<Box<[T]>> {
    let list = list?;
    if list.iter().all(Option::is_none) {
        return None;
    }
    Some(list.into_iter().map(|s| s.unwrap_or_else(&blank)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_paint::Color;

    use crate::placeholder::Placeholder;

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

    // ── normalization ─────────────────────────────────────────────────────

    #[test]
    fn empty_lists_are_absent() {
        let f = Fill::builder().background(Vec::new()).border(Vec::new()).build();
        assert!(!f.has_background_spans());
        assert!(!f.has_border_spans());
        assert!(!f.has_fill_spans());
    }

    #[test]
    fn all_absent_members_make_the_list_absent() {
        let f = Fill::builder().background_slots([None, None]).build();
        assert!(f.background().is_none());
    }

    #[test]
    fn absent_members_become_transparent() {
        let f = Fill::builder()
            .background_slots([None, Some(ColorSpan::new(RED, GREEN))])
            .build();
        let bg = f.background().unwrap();
        assert_eq!(bg.len(), 2);
        assert_eq!(bg[0], ColorSpan::transparent());

        let f = Fill::builder().border_slots([Some(BorderSpan::uniform(ColorSpan::constant(RED))), None]).build();
        assert_eq!(f.border().unwrap()[1], BorderSpan::uniform(ColorSpan::transparent()));
    }

    // ── predicates ────────────────────────────────────────────────────────

    #[test]
    fn predicates_follow_slots() {
        let f = Fill::builder().text(ColorSpan::new(RED, GREEN)).build();
        assert!(f.has_fill_spans());
        assert!(f.has_text_span());
        assert!(!f.has_shape_span());
        assert!(!f.has_stroke_span());
        assert!(!f.has_special());
    }

    #[test]
    fn special_is_found_in_nested_borders() {
        let border = BorderSpan::quad(
            ColorSpan::constant(RED),
            ColorSpan::constant(RED),
            ColorSpan::new(Placeholder::Text, RED),
            ColorSpan::constant(GREEN),
        );
        let f = Fill::builder().border([border]).build();
        assert!(f.has_special());
    }

    // ── equality ──────────────────────────────────────────────────────────

    #[test]
    fn independently_built_fills_are_equal() {
        let a = Fill::builder().stroke(ColorSpan::new(RED, GREEN)).background([ColorSpan::constant(RED)]).build();
        let b = Fill::builder().stroke(ColorSpan::new(RED, GREEN)).background([ColorSpan::constant(RED)]).build();
        assert!(!Fill::ptr_eq(&a, &b));
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn absent_and_transparent_lists_differ() {
        let absent = Fill::builder().text(ColorSpan::constant(RED)).build();
        let transparent = Fill::builder()
            .text(ColorSpan::constant(RED))
            .background([ColorSpan::transparent()])
            .build();
        assert_ne!(absent, transparent);
    }

    #[test]
    fn to_builder_round_trips() {
        let f = Fill::builder().shape(ColorSpan::new(GREEN, RED)).border([BorderSpan::uniform(ColorSpan::constant(RED))]).build();
        assert_eq!(f.to_builder().build(), f);
    }
}
