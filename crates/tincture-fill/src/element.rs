use core::fmt;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tincture_paint::{BackgroundFill, BorderStroke, Paint, ShapeStyle};

use crate::fill::Fill;
use crate::resolve::StyleSnapshot;

// ── StyleProperty ─────────────────────────────────────────────────────────

/// Style slots an element reports changes for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StyleProperty {
    Fill,
    TextFill,
    Shape,
    ShapeFill,
    ShapeStroke,
    Background,
    Border,
}

impl StyleProperty {
    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Small bit set of [`StyleProperty`] values.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PropertySet(u8);

impl PropertySet {
    pub const EMPTY: PropertySet = PropertySet(0);

    /// Every property a placeholder can read from.
    pub const RESOLUTION: PropertySet = PropertySet::EMPTY
        .with(StyleProperty::TextFill)
        .with(StyleProperty::Shape)
        .with(StyleProperty::ShapeFill)
        .with(StyleProperty::ShapeStroke)
        .with(StyleProperty::Background)
        .with(StyleProperty::Border);

    #[inline]
    pub const fn with(self, p: StyleProperty) -> PropertySet {
        PropertySet(self.0 | p.bit())
    }

    #[inline]
    pub const fn contains(self, p: StyleProperty) -> bool {
        self.0 & p.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

// ── Listeners ─────────────────────────────────────────────────────────────

pub type Listener = dyn Fn(StyleProperty);

/// Change listeners held weakly: a listener lives as long as whoever
/// registered it keeps the `Rc`. Dead entries are pruned on notify.
#[derive(Default)]
pub struct Listeners {
    entries: RefCell<Vec<Weak<Listener>>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: &Rc<Listener>) {
        self.entries.borrow_mut().push(Rc::downgrade(listener));
    }

    pub fn remove(&self, listener: &Rc<Listener>) {
        let target = Rc::downgrade(listener);
        self.entries.borrow_mut().retain(|w| !Weak::ptr_eq(w, &target));
    }

    pub fn notify(&self, property: StyleProperty) {
        // Snapshot first so a listener may register or remove listeners.
        let live: Vec<Rc<Listener>> = {
            let mut entries = self.entries.borrow_mut();
            entries.retain(|w| w.strong_count() > 0);
            entries.iter().filter_map(Weak::upgrade).collect()
        };
        for l in live {
            l(property);
        }
    }

    /// Number of live listeners.
    pub fn len(&self) -> usize {
        self.entries.borrow().iter().filter(|w| w.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners").field("live", &self.len()).finish()
    }
}

// ── Fillable ──────────────────────────────────────────────────────────────

/// An element whose paints a [`FillApplier`](crate::FillApplier) can drive.
///
/// Setters must report the change through [`Fillable::listeners`].
/// Background fills and border strokes are outermost first.
pub trait Fillable {
    fn fill(&self) -> Option<&Fill>;
    fn text_fill(&self) -> Option<&Paint>;
    fn shape(&self) -> Option<&ShapeStyle>;
    fn background(&self) -> &[BackgroundFill];
    fn border(&self) -> &[BorderStroke];

    fn set_text_fill(&mut self, paint: Paint);
    /// No-op when the element has no shape.
    fn set_shape_fill(&mut self, paint: Paint);
    /// No-op when the element has no shape.
    fn set_shape_stroke(&mut self, paint: Paint);
    fn set_background(&mut self, fills: Vec<BackgroundFill>);
    fn set_border(&mut self, strokes: Vec<BorderStroke>);

    fn listeners(&self) -> &Listeners;

    /// Read view used for placeholder resolution.
    fn snapshot(&self) -> StyleSnapshot<'_> {
        StyleSnapshot {
            text: self.text_fill(),
            shape: self.shape(),
            background: self.background(),
            border: self.border(),
        }
    }
}

// ── StyledRegion ──────────────────────────────────────────────────────────

/// Plain element holding every fillable slot.
///
/// ```
/// use tincture_fill::{Fillable, StyledRegion};
/// use tincture_paint::{BackgroundFill, Color, Paint};
///
/// let region = StyledRegion::new()
///     .with_text_fill(Color::BLACK)
///     .with_background(vec![BackgroundFill::new(Color::WHITE)]);
/// assert_eq!(region.text_fill(), Some(&Paint::solid(Color::BLACK)));
/// assert!(region.shape().is_none());
/// ```
#[derive(Debug, Default)]
pub struct StyledRegion {
    fill: Option<Fill>,
    text_fill: Option<Paint>,
    shape: Option<ShapeStyle>,
    background: Vec<BackgroundFill>,
    border: Vec<BorderStroke>,
    listeners: Listeners,
}

impl StyledRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Fill) -> Self { self.fill = Some(fill); self }
    pub fn with_text_fill(mut self, paint: impl Into<Paint>) -> Self { self.text_fill = Some(paint.into()); self }
    pub fn with_shape(mut self, shape: ShapeStyle) -> Self { self.shape = Some(shape); self }
    pub fn with_background(mut self, fills: Vec<BackgroundFill>) -> Self { self.background = fills; self }
    pub fn with_border(mut self, strokes: Vec<BorderStroke>) -> Self { self.border = strokes; self }

    pub fn set_fill(&mut self, fill: Option<Fill>) {
        self.fill = fill;
        self.listeners.notify(StyleProperty::Fill);
    }

    pub fn set_shape(&mut self, shape: Option<ShapeStyle>) {
        self.shape = shape;
        self.listeners.notify(StyleProperty::Shape);
    }
}

impl Fillable for StyledRegion {
    fn fill(&self) -> Option<&Fill> { self.fill.as_ref() }
    fn text_fill(&self) -> Option<&Paint> { self.text_fill.as_ref() }
    fn shape(&self) -> Option<&ShapeStyle> { self.shape.as_ref() }
    fn background(&self) -> &[BackgroundFill] { &self.background }
    fn border(&self) -> &[BorderStroke] { &self.border }

    fn set_text_fill(&mut self, paint: Paint) {
        self.text_fill = Some(paint);
        self.listeners.notify(StyleProperty::TextFill);
    }

    fn set_shape_fill(&mut self, paint: Paint) {
        if let Some(shape) = &mut self.shape {
            shape.fill = Some(paint);
            self.listeners.notify(StyleProperty::ShapeFill);
        }
    }

    fn set_shape_stroke(&mut self, paint: Paint) {
        if let Some(shape) = &mut self.shape {
            shape.stroke = Some(paint);
            self.listeners.notify(StyleProperty::ShapeStroke);
        }
    }

    fn set_background(&mut self, fills: Vec<BackgroundFill>) {
        self.background = fills;
        self.listeners.notify(StyleProperty::Background);
    }

    fn set_border(&mut self, strokes: Vec<BorderStroke>) {
        self.border = strokes;
        self.listeners.notify(StyleProperty::Border);
    }

    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}
