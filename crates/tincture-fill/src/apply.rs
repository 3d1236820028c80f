use core::fmt;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tincture_paint::{BackgroundFill, BorderStroke, Paint, ShapeStyle};

use crate::element::{Fillable, Listener, PropertySet, StyleProperty};
use crate::fill::Fill;
use crate::resolve::{resolve, StyleSnapshot};

/// Flags shared between the applier and its element listener.
#[derive(Debug)]
struct BindingState {
    applying: Cell<bool>,
    fill_changed: Cell<bool>,
    fill_valid: Cell<bool>,
    text_valid: Cell<bool>,
    shape_valid: Cell<bool>,
    background_valid: Cell<bool>,
    border_valid: Cell<bool>,
    watching: Cell<PropertySet>,
}

impl BindingState {
    fn new() -> Self {
        Self {
            applying: Cell::new(false),
            fill_changed: Cell::new(true),
            fill_valid: Cell::new(false),
            text_valid: Cell::new(false),
            shape_valid: Cell::new(false),
            background_valid: Cell::new(false),
            border_valid: Cell::new(false),
            watching: Cell::new(PropertySet::EMPTY),
        }
    }

    fn on_change(&self, property: StyleProperty) {
        if self.applying.get() {
            return;
        }
        match property {
            StyleProperty::Fill => {
                self.fill_changed.set(true);
                self.fill_valid.set(false);
                return;
            }
            StyleProperty::TextFill => self.text_valid.set(false),
            StyleProperty::Shape | StyleProperty::ShapeFill | StyleProperty::ShapeStroke => {
                self.shape_valid.set(false)
            }
            StyleProperty::Background => self.background_valid.set(false),
            StyleProperty::Border => self.border_valid.set(false),
        }
        if self.watching.get().contains(property) {
            self.fill_valid.set(false);
        }
    }

    fn caches_valid(&self) -> bool {
        self.text_valid.get() && self.shape_valid.get() && self.background_valid.get() && self.border_valid.get()
    }
}

/// Raises the `applying` flag for the lifetime of the guard.
struct Applying<'a>(&'a Cell<bool>);

impl<'a> Applying<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for Applying<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Live binding between one element and its [`Fill`].
///
/// The applier listens to the element and keeps a resolved copy of the fill
/// plus copies of the element's own text, shape, background and border
/// paints. Each copy is refreshed only after its property is changed from
/// outside, so re-resolution never reads frames the applier wrote itself.
/// Everything is rebuilt lazily on the next
/// [`FillApplier::interpolate_and_apply`].
pub struct FillApplier<E: Fillable> {
    element: Rc<RefCell<E>>,
    state: Rc<BindingState>,
    listener: Rc<Listener>,
    fill: Option<Fill>,
    resolved: Option<Fill>,
    text: Option<Paint>,
    shape: Option<ShapeStyle>,
    background: Vec<BackgroundFill>,
    border: Vec<BorderStroke>,
}

impl<E: Fillable> FillApplier<E> {
    pub fn bind(element: Rc<RefCell<E>>) -> Self {
        let state = Rc::new(BindingState::new());
        let listener: Rc<Listener> = {
            let state = Rc::clone(&state);
            Rc::new(move |p: StyleProperty| state.on_change(p))
        };
        element.borrow().listeners().add(&listener);
        log::debug!("fill applier bound");
        Self {
            element,
            state,
            listener,
            fill: None,
            resolved: None,
            text: None,
            shape: None,
            background: Vec::new(),
            border: Vec::new(),
        }
    }

    /// Stops listening and hands the element back.
    pub fn unbind(self) -> Rc<RefCell<E>> {
        self.element.borrow().listeners().remove(&self.listener);
        log::debug!("fill applier unbound");
        self.element
    }

    #[inline]
    pub fn element(&self) -> &Rc<RefCell<E>> {
        &self.element
    }

    /// Resolved fill of the last apply, if still valid.
    pub fn resolved_fill(&self) -> Option<&Fill> {
        if self.state.fill_valid.get() { self.resolved.as_ref() } else { None }
    }

    #[inline]
    pub fn is_fill_valid(&self) -> bool {
        self.state.fill_valid.get()
    }

    /// True when every copied slot matches the element's own paints.
    #[inline]
    pub fn are_caches_valid(&self) -> bool {
        self.state.caches_valid()
    }

    /// True when a change of `property` re-resolves the fill.
    #[inline]
    pub fn is_watching(&self, property: StyleProperty) -> bool {
        self.state.watching.get().contains(property)
    }

    fn refresh_caches(&mut self, element: &E) {
        let state = &self.state;
        if !state.text_valid.replace(true) {
            self.text = element.text_fill().cloned();
        }
        if !state.shape_valid.replace(true) {
            self.shape = element.shape().cloned();
        }
        if !state.background_valid.replace(true) {
            self.background = element.background().to_vec();
        }
        if !state.border_valid.replace(true) {
            self.border = element.border().to_vec();
        }
    }

    /// Interpolates every span of the element's fill at `t` and writes the
    /// paints back onto the element.
    pub fn interpolate_and_apply(&mut self, t: f32) {
        let element_rc = Rc::clone(&self.element);
        let mut element = element_rc.borrow_mut();

        if self.state.fill_changed.replace(false) {
            self.fill = element.fill().cloned();
            self.resolved = None;
            self.state.fill_valid.set(false);
            let watch = match &self.fill {
                Some(f) if f.has_special() => PropertySet::RESOLUTION,
                _ => PropertySet::EMPTY,
            };
            self.state.watching.set(watch);
        }

        let fill = match &self.fill {
            Some(f) if f.has_fill_spans() => f.clone(),
            _ => return,
        };

        self.refresh_caches(&element);

        if !self.state.fill_valid.get() || self.resolved.is_none() {
            let snapshot = StyleSnapshot {
                text: self.text.as_ref(),
                shape: self.shape.as_ref(),
                background: &self.background,
                border: &self.border,
            };
            self.resolved = Some(resolve(&fill, &snapshot));
            self.state.fill_valid.set(true);
        }
        let Some(resolved) = self.resolved.clone() else { return };

        let _applying = Applying::enter(&self.state.applying);

        if let Some(span) = resolved.text() {
            element.set_text_fill(span.interpolate(t));
        }
        if element.shape().is_some() {
            if let Some(span) = resolved.shape() {
                element.set_shape_fill(span.interpolate(t));
            }
            if let Some(span) = resolved.stroke() {
                element.set_shape_stroke(span.interpolate(t));
            }
        }
        if let Some(spans) = resolved.background() {
            let n = spans.len().min(self.background.len());
            if n > 0 {
                let mut out = self.background.clone();
                for k in 0..n {
                    let i = out.len() - 1 - k;
                    out[i] = self.background[i].with_paint(spans[spans.len() - 1 - k].interpolate(t));
                }
                element.set_background(out);
            }
        }
        if let Some(spans) = resolved.border() {
            let n = spans.len().min(self.border.len());
            if n > 0 {
                let mut out = self.border.clone();
                for k in 0..n {
                    let i = out.len() - 1 - k;
                    out[i] = self.border[i].with_paints(spans[spans.len() - 1 - k].interpolate(t));
                }
                element.set_border(out);
            }
        }
    }
}

impl<E: Fillable> fmt::Debug for FillApplier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FillApplier")
            .field("state", &self.state)
            .field("fill", &self.fill)
            .field("resolved", &self.resolved)
            .finish_non_exhaustive()
    }
}
