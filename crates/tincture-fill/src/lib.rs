//! Tincture fill: animated paint transitions for styled elements.
//!
//! # Quick start
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use tincture_fill::prelude::*;
//! use tincture_paint::{BackgroundFill, Color, Paint};
//!
//! // Fade the innermost background from whatever it currently is to red.
//! let fill = Fill::builder()
//!     .background([ColorSpan::new(Placeholder::background(), Color::rgb(1.0, 0.0, 0.0))])
//!     .build();
//! let region = StyledRegion::new()
//!     .with_background(vec![BackgroundFill::new(Color::rgb(0.0, 1.0, 0.0))])
//!     .with_fill(fill);
//!
//! let mut applier = FillApplier::bind(Rc::new(RefCell::new(region)));
//! applier.interpolate_and_apply(0.5);
//! let paint = applier.element().borrow().background()[0].paint.clone();
//! assert_eq!(paint, Paint::solid(Color::rgb(0.5, 0.5, 0.0)));
//! ```
//!
//! # Layers
//!
//! - [`ColorSpan`] / [`BorderSpan`]: interned `(from, to)` paint pairs
//! - [`Fill`]: every span one element transitions through
//! - [`resolve()`]: placeholders replaced from a [`StyleSnapshot`]
//! - [`FillAssembler`]: fills from parsed from/to halves
//! - [`FillApplier`]: writes interpolated paints onto a [`Fillable`] element

pub mod apply;
pub mod assemble;
pub mod border;
pub mod cache;
pub mod element;
pub mod fill;
mod law;
pub mod placeholder;
pub mod resolve;
pub mod span;

pub use apply::FillApplier;
pub use assemble::{BorderFillSpanHalf, FillAssembler, FillHalves, FillSpanHalf};
pub use border::{BorderShape, BorderSpan};
pub use cache::SpanCache;
pub use element::{Fillable, Listener, Listeners, PropertySet, StyleProperty, StyledRegion};
pub use fill::{Fill, FillBuilder};
pub use law::StopMerge;
pub use placeholder::{Placeholder, SpanEnd};
pub use resolve::{is_unresolved, resolve, resolve_border, resolve_span, unresolved_paint, Slot, StyleSnapshot, UNRESOLVED};
pub use span::ColorSpan;

/// The types needed to build fills and drive an element.
pub mod prelude {
    pub use crate::apply::FillApplier;
    pub use crate::border::BorderSpan;
    pub use crate::element::{Fillable, StyleProperty, StyledRegion};
    pub use crate::fill::Fill;
    pub use crate::placeholder::Placeholder;
    pub use crate::span::ColorSpan;
}
