use core::hash::Hash;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use state::InitCell;

use crate::border::{BorderData, BorderSpan};
use crate::span::{ColorSpan, SpanData};

/// Set of canonical values, each shared behind one `Arc`.
#[derive(Debug)]
struct Interner<T> {
    set: Mutex<HashSet<Arc<T>>>,
}

impl<T: Hash + Eq> Interner<T> {
    fn new() -> Self {
        Self { set: Mutex::new(HashSet::new()) }
    }

    // Interning is a pure cache: a panic while the lock was held cannot leave
    // the set logically inconsistent, so a poisoned lock is simply reused.
    fn lock(&self) -> MutexGuard<'_, HashSet<Arc<T>>> {
        self.set.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn intern(&self, value: T) -> Arc<T> {
        let mut set = self.lock();
        if let Some(existing) = set.get(&value) {
            return Arc::clone(existing);
        }
        let arc = Arc::new(value);
        set.insert(Arc::clone(&arc));
        arc
    }

    fn intern_arc(&self, value: Arc<T>) -> Arc<T> {
        let mut set = self.lock();
        if let Some(existing) = set.get(&*value) {
            return Arc::clone(existing);
        }
        set.insert(Arc::clone(&value));
        value
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

/// Process-wide flyweight store for [`ColorSpan`] and [`BorderSpan`] values.
///
/// While enabled, value-equal spans built anywhere in the process share one
/// allocation. Disabling or clearing never changes equality results, because
/// spans always compare by value.
///
/// The store is guarded by a mutex, so spans may be built from any thread.
/// `clear` and `set_enabled` are meant for moments when no transition is running.
#[derive(Debug)]
pub struct SpanCache {
    enabled: AtomicBool,
    spans: Interner<SpanData>,
    borders: Interner<BorderData>,
}

static GLOBAL: InitCell<SpanCache> = InitCell::new();

impl SpanCache {
    /// A fresh, enabled cache. Span constructors always use [`SpanCache::global`];
    /// private instances are useful to intern existing spans into a separate pool.
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            spans: Interner::new(),
            borders: Interner::new(),
        }
    }

    /// The cache every span constructor routes through.
    pub fn global() -> &'static SpanCache {
        GLOBAL.get_or_init(SpanCache::new)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        let was = self.enabled.swap(enabled, Ordering::AcqRel);
        if was != enabled {
            log::debug!("span cache {}", if enabled { "enabled" } else { "disabled" });
        }
    }

    /// Drops every stored entry. Spans still referenced elsewhere stay alive.
    pub fn clear(&self) {
        let (spans, borders) = (self.spans.len(), self.borders.len());
        self.spans.clear();
        self.borders.clear();
        log::debug!("span cache cleared ({spans} spans, {borders} border spans)");
    }

    /// Number of stored color spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.len() == 0 && self.borders.len() == 0
    }

    /// Number of stored border spans.
    pub fn border_len(&self) -> usize {
        self.borders.len()
    }

    /// Canonical instance equal to `span` (the argument itself when disabled).
    pub fn intern(&self, span: ColorSpan) -> ColorSpan {
        if !self.is_enabled() {
            return span;
        }
        ColorSpan(self.spans.intern_arc(span.0))
    }

    /// Canonical instance equal to `span` (the argument itself when disabled).
    pub fn intern_border(&self, span: BorderSpan) -> BorderSpan {
        if !self.is_enabled() {
            return span;
        }
        BorderSpan(self.borders.intern_arc(span.0))
    }

    pub(crate) fn intern_data(&self, data: SpanData) -> Arc<SpanData> {
        if self.is_enabled() { self.spans.intern(data) } else { Arc::new(data) }
    }

    pub(crate) fn intern_border_data(&self, data: BorderData) -> Arc<BorderData> {
        if self.is_enabled() { self.borders.intern(data) } else { Arc::new(data) }
    }
}

impl Default for SpanCache {
    fn default() -> Self {
        Self::new()
    }
}
