//! A compute-once, invalidate-on-demand slot.
//!
//! Every derived layout property (area, padding, position) sits in a
//! [`Cached`] and is only recomputed when its stale flag says so. The
//! engine never propagates invalidation: clearing a dependent cache
//! after one of its inputs changed is the caller's responsibility.

/// A lazily filled value guarded by a stale flag.
///
/// The recompute rule must flow through the owning accessor: read with
/// [`Cached::get`], and when that reports stale, compute and store via
/// [`Cached::fill`]. Filling a slot that is already fresh is a
/// programmer error, caught by a debug assertion.
#[derive(Debug, Clone)]
pub struct Cached<T> {
  value: T,
  stale: bool,
}

impl<T> Cached<T> {
  /// The cached value, or `None` if it must be recomputed first.
  pub fn get(&self) -> Option<&T> { (!self.stale).then_some(&self.value) }

  /// Store a freshly computed value and clear the stale flag.
  pub fn fill(&mut self, value: T) -> &T {
    debug_assert!(self.stale, "fill on a fresh cache; read through the accessor instead");
    self.value = value;
    self.stale = false;
    &self.value
  }

  /// Force-write a resolved value, fresh or not.
  ///
  /// This is the escape hatch for the fill-width override, which
  /// rewrites one axis of an area the engine already computed.
  pub fn set(&mut self, value: T) {
    self.value = value;
    self.stale = false;
  }

  /// Re-arm the stale flag; the next read recomputes.
  pub fn invalidate(&mut self) { self.stale = true; }

  pub fn is_stale(&self) -> bool { self.stale }

  /// Mutate the cached value in place. The slot must be fresh.
  pub fn update(&mut self, f: impl FnOnce(&mut T)) {
    debug_assert!(!self.stale, "update on a stale cache; resolve it first");
    f(&mut self.value);
  }
}

impl<T: Default> Default for Cached<T> {
  fn default() -> Self { Cached { value: T::default(), stale: true } }
}
