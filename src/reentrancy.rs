//! Debug-only reentrancy check for structures that run user code mid-probe.
//!
//! `ChainedHashMap` invokes caller-supplied `Hash` and `Eq` implementations
//! while walking collision chains. If that user code re-enters the same map
//! (via a raw pointer or similar aliasing), it can observe chain links in a
//! transiently inconsistent state. In debug builds nested entry panics; in
//! release builds the check compiles to nothing.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-instance entry flag. Guard public entry points with
/// `let _t = self.reentrancy.enter();`.
pub(crate) struct ReentryCheck {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // Raw-pointer marker keeps the owning structure !Send + !Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl ReentryCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Mark the structure as entered until the returned token drops.
    #[inline]
    pub(crate) fn enter(&self) -> EntryToken<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "re-entered container while an operation was in progress"
            );
            return EntryToken { check: self };
        }

        #[cfg(not(debug_assertions))]
        EntryToken { _lt: PhantomData }
    }
}

/// RAII token returned by [`ReentryCheck::enter`].
pub(crate) struct EntryToken<'a> {
    #[cfg(debug_assertions)]
    check: &'a ReentryCheck,
    #[cfg(not(debug_assertions))]
    _lt: PhantomData<&'a ()>,
}

impl Drop for EntryToken<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.check.active.set(false);
    }
}
