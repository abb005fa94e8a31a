//! Single-threaded shared ownership.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// A single-threaded wrapper for reference-counted interior mutability.
///
/// Wraps `Rc<RefCell<T>>` so that all shared allocations in the runtime go
/// through one factory. The runtime is cooperative and single-threaded
/// (the host's event loop), so `Rc` suffices; nothing here is `Send`.
///
/// Used for scope parents in the evaluator and for the presentation tree
/// handle that watcher callbacks capture.
#[repr(transparent)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed. Borrows in the
    /// runtime are short-lived and never held across callbacks.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Returns `true` if both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&self.0).finish()
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Shared::new(T::default())
    }
}
