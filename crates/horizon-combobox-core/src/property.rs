//! Change-detecting state cells.
//!
//! A [`Property<T>`] wraps a value and reports whether a write actually
//! changed it, so owners emit a notification only on real transitions.
//!
//! # Example
//!
//! ```
//! use horizon_combobox_core::{Property, Signal};
//!
//! struct Disclosure {
//!     expanded: Property<bool>,
//!     expanded_changed: Signal<bool>,
//! }
//!
//! impl Disclosure {
//!     fn set_expanded(&self, expanded: bool) {
//!         if self.expanded.set(expanded) {
//!             self.expanded_changed.emit(expanded);
//!         }
//!     }
//! }
//!
//! let disclosure = Disclosure {
//!     expanded: Property::new(false),
//!     expanded_changed: Signal::new(),
//! };
//! disclosure.set_expanded(true);
//! disclosure.set_expanded(true);
//! assert!(disclosure.expanded.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value cell with change detection.
///
/// Interior mutability goes through a `RwLock`, so the cell is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a property holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`; returns `true` if it differs from the previous value.
    ///
    /// Equal writes leave the cell untouched.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("Property").field(value).finish())
    }
}
