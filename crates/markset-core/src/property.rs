//! Change-detecting value cells.
//!
//! A [`Property<T>`] wraps a value and reports whether a write actually
//! changed it. Owners pair it with a [`Signal`](crate::Signal) and emit only
//! when `set` returns `true`.
//!
//! # Example
//!
//! ```
//! use markset_core::{Property, Signal};
//!
//! struct Toggle {
//!     on: Property<bool>,
//!     on_changed: Signal<bool>,
//! }
//!
//! impl Toggle {
//!     fn set_on(&self, on: bool) {
//!         if self.on.set(on) {
//!             self.on_changed.emit(on);
//!         }
//!     }
//! }
//!
//! let toggle = Toggle { on: Property::new(false), on_changed: Signal::new() };
//! toggle.set_on(true);
//! assert!(toggle.on.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value that tracks changes.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// when `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}
