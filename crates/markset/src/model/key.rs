//! Key extraction for marked records.
//!
//! The marking model never compares records; it compares the string key each
//! record yields. Keys come from one of three places:
//!
//! 1. **Trait-based**: the record type implements [`Keyed`].
//! 2. **Closure-based**: a key function is supplied at construction.
//! 3. **Field-based**: loosely-typed `serde_json::Value` records are keyed by
//!    a named field (default `"id"`).
//!
//! # Example
//!
//! ```
//! use markset::model::{KeyExtractor, Keyed};
//!
//! #[derive(Clone)]
//! struct Photo {
//!     id: u32,
//!     title: String,
//! }
//!
//! impl Keyed for Photo {
//!     fn key(&self) -> String {
//!         self.id.to_string()
//!     }
//! }
//!
//! let by_title = KeyExtractor::from_fn(|p: &Photo| p.title.clone());
//! let photo = Photo { id: 7, title: "sunset".into() };
//! assert_eq!(by_title.key_of(&photo).unwrap(), "sunset");
//! assert_eq!(KeyExtractor::<Photo>::from_keyed().key_of(&photo).unwrap(), "7");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};

/// Field name used for JSON records when none is configured.
pub const DEFAULT_KEY_FIELD: &str = "id";

/// Trait for records that can provide their own stable key.
pub trait Keyed {
    /// Returns the key identifying this record.
    fn key(&self) -> String;
}

impl Keyed for String {
    fn key(&self) -> String {
        self.clone()
    }
}

macro_rules! impl_keyed_for_int {
    ($($ty:ty),*) => {
        $(
            impl Keyed for $ty {
                fn key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_keyed_for_int!(u32, u64, i32, i64, usize);

/// Type alias for a fallible key function.
pub type KeyFn<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Derives the string key of a record.
pub struct KeyExtractor<T> {
    extract: KeyFn<T>,
    /// Reported in [`Error::MissingKey`].
    label: Arc<str>,
}

impl<T> Clone for KeyExtractor<T> {
    fn clone(&self) -> Self {
        Self {
            extract: Arc::clone(&self.extract),
            label: Arc::clone(&self.label),
        }
    }
}

impl<T> fmt::Debug for KeyExtractor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyExtractor")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> KeyExtractor<T> {
    /// Key records with an infallible closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            extract: Arc::new(move |record| Some(f(record))),
            label: Arc::from("key"),
        }
    }

    /// Key records with a closure that may find no key.
    ///
    /// `label` names the key in [`Error::MissingKey`].
    pub fn from_fallible_fn<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            extract: Arc::new(f),
            label: Arc::from(label.into()),
        }
    }

    /// Key records through their [`Keyed`] implementation.
    pub fn from_keyed() -> Self
    where
        T: Keyed,
    {
        Self::from_fn(T::key)
    }

    /// Derive the key of `record`.
    pub fn key_of(&self, record: &T) -> Result<String> {
        (self.extract)(record).ok_or_else(|| Error::missing_key(self.label.as_ref()))
    }

    /// Name of the key reported in errors.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl KeyExtractor<Value> {
    /// Key JSON records by the value of `field`.
    ///
    /// Strings are used as-is; numbers and booleans are stringified. A record
    /// that is not an object, lacks the field, or holds null/array/object
    /// under it has no key.
    pub fn field(field: impl Into<String>) -> Self {
        let field: String = field.into();
        let label = Arc::from(field.as_str());
        Self {
            extract: Arc::new(move |record: &Value| json_key(record, &field)),
            label,
        }
    }
}

fn json_key(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
