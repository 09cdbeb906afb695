//! Keyed marking and selection model.
//!
//! `markset` tracks which records of a collection are selected, in single- or
//! multi-selection mode, with an inverted "select all except" representation
//! and one batched change notification per mutating call.
//!
//! # Example
//!
//! ```
//! use markset::model::{Keyed, MarkedModel};
//!
//! #[derive(Debug, Clone, PartialEq)]
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
//! let photo = |id| Photo { id, title: format!("photo {id}") };
//!
//! let mut selection = MarkedModel::<Photo>::new(true);
//! selection.changed.connect(|change| {
//!     println!("{}: +{} -{}", change.source, change.added.len(), change.removed.len());
//! });
//!
//! selection.toggle(&photo(1)).unwrap();
//! selection.toggle(&photo(2)).unwrap();
//! assert_eq!(selection.marked().len(), 2);
//!
//! selection.toggle_select_all(); // partial selection -> none
//! assert!(selection.is_selection_empty());
//! ```

pub mod config;
mod error;
pub mod model;

pub use config::MarkedModelConfig;
pub use error::{Error, Result};
pub use model::{
    CheckState, KeyExtractor, Keyed, MarkationChange, MarkedItems, MarkedModel,
    MarkedModelBuilder, ModelId,
};

// Re-export the notification primitives that appear in the public API
pub use markset_core::{ConnectionGuard, ConnectionId, Signal, SignalError};
