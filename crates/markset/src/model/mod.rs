//! Marking model for selectable collections.
//!
//! This module provides the types a table or list view needs to track which
//! of its records are selected:
//!
//! - `MarkedModel`: marks, inversion flag and batched change signals
//! - `MarkedModelBuilder`: construction with initially marked records
//! - `KeyExtractor` / `Keyed`: how a record's key is derived
//! - `MarkationChange`: one batched notification
//! - `MarkedItems`: read-only snapshot of the marks
//! - `CheckState`: row and header checkbox state
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  records   ┌─────────────┐  changed   ┌─────────────┐
//! │ Data source │───────────>│ MarkedModel │───────────>│    View     │
//! │ (paginated) │            │             │<───────────│ (checkboxes)│
//! └─────────────┘            └─────────────┘  mark/...  └─────────────┘
//! ```
//!
//! The data source and the view are external collaborators. The view calls
//! `is_selected` / `header_check_state` to render and `toggle` /
//! `toggle_select_all` in response to input.

mod change;
mod key;
mod marked;

pub use change::{CheckState, MarkationChange, MarkedItems, ModelId};
pub use key::{DEFAULT_KEY_FIELD, KeyExtractor, KeyFn, Keyed};
pub use marked::{MarkedModel, MarkedModelBuilder};
