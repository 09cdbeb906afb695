//! Change events and read-only snapshots emitted by the marking model.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Process-unique identity of a [`MarkedModel`](super::MarkedModel).
///
/// Change events carry the id of the model that produced them so a slot
/// shared between several models can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModelId(u64);

impl ModelId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

/// One batched change notification.
///
/// Emitted at most once per public mutating call, and only when at least one
/// record was actually added or removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkationChange<T> {
    /// Model that dispatched the event.
    pub source: ModelId,
    /// Records that became marked, in operation order.
    pub added: Vec<T>,
    /// Records that stopped being marked, in operation order.
    pub removed: Vec<T>,
}

/// Read-only snapshot of the marked records.
///
/// `inverted` tells how to read `items`: when `false` they are the selected
/// records, when `true` they are the exceptions to an all-selected baseline.
/// Serializes as `{"containSelected": .., "markedItems": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkedItems<T> {
    #[serde(rename = "containSelected")]
    inverted: bool,
    #[serde(rename = "markedItems")]
    items: Arc<[T]>,
}

impl<T> MarkedItems<T> {
    pub(crate) fn new(inverted: bool, items: Arc<[T]>) -> Self {
        Self { inverted, items }
    }

    /// Whether the listed records are exceptions to a select-all.
    pub fn contain_selected(&self) -> bool {
        self.inverted
    }

    /// The marked records in marking order.
    pub fn marked_items(&self) -> &[T] {
        &self.items
    }

    /// Number of marked records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no record is marked.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the marked records.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Whether this snapshot shares its buffer with `other`.
    ///
    /// Two snapshots taken without a mutation in between always do.
    pub fn shares_buffer_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<'a, T> IntoIterator for &'a MarkedItems<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Check state for checkbox rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CheckState {
    /// Item is unchecked.
    #[default]
    Unchecked,
    /// Item is partially checked (for tri-state checkboxes).
    PartiallyChecked,
    /// Item is checked.
    Checked,
}

impl CheckState {
    /// Returns `true` if the item is checked (fully or partially).
    pub fn is_checked(&self) -> bool {
        !matches!(self, CheckState::Unchecked)
    }

    /// Returns `true` if the item is fully checked.
    pub fn is_fully_checked(&self) -> bool {
        matches!(self, CheckState::Checked)
    }

    /// Toggles between Unchecked and Checked.
    /// PartiallyChecked becomes Unchecked, matching `toggle_select_all`.
    pub fn toggle(&self) -> CheckState {
        match self {
            CheckState::Unchecked => CheckState::Checked,
            CheckState::PartiallyChecked | CheckState::Checked => CheckState::Unchecked,
        }
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}
