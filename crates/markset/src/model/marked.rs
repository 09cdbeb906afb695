//! Keyed marking model with inverted select-all.
//!
//! This module provides [`MarkedModel`], which tracks which records of a
//! collection are *marked*. Together with an inversion flag the marks describe
//! the effective *selection*:
//!
//! - not inverted: the marked records are the selection
//! - inverted: every record is selected except the marked ones
//!
//! Inversion lets a table offer "select all" over a paginated, possibly huge
//! collection without ever enumerating it.
//!
//! # Example
//!
//! ```
//! use markset::model::MarkedModel;
//!
//! let mut marks = MarkedModel::<String>::new(true);
//!
//! marks.changed.connect(|change| {
//!     println!("+{} -{}", change.added.len(), change.removed.len());
//! });
//!
//! marks.mark(&["a".to_string(), "b".to_string()]).unwrap();
//! assert!(marks.is_selected(&"a".to_string()));
//!
//! // Select everything, then carve out an exception
//! marks.select_all();
//! marks.deselect(&["b".to_string()]).unwrap();
//! assert!(marks.is_selected(&"z".to_string()));
//! assert!(!marks.is_selected(&"b".to_string()));
//! assert!(marks.is_indeterminate());
//! ```

use std::fmt;
use std::slice;
use std::sync::Arc;

use indexmap::IndexMap;
use markset_core::logging::{span_names, targets};
use markset_core::{PerfSpan, Property, Signal};
use parking_lot::Mutex;
use serde_json::Value;

use super::change::{CheckState, MarkationChange, MarkedItems, ModelId};
use super::key::{KeyExtractor, Keyed};
use crate::config::MarkedModelConfig;
use crate::error::{Error, Result};

/// Tracks marked records and the inversion flag of a selection.
///
/// Every public mutating call ends with a *flush*: the records added and
/// removed during the call are emitted as one [`MarkationChange`] on
/// [`changed`](Self::changed). Calls that change nothing emit nothing.
///
/// # Signals
///
/// - `changed`: Emitted once per call that added or removed marks
/// - `inversion_changed`: Emitted when the inversion flag flips, with the new value
pub struct MarkedModel<T> {
    id: ModelId,

    /// Whether more than one record may be marked.
    multiple: bool,

    /// Whether the signals fire at all.
    emit_changes: bool,

    key: KeyExtractor<T>,

    /// Marked records by key, in marking order.
    markation: IndexMap<String, T>,

    /// When set, selection is everything except `markation`.
    inverted: Property<bool>,

    /// Records marked since the last flush.
    marked_to_emit: Vec<T>,

    /// Records unmarked since the last flush.
    unmarked_to_emit: Vec<T>,

    /// Snapshot of `markation` values; `None` when dirty.
    marked_cache: Mutex<Option<Arc<[T]>>>,

    /// Emitted when marks change. Args: the batched change.
    pub changed: Signal<MarkationChange<T>>,

    /// Emitted when the inversion flag flips. Args: the new flag.
    pub inversion_changed: Signal<bool>,
}

static_assertions::assert_impl_all!(MarkedModel<String>: Send, Sync);

impl<T: Keyed + Clone + 'static> MarkedModel<T> {
    /// Creates an empty model keyed through [`Keyed`].
    pub fn new(multiple: bool) -> Self {
        Self::from_parts(
            &MarkedModelConfig::new().with_multiple(multiple),
            KeyExtractor::from_keyed(),
        )
    }
}

impl<T: Clone + 'static> MarkedModel<T> {
    /// Creates an empty model keyed by `key_of`.
    pub fn with_key_fn<F>(multiple: bool, key_of: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::from_parts(
            &MarkedModelConfig::new().with_multiple(multiple),
            KeyExtractor::from_fn(key_of),
        )
    }

    /// Starts a builder for a model keyed by `key`.
    pub fn builder(key: KeyExtractor<T>) -> MarkedModelBuilder<T> {
        MarkedModelBuilder::new(key)
    }

    fn from_parts(config: &MarkedModelConfig, key: KeyExtractor<T>) -> Self {
        let model = Self {
            id: ModelId::next(),
            multiple: config.multiple,
            emit_changes: config.emit_changes,
            key,
            markation: IndexMap::new(),
            inverted: Property::new(false),
            marked_to_emit: Vec::new(),
            unmarked_to_emit: Vec::new(),
            marked_cache: Mutex::new(None),
            changed: Signal::new(),
            inversion_changed: Signal::new(),
        };
        tracing::debug!(
            target: targets::MODEL,
            model = %model.id,
            multiple = model.multiple,
            emit_changes = model.emit_changes,
            key = model.key.label(),
            "created marked model"
        );
        model
    }

    // =========================================================================
    // Identity and Mode
    // =========================================================================

    /// Identity carried as `source` in change events.
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Gets whether multiple values can be selected.
    pub fn is_multiple_selection(&self) -> bool {
        self.multiple
    }

    /// Gets whether change notifications are emitted.
    pub fn emits_changes(&self) -> bool {
        self.emit_changes
    }

    /// Whether the selection is "everything except the marked records".
    pub fn is_inverted(&self) -> bool {
        self.inverted.get()
    }

    // =========================================================================
    // Marking
    // =========================================================================

    /// Marks each of `records`.
    ///
    /// In single-selection mode at most one record may be passed, and marking
    /// it replaces the previous mark within the same notification.
    pub fn mark(&mut self, records: &[T]) -> Result<()> {
        let keyed = self.verify_value_assignment(records)?;
        for (key, record) in keyed {
            self.mark_selected(key, record);
        }
        self.emit_change_event();
        Ok(())
    }

    /// Unmarks each of `records`. Records that are not marked are ignored.
    pub fn unmark(&mut self, records: &[T]) -> Result<()> {
        let keyed = self.verify_value_assignment(records)?;
        for (key, _) in keyed {
            self.unmark_selected(&key);
        }
        self.emit_change_event();
        Ok(())
    }

    /// Flips whether `record` is selected.
    ///
    /// Under inversion this adds or removes an exception, so in both modes
    /// it comes down to flipping the mark.
    pub fn toggle(&mut self, record: &T) -> Result<()> {
        if self.is_marked(record) {
            self.unmark(slice::from_ref(record))
        } else {
            self.mark(slice::from_ref(record))
        }
    }

    /// Makes each of `records` selected, whatever the inversion flag.
    pub fn select(&mut self, records: &[T]) -> Result<()> {
        if self.is_inverted() {
            self.unmark(records)
        } else {
            self.mark(records)
        }
    }

    /// Makes each of `records` unselected, whatever the inversion flag.
    pub fn deselect(&mut self, records: &[T]) -> Result<()> {
        if self.is_inverted() {
            self.mark(records)
        } else {
            self.unmark(records)
        }
    }

    /// Clears all marks, leaving the inversion flag alone.
    pub fn clear_marked(&mut self) {
        self.unmark_all();
        self.emit_change_event();
    }

    /// Clears all marks and the inversion flag: nothing is selected.
    pub fn clear_selection(&mut self) {
        self.unmark_all();
        let flipped = self.inverted.set(false);
        self.finish(flipped);
    }

    /// Alias of [`clear_selection`](Self::clear_selection).
    pub fn unselect_all(&mut self) {
        self.clear_selection();
    }

    /// Clears all marks and sets the inversion flag: everything is selected.
    pub fn select_all(&mut self) {
        self.unmark_all();
        let flipped = self.inverted.set(true);
        self.finish(flipped);
    }

    /// Cycles a header checkbox.
    ///
    /// A partial selection goes to "none selected"; otherwise the model moves
    /// between "all selected" and "none selected".
    pub fn toggle_select_all(&mut self) {
        if self.is_indeterminate() {
            self.clear_selection();
        } else {
            let target = !self.is_inverted();
            self.unmark_all();
            let flipped = self.inverted.set(target);
            self.finish(flipped);
        }
    }

    /// Flips the inversion flag, keeping the marks.
    ///
    /// No record is added or removed, so `changed` does not fire; the flip is
    /// reported on `inversion_changed`.
    pub fn reverse(&mut self) {
        let target = !self.is_inverted();
        let flipped = self.inverted.set(target);
        self.finish(flipped);
    }

    /// Closes both signals. No slot runs after this returns.
    pub fn dispose(&mut self) {
        self.changed.close();
        self.inversion_changed.close();
        tracing::debug!(target: targets::MODEL, model = %self.id, "disposed marked model");
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.changed.is_closed()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether `record`'s key is marked, ignoring inversion.
    ///
    /// A record without a key is never marked.
    pub fn is_marked(&self, record: &T) -> bool {
        self.key
            .key_of(record)
            .is_ok_and(|key| self.markation.contains_key(&key))
    }

    /// Whether `record` is selected, accounting for inversion.
    pub fn is_selected(&self, record: &T) -> bool {
        self.is_marked(record) != self.is_inverted()
    }

    /// Whether every record is selected, with no exception.
    pub fn is_all_selected(&self) -> bool {
        self.is_inverted() && self.markation.is_empty()
    }

    /// Whether some marks deviate from the baseline (partial selection).
    pub fn is_indeterminate(&self) -> bool {
        !self.markation.is_empty()
    }

    /// Whether nothing is marked.
    pub fn is_markation_empty(&self) -> bool {
        self.markation.is_empty()
    }

    /// Whether nothing at all is selected.
    pub fn is_selection_empty(&self) -> bool {
        !self.is_inverted() && self.markation.is_empty()
    }

    /// Whether anything is selected.
    pub fn has_selected_value(&self) -> bool {
        !self.is_selection_empty()
    }

    /// Alias of [`has_selected_value`](Self::has_selected_value).
    pub fn has_marked_value(&self) -> bool {
        self.has_selected_value()
    }

    /// Number of marked records.
    pub fn marked_count(&self) -> usize {
        self.markation.len()
    }

    /// Keys of the marked records, in marking order.
    pub fn marked_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.markation.keys().map(String::as_str)
    }

    /// Snapshot of the marked records and the inversion flag.
    ///
    /// The record list is cached until the next mutation, so repeated reads
    /// share one buffer.
    pub fn marked(&self) -> MarkedItems<T> {
        let items = {
            let mut cache = self.marked_cache.lock();
            Arc::clone(cache.get_or_insert_with(|| self.markation.values().cloned().collect()))
        };
        MarkedItems::new(self.is_inverted(), items)
    }

    /// Number of selected records in a collection of `total` records.
    ///
    /// Marks are assumed to belong to that collection.
    pub fn selected_count(&self, total: usize) -> usize {
        if self.is_inverted() {
            total.saturating_sub(self.markation.len())
        } else {
            self.markation.len()
        }
    }

    /// The selected records among `records`, in their given order.
    pub fn selected_in(&self, records: &[T]) -> Vec<T> {
        let _span = PerfSpan::new(span_names::RESOLVE);
        records
            .iter()
            .filter(|record| self.is_selected(record))
            .cloned()
            .collect()
    }

    /// Checkbox state of a row.
    pub fn check_state(&self, record: &T) -> CheckState {
        CheckState::from(self.is_selected(record))
    }

    /// Checkbox state of the select-all header.
    pub fn header_check_state(&self) -> CheckState {
        if self.is_all_selected() {
            CheckState::Checked
        } else if self.is_indeterminate() {
            CheckState::PartiallyChecked
        } else {
            CheckState::Unchecked
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Rejects multi-record calls in single mode and keys every record before
    /// anything is mutated.
    fn verify_value_assignment<'r>(&self, records: &'r [T]) -> Result<Vec<(String, &'r T)>> {
        if records.len() > 1 && !self.multiple {
            tracing::warn!(
                target: targets::MODEL,
                model = %self.id,
                count = records.len(),
                "multiple values passed to single-selection model"
            );
            return Err(Error::MultipleValuesInSingleSelection {
                count: records.len(),
            });
        }
        records
            .iter()
            .map(|record| self.key.key_of(record).map(|key| (key, record)))
            .collect()
    }

    fn mark_selected(&mut self, key: String, record: &T) {
        if self.markation.contains_key(&key) {
            return;
        }
        if !self.multiple {
            self.unmark_all();
        }
        self.markation.insert(key, record.clone());
        if self.emit_changes {
            self.marked_to_emit.push(record.clone());
        }
        self.invalidate();
    }

    fn unmark_selected(&mut self, key: &str) {
        if let Some(record) = self.markation.shift_remove(key) {
            if self.emit_changes {
                self.unmarked_to_emit.push(record);
            }
            self.invalidate();
        }
    }

    fn unmark_all(&mut self) {
        if self.markation.is_empty() {
            return;
        }
        let removed = std::mem::take(&mut self.markation);
        if self.emit_changes {
            self.unmarked_to_emit.extend(removed.into_values());
        }
        self.invalidate();
    }

    fn invalidate(&mut self) {
        *self.marked_cache.get_mut() = None;
    }

    /// Flushes pending changes, then reports an inversion flip.
    fn finish(&mut self, inversion_flipped: bool) {
        self.emit_change_event();
        if inversion_flipped && self.emit_changes {
            let inverted = self.is_inverted();
            tracing::debug!(target: targets::MODEL, model = %self.id, inverted, "inversion changed");
            self.inversion_changed.emit(inverted);
        }
    }

    /// Emits a change event and clears the records of marked and unmarked values.
    fn emit_change_event(&mut self) {
        if self.marked_to_emit.is_empty() && self.unmarked_to_emit.is_empty() {
            return;
        }
        let change = MarkationChange {
            source: self.id,
            added: std::mem::take(&mut self.marked_to_emit),
            removed: std::mem::take(&mut self.unmarked_to_emit),
        };
        tracing::debug!(
            target: targets::MODEL,
            model = %self.id,
            added = change.added.len(),
            removed = change.removed.len(),
            "flushing markation change"
        );
        self.changed.emit(change);
    }
}

impl MarkedModel<Value> {
    /// Creates an empty model over JSON records keyed by `field`.
    pub fn with_key_field(multiple: bool, field: impl Into<String>) -> Self {
        Self::from_parts(
            &MarkedModelConfig::new().with_multiple(multiple),
            KeyExtractor::field(field),
        )
    }

    /// Creates an empty model over JSON records from a configuration,
    /// honoring its `key_field`.
    pub fn from_config(config: &MarkedModelConfig) -> Self {
        Self::from_parts(config, KeyExtractor::field(config.key_field.as_str()))
    }
}

impl<T> fmt::Debug for MarkedModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkedModel")
            .field("id", &self.id)
            .field("multiple", &self.multiple)
            .field("emit_changes", &self.emit_changes)
            .field("inverted", &self.inverted.with(|inverted| *inverted))
            .field("marked", &self.markation.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Builder for [`MarkedModel`] with initially marked records.
///
/// Initially marked records are marked silently: no notification fires for
/// them. In single-selection mode only the first one is used.
///
/// # Example
///
/// ```
/// use markset::model::{KeyExtractor, MarkedModel};
///
/// let model = MarkedModel::builder(KeyExtractor::from_fn(|s: &String| s.clone()))
///     .multiple(true)
///     .initially_marked(["x".to_string(), "y".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(model.marked().len(), 2);
/// ```
pub struct MarkedModelBuilder<T> {
    config: MarkedModelConfig,
    key: KeyExtractor<T>,
    initially_marked: Vec<T>,
}

impl<T: Clone + 'static> MarkedModelBuilder<T> {
    /// Creates a builder with the default configuration.
    pub fn new(key: KeyExtractor<T>) -> Self {
        Self {
            config: MarkedModelConfig::default(),
            key,
            initially_marked: Vec::new(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: MarkedModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the multiple-selection flag.
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.config.multiple = multiple;
        self
    }

    /// Sets whether change notifications fire.
    pub fn emit_changes(mut self, emit_changes: bool) -> Self {
        self.config.emit_changes = emit_changes;
        self
    }

    /// Adds records marked at construction.
    pub fn initially_marked<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.initially_marked.extend(records);
        self
    }

    /// Builds the model.
    ///
    /// Fails if an initially marked record has no key.
    pub fn build(self) -> Result<MarkedModel<T>> {
        let mut model = MarkedModel::from_parts(&self.config, self.key);
        let take = if model.multiple { self.initially_marked.len() } else { 1 };
        for record in self.initially_marked.iter().take(take) {
            let key = model.key.key_of(record)?;
            model.mark_selected(key, record);
        }
        // Preselected values never reach subscribers.
        model.marked_to_emit.clear();
        model.unmarked_to_emit.clear();
        Ok(model)
    }
}

impl MarkedModelBuilder<Value> {
    /// Creates a builder over JSON records keyed by `config.key_field`.
    pub fn from_config(config: MarkedModelConfig) -> Self {
        let key = KeyExtractor::field(config.key_field.as_str());
        Self::new(key).config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn s(value: &str) -> String {
        value.to_string()
    }

    fn record_changes(model: &MarkedModel<String>) -> Arc<Mutex<Vec<MarkationChange<String>>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        model.changed.connect(move |change| sink.lock().push(change.clone()));
        log
    }

    #[test]
    fn test_model_creation() {
        let model = MarkedModel::<String>::new(false);
        assert!(!model.is_multiple_selection());
        assert!(model.emits_changes());
        assert!(!model.is_inverted());
        assert!(model.is_selection_empty());
        assert!(model.is_markation_empty());
        assert!(!model.has_selected_value());
        assert_eq!(model.header_check_state(), CheckState::Unchecked);
    }

    #[test]
    fn test_mark_and_unmark() {
        let mut model = MarkedModel::<String>::new(true);
        model.mark(&[s("a"), s("b")]).unwrap();
        assert!(model.is_marked(&s("a")));
        assert!(model.is_selected(&s("b")));
        assert_eq!(model.marked_count(), 2);

        model.unmark(&[s("a")]).unwrap();
        assert!(!model.is_marked(&s("a")));
        assert_eq!(model.marked_keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_single_selection_replaces() {
        let mut model = MarkedModel::<String>::new(false);
        let log = record_changes(&model);

        model.mark(&[s("a")]).unwrap();
        model.mark(&[s("b")]).unwrap();

        assert!(!model.is_marked(&s("a")));
        assert!(model.is_marked(&s("b")));
        let changes = log.lock();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].added, vec![s("b")]);
        assert_eq!(changes[1].removed, vec![s("a")]);
        assert_eq!(changes[1].source, model.id());
    }

    #[test]
    fn test_single_selection_rejects_many() {
        let mut model = MarkedModel::<String>::new(false);
        model.mark(&[s("a")]).unwrap();
        let log = record_changes(&model);

        let err = model.mark(&[s("b"), s("c")]).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = model.unmark(&[s("a"), s("b")]).unwrap_err();
        assert!(err.is_invalid_argument());

        assert_eq!(model.marked_keys().collect::<Vec<_>>(), vec!["a"]);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_mark_empty_slice_is_noop() {
        let mut model = MarkedModel::<String>::new(false);
        let log = record_changes(&model);
        model.mark(&[]).unwrap();
        model.unmark(&[]).unwrap();
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_toggle_flips_selection() {
        let mut model = MarkedModel::<String>::new(true);
        model.toggle(&s("a")).unwrap();
        assert!(model.is_selected(&s("a")));
        model.toggle(&s("a")).unwrap();
        assert!(!model.is_selected(&s("a")));

        model.select_all();
        model.toggle(&s("a")).unwrap();
        assert!(!model.is_selected(&s("a")));
        assert!(model.is_marked(&s("a")));
        model.toggle(&s("a")).unwrap();
        assert!(model.is_selected(&s("a")));
        assert!(model.is_all_selected());
    }

    #[test]
    fn test_select_and_deselect_respect_inversion() {
        let mut model = MarkedModel::<String>::new(true);
        model.select(&[s("a")]).unwrap();
        assert!(model.is_marked(&s("a")));

        model.select_all();
        model.deselect(&[s("b")]).unwrap();
        assert!(model.is_marked(&s("b")));
        assert!(!model.is_selected(&s("b")));

        model.select(&[s("b")]).unwrap();
        assert!(model.is_all_selected());
    }

    #[test]
    fn test_select_all_reports_cleared_exceptions() {
        let mut model = MarkedModel::<String>::new(true);
        model.mark(&[s("a")]).unwrap();
        let log = record_changes(&model);
        let flips = Arc::new(Mutex::new(Vec::new()));
        let flips_sink = flips.clone();
        model.inversion_changed.connect(move |&inverted| flips_sink.lock().push(inverted));

        model.select_all();

        assert!(model.is_all_selected());
        assert!(!model.is_indeterminate());
        assert_eq!(model.header_check_state(), CheckState::Checked);
        let changes = log.lock();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].added.is_empty());
        assert_eq!(changes[0].removed, vec![s("a")]);
        assert_eq!(*flips.lock(), vec![true]);
    }

    #[test]
    fn test_toggle_select_all_cycle() {
        let mut model = MarkedModel::<String>::new(true);

        model.toggle_select_all();
        assert!(model.is_all_selected());

        model.toggle_select_all();
        assert!(model.is_selection_empty());

        model.mark(&[s("a")]).unwrap();
        assert!(model.is_indeterminate());
        model.toggle_select_all();
        assert!(model.is_selection_empty());

        model.select_all();
        model.mark(&[s("a")]).unwrap();
        assert_eq!(model.header_check_state(), CheckState::PartiallyChecked);
        model.toggle_select_all();
        assert!(model.is_selection_empty());
        assert!(!model.is_inverted());
    }

    #[test]
    fn test_reverse_keeps_marks_and_emits_no_change() {
        let mut model = MarkedModel::<String>::new(true);
        model.mark(&[s("a")]).unwrap();
        let log = record_changes(&model);
        let flips = Arc::new(AtomicUsize::new(0));
        let flips_clone = flips.clone();
        model.inversion_changed.connect(move |_| {
            flips_clone.fetch_add(1, Ordering::SeqCst);
        });

        model.reverse();

        assert!(model.is_inverted());
        assert!(model.is_marked(&s("a")));
        assert!(!model.is_selected(&s("a")));
        assert!(model.is_selected(&s("b")));
        assert!(log.lock().is_empty());
        assert_eq!(flips.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_marked_keeps_inversion() {
        let mut model = MarkedModel::<String>::new(true);
        model.select_all();
        model.mark(&[s("a"), s("b")]).unwrap();
        let log = record_changes(&model);

        model.clear_marked();

        assert!(model.is_inverted());
        assert!(model.is_all_selected());
        assert_eq!(log.lock()[0].removed, vec![s("a"), s("b")]);
    }

    #[test]
    fn test_clear_selection_and_unselect_all_match() {
        let mut a = MarkedModel::<String>::new(true);
        let mut b = MarkedModel::<String>::new(true);
        for model in [&mut a, &mut b] {
            model.select_all();
            model.mark(&[s("x")]).unwrap();
        }

        a.clear_selection();
        b.unselect_all();

        for model in [&a, &b] {
            assert!(!model.is_inverted());
            assert!(model.is_markation_empty());
            assert!(model.is_selection_empty());
        }
    }

    #[test]
    fn test_marked_snapshot_is_cached_until_mutation() {
        let mut model = MarkedModel::<String>::new(true);
        model.mark(&[s("a"), s("b")]).unwrap();

        let first = model.marked();
        let second = model.marked();
        assert!(first.shares_buffer_with(&second));
        assert_eq!(first.marked_items(), &[s("a"), s("b")]);
        assert!(!first.contain_selected());

        model.mark(&[s("a")]).unwrap();
        assert!(model.marked().shares_buffer_with(&first));

        model.unmark(&[s("a")]).unwrap();
        let third = model.marked();
        assert!(!third.shares_buffer_with(&first));
        assert_eq!(third.marked_items(), &[s("b")]);
        assert_eq!(first.marked_items(), &[s("a"), s("b")]);
    }

    #[test]
    fn test_emit_changes_disabled() {
        let mut model = MarkedModel::builder(KeyExtractor::<String>::from_keyed())
            .multiple(true)
            .emit_changes(false)
            .build()
            .unwrap();
        let log = record_changes(&model);
        let flips = Arc::new(AtomicUsize::new(0));
        let flips_clone = flips.clone();
        model.inversion_changed.connect(move |_| {
            flips_clone.fetch_add(1, Ordering::SeqCst);
        });

        model.select_all();
        model.mark(&[s("a")]).unwrap();
        model.reverse();

        assert!(log.lock().is_empty());
        assert_eq!(flips.load(Ordering::SeqCst), 0);
        assert!(!model.is_inverted());
        assert!(model.is_marked(&s("a")));
        assert!(model.is_selected(&s("a")));
    }

    #[test]
    fn test_flag_only_operations_never_emit_changes() {
        let mut model = MarkedModel::<String>::new(true);
        let log = record_changes(&model);
        let flips = Arc::new(Mutex::new(Vec::new()));
        let flips_sink = flips.clone();
        model.inversion_changed.connect(move |&inverted| flips_sink.lock().push(inverted));

        model.select_all();
        model.select_all();
        model.toggle_select_all();
        model.toggle_select_all();
        model.clear_marked();
        model.unselect_all();
        model.unselect_all();
        model.clear_marked();

        assert!(log.lock().is_empty());
        assert_eq!(*flips.lock(), vec![true, false, true, false]);
        assert!(model.is_selection_empty());
    }

    #[test]
    fn test_records_need_not_be_thread_safe() {
        use std::rc::Rc;

        let mut model = MarkedModel::with_key_fn(true, |record: &Rc<str>| record.to_string());
        let a: Rc<str> = Rc::from("a");

        model.mark(&[Rc::clone(&a)]).unwrap();
        model.reverse();

        assert!(model.is_marked(&Rc::from("a")));
        assert!(!model.is_selected(&a));
        assert_eq!(model.selected_in(&[a, Rc::from("b")]).len(), 1);
    }

    #[test]
    fn test_single_mode_builder_uses_first_initial_record() {
        let model = MarkedModel::builder(KeyExtractor::<String>::from_keyed())
            .initially_marked([s("x"), s("y")])
            .build()
            .unwrap();
        assert_eq!(model.marked_keys().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_selected_count_and_page_resolution() {
        let mut model = MarkedModel::<String>::new(true);
        let page = [s("a"), s("b"), s("c")];
        model.mark(&[s("b")]).unwrap();
        assert_eq!(model.selected_in(&page), vec![s("b")]);
        assert_eq!(model.selected_count(100), 1);

        model.reverse();
        assert_eq!(model.selected_in(&page), vec![s("a"), s("c")]);
        assert_eq!(model.selected_count(100), 99);
        assert_eq!(model.selected_count(0), 0);
        assert_eq!(model.check_state(&s("b")), CheckState::Unchecked);
        assert_eq!(model.check_state(&s("a")), CheckState::Checked);
    }

    #[test]
    fn test_dispose_silences_slots() {
        let mut model = MarkedModel::<String>::new(true);
        let log = record_changes(&model);

        model.dispose();
        model.mark(&[s("a")]).unwrap();
        model.select_all();

        assert!(model.is_disposed());
        assert!(log.lock().is_empty());
        assert!(model.changed.try_connect(|_| {}).is_err());
    }

    #[test]
    fn test_debug_lists_keys() {
        let mut model = MarkedModel::<String>::new(true);
        model.mark(&[s("a")]).unwrap();
        let debug = format!("{model:?}");
        assert!(debug.contains("MarkedModel"));
        assert!(debug.contains("\"a\""));
    }
}
