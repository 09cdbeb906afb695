//! Logging facilities for markset.
//!
//! markset uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("markset=debug,markset_core=trace")
//!     .init();
//! ```
//!
//! The constants in [`targets`] and [`span_names`] can be used in filter
//! directives to narrow output to one subsystem.

/// Span names used throughout markset for tracing.
pub mod span_names {
    /// Selection resolution span (see [`PerfSpan`](super::PerfSpan)).
    pub const RESOLVE: &str = "markset::resolve";
}

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "markset_core::signal";
    /// Marked model target.
    pub const MODEL: &str = "markset::model";
    /// Configuration loading target.
    pub const CONFIG: &str = "markset::config";
    /// Performance spans.
    pub const PERF: &str = "markset::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring the duration of an operation with a span-timing
/// subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
