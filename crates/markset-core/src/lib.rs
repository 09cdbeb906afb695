//! Core systems for markset.
//!
//! This crate provides the foundational pieces the marking model is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Property System**: Values that report whether a write changed them
//! - **Logging**: `tracing` targets, span names and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use markset_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{Result, SignalError};
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
