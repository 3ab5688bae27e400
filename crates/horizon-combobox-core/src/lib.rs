//! Core systems for Horizon Combobox.
//!
//! This crate provides the plumbing the combobox interaction core is built on,
//! kept free of any widget semantics:
//!
//! - **Signal/Slot System**: Type-safe notifications from the core to its shell
//! - **Property System**: Change-detecting state cells
//! - **Timers**: One-shot timers behind an injectable [`Scheduler`]
//! - **Geometry**: Point, size and rectangle value types
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_combobox_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod property;
pub mod signal;
pub mod timer;

pub use error::{CoreError, Result, TimerError};
pub use geometry::{Point, Rect, Size};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{
    Clock, ManualClock, Scheduler, SharedTimerQueue, SystemClock, TimerId, TimerQueue,
};
