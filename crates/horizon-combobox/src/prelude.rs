//! Prelude module for Horizon Combobox.
//!
//! ```ignore
//! use horizon_combobox::prelude::*;
//! ```
//!
//! This provides access to:
//! - The controller and its configuration
//! - Input records (`KeyInput`, `KeyboardModifiers`) and `Action`
//! - The option model (`OptionList`, `ComboOption`, `ComboboxModel`)
//! - Scroll and geometry types for implementing a `GeometryProvider`
//! - Timers (`SharedTimerQueue`, `Scheduler`, `ManualClock`)

// ============================================================================
// Controller
// ============================================================================

pub use crate::config::ComboboxConfig;
pub use crate::controller::{ComboboxController, ComboboxSnapshot, SelectionChanged};
pub use crate::error::ConfigError;

// ============================================================================
// Input
// ============================================================================

pub use crate::action::Action;
pub use crate::key::{KeyInput, KeyboardModifiers};

// ============================================================================
// Options
// ============================================================================

pub use crate::model::{ComboOption, ComboboxModel, OptionId, OptionList};

// ============================================================================
// Layout
// ============================================================================

pub use crate::scroll::{
    ContainerGeometry, GeometryProvider, ItemGeometry, ScrollCommand, ScrollRequest, ScrollTarget,
};
pub use horizon_combobox_core::{Rect, Size};

// ============================================================================
// Signals and Timers
// ============================================================================

pub use horizon_combobox_core::{
    ManualClock, Scheduler, SharedTimerQueue, Signal, SystemClock, TimerId,
};
