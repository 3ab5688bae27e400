//! Horizon Combobox - the interaction core of an accessible select-only
//! combobox.
//!
//! The crate turns raw input (key presses, clicks, blur) into selection
//! changes, open/close transitions and scroll requests, following the ARIA
//! combobox pattern. Rendering is left to a shell that forwards input to a
//! [`ComboboxController`] and re-renders from its signals and ARIA
//! projections.
//!
//! The building blocks are usable on their own:
//!
//! - [`action::map_key`]: key press to [`Action`]
//! - [`navigation::next_index`]: index arithmetic for navigation actions
//! - [`type_ahead::resolve`]: type-ahead search with repeated-letter cycling
//! - [`scroll::ensure_visible`]: list scroll needed to reveal an option
//!
//! This crate re-exports everything from `horizon_combobox_core`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_combobox::prelude::*;
//!
//! let timers = Arc::new(SharedTimerQueue::with_system_clock());
//! let mut combo = ComboboxController::new(ComboboxConfig::new("Country"), timers)
//!     .with_model(Box::new(OptionList::from_names(["Viet Nam", "Venezuela"])));
//!
//! combo.selection_changed.connect(|change| {
//!     println!("committed {} ({})", change.index, change.option_id);
//! });
//!
//! let action = combo.handle_key(&KeyInput::new("v"));
//! assert_eq!(action, Some(Action::Type));
//! assert_eq!(combo.selected_index(), Some(1));
//! ```

pub use horizon_combobox_core::*;

pub mod accessibility;
pub mod action;
pub mod config;
pub mod controller;
mod error;
pub mod key;
pub mod model;
pub mod navigation;
pub mod prelude;
pub mod scroll;
pub mod type_ahead;

pub use accessibility::{AccessibleRole, ListboxAria, OptionAria, TriggerAria};
pub use action::{Action, map_key, map_key_input};
pub use config::ComboboxConfig;
pub use controller::{ComboboxController, ComboboxSnapshot, SelectionChanged};
pub use error::ConfigError;
pub use key::{ComboKey, KeyInput, KeyboardModifiers};
pub use model::{ComboOption, ComboboxModel, OptionId, OptionList};
pub use navigation::{PAGE_SIZE, next_index};
pub use scroll::{
    ContainerGeometry, GeometryProvider, GeometrySnapshot, ItemGeometry, ScrollCommand,
    ScrollRequest, ScrollTarget, ensure_visible, is_in_viewport,
};
pub use type_ahead::TypeAheadResult;
