//! The combobox state machine.
//!
//! [`ComboboxController`] owns the interaction state (open flag, highlighted
//! index, type-ahead buffer) and sequences the key mapper, index navigator,
//! type-ahead matcher and scroll checks. The shell forwards raw input to it
//! and re-renders from its signals and projections.
//!
//! # Timers
//!
//! Type-ahead expiry uses the injected [`Scheduler`]. The shell pumps its
//! timer queue and hands every fired id to [`ComboboxController::handle_timer`];
//! ids the controller does not own are ignored. The controller also records
//! the buffer deadline itself, so a late pump never lets a stale buffer leak
//! into the next search.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_combobox::prelude::*;
//!
//! let timers = Arc::new(SharedTimerQueue::with_system_clock());
//! let mut combo = ComboboxController::new(ComboboxConfig::new("Fruit"), timers)
//!     .with_model(Box::new(OptionList::from_names(["Apple", "Banana", "Cherry"])));
//!
//! combo.handle_key(&KeyInput::new("ArrowDown"));
//! assert!(combo.is_open());
//! assert_eq!(combo.active_descendant_id().as_deref(), Some("opt-0"));
//!
//! combo.handle_key(&KeyInput::new("End"));
//! combo.handle_key(&KeyInput::new("Enter"));
//! assert!(!combo.is_open());
//! assert_eq!(combo.selected_option_name().as_deref(), Some("Cherry"));
//! ```

use std::sync::Arc;
use std::time::Instant;

use horizon_combobox_core::{Property, Scheduler, Signal, TimerId};
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::accessibility::{ListboxAria, OptionAria, TriggerAria};
use crate::action::{Action, map_key_input};
use crate::config::ComboboxConfig;
use crate::key::{ComboKey, KeyInput};
use crate::logging::{span_names, targets};
use crate::model::{ComboboxModel, OptionId, OptionList};
use crate::navigation::next_index_paged;
use crate::scroll::{self, GeometryProvider, ScrollRequest};
use crate::type_ahead;

/// Payload of [`ComboboxController::selection_changed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionChanged {
    /// Index of the committed option.
    pub index: usize,
    /// Identity of the committed option.
    pub option_id: OptionId,
}

/// Read-only view of the controller state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ComboboxSnapshot {
    /// Whether the listbox is shown.
    pub open: bool,
    /// The highlighted option, if any.
    pub selected_index: Option<usize>,
    /// Element id the input should expose as its active descendant.
    pub active_descendant_id: Option<String>,
    /// Pending type-ahead characters.
    pub search_buffer: String,
}

/// The interaction core of a select-only combobox.
///
/// Every operation degrades to a no-op when the option list is empty, and
/// indices supplied by the shell are clamped into range.
pub struct ComboboxController {
    config: ComboboxConfig,

    /// The option list.
    model: Box<dyn ComboboxModel>,

    /// Timer capability for the type-ahead window.
    scheduler: Arc<dyn Scheduler>,

    /// Live layout, if the shell provides one.
    geometry: Option<Arc<dyn GeometryProvider>>,

    /// Whether the listbox is shown.
    open: Property<bool>,

    /// Highlighted option; `None` only while the list is empty.
    selected: Property<Option<usize>>,

    /// Type-ahead buffer.
    search: Property<String>,

    /// Pending expiry timer of the search buffer.
    search_timer: Option<TimerId>,

    /// When the search buffer stops accepting characters.
    search_deadline: Option<Instant>,

    /// Set by a pointer press on an option; swallows the blur that follows.
    ignore_blur: bool,

    /// Active descendant last announced through the signal.
    reported_active_descendant: Option<String>,

    // Signals
    /// Emitted when an option is committed.
    pub selection_changed: Signal<SelectionChanged>,
    /// Emitted when the list opens or closes.
    pub open_changed: Signal<bool>,
    /// Emitted when the active descendant id changes.
    pub active_descendant_changed: Signal<Option<String>>,
    /// Emitted when the type-ahead buffer text changes.
    pub search_changed: Signal<String>,
    /// Emitted when the shell should scroll the list or the page.
    pub scroll_requested: Signal<ScrollRequest>,
    /// Emitted when the shell should move focus back to the trigger.
    pub focus_requested: Signal<()>,
}

impl ComboboxController {
    /// Create a closed controller with an empty option list.
    pub fn new(config: ComboboxConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            config,
            model: Box::new(OptionList::<()>::empty()),
            scheduler,
            geometry: None,
            open: Property::new(false),
            selected: Property::new(None),
            search: Property::new(String::new()),
            search_timer: None,
            search_deadline: None,
            ignore_blur: false,
            reported_active_descendant: None,
            selection_changed: Signal::new(),
            open_changed: Signal::new(),
            active_descendant_changed: Signal::new(),
            search_changed: Signal::new(),
            scroll_requested: Signal::new(),
            focus_requested: Signal::new(),
        }
    }

    /// Set the option list using builder pattern.
    pub fn with_model(mut self, model: Box<dyn ComboboxModel>) -> Self {
        self.set_model(model);
        self
    }

    /// Set the geometry provider using builder pattern.
    pub fn with_geometry(mut self, geometry: Arc<dyn GeometryProvider>) -> Self {
        self.set_geometry(Some(geometry));
        self
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Get the configuration.
    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    /// Get the option list.
    pub fn model(&self) -> &dyn ComboboxModel {
        self.model.as_ref()
    }

    /// Replace the option list.
    ///
    /// The highlighted index is clamped into the new list (or cleared when it
    /// is empty, which also closes the list) and the search buffer is reset.
    pub fn set_model(&mut self, model: Box<dyn ComboboxModel>) {
        self.model = model;
        self.clear_search();

        let count = self.model.row_count();
        let clamped = match count {
            0 => None,
            _ => Some(self.selected.get().unwrap_or(0).min(count - 1)),
        };
        self.selected.set(clamped);
        tracing::debug!(
            target: targets::CONTROLLER,
            count,
            selected = ?clamped,
            "option list replaced"
        );

        if count == 0 {
            self.set_open(false, false);
        }
        self.sync_active_descendant();
    }

    /// Set or remove the geometry provider.
    ///
    /// Without one, no scroll requests are emitted.
    pub fn set_geometry(&mut self, geometry: Option<Arc<dyn GeometryProvider>>) {
        self.geometry = geometry;
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Whether the listbox is shown.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// The highlighted option index.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.get()
    }

    /// The type-ahead buffer.
    pub fn search_buffer(&self) -> String {
        self.search.get()
    }

    /// Whether the next blur will be swallowed.
    pub fn is_ignoring_blur(&self) -> bool {
        self.ignore_blur
    }

    /// Element id of the highlighted option, reported only while open.
    pub fn active_descendant_id(&self) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        self.selected_index()
            .map(|index| self.config.option_element_id(index))
    }

    /// Name of the highlighted option, for the trigger label.
    pub fn selected_option_name(&self) -> Option<String> {
        self.selected_index().and_then(|index| self.model.name(index))
    }

    /// Capture the observable state.
    pub fn snapshot(&self) -> ComboboxSnapshot {
        ComboboxSnapshot {
            open: self.is_open(),
            selected_index: self.selected_index(),
            active_descendant_id: self.active_descendant_id(),
            search_buffer: self.search_buffer(),
        }
    }

    /// ARIA attributes of the trigger.
    pub fn trigger_aria(&self) -> TriggerAria {
        TriggerAria::new(&self.config, self.is_open(), self.active_descendant_id())
    }

    /// ARIA attributes of the listbox.
    pub fn listbox_aria(&self) -> ListboxAria {
        ListboxAria::new(&self.config)
    }

    /// ARIA attributes of the option at `index`.
    pub fn option_aria(&self, index: usize) -> OptionAria {
        OptionAria::new(&self.config, index, self.selected_index() == Some(index))
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Open or close the list.
    ///
    /// Does nothing when the list is already in the requested state, and
    /// never opens an empty list. Closing asks the shell to bring the trigger
    /// back into view if it is not fully visible. With `focus_after` the shell
    /// is asked to refocus the trigger.
    pub fn set_open(&mut self, open: bool, focus_after: bool) {
        if open && self.model.is_empty() {
            return;
        }
        if !self.open.set(open) {
            return;
        }

        tracing::debug!(target: targets::CONTROLLER, open, "list visibility changed");
        self.open_changed.emit(open);
        self.sync_active_descendant();

        if !open
            && let Some(request) = self
                .geometry
                .as_deref()
                .and_then(|geometry| scroll::trigger_scroll_request(geometry))
        {
            self.scroll_requested.emit(request);
        }

        if focus_after {
            self.focus_requested.emit(());
        }
    }

    /// Handle a key press on the trigger.
    ///
    /// Returns the action that was applied, or `None` when the key is not
    /// handled and should keep its default behavior. Use
    /// [`Action::prevents_default`] to decide whether to suppress the default.
    pub fn handle_key(&mut self, input: &KeyInput) -> Option<Action> {
        let _span = tracing::trace_span!(span_names::KEY_EVENT).entered();

        if self.model.is_empty() {
            return None;
        }
        let action = map_key_input(input, self.is_open())?;
        tracing::trace!(target: targets::CONTROLLER, ?action, key = ?input.key, "key mapped");

        if action != Action::Type {
            self.clear_search();
        }

        match action {
            Action::Open => self.set_open(true, true),
            Action::CloseSelect => {
                if let Some(index) = self.selected_index() {
                    self.select_option(index);
                }
                self.set_open(false, true);
            }
            Action::Close => self.set_open(false, true),
            Action::Type => match input.combo_key() {
                Some(ComboKey::Character(text)) => self.handle_typed_char(&text),
                Some(ComboKey::Backspace) => self.edit_search(|buffer| {
                    let last = buffer.grapheme_indices(true).next_back();
                    buffer.truncate(last.map_or(0, |(at, _)| at));
                }),
                Some(ComboKey::Clear) => self.edit_search(String::clear),
                _ => {}
            },
            nav if nav.is_navigation() => {
                // Home and End also open the list.
                if matches!(nav, Action::First | Action::Last) {
                    self.set_open(true, true);
                }
                self.navigate(nav);
            }
            _ => {}
        }

        Some(action)
    }

    /// Feed one typed character to type-ahead.
    ///
    /// Opens the list, then moves the highlight to the option the buffer
    /// resolves to. A buffer that matches nothing is discarded.
    pub fn handle_typed_char(&mut self, text: &str) {
        if self.model.is_empty() {
            return;
        }
        self.set_open(true, true);

        let expired = self.search_expired();
        let buffer = self.search_buffer();
        let start = self.selected_index().map_or(0, |index| index + 1);
        let result = type_ahead::resolve(text, self.model.as_ref(), &buffer, expired, start);

        match result.match_index {
            Some(index) => {
                self.restart_search_timer();
                self.set_search(result.buffer);
                self.change_index(index);
            }
            None => {
                tracing::trace!(
                    target: targets::TYPE_AHEAD,
                    buffer = %result.buffer,
                    "no option matches, clearing search"
                );
                self.clear_search();
            }
        }
    }

    /// Move the highlight to `index`, clamped into range.
    ///
    /// The shell is asked to scroll the option into view within the list and
    /// within the page as needed. Nothing is committed.
    pub fn change_index(&mut self, index: usize) {
        let count = self.model.row_count();
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);

        if self.selected.set(Some(index)) {
            tracing::trace!(target: targets::CONTROLLER, index, "highlight moved");
        }
        self.sync_active_descendant();

        if let Some(geometry) = self.geometry.as_deref() {
            for request in scroll::option_scroll_requests(geometry, index) {
                self.scroll_requested.emit(request);
            }
        }
    }

    /// Commit the option at `index`, clamped into range.
    ///
    /// This is the only operation that emits [`selection_changed`](Self::selection_changed).
    pub fn select_option(&mut self, index: usize) {
        let count = self.model.row_count();
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);
        let Some(option_id) = self.model.option_id(index) else {
            return;
        };

        self.selected.set(Some(index));
        self.sync_active_descendant();

        tracing::debug!(target: targets::CONTROLLER, index, %option_id, "option committed");
        self.selection_changed.emit(SelectionChanged { index, option_id });
    }

    /// Commit the option with the given identity.
    ///
    /// Returns `false` when no option carries that id.
    pub fn select_by_id(&mut self, id: &OptionId) -> bool {
        match self.model.find_id(id) {
            Some(index) => {
                self.select_option(index);
                true
            }
            None => false,
        }
    }

    /// Handle the trigger losing focus.
    ///
    /// An open list commits its highlighted option and closes, unless a
    /// pointer press on an option set the ignore flag, in which case the flag
    /// is cleared and nothing else happens.
    pub fn handle_blur(&mut self) {
        if self.ignore_blur {
            tracing::trace!(target: targets::CONTROLLER, "blur ignored after option press");
            self.ignore_blur = false;
            return;
        }

        if self.is_open() {
            if let Some(index) = self.selected_index() {
                self.select_option(index);
            }
            self.set_open(false, false);
        }
    }

    /// Handle a pointer press on an option, before its click.
    pub fn on_option_pointer_down(&mut self, index: usize) {
        tracing::trace!(target: targets::CONTROLLER, index, "option pressed");
        self.ignore_blur = true;
    }

    /// Handle a click on an option: highlight it, commit it and close.
    pub fn handle_pointer_select(&mut self, index: usize) {
        if self.model.is_empty() {
            return;
        }
        self.ignore_blur = false;
        self.clear_search();
        self.change_index(index);
        let index = self.selected_index().unwrap_or(index);
        self.select_option(index);
        self.set_open(false, true);
    }

    /// Handle a click on the trigger: toggle the list without moving focus.
    pub fn on_trigger_click(&mut self) {
        let open = !self.is_open();
        self.set_open(open, false);
    }

    /// Deliver a fired timer.
    ///
    /// Returns `true` if the timer belonged to this controller.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.search_timer != Some(id) {
            return false;
        }
        tracing::trace!(target: targets::TYPE_AHEAD, "search buffer expired");
        self.search_timer = None;
        self.search_deadline = None;
        self.set_search(String::new());
        true
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn navigate(&mut self, action: Action) {
        let count = self.model.row_count();
        if count == 0 {
            return;
        }
        let current = self.selected_index().unwrap_or(0);
        let next = next_index_paged(current, count - 1, action, self.config.page_size);
        self.change_index(next);
    }

    fn search_expired(&self) -> bool {
        self.search_deadline
            .is_some_and(|deadline| self.scheduler.now() > deadline)
    }

    fn edit_search(&mut self, edit: impl FnOnce(&mut String)) {
        self.set_open(true, true);

        let mut buffer = if self.search_expired() {
            String::new()
        } else {
            self.search_buffer()
        };
        edit(&mut buffer);

        if buffer.is_empty() {
            self.clear_search();
        } else {
            self.restart_search_timer();
            self.set_search(buffer);
        }
    }

    fn set_search(&mut self, buffer: String) {
        if self.search.set(buffer.clone()) {
            self.search_changed.emit(buffer);
        }
    }

    fn restart_search_timer(&mut self) {
        self.cancel_search_timer();
        let timeout = self.config.type_ahead_timeout();
        self.search_timer = Some(self.scheduler.schedule_once(timeout));
        self.search_deadline = Some(self.scheduler.now() + timeout);
    }

    fn cancel_search_timer(&mut self) {
        if let Some(id) = self.search_timer.take()
            && let Err(err) = self.scheduler.cancel(id)
        {
            tracing::trace!(target: targets::TYPE_AHEAD, %err, "search timer already gone");
        }
    }

    fn clear_search(&mut self) {
        self.cancel_search_timer();
        self.search_deadline = None;
        self.set_search(String::new());
    }

    fn sync_active_descendant(&mut self) {
        let current = self.active_descendant_id();
        if current != self.reported_active_descendant {
            self.reported_active_descendant = current.clone();
            self.active_descendant_changed.emit(current);
        }
    }
}

impl Drop for ComboboxController {
    fn drop(&mut self) {
        self.cancel_search_timer();
    }
}

impl std::fmt::Debug for ComboboxController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboboxController")
            .field("config", &self.config)
            .field("options", &self.model.row_count())
            .field("open", &self.is_open())
            .field("selected", &self.selected_index())
            .field("search", &self.search_buffer())
            .field("ignore_blur", &self.ignore_blur)
            .finish_non_exhaustive()
    }
}
