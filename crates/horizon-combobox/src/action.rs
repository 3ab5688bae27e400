//! Mapping key presses to combobox actions.
//!
//! The rules follow the ARIA select-only combobox pattern and are checked in
//! a fixed priority order:
//!
//! 1. Closed list: `ArrowDown`, `ArrowUp`, `Enter` and `Space` open it.
//! 2. `Home` and `End` jump to the first/last option, open or closed.
//! 3. `Backspace`, `Clear`, and any single printable character typed without
//!    Alt/Ctrl/Meta (Space excluded) feed type-ahead.
//! 4. Open list: `Alt+ArrowUp` commits and closes, arrows and page keys
//!    navigate, `Escape` closes, `Enter`/`Space` commit and close.
//!
//! Anything else passes through unhandled. Typing wins over the open-list
//! rules because rule 3 is checked first.

use crate::key::{ComboKey, KeyInput, KeyboardModifiers};

/// A discrete combobox action derived from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Close the list without committing.
    Close,
    /// Commit the highlighted option, then close.
    CloseSelect,
    /// Move to the first option.
    First,
    /// Move to the last option.
    Last,
    /// Move to the next option.
    Next,
    /// Open the list.
    Open,
    /// Move one page down.
    PageDown,
    /// Move one page up.
    PageUp,
    /// Move to the previous option.
    Previous,
    /// Feed the key to type-ahead.
    Type,
}

impl Action {
    /// Whether the shell should suppress the platform default for the key.
    ///
    /// Typed characters are left alone so that input methods and page-level
    /// shortcuts keep working.
    #[inline]
    pub fn prevents_default(self) -> bool {
        !matches!(self, Action::Type)
    }

    /// Whether this action moves the highlighted index.
    #[inline]
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Action::First
                | Action::Last
                | Action::Next
                | Action::Previous
                | Action::PageUp
                | Action::PageDown
        )
    }
}

/// Map a key name and modifier state to an action.
///
/// Returns `None` when the key should pass through unhandled.
pub fn map_key(key: &str, modifiers: KeyboardModifiers, is_open: bool) -> Option<Action> {
    map_combo_key(&ComboKey::parse(key), modifiers, is_open)
}

/// Map a [`KeyInput`] record to an action.
///
/// An input without a key name never maps to an action.
pub fn map_key_input(input: &KeyInput, is_open: bool) -> Option<Action> {
    input
        .combo_key()
        .and_then(|key| map_combo_key(&key, input.modifiers, is_open))
}

fn map_combo_key(key: &ComboKey, modifiers: KeyboardModifiers, is_open: bool) -> Option<Action> {
    if !is_open
        && matches!(
            key,
            ComboKey::ArrowDown | ComboKey::ArrowUp | ComboKey::Enter | ComboKey::Space
        )
    {
        return Some(Action::Open);
    }

    match key {
        ComboKey::Home => return Some(Action::First),
        ComboKey::End => return Some(Action::Last),
        _ => {}
    }

    match key {
        ComboKey::Backspace | ComboKey::Clear => return Some(Action::Type),
        ComboKey::Character(_) if !modifiers.has_command_modifier() => {
            return Some(Action::Type);
        }
        _ => {}
    }

    if !is_open {
        return None;
    }

    match key {
        ComboKey::ArrowUp if modifiers.alt => Some(Action::CloseSelect),
        ComboKey::ArrowDown if !modifiers.alt => Some(Action::Next),
        ComboKey::ArrowUp => Some(Action::Previous),
        ComboKey::PageUp => Some(Action::PageUp),
        ComboKey::PageDown => Some(Action::PageDown),
        ComboKey::Escape => Some(Action::Close),
        ComboKey::Enter | ComboKey::Space => Some(Action::CloseSelect),
        _ => None,
    }
}
