//! Keyboard input records consumed by the combobox.
//!
//! Shells hand the core a [`KeyInput`]: the DOM-style logical key name plus
//! the modifier state. The record is fixed-shape; a shell that could not
//! determine the key passes `None`, which maps to no action.

use unicode_segmentation::UnicodeSegmentation;

/// Keyboard modifier state at the time of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Whether any modifier that turns a character into a shortcut is held.
    ///
    /// Shift is not one of them: it only changes which character is typed.
    #[inline]
    pub fn has_command_modifier(&self) -> bool {
        self.control || self.alt || self.meta
    }
}

/// The keys the combobox distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComboKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Space,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
    Backspace,
    Clear,
    /// A single printable character (one grapheme cluster).
    Character(String),
    /// Anything else: function keys, modifiers alone, multi-character names.
    Other,
}

impl ComboKey {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn parse(key: &str) -> Self {
        match key {
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Clear" => Self::Clear,
            _ if is_printable_character(key) => Self::Character(key.to_string()),
            _ => Self::Other,
        }
    }
}

fn is_printable_character(key: &str) -> bool {
    let mut graphemes = key.graphemes(true);
    match (graphemes.next(), graphemes.next()) {
        (Some(g), None) => !g.chars().any(char::is_control),
        _ => false,
    }
}

/// A key press as delivered by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyInput {
    /// The logical key name; `None` when the platform event carried none.
    pub key: Option<String>,
    /// Modifiers held during the press.
    pub modifiers: KeyboardModifiers,
}

impl KeyInput {
    /// Create a key input with no modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Create a key input with the given modifiers.
    pub fn with_modifiers(key: impl Into<String>, modifiers: KeyboardModifiers) -> Self {
        Self {
            key: Some(key.into()),
            modifiers,
        }
    }

    /// A key event that carried no key name.
    pub fn unidentified() -> Self {
        Self::default()
    }

    /// The parsed key, if the event carried one.
    pub fn combo_key(&self) -> Option<ComboKey> {
        self.key.as_deref().map(ComboKey::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(ComboKey::parse("ArrowDown"), ComboKey::ArrowDown);
        assert_eq!(ComboKey::parse(" "), ComboKey::Space);
        assert_eq!(ComboKey::parse("Esc"), ComboKey::Escape);
        assert_eq!(ComboKey::parse("PageDown"), ComboKey::PageDown);
        assert_eq!(ComboKey::parse("F5"), ComboKey::Other);
        assert_eq!(ComboKey::parse("Shift"), ComboKey::Other);
    }

    #[test]
    fn test_parse_characters() {
        assert_eq!(ComboKey::parse("a"), ComboKey::Character("a".into()));
        assert_eq!(ComboKey::parse("Ä"), ComboKey::Character("Ä".into()));
        // Combining sequence is still one grapheme.
        assert_eq!(
            ComboKey::parse("e\u{301}"),
            ComboKey::Character("e\u{301}".into())
        );
        assert_eq!(ComboKey::parse("ab"), ComboKey::Other);
        assert_eq!(ComboKey::parse("\t"), ComboKey::Other);
        assert_eq!(ComboKey::parse(""), ComboKey::Other);
    }

    #[test]
    fn test_unidentified_key_has_no_combo_key() {
        assert_eq!(KeyInput::unidentified().combo_key(), None);
        assert_eq!(KeyInput::new("Home").combo_key(), Some(ComboKey::Home));
    }

    #[test]
    fn test_shift_is_not_a_command_modifier() {
        assert!(!KeyboardModifiers::SHIFT.has_command_modifier());
        assert!(KeyboardModifiers::ALT.has_command_modifier());
        assert!(KeyboardModifiers::CTRL.has_command_modifier());
        assert!(KeyboardModifiers::META.has_command_modifier());
    }
}
