//! ARIA projections of the combobox state.
//!
//! The controller never touches presentation. Instead the shell asks for
//! these read-only views after each change and renders the attributes they
//! describe. They are computed on demand and never stored.

use crate::config::ComboboxConfig;

#[cfg(feature = "accessibility")]
use accesskit::Role;

/// `aria-haspopup` value of the trigger.
pub const HAS_POPUP_LISTBOX: &str = "listbox";

/// The accessibility role of a combobox element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibleRole {
    /// The trigger showing the current value.
    ComboBox,
    /// The popup list.
    ListBox,
    /// One option in the list.
    ListBoxOption,
}

impl AccessibleRole {
    /// The ARIA `role` attribute value.
    pub fn as_aria_str(self) -> &'static str {
        match self {
            AccessibleRole::ComboBox => "combobox",
            AccessibleRole::ListBox => "listbox",
            AccessibleRole::ListBoxOption => "option",
        }
    }

    /// Convert to AccessKit's Role enum.
    #[cfg(feature = "accessibility")]
    pub fn to_accesskit_role(self) -> Role {
        match self {
            AccessibleRole::ComboBox => Role::ComboBox,
            AccessibleRole::ListBox => Role::ListBox,
            AccessibleRole::ListBoxOption => Role::ListBoxOption,
        }
    }
}

#[cfg(feature = "accessibility")]
impl From<AccessibleRole> for Role {
    fn from(role: AccessibleRole) -> Self {
        role.to_accesskit_role()
    }
}

/// Attributes of the trigger element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerAria {
    pub role: AccessibleRole,
    /// `aria-expanded`.
    pub expanded: bool,
    /// `aria-activedescendant`; `None` whenever the list is closed.
    pub active_descendant: Option<String>,
    /// `aria-controls`: the listbox id.
    pub controls: String,
    /// `aria-haspopup`.
    pub has_popup: &'static str,
    /// `aria-labelledby`: the label id.
    pub labelled_by: String,
}

impl TriggerAria {
    pub(crate) fn new(config: &ComboboxConfig, expanded: bool, active_descendant: Option<String>) -> Self {
        Self {
            role: AccessibleRole::ComboBox,
            expanded,
            active_descendant,
            controls: config.listbox_id.clone(),
            has_popup: HAS_POPUP_LISTBOX,
            labelled_by: config.label_id.clone(),
        }
    }
}

/// Attributes of the listbox element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListboxAria {
    pub role: AccessibleRole,
    /// Element id, referenced by the trigger's `aria-controls`.
    pub id: String,
    /// `aria-labelledby`: the label id.
    pub labelled_by: String,
}

impl ListboxAria {
    pub(crate) fn new(config: &ComboboxConfig) -> Self {
        Self {
            role: AccessibleRole::ListBox,
            id: config.listbox_id.clone(),
            labelled_by: config.label_id.clone(),
        }
    }
}

/// Attributes of one option element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionAria {
    pub role: AccessibleRole,
    /// Element id, referenced by `aria-activedescendant`.
    pub id: String,
    /// `aria-selected`.
    pub selected: bool,
}

impl OptionAria {
    pub(crate) fn new(config: &ComboboxConfig, index: usize, selected: bool) -> Self {
        Self {
            role: AccessibleRole::ListBoxOption,
            id: config.option_element_id(index),
            selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_strings() {
        assert_eq!(AccessibleRole::ComboBox.as_aria_str(), "combobox");
        assert_eq!(AccessibleRole::ListBox.as_aria_str(), "listbox");
        assert_eq!(AccessibleRole::ListBoxOption.as_aria_str(), "option");
    }

    #[test]
    fn test_projections_use_config_ids() {
        let config = ComboboxConfig {
            label_id: "fruit-label".into(),
            listbox_id: "fruit-list".into(),
            option_id_prefix: "fruit-".into(),
            ..ComboboxConfig::default()
        };

        let trigger = TriggerAria::new(&config, true, Some("fruit-2".into()));
        assert_eq!(trigger.controls, "fruit-list");
        assert_eq!(trigger.labelled_by, "fruit-label");
        assert_eq!(trigger.has_popup, "listbox");

        let listbox = ListboxAria::new(&config);
        assert_eq!(listbox.id, "fruit-list");

        let option = OptionAria::new(&config, 2, true);
        assert_eq!(option.id, "fruit-2");
        assert_eq!(option.role, AccessibleRole::ListBoxOption);
    }

    #[cfg(feature = "accessibility")]
    #[test]
    fn test_accesskit_roles() {
        assert_eq!(Role::from(AccessibleRole::ComboBox), Role::ComboBox);
        assert_eq!(AccessibleRole::ListBox.to_accesskit_role(), Role::ListBox);
    }
}
