//! Combobox configuration.
//!
//! All fields have defaults, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! label = "Favorite fruit"
//! type_ahead_timeout_ms = 750
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::logging::targets;
use crate::navigation::PAGE_SIZE;

/// Default type-ahead window in milliseconds.
pub const DEFAULT_TYPE_AHEAD_TIMEOUT_MS: u64 = 500;

/// Settings for a [`ComboboxController`](crate::ComboboxController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboboxConfig {
    /// Visible label text.
    pub label: String,
    /// Element id of the label, referenced by `aria-labelledby`.
    pub label_id: String,
    /// Element id of the listbox, referenced by `aria-controls`.
    pub listbox_id: String,
    /// Prefix for option element ids; the option index is appended.
    pub option_id_prefix: String,
    /// Options skipped by `PageUp`/`PageDown`.
    pub page_size: usize,
    /// Milliseconds after the last typed character before the search buffer
    /// is discarded.
    pub type_ahead_timeout_ms: u64,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            label_id: "combo-label".to_string(),
            listbox_id: "listbox".to_string(),
            option_id_prefix: "opt-".to_string(),
            page_size: PAGE_SIZE,
            type_ahead_timeout_ms: DEFAULT_TYPE_AHEAD_TIMEOUT_MS,
        }
    }
}

impl ComboboxConfig {
    /// Create a default config with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        tracing::debug!(
            target: targets::CONFIG,
            label = %config.label,
            page_size = config.page_size,
            timeout_ms = config.type_ahead_timeout_ms,
            "loaded combobox config"
        );
        Ok(config)
    }

    /// Check the values that the controller cannot work without.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        if self.listbox_id.is_empty() {
            return Err(ConfigError::empty_id("listbox_id"));
        }
        if self.option_id_prefix.is_empty() {
            return Err(ConfigError::empty_id("option_id_prefix"));
        }
        Ok(())
    }

    /// The type-ahead window as a [`Duration`].
    #[inline]
    pub fn type_ahead_timeout(&self) -> Duration {
        Duration::from_millis(self.type_ahead_timeout_ms)
    }

    /// Element id of the option at `index`.
    pub fn option_element_id(&self, index: usize) -> String {
        format!("{}{}", self.option_id_prefix, index)
    }
}
