//! Error types for combobox configuration.

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading a [`ComboboxConfig`](crate::ComboboxConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text is not valid TOML or has the wrong shape.
    #[error("Failed to parse combobox config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Page navigation needs a non-zero step.
    #[error("Invalid page size {0}: must be at least 1")]
    InvalidPageSize(usize),

    /// An id used for ARIA references is empty.
    #[error("Invalid value for '{field}': must not be empty")]
    EmptyId { field: &'static str },
}

impl ConfigError {
    /// Create an empty-id error.
    pub fn empty_id(field: &'static str) -> Self {
        Self::EmptyId { field }
    }
}
