//! Logging facilities for Horizon Combobox.
//!
//! Horizon Combobox uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_combobox=debug")
//!     .init();
//! ```

/// Span names used throughout Horizon Combobox for tracing.
pub mod span_names {
    /// Key event handling span.
    pub const KEY_EVENT: &str = "horizon_combobox::key_event";
    /// Timer processing span.
    pub const TIMER: &str = "horizon_combobox::timer";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Timer system target.
    pub const TIMER: &str = "horizon_combobox_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_combobox_core::signal";
    /// Combobox controller target.
    pub const CONTROLLER: &str = "horizon_combobox::controller";
    /// Type-ahead search target.
    pub const TYPE_AHEAD: &str = "horizon_combobox::type_ahead";
    /// Scroll visibility target.
    pub const SCROLL: &str = "horizon_combobox::scroll";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_combobox::config";
}
