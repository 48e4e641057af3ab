//! Centralized constants for the creator commission report
//!
//! Report layout (fields, categories, page size) is loaded from config.toml
//! or taken from the built-in preset in the `shared` crate.

// =============================================================================
// File Names
// =============================================================================

/// Default config file path
pub const CONFIG_FILE: &str = "config.toml";

/// Default reporting extract
pub const DEFAULT_INPUT: &str = "./data/commissions.csv";

/// Default CSV export filename
pub const EXPORT_FILENAME: &str = "creator_commissions.csv";

// =============================================================================
// Dates
// =============================================================================

/// Date format of reporting extracts
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Display
// =============================================================================

/// Shown instead of an empty creator name
pub const BLANK_KEY_LABEL: &str = "(blank)";

/// Log level when RUST_LOG is unset
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log level for --verbose
pub const VERBOSE_LOG_LEVEL: &str = "debug";
