//! Centralized path definitions for authgate
//!
//! This module provides a single source of truth for all filesystem paths used by authgate.
//!
//! ## Storage Layout
//!
//! ### Per-Project (working directory)
//!
//! ```text
//! ./
//! ├── .authgate.toml              # Project configuration (optional)
//! └── .authgate/                  # Local state
//!     └── ledger.json             # Verification ledger snapshot
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! <config_dir>/authgate/
//! └── config.toml                 # Fallback configuration
//! ```

use std::path::PathBuf;

// =============================================================================
// Project-level paths
// =============================================================================

/// Directory name for local authgate state
pub const AUTHGATE_DIR: &str = ".authgate";

/// Project configuration filename
pub const AUTHGATE_TOML: &str = ".authgate.toml";

/// Ledger snapshot filename
const LEDGER_FILE: &str = "ledger.json";

/// Get path to the project `.authgate.toml` config file.
#[must_use]
pub fn project_config() -> PathBuf {
    PathBuf::from(AUTHGATE_TOML)
}

/// Get path to the `.authgate/` state directory.
#[must_use]
pub fn authgate_dir() -> PathBuf {
    PathBuf::from(AUTHGATE_DIR)
}

/// Get the default ledger snapshot path, `.authgate/ledger.json`.
#[must_use]
pub fn default_ledger() -> PathBuf {
    authgate_dir().join(LEDGER_FILE)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = "authgate";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global authgate directory.
///
/// Returns `<config_dir>/authgate/` (e.g. `~/.config/authgate/` on Linux).
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
