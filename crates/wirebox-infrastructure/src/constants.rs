//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wirebox.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wirebox";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "WIREBOX";

/// Separator for nested keys in environment variables (e.g. `WIREBOX_LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "WIREBOX_LOG";

/// File stem used for rotated log files
pub const LOG_FILE_STEM: &str = "wirebox";
