//! Default values for config-matrix.
//!
//! This module provides centralized default values used across the library
//! and the commands, ensuring consistency and avoiding duplication.

/// Matrix file read when `--matrix` is not given.
///
/// This can be overridden by the `--matrix` CLI flag or the
/// `CONFIG_MATRIX_FILE` environment variable.
pub const DEFAULT_MATRIX_FILENAME: &str = "configs.yaml";

/// Joins option names into a configuration name.
pub const NAME_DELIMITER: &str = "-";

/// Field owned by the generator; fragments may not define it.
pub const RESERVED_NAME_FIELD: &str = "name";

/// Top-level field the configuration list is emitted under.
pub const CONFIGURATIONS_FIELD: &str = "configurations";

/// Top-level fields preceded by a separator line in JSON output.
pub const DEFAULT_SECTIONS: &[&str] = &["dependencies", "sourceFiles-posix", "configurations"];

/// Owned copy of [`DEFAULT_SECTIONS`], used as a serde default.
pub fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
}
