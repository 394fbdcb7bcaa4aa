//! # Output Configuration
//!
//! Controls how the human-facing commands (`validate`, `ls`) decorate their
//! status lines. Generated manifests never go through this module: they are
//! written verbatim.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

/// Output configuration for controlling colors and status markers.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colored markers should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `always` forces color on (overriding `NO_COLOR`), `never` forces it
    /// off, anything else detects support from the environment and the
    /// terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// The marker to prefix a status line with.
    pub fn marker(&self, status: Status) -> String {
        let plain = status.plain();
        if !self.use_color {
            return plain.to_string();
        }
        let styled = style(plain).force_styling(true);
        match status {
            Status::Ok => styled.green().to_string(),
            Status::Warn => styled.yellow().to_string(),
            Status::Err => styled.red().bold().to_string(),
            Status::Info => styled.cyan().to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Err,
    Info,
}

impl Status {
    fn plain(self) -> &'static str {
        match self {
            Status::Ok => "[OK]",
            Status::Warn => "[WARN]",
            Status::Err => "[ERR]",
            Status::Info => "[INFO]",
        }
    }
}
