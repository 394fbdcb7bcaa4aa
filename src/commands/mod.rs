//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `config-matrix` command-line tool, one file per command.
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args`, calls into the
//!   `config_matrix` library and reports the result.

pub mod completions;
pub mod generate;
pub mod ls;
pub mod validate;
