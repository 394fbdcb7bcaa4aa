//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a matrix
//! file without writing a manifest.
//!
//! ## Functionality
//!
//! - **Matrix Validation**: parses the file, rejecting malformed fields,
//!   reserved fields, duplicate options and unknown disabled options.
//! - **Axis Summary**: reports every axis with its enabled and disabled
//!   options.
//! - **Expansion Check**: runs the generator to catch kind mismatches between
//!   merged fields and configuration name collisions, and confirms the
//!   configuration count.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use config_matrix::axis::AxisOption;
use config_matrix::config;
use config_matrix::defaults::DEFAULT_MATRIX_FILENAME;
use config_matrix::output::{OutputConfig, Status};

/// Validate a matrix file without generating output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the matrix file to validate.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_MATRIX_FILENAME,
        env = "CONFIG_MATRIX_FILE"
    )]
    pub matrix: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{} Validating matrix: {}",
        out.marker(Status::Info),
        args.matrix.display()
    );

    let matrix = match config::from_file(&args.matrix) {
        Ok(matrix) => {
            println!("{} Matrix file parsed successfully", out.marker(Status::Ok));
            matrix
        }
        Err(e) => {
            println!("{} Matrix parsing failed: {}", out.marker(Status::Err), e);
            return Err(anyhow::anyhow!("Matrix parsing failed: {}", e));
        }
    };

    let mut has_warnings = false;

    println!("\n{} Matrix Summary:", out.marker(Status::Info));
    println!("   Manifest fields: {}", matrix.manifest.len());
    println!("   Axes: {}", matrix.axes.len());
    for (idx, axis) in matrix.axes.iter().enumerate() {
        let disabled: Vec<&str> = axis
            .options()
            .iter()
            .filter(|option| !option.is_enabled())
            .map(AxisOption::name)
            .collect();
        println!(
            "   - {}: {} enabled, {} disabled",
            axis.name(),
            axis.enabled_len(),
            disabled.len()
        );
        if !disabled.is_empty() {
            println!("       disabled: {}", disabled.join(", "));
        }
        // An empty trailing axis only ends the expansion early
        if axis.enabled_len() == 0 && idx + 1 < matrix.axes.len() {
            println!(
                "{} Axis '{}' has no enabled options; expansion stops before it",
                out.marker(Status::Warn),
                axis.name()
            );
            has_warnings = true;
        }
    }

    if matrix.axes.is_empty() {
        println!("{} Matrix defines no axes", out.marker(Status::Warn));
        has_warnings = true;
    }

    let expected = matrix.expected_count();
    match matrix.generate() {
        Ok(configurations) if configurations.len() == expected => {
            println!(
                "{} Expansion produces {} configurations",
                out.marker(Status::Ok),
                configurations.len()
            );
        }
        Ok(configurations) => {
            println!(
                "{} Expansion produced {} configurations, expected {}",
                out.marker(Status::Err),
                configurations.len(),
                expected
            );
            return Err(anyhow::anyhow!("Matrix validation failed"));
        }
        Err(e) => {
            println!("{} Expansion failed: {}", out.marker(Status::Err), e);
            return Err(anyhow::anyhow!("Matrix validation failed: {}", e));
        }
    }

    if has_warnings && args.strict {
        println!(
            "{} Matrix has warnings (strict mode enabled)",
            out.marker(Status::Err)
        );
        return Err(anyhow::anyhow!("Matrix validation failed in strict mode"));
    }

    if has_warnings {
        println!("{} Matrix is valid but has warnings", out.marker(Status::Warn));
    } else {
        println!("{} Matrix is valid", out.marker(Status::Ok));
    }

    Ok(())
}
