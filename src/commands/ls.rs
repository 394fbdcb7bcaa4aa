//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the configuration
//! names a matrix expands to, one per line, in generation order.
//!
//! - **Pattern Filtering**: `--pattern` keeps names matching a glob
//!   (e.g. `static*-Vulkan`)
//! - **Depth Filtering**: `--depth` keeps names built from exactly N axes
//! - **Counting**: `--count` prints only the number of matching names
//!
//! This command is read-only.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use config_matrix::config;
use config_matrix::defaults::DEFAULT_MATRIX_FILENAME;
use config_matrix::generator::Configuration;

/// List the configuration names a matrix produces
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to the matrix file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_MATRIX_FILENAME,
        env = "CONFIG_MATRIX_FILE"
    )]
    pub matrix: PathBuf,

    /// Filter names by glob pattern (e.g., "static*", "*-Vulkan").
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Only list configurations built from exactly this many axes.
    #[arg(short, long, value_name = "N")]
    pub depth: Option<usize>,

    /// Show only the number of matching configurations.
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let matrix = config::from_file(&args.matrix)
        .with_context(|| format!("Failed to load matrix {}", args.matrix.display()))?;
    let configurations = matrix
        .generate()
        .context("Failed to generate configurations")?;

    let matched = match args.pattern.as_deref() {
        Some(pattern) => configurations
            .matching(pattern)
            .context("Invalid --pattern")?,
        None => configurations.iter().collect(),
    };

    let selected: Vec<&Configuration> = matched
        .into_iter()
        .filter(|c| args.depth.map_or(true, |depth| c.depth() == depth))
        .collect();

    if args.count {
        println!("{}", selected.len());
    } else {
        for configuration in selected {
            println!("{}", configuration.name());
        }
    }

    Ok(())
}
