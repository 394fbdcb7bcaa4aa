//! # Generate Command Implementation
//!
//! This module implements the `generate` subcommand: load a matrix file,
//! expand its axes and write the resulting manifest.
//!
//! The whole document is rendered in memory first. If loading, expansion or
//! rendering fails, nothing is written to stdout or to the output file.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use config_matrix::config;
use config_matrix::defaults::DEFAULT_MATRIX_FILENAME;
use config_matrix::emit::{self, EmitOptions, Manifest, OutputFormat};

/// Generate the manifest with every configuration
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the matrix file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_MATRIX_FILENAME,
        env = "CONFIG_MATRIX_FILE"
    )]
    pub matrix: PathBuf,

    /// Write the manifest to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    pub format: FormatArg,

    /// Skip the single-line collapsing and section separators in JSON output.
    #[arg(long)]
    pub raw: bool,
}

/// Output format as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Tab-indented JSON
    Json,
    /// YAML
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Execute the `generate` command.
pub fn execute(args: GenerateArgs) -> Result<()> {
    let matrix = config::from_file(&args.matrix)
        .with_context(|| format!("Failed to load matrix {}", args.matrix.display()))?;

    let configurations = matrix
        .generate()
        .context("Failed to generate configurations")?;
    info!(
        "Generated {} configurations from {} axes",
        configurations.len(),
        matrix.axes.len()
    );

    let options = EmitOptions {
        format: args.format.into(),
        cosmetic: !args.raw,
        sections: matrix.sections.clone(),
    };
    let text = emit::render(&Manifest::new(&matrix.manifest, &configurations), &options)
        .context("Failed to render manifest")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
