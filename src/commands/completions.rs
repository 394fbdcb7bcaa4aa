//! # Completions Command Implementation
//!
//! Prints a shell completion script for `config-matrix` to stdout, generated
//! by `clap_complete` from the CLI definition.
//!
//! ```bash
//! config-matrix completions bash > ~/.local/share/bash-completion/completions/config-matrix
//! config-matrix completions zsh > ~/.zfunc/_config-matrix
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}
