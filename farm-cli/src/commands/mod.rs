//! Commands module
//!
//! `commands` and `describe` browse the command table; any other subcommand
//! is taken as a farm API command and run through the pipeline.

mod catalog;
mod invoke;

use anyhow::{Context, Result};
use clap::Subcommand;
use farm_command::CommandRegistry;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the available API commands
    Commands {
        /// Only commands acting on this noun (e.g. Fleet, StorageProfile)
        noun: Option<String>,
    },
    /// Show the parameters and output of an API command
    Describe {
        /// Command name, e.g. CreateFleet
        command: String,
    },
    /// Run an API command: farm <Command> [--Param value]... [--select SEL] [--stdin]
    #[command(external_subcommand)]
    Invoke(Vec<String>),
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let registry = CommandRegistry::builtin().context("Command table is invalid")?;

    match command {
        Commands::Commands { noun } => catalog::list_commands(&registry, noun.as_deref()),
        Commands::Describe { command } => catalog::describe_command(&registry, &command),
        Commands::Invoke(args) => invoke::handle_invoke(args, config, registry).await,
    }
}
