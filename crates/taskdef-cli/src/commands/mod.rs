//! CLI command definitions and dispatch.

pub mod get;
pub mod update;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use taskdef_common::constants::ENV_TASK_DEFINITION;
use taskdef_common::error::TaskDefError;

/// taskdef — Update container definitions of a task definition.
#[derive(Parser, Debug)]
#[command(name = "taskdef", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Format of diagnostic logs written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply update directives and print the resulting container definitions.
    Update(update::UpdateArgs),
    /// Print a single task definition field.
    Get(get::GetArgs),
}

/// Where the task definition document comes from.
///
/// Falls back to standard input when neither option is given.
#[derive(Args, Debug)]
pub struct DescriptorArgs {
    /// Task definition JSON, as printed by `describe-task-definition`.
    #[arg(long, env = ENV_TASK_DEFINITION, conflicts_with = "task_definition_file")]
    pub task_definition: Option<String>,

    /// Path to a file holding the task definition JSON.
    #[arg(long)]
    pub task_definition_file: Option<PathBuf>,
}

impl DescriptorArgs {
    /// Reads the task definition document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or standard input cannot be read.
    pub fn read(&self) -> anyhow::Result<String> {
        if let Some(ref document) = self.task_definition {
            return Ok(document.clone());
        }
        if let Some(ref path) = self.task_definition_file {
            tracing::info!(path = %path.display(), "reading task definition file");
            let document =
                std::fs::read_to_string(path).map_err(|source| TaskDefError::Io {
                    path: path.clone(),
                    source,
                })?;
            return Ok(document);
        }
        tracing::info!("reading task definition from stdin");
        let mut document = String::new();
        let _ = std::io::stdin()
            .read_to_string(&mut document)
            .context("failed to read task definition from stdin")?;
        Ok(document)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Update(args) => update::execute(&args),
        Command::Get(args) => get::execute(&args),
    }
}
