//! CLI for actas, the tally-sheet batch fetcher.

mod commands;

use actas_core::config::{self, Config};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_completions, run_fetch, run_show_config, run_status};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "actas")]
#[command(about = "actas: fetch scanned tally sheets for every mesa in a roster", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/actas/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every roster mesa that has no saved tally sheet yet.
    Run,

    /// Show roster coverage without contacting the API.
    Status {
        /// Also print each pending mesa code, one per line.
        #[arg(long)]
        list_pending: bool,
    },

    /// Print SHA-256 of saved tally sheets.
    Checksum {
        /// Mesa codes.
        #[arg(required = true, value_name = "MESA")]
        ids: Vec<u64>,
    },

    /// Show the config file path and effective configuration.
    Config,

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let config_arg = cli.config.as_deref();

        match cli.command {
            CliCommand::Run => {
                let (cfg, cfg_path) = load_config(config_arg)?;
                run_fetch(&cfg, &cfg_path)?;
            }
            CliCommand::Status { list_pending } => {
                let (cfg, cfg_path) = load_config(config_arg)?;
                run_status(&cfg, &cfg_path, list_pending)?;
            }
            CliCommand::Checksum { ids } => {
                let (cfg, _) = load_config(config_arg)?;
                run_checksum(&cfg, &ids)?;
            }
            CliCommand::Config => {
                let (cfg, cfg_path) = load_config(config_arg)?;
                run_show_config(&cfg, &cfg_path)?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
        }

        Ok(())
    }
}

/// `--config` if given, else the XDG default (created on first use).
fn load_config(explicit: Option<&Path>) -> Result<(Config, PathBuf)> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    let cfg = config::load_or_init_at(&path)?;
    tracing::debug!("loaded config from {}: {:?}", path.display(), cfg);
    Ok((cfg, path))
}

#[cfg(test)]
mod tests;
