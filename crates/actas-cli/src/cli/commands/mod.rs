//! CLI command handlers, one file per command.

mod checksum;
mod completions;
mod run;
mod show_config;
mod status;

pub use checksum::run_checksum;
pub use completions::run_completions;
pub use run::run_fetch;
pub use show_config::run_show_config;
pub use status::run_status;

use actas_core::config::Config;
use actas_core::error::RosterError;
use actas_core::pipeline;
use actas_core::plan::Plan;
use anyhow::Result;
use std::path::Path;

/// Build the plan, or print why the roster could not be used.
///
/// Roster problems end the command cleanly (`Ok(None)`); anything else is an error.
pub(crate) fn prepare_or_report(cfg: &Config, cfg_path: &Path) -> Result<Option<Plan>> {
    match pipeline::prepare(cfg) {
        Ok(plan) => Ok(Some(plan)),
        Err(err) => match err.downcast_ref::<RosterError>() {
            Some(roster_err) => {
                tracing::error!("roster unusable: {}", roster_err);
                eprintln!("Error: {}", roster_err);
                match roster_err {
                    RosterError::MissingFile { .. } => eprintln!(
                        "Set roster_path in {} or place the roster at that path.",
                        cfg_path.display()
                    ),
                    RosterError::Schema { .. } => eprintln!(
                        "Set id_column in {} to the header holding the mesa codes.",
                        cfg_path.display()
                    ),
                    RosterError::Malformed { .. } => {}
                }
                Ok(None)
            }
            None => Err(err),
        },
    }
}
