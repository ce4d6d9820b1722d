//! Orchestration: roster → output scan → plan → fetch loop.

use anyhow::Result;

use crate::api::SheetSource;
use crate::batch::{self, Reporter, RunSummary};
use crate::config::Config;
use crate::pacing::Pacer;
use crate::plan::Plan;
use crate::roster;
use crate::scanner;

/// Load the roster and scan the output directory.
///
/// A roster failure comes back as a `RosterError` inside the `anyhow::Error`
/// so callers can tell "nothing to run" apart from setup failures.
pub fn prepare(cfg: &Config) -> Result<Plan> {
    let roster = roster::load_roster(&cfg.roster_path, &cfg.id_column, cfg.delimiter_byte())?;
    let existing = scanner::scan_output_dir(&cfg.output_dir)?;
    let plan = Plan::build(&roster, existing);
    tracing::info!(
        total = plan.total,
        skipped = plan.skipped,
        pending = plan.pending.len(),
        output_dir = %cfg.output_dir.display(),
        "plan ready"
    );
    Ok(plan)
}

/// Run the fetch loop for `plan` with the configured delay.
pub fn execute<S, R>(cfg: &Config, plan: &Plan, source: &mut S, reporter: &mut R) -> RunSummary
where
    S: SheetSource + ?Sized,
    R: Reporter + ?Sized,
{
    let mut pacer = Pacer::new(cfg.delay());
    batch::run_batch(&plan.pending, source, &cfg.output_dir, &mut pacer, reporter)
}
