//! `actas run` – fetch every pending tally sheet.

use actas_core::api::ApiClient;
use actas_core::batch::{Reporter, RunSummary, SavedImage};
use actas_core::config::Config;
use actas_core::error::FetchError;
use actas_core::pipeline;
use actas_core::roster::MesaId;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

use super::prepare_or_report;

pub fn run_fetch(cfg: &Config, cfg_path: &Path) -> Result<()> {
    let Some(plan) = prepare_or_report(cfg, cfg_path)? else {
        return Ok(());
    };

    println!("Found {} total mesa codes in the roster.", plan.total);
    println!(
        "Skipping {} files that already exist in '{}'.",
        plan.skipped,
        cfg.output_dir.display()
    );
    println!("Starting download for {} missing files.", plan.pending.len());

    let summary = if plan.is_done() {
        println!("Nothing to fetch.");
        RunSummary::default()
    } else {
        let mut client = ApiClient::new(cfg)?;
        pipeline::execute(cfg, &plan, &mut client, &mut ConsoleReporter)
    };

    println!();
    print!("{}", summary_report(&summary));
    Ok(())
}

/// Per-mesa progress on stdout: `[i/n] Processing Mesa <id>... <outcome>`.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn item_started(&mut self, index: usize, total: usize, id: MesaId) {
        print!("[{}/{}] Processing Mesa {}... ", index, total, id);
        let _ = std::io::stdout().flush();
    }

    fn item_finished(&mut self, _id: MesaId, outcome: &Result<SavedImage, FetchError>) {
        println!("{}", outcome_line(outcome));
    }
}

/// End-of-run notice, printed whether or not anything was fetched.
fn summary_report(summary: &RunSummary) -> String {
    let mut out = String::from("Fetch run finished.\n");
    out.push_str(&format!(
        "Saved {} of {} attempted; {} failed.\n",
        summary.saved,
        summary.attempted,
        summary.failed_count()
    ));
    for (kind, n) in &summary.failures {
        out.push_str(&format!("  {:<16} {}\n", kind.to_string(), n));
    }
    out
}

fn outcome_line(outcome: &Result<SavedImage, FetchError>) -> String {
    match outcome {
        Ok(_) => "✅ Saved successfully.".to_string(),
        Err(FetchError::MissingPayload) => "⚠️ No Base64 image data found.".to_string(),
        Err(FetchError::Http(code)) => format!("❌ Request failed (HTTP Error {}).", code),
        Err(FetchError::Network(_)) => "❌ Request failed (Connection/Timeout Error).".to_string(),
        Err(FetchError::InvalidJson(_)) => "❌ Failed to decode JSON response.".to_string(),
        Err(e) => format!("❌ {}.", e),
    }
}
