//! `actas status` – roster coverage from the output directory alone.

use actas_core::config::Config;
use actas_core::scanner;
use anyhow::Result;
use std::path::Path;

use super::prepare_or_report;

pub fn run_status(cfg: &Config, cfg_path: &Path, list_pending: bool) -> Result<()> {
    let Some(plan) = prepare_or_report(cfg, cfg_path)? else {
        return Ok(());
    };

    println!("{:<12} {}", "ROSTER", cfg.roster_path.display());
    println!("{:<12} {}", "OUTPUT", cfg.output_dir.display());
    println!("{:<12} {}", "TOTAL", plan.total);
    println!("{:<12} {}", "DOWNLOADED", plan.skipped);
    println!("{:<12} {}", "PENDING", plan.pending.len());

    // Empty files still count as downloaded; only surface them.
    let empty = scanner::empty_images(&cfg.output_dir, &plan.existing);
    if !empty.is_empty() {
        println!();
        println!("{} saved image(s) are empty and will not be re-fetched:", empty.len());
        for id in &empty {
            println!("  {}", scanner::image_filename(*id));
        }
    }

    if list_pending && !plan.pending.is_empty() {
        println!();
        for id in &plan.pending {
            println!("{}", id);
        }
    }
    Ok(())
}
