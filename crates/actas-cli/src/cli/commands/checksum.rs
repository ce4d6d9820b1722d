//! Checksum command: SHA-256 of saved tally sheets.

use actas_core::checksum;
use actas_core::config::Config;
use actas_core::roster::MesaId;
use actas_core::scanner::image_path;
use anyhow::Result;

/// Print `sha256sum`-style lines for each mesa; fails if any image is missing.
pub fn run_checksum(cfg: &Config, ids: &[MesaId]) -> Result<()> {
    let mut missing = 0usize;
    for &id in ids {
        match checksum::image_digest(&cfg.output_dir, id) {
            Ok(digest) => println!("{}  {}", digest, image_path(&cfg.output_dir, id).display()),
            Err(err) => {
                eprintln!("{:#}", err);
                missing += 1;
            }
        }
    }
    if missing > 0 {
        anyhow::bail!("{} of {} mesa(s) have no saved tally sheet", missing, ids.len());
    }
    Ok(())
}
