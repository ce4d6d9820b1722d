//! `actas config` – where the config lives and what it resolves to.

use actas_core::config::Config;
use anyhow::Result;
use std::path::Path;

pub fn run_show_config(cfg: &Config, cfg_path: &Path) -> Result<()> {
    println!("# {}", cfg_path.display());
    print!("{}", cfg.to_toml()?);
    Ok(())
}
