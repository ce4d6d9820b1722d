//! SHA-256 of saved tally sheets, computed on demand (never during a run).

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::roster::MesaId;
use crate::scanner::image_path;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of a file and return the digest as lowercase hex.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Digest of the saved image for `id` in `dir`.
pub fn image_digest(dir: &Path, id: MesaId) -> Result<String> {
    let path = image_path(dir, id);
    if !path.is_file() {
        anyhow::bail!("no saved tally sheet for mesa {} in {}", id, dir.display());
    }
    sha256_path(&path)
}
