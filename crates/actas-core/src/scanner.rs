//! Output directory naming and the "already downloaded" scan.
//!
//! The directory listing is the only ledger: a mesa counts as downloaded when
//! `mesa_<id>.jpg` exists, whatever its content.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::roster::MesaId;

pub const FILE_PREFIX: &str = "mesa_";
pub const FILE_SUFFIX: &str = ".jpg";

/// Deterministic filename for a mesa's tally sheet (e.g. `mesa_123456.jpg`).
pub fn image_filename(id: MesaId) -> String {
    format!("{FILE_PREFIX}{id}{FILE_SUFFIX}")
}

pub fn image_path(dir: &Path, id: MesaId) -> PathBuf {
    dir.join(image_filename(id))
}

/// Inverse of `image_filename`. Only the canonical decimal form is accepted,
/// so `mesa_0123.jpg` is not mesa 123.
pub fn parse_image_filename(name: &str) -> Option<MesaId> {
    let stem = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    let id: MesaId = stem.parse().ok()?;
    (id.to_string() == stem).then_some(id)
}

/// Create `dir` if missing; fail if the path exists and is not a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        bail!("output path exists but is not a directory: {}", dir.display());
    }
    fs::create_dir_all(dir).with_context(|| format!("create output dir: {}", dir.display()))?;
    Ok(())
}

/// Scan `dir` (creating it if absent) and return every mesa with a saved image.
pub fn scan_output_dir(dir: &Path) -> Result<HashSet<MesaId>> {
    ensure_output_dir(dir)?;
    let mut found = HashSet::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("list output dir: {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("list output dir: {}", dir.display()))?;
        let name = entry.file_name();
        let Some(id) = name.to_str().and_then(parse_image_filename) else {
            continue;
        };
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        found.insert(id);
    }
    tracing::debug!(dir = %dir.display(), existing = found.len(), "output dir scanned");
    Ok(found)
}

/// Saved images that are empty. Informational only; they still count as downloaded.
pub fn empty_images(dir: &Path, ids: &HashSet<MesaId>) -> Vec<MesaId> {
    let mut out: Vec<MesaId> = ids
        .iter()
        .copied()
        .filter(|id| {
            fs::metadata(image_path(dir, *id))
                .map(|m| m.len() == 0)
                .unwrap_or(false)
        })
        .collect();
    out.sort_unstable();
    out
}
