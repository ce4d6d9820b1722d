//! The fetch loop: one mesa at a time, every failure contained to its item.
//!
//! There are no retries. A failed mesa keeps no file, so the next run picks
//! it up again through the output scan.

mod summary;

pub use summary::RunSummary;

use std::path::{Path, PathBuf};

use crate::api::{decode_image, extract_payload, SheetSource};
use crate::error::FetchError;
use crate::pacing::Pacer;
use crate::roster::MesaId;
use crate::storage;

/// A tally sheet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Per-item progress hooks (console output lives in the CLI).
pub trait Reporter {
    /// `index` is 1-based.
    fn item_started(&mut self, _index: usize, _total: usize, _id: MesaId) {}
    fn item_finished(&mut self, _id: MesaId, _outcome: &Result<SavedImage, FetchError>) {}
}

impl Reporter for () {}

/// Fetch, decode and save one mesa.
pub fn fetch_one<S: SheetSource + ?Sized>(
    source: &mut S,
    id: MesaId,
    out_dir: &Path,
) -> Result<SavedImage, FetchError> {
    let body = source.fetch(id)?;
    let payload = extract_payload(&body)?;
    let bytes = decode_image(&payload)?;
    let path = storage::write_image(out_dir, id, &bytes).map_err(FetchError::Io)?;
    Ok(SavedImage {
        path,
        bytes: bytes.len(),
    })
}

/// Process `pending` in order, pausing between requests. Never aborts early.
pub fn run_batch<S, R>(
    pending: &[MesaId],
    source: &mut S,
    out_dir: &Path,
    pacer: &mut Pacer,
    reporter: &mut R,
) -> RunSummary
where
    S: SheetSource + ?Sized,
    R: Reporter + ?Sized,
{
    let total = pending.len();
    let mut summary = RunSummary::default();

    for (i, &id) in pending.iter().enumerate() {
        pacer.wait_turn();
        reporter.item_started(i + 1, total, id);

        let outcome = fetch_one(source, id, out_dir);
        match &outcome {
            Ok(saved) => {
                tracing::info!(mesa = id, bytes = saved.bytes, path = %saved.path.display(), "tally sheet saved");
                summary.record_saved();
            }
            Err(e) => {
                log_failure(id, e);
                summary.record_failure(id, e.kind());
            }
        }
        reporter.item_finished(id, &outcome);
    }

    tracing::info!(
        attempted = summary.attempted,
        saved = summary.saved,
        failed = summary.failed_count(),
        "fetch loop finished"
    );
    summary
}

fn log_failure(id: MesaId, e: &FetchError) {
    let kind = e.kind();
    match e {
        FetchError::MissingPayload => {
            tracing::warn!(mesa = id, %kind, "no image data in response, skipping")
        }
        FetchError::Http(status) => {
            tracing::warn!(mesa = id, %kind, status, "request failed")
        }
        FetchError::Io(_) | FetchError::Unclassified(_) => {
            tracing::error!(mesa = id, %kind, error = %e, "mesa failed")
        }
        _ => tracing::warn!(mesa = id, %kind, error = %e, "mesa failed"),
    }
}
