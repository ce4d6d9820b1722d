//! Roster loading: mesa codes from a CSV export.
//!
//! Rows whose code is empty or not a non-negative integer are dropped without
//! being reported. Duplicates keep their first position.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::RosterError;

/// Polling-station ("mesa") code.
pub type MesaId = u64;

/// Ordered, duplicate-free list of mesa codes for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    ids: Vec<MesaId>,
}

impl Roster {
    /// Build from codes in roster order; later duplicates are dropped.
    pub fn from_ids<I: IntoIterator<Item = MesaId>>(ids: I) -> Self {
        let mut seen = HashSet::new();
        let ids = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[MesaId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Parse one roster cell. Integral decimals (`"123.0"`) are accepted since
/// spreadsheet exports render integer columns with blanks that way.
pub fn parse_mesa_id(cell: &str) -> Option<MesaId> {
    let cell = cell.trim();
    let digits = match cell.split_once('.') {
        Some((int, frac)) if frac.bytes().all(|b| b == b'0') => int,
        Some(_) => return None,
        None => cell,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<MesaId>().ok()
}

/// Load the roster at `path`, reading codes from the column named `column`.
pub fn load_roster(path: &Path, column: &str, delimiter: u8) -> Result<Roster, RosterError> {
    let file = File::open(path).map_err(|source| RosterError::MissingFile {
        path: path.to_path_buf(),
        source,
    })?;
    let roster = read_roster(file, path, column, delimiter)?;
    tracing::debug!(
        path = %path.display(),
        column,
        mesas = roster.len(),
        "roster loaded"
    );
    Ok(roster)
}

/// Read a roster from any reader. `path` is only used in error messages.
pub fn read_roster<R: Read>(
    reader: R,
    path: &Path,
    column: &str,
    delimiter: u8,
) -> Result<Roster, RosterError> {
    let malformed = |source| RosterError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    // Byte records: a stray non-UTF-8 cell elsewhere in a row must not sink the whole roster.
    let headers = rdr.byte_headers().map_err(malformed)?.clone();
    let wanted = column.trim();
    let idx = headers
        .iter()
        .position(|h| header_name(h) == Some(wanted))
        .ok_or_else(|| RosterError::Schema {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

    let mut ids = Vec::new();
    for record in rdr.byte_records() {
        let record = record.map_err(malformed)?;
        let id = record
            .get(idx)
            .and_then(|cell| std::str::from_utf8(cell).ok())
            .and_then(parse_mesa_id);
        if let Some(id) = id {
            ids.push(id);
        }
    }
    Ok(Roster::from_ids(ids))
}

fn header_name(raw: &[u8]) -> Option<&str> {
    let s = std::str::from_utf8(raw).ok()?;
    Some(s.trim_start_matches('\u{feff}').trim())
}
