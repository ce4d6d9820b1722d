//! Aggregate outcome of one fetch loop.

use std::collections::BTreeMap;

use crate::error::FailureKind;
use crate::roster::MesaId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Mesas a request was attempted for.
    pub attempted: usize,
    /// Mesas whose image was written.
    pub saved: usize,
    /// Failure count per kind.
    pub failures: BTreeMap<FailureKind, usize>,
    /// Failed mesas in processing order.
    pub failed: Vec<(MesaId, FailureKind)>,
}

impl RunSummary {
    pub(crate) fn record_saved(&mut self) {
        self.attempted += 1;
        self.saved += 1;
    }

    pub(crate) fn record_failure(&mut self, id: MesaId, kind: FailureKind) {
        self.attempted += 1;
        *self.failures.entry(kind).or_insert(0) += 1;
        self.failed.push((id, kind));
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn count(&self, kind: FailureKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }
}
