//! Roster minus existing output: what this run still has to fetch.

use std::collections::HashSet;

use crate::roster::{MesaId, Roster};

/// Work for one run, computed once before the fetch loop starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Mesas in the roster.
    pub total: usize,
    /// Roster mesas that already have an image on disk.
    pub skipped: usize,
    /// Mesas to fetch, in roster order.
    pub pending: Vec<MesaId>,
    /// Every mesa with an image in the output directory, in the roster or not.
    pub existing: HashSet<MesaId>,
}

impl Plan {
    pub fn build(roster: &Roster, existing: HashSet<MesaId>) -> Self {
        let pending: Vec<MesaId> = roster
            .ids()
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect();
        Self {
            total: roster.len(),
            skipped: roster.len() - pending.len(),
            pending,
            existing,
        }
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }
}
