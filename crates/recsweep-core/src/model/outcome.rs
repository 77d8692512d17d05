/// Result of the eviction phase.
use super::cluster::Cluster;
use std::path::PathBuf;

/// A member file whose removal failed in a real run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDelete {
    pub path: PathBuf,
    pub size: u64,
    pub message: String,
}

/// What the evictor removed (or would remove, in a dry run).
#[derive(Debug, Clone, Default)]
pub struct EvictionOutcome {
    /// Removed clusters, oldest first.
    pub removed: Vec<Cluster>,
    /// Sum of the recorded sizes of `removed`.
    pub bytes_freed: u64,
    /// Grand total minus `bytes_freed`.
    pub final_total: u64,
    pub budget: u64,
    pub dry_run: bool,
    /// Member files that could not be deleted. Always empty in dry runs.
    pub failed_deletes: Vec<FailedDelete>,
}

impl EvictionOutcome {
    /// Outcome for a scan that is already within budget.
    pub fn unchanged(total: u64, budget: u64, dry_run: bool) -> Self {
        Self {
            final_total: total,
            budget,
            dry_run,
            ..Default::default()
        }
    }

    pub fn is_within_budget(&self) -> bool {
        self.final_total <= self.budget
    }

    /// Bytes still above budget after draining; zero when within budget.
    pub fn overshoot(&self) -> u64 {
        self.final_total.saturating_sub(self.budget)
    }

    /// Bytes credited to `bytes_freed` whose files are still on disk
    /// because their deletion failed.
    pub fn unreclaimed_bytes(&self) -> u64 {
        self.failed_deletes.iter().map(|f| f.size).sum()
    }
}
