/// Evictor — drains the oldest clusters until usage fits the budget.
///
/// The decision sequence comes from [`plan::plan_eviction`] and is identical
/// for dry runs and real runs; only the filesystem calls differ. Deletion
/// failures are reported per file and do not stop the drain: the cluster
/// still counts as removed and its full recorded size is credited.
pub mod plan;

use crate::model::{EvictionOutcome, FailedDelete, ScanResult};
use crate::platform::{FileSystem, LocalFileSystem};
use crate::scanner::progress::{EventSink, LogSink, SweepEvent};
use plan::plan_eviction;
use tracing::debug;

/// Evict on the local filesystem, logging each decision.
pub fn evict(scan: &ScanResult, budget: u64, dry_run: bool) -> EvictionOutcome {
    evict_with(&LocalFileSystem, scan, budget, dry_run, &mut LogSink)
}

/// Evict through `fs`, reporting to `sink`.
///
/// Returns an empty outcome when the scan is already within budget. When
/// every cluster is drained and usage is still above budget, the outcome's
/// `final_total` stays above `budget`; that is a warning, not an error.
pub fn evict_with(
    fs: &dyn FileSystem,
    scan: &ScanResult,
    budget: u64,
    dry_run: bool,
    sink: &mut dyn EventSink,
) -> EvictionOutcome {
    if scan.total_bytes <= budget {
        sink.emit(SweepEvent::WithinBudget {
            total_bytes: scan.total_bytes,
            budget,
        });
        return EvictionOutcome::unchanged(scan.total_bytes, budget, dry_run);
    }

    sink.emit(SweepEvent::OverBudget {
        total_bytes: scan.total_bytes,
        budget,
    });

    let plan = plan_eviction(scan, budget);
    let mut outcome = EvictionOutcome {
        removed: Vec::with_capacity(plan.selected.len()),
        bytes_freed: plan.bytes_freed,
        final_total: plan.final_total,
        budget,
        dry_run,
        failed_deletes: Vec::new(),
    };

    for &idx in &plan.selected {
        let cluster = scan.cluster(idx);
        sink.emit(SweepEvent::ClusterEvicted {
            key: cluster.key.to_string(),
            modified: cluster.modified,
            paths: cluster.members().map(|m| m.path.clone()).collect(),
            size: cluster.size,
            dry_run,
        });

        if !dry_run {
            for member in cluster.members() {
                match fs.remove_file(&member.path) {
                    Ok(()) => debug!("Deleted {}", member.path.display()),
                    Err(err) => {
                        sink.emit(SweepEvent::DeleteFailed {
                            path: member.path.clone(),
                            message: err.to_string(),
                        });
                        outcome.failed_deletes.push(FailedDelete {
                            path: member.path.clone(),
                            size: member.size,
                            message: err.to_string(),
                        });
                    }
                }
            }
        }

        outcome.removed.push(cluster.clone());
    }

    sink.emit(SweepEvent::Finished {
        removed: outcome.removed.len(),
        bytes_freed: outcome.bytes_freed,
        final_total: outcome.final_total,
        budget,
        dry_run,
    });
    outcome
}
