/// recsweep Core — scanning, eviction, and data model.
///
/// This crate contains all business logic with zero CLI dependencies.
/// A sweep is two sequential phases with no feedback between them: the
/// scanner builds a [`model::ScanResult`], the evictor drains it oldest
/// first until usage fits the budget.
///
/// # Modules
///
/// - [`model`] — Clusters, scan results, outcomes, and size formatting.
/// - [`scanner`] — Directory traversal, classification, and progress events.
/// - [`evictor`] — Age-ordered eviction planning and execution.
/// - [`platform`] — The filesystem boundary (`list_dir`, `stat`, `remove_file`).
/// - [`report`] — JSON and CSV exports of an eviction outcome.
pub mod config;
pub mod error;
pub mod evictor;
pub mod model;
pub mod platform;
pub mod report;
pub mod scanner;

pub use config::{GroupingMode, SweepConfig};
pub use error::{Result, SweepError};
pub use evictor::{evict, evict_with};
pub use model::{Cluster, EvictionOutcome, ScanResult};
pub use scanner::{scan, scan_with};

use platform::FileSystem;
use scanner::progress::{EventSink, SweepEvent};
use tracing::debug;

/// Run one full sweep: banner, scan, evict, summary.
///
/// The budget is validated before anything is listed. The only errors are
/// an invalid budget and a missing or non-directory root.
pub fn run_sweep(
    config: &SweepConfig,
    fs: &dyn FileSystem,
    sink: &mut dyn EventSink,
) -> Result<EvictionOutcome> {
    let budget = config.budget_bytes()?;

    sink.emit(SweepEvent::Started {
        root: config.root.clone(),
        budget_gb: config.budget_gb,
        dry_run: config.dry_run,
        grouping: config.grouping,
        at: chrono::Local::now(),
    });

    let scan = scan_with(fs, &config.root, config.grouping, sink)?;
    let outcome = evict_with(fs, &scan, budget, config.dry_run, sink);

    debug!(
        "Sweep of {} finished: {} clusters removed, {} bytes freed",
        config.root.display(),
        outcome.removed.len(),
        outcome.bytes_freed
    );
    Ok(outcome)
}
