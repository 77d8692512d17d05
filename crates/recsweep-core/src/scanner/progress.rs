/// Reporting boundary — events emitted by the scanner and the evictor.
///
/// The core never prints. It hands `SweepEvent`s to an [`EventSink`];
/// [`LogSink`] renders each one as a log line, tests collect them into a
/// `Vec<SweepEvent>`.
use crate::config::GroupingMode;
use crate::model::size::{format_count, format_gb, format_mb};
use crate::model::ScanStats;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SweepEvent {
    /// Invocation banner.
    Started {
        root: PathBuf,
        budget_gb: f64,
        dry_run: bool,
        grouping: GroupingMode,
        at: DateTime<Local>,
    },
    /// A file could not be stat'ed; it is excluded from every total.
    FileError { path: PathBuf, message: String },
    /// A directory could not be listed; its subtree is skipped.
    DirError { path: PathBuf, message: String },
    /// Two files with the same stem and role; `kept` took the slot.
    Collision {
        key: String,
        kept: PathBuf,
        displaced: PathBuf,
    },
    /// Traversal finished.
    ScanComplete {
        stats: ScanStats,
        clusters: usize,
        total_bytes: u64,
    },
    /// Nothing to do.
    WithinBudget { total_bytes: u64, budget: u64 },
    /// Draining will start.
    OverBudget { total_bytes: u64, budget: u64 },
    /// A cluster was selected for removal (and removed, unless `dry_run`).
    ClusterEvicted {
        key: String,
        modified: Option<SystemTime>,
        paths: Vec<PathBuf>,
        size: u64,
        dry_run: bool,
    },
    /// A member file of an evicted cluster could not be removed.
    DeleteFailed { path: PathBuf, message: String },
    /// Final summary.
    Finished {
        removed: usize,
        bytes_freed: u64,
        final_total: u64,
        budget: u64,
        dry_run: bool,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: SweepEvent);
}

impl EventSink for Vec<SweepEvent> {
    fn emit(&mut self, event: SweepEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl EventSink for SilentSink {
    fn emit(&mut self, _event: SweepEvent) {}
}

/// Renders events as `tracing` lines (INFO for progress, WARN for failures).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: SweepEvent) {
        match event {
            SweepEvent::Started {
                root,
                budget_gb,
                dry_run,
                grouping,
                at,
            } => {
                info!("{}", "=".repeat(50));
                info!("Recording cleanup");
                info!("Root: {}", root.display());
                info!("Budget: {budget_gb} GB");
                info!("Grouping: {grouping}");
                info!("Time: {}", at.format("%Y-%m-%d %H:%M:%S"));
                if dry_run {
                    info!("DRY RUN: deletions are simulated, nothing is removed");
                } else {
                    warn!("LIVE RUN: files will be permanently removed");
                }
                info!("{}", "=".repeat(50));
            }
            SweepEvent::FileError { path, message } => {
                warn!("Cannot access '{}': {message}", path.display());
            }
            SweepEvent::DirError { path, message } => {
                warn!("Cannot list directory '{}': {message}", path.display());
            }
            SweepEvent::Collision {
                key,
                kept,
                displaced,
            } => {
                warn!(
                    "Stem '{key}' seen twice: '{}' replaces '{}' (both stay in the cluster)",
                    kept.display(),
                    displaced.display()
                );
            }
            SweepEvent::ScanComplete {
                stats,
                clusters,
                total_bytes,
            } => {
                info!(
                    "Scan complete: {} directories, {} clusters, {} files classified",
                    format_count(stats.dirs_visited),
                    format_count(clusters as u64),
                    format_count(stats.files_classified),
                );
                info!("Total usage: {}", format_gb(total_bytes));
                info!("Scan time: {:.2}s", stats.duration.as_secs_f64());
                if stats.orphan_companions > 0 {
                    info!(
                        "{} companion files had no media file and were ignored",
                        stats.orphan_companions
                    );
                }
                if stats.stat_failures > 0 || stats.list_failures > 0 {
                    warn!(
                        "{} files and {} directories could not be read",
                        stats.stat_failures, stats.list_failures
                    );
                }
            }
            SweepEvent::WithinBudget {
                total_bytes,
                budget,
            } => {
                info!(
                    "Usage {} is within budget {}, no cleanup required",
                    format_gb(total_bytes),
                    format_gb(budget)
                );
            }
            SweepEvent::OverBudget {
                total_bytes,
                budget,
            } => {
                info!(
                    "Usage {} exceeds budget {}, removing oldest recordings",
                    format_gb(total_bytes),
                    format_gb(budget)
                );
            }
            SweepEvent::ClusterEvicted {
                key,
                modified,
                paths,
                size,
                dry_run,
            } => {
                info!("Removing '{key}' ({}):", format_timestamp(modified));
                for path in &paths {
                    info!("  - {}", path.display());
                }
                if dry_run {
                    info!("  (simulated) {}", format_mb(size));
                } else {
                    info!("  freed {}", format_mb(size));
                }
            }
            SweepEvent::DeleteFailed { path, message } => {
                warn!("Delete failed: '{}': {message}", path.display());
            }
            SweepEvent::Finished {
                removed,
                bytes_freed,
                final_total,
                budget,
                dry_run,
            } => {
                info!("{}", "=".repeat(50));
                let verb = if dry_run { "Would remove" } else { "Removed" };
                info!("{verb} {removed} clusters");
                info!("Freed: {}", format_gb(bytes_freed));
                info!("Remaining: {}", format_gb(final_total));
                if final_total > budget {
                    warn!(
                        "Still {} over budget after removing every recording; \
                         adjust the budget or clean up manually",
                        format_gb(final_total - budget)
                    );
                }
                info!("{}", "=".repeat(50));
            }
        }
    }
}

/// Render a representative timestamp in local time, `"-"` when unknown.
pub fn format_timestamp(modified: Option<SystemTime>) -> String {
    match modified {
        Some(t) => DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}
