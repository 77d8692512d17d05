/// Scanner module — discovers recording clusters under a root directory.
///
/// One synchronous pass (two in whole-tree mode) over the directory tree:
/// - [`classify`] sorts files into media, companion, or unrelated by extension.
/// - [`walk`] lists directories through the filesystem boundary and groups
///   files by stem into a [`ScanResult`].
/// - [`progress`] carries warnings and summaries to the reporting sink.
///
/// Per-file stat failures are reported and skipped; only a missing or
/// non-directory root fails the scan.
pub mod classify;
pub mod progress;
mod walk;

use crate::config::GroupingMode;
use crate::error::{Result, SweepError};
use crate::model::ScanResult;
use crate::platform::{FileSystem, LocalFileSystem};
use progress::{EventSink, LogSink, SweepEvent};
use std::path::Path;
use tracing::info;
use walk::Walker;

/// Scan `root` on the local filesystem with the default grouping mode,
/// logging warnings and the summary.
pub fn scan(root: &Path) -> Result<ScanResult> {
    scan_with(&LocalFileSystem, root, GroupingMode::default(), &mut LogSink)
}

/// Scan `root` through `fs`, reporting to `sink`.
///
/// Fails with [`SweepError::RootNotFound`] or [`SweepError::RootNotADirectory`]
/// before any traversal; otherwise always returns a result.
pub fn scan_with(
    fs: &dyn FileSystem,
    root: &Path,
    mode: GroupingMode,
    sink: &mut dyn EventSink,
) -> Result<ScanResult> {
    check_root(fs, root)?;

    info!("Scanning {} ({mode})", root.display());
    let result = Walker::new(fs, sink).run(root, mode);

    sink.emit(SweepEvent::ScanComplete {
        stats: result.stats.clone(),
        clusters: result.len(),
        total_bytes: result.total_bytes,
    });
    Ok(result)
}

fn check_root(fs: &dyn FileSystem, root: &Path) -> Result<()> {
    match fs.stat(root) {
        Ok(stat) if stat.is_dir => Ok(()),
        Ok(_) => Err(SweepError::RootNotADirectory(root.to_path_buf())),
        Err(_) => Err(SweepError::RootNotFound(root.to_path_buf())),
    }
}
