/// Directory traversal and cluster reconstruction.
///
/// Directories are visited top-down, depth-first, each listed once through
/// the [`FileSystem`] boundary. Files are classified by extension and
/// grouped by stem into the [`ScanResult`] arena.
///
/// # Grouping modes
///
/// - [`GroupingMode::PerDirectory`] handles one directory at a time: its
///   media files are registered, then its companions are matched against
///   every stem known so far. A companion whose media lives in a directory
///   visited later is dropped. Directories without media are skipped.
/// - [`GroupingMode::WholeTree`] collects every classified file first,
///   registers all media, then matches all companions, so the result does
///   not depend on listing order.
use crate::config::GroupingMode;
use crate::model::{Companion, FileRef, ScanResult};
use crate::platform::FileSystem;
use crate::scanner::classify::{classify_path, stem_of, FileRole};
use crate::scanner::progress::{EventSink, SweepEvent};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Files of one directory, split by role.
#[derive(Default)]
struct DirFiles {
    media: Vec<PathBuf>,
    companions: Vec<(PathBuf, Companion)>,
}

pub(crate) struct Walker<'a> {
    fs: &'a dyn FileSystem,
    sink: &'a mut dyn EventSink,
    result: ScanResult,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(fs: &'a dyn FileSystem, sink: &'a mut dyn EventSink) -> Self {
        Self {
            fs,
            sink,
            result: ScanResult::new(),
        }
    }

    /// Walk `root` and return the finished scan. `root` must be a directory.
    pub(crate) fn run(mut self, root: &Path, mode: GroupingMode) -> ScanResult {
        let start = Instant::now();

        match mode {
            GroupingMode::PerDirectory => {
                self.walk(root, |walker, files| {
                    if files.media.is_empty() {
                        return;
                    }
                    for path in files.media {
                        walker.record_media(path);
                    }
                    for (path, kind) in files.companions {
                        walker.record_companion(path, kind);
                    }
                });
            }
            GroupingMode::WholeTree => {
                let mut all = DirFiles::default();
                self.walk(root, |_, files| {
                    all.media.extend(files.media);
                    all.companions.extend(files.companions);
                });
                for path in all.media {
                    self.record_media(path);
                }
                for (path, kind) in all.companions {
                    self.record_companion(path, kind);
                }
            }
        }

        self.result.stats.duration = start.elapsed();
        debug!(
            "Scan of {} complete: {} clusters, {} bytes in {:?}",
            root.display(),
            self.result.len(),
            self.result.total_bytes,
            self.result.stats.duration
        );
        self.result
    }

    /// Pre-order walk. `visit` receives each directory's classified files
    /// before any of its subdirectories are listed.
    fn walk<F>(&mut self, root: &Path, mut visit: F)
    where
        F: FnMut(&mut Self, DirFiles),
    {
        let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];

        while let Some(dir) = stack.pop() {
            let entries = match self.fs.list_dir(&dir) {
                Ok(entries) => entries,
                Err(err) => {
                    self.result.stats.list_failures += 1;
                    self.sink.emit(SweepEvent::DirError {
                        path: dir,
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            self.result.stats.dirs_visited += 1;

            let mut files = DirFiles::default();
            let mut subdirs = Vec::new();
            for entry in entries {
                if entry.is_dir {
                    subdirs.push(entry.path);
                    continue;
                }
                match classify_path(&entry.path) {
                    FileRole::Media => files.media.push(entry.path),
                    FileRole::Companion(kind) => files.companions.push((entry.path, kind)),
                    FileRole::Unrelated => {}
                }
            }

            visit(self, files);

            // Reverse so the first listed subdirectory is visited first.
            stack.extend(subdirs.into_iter().rev());
        }
    }

    fn record_media(&mut self, path: PathBuf) {
        self.result.stats.files_classified += 1;
        let Some(key) = stem_of(&path) else {
            return;
        };
        let stat = match self.fs.stat(&path) {
            Ok(stat) => stat,
            Err(err) => {
                self.stat_failed(path, err);
                return;
            }
        };

        let file = FileRef::new(path.clone(), stat.size);
        if let Some(displaced) = self.result.attach_media(&key, file, stat.modified) {
            self.collided(&key, path, displaced.path);
        }
    }

    fn record_companion(&mut self, path: PathBuf, kind: Companion) {
        self.result.stats.files_classified += 1;
        let Some(key) = stem_of(&path) else {
            return;
        };
        if !self.result.contains_key(&key) {
            self.result.stats.orphan_companions += 1;
            debug!("Ignoring {} {}: no media file", kind.label(), path.display());
            return;
        }
        let stat = match self.fs.stat(&path) {
            Ok(stat) => stat,
            Err(err) => {
                self.stat_failed(path, err);
                return;
            }
        };

        match self
            .result
            .attach_companion(&key, kind, FileRef::new(path.clone(), stat.size))
        {
            Ok(Some(displaced)) => self.collided(&key, path, displaced.path),
            Ok(None) => {}
            Err(_) => self.result.stats.orphan_companions += 1,
        }
    }

    fn stat_failed(&mut self, path: PathBuf, err: std::io::Error) {
        self.result.stats.stat_failures += 1;
        self.sink.emit(SweepEvent::FileError {
            path,
            message: err.to_string(),
        });
    }

    fn collided(&mut self, key: &str, kept: PathBuf, displaced: PathBuf) {
        self.result.stats.collisions += 1;
        self.sink.emit(SweepEvent::Collision {
            key: key.to_string(),
            kept,
            displaced,
        });
    }
}
