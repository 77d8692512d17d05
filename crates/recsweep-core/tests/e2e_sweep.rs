/// End-to-end sweep tests against real temporary directory trees.
///
/// These exercise the real `LocalFileSystem` (jwalk listings, metadata,
/// `remove_file`) through `scan_with`, `evict_with` and `run_sweep`.
/// Modification times are set explicitly so age ordering is deterministic.
use recsweep_core::platform::{DirEntryInfo, FileStat, FileSystem, LocalFileSystem};
use recsweep_core::scanner::progress::{SilentSink, SweepEvent};
use recsweep_core::{
    evict_with, run_sweep, scan_with, GroupingMode, SweepConfig, SweepError,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, n: usize, age_days: u64) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
    let mtime = SystemTime::now() - Duration::from_secs(age_days * 24 * 3600);
    f.set_modified(mtime).unwrap();
}

/// ```text
/// root/
///   2024/
///     A.flv        (2 000 bytes, 30 days old)
///   2025/
///     B.mp4        (1 000 bytes, 10 days old)
///     B.jpg        (  100 bytes)
///   notes.txt      (5 000 bytes, unrelated)
///   lonely.xml     (  500 bytes, orphan caption)
/// ```
///
/// Classified total: 3 100 bytes. A is the oldest cluster.
fn build_tree(root: &Path) {
    let y24 = root.join("2024");
    let y25 = root.join("2025");
    fs::create_dir_all(&y24).unwrap();
    fs::create_dir_all(&y25).unwrap();

    write_file(&y24.join("A.flv"), 2_000, 30);
    write_file(&y25.join("B.mp4"), 1_000, 10);
    write_file(&y25.join("B.jpg"), 100, 10);
    write_file(&root.join("notes.txt"), 5_000, 90);
    write_file(&root.join("lonely.xml"), 500, 90);
}

/// Local filesystem whose `remove_file` fails for the listed paths.
struct DenyingFs {
    deny: Vec<PathBuf>,
}

impl FileSystem for DenyingFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        LocalFileSystem.list_dir(dir)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        LocalFileSystem.stat(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.deny.iter().any(|d| d == path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated permission error",
            ));
        }
        LocalFileSystem.remove_file(path)
    }
}

fn scan_tree(root: &Path) -> recsweep_core::ScanResult {
    scan_with(&LocalFileSystem, root, GroupingMode::WholeTree, &mut SilentSink).unwrap()
}

fn keys(outcome: &recsweep_core::EvictionOutcome) -> Vec<String> {
    outcome.removed.iter().map(|c| c.key.to_string()).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn scan_builds_clusters_and_ignores_orphans() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_tree(tmp.path());

    let scan = scan_tree(tmp.path());
    assert_eq!(scan.len(), 2);
    assert_eq!(scan.total_bytes, 3_100);
    assert_eq!(scan.get("B").unwrap().size, 1_100);
    assert!(scan.get("lonely").is_none());
    assert_eq!(scan.stats.orphan_companions, 1);
    assert_eq!(scan.stats.dirs_visited, 3);
}

#[test]
fn budget_between_removes_oldest_only() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());
    let scan = scan_tree(tmp.path());

    let outcome = evict_with(&LocalFileSystem, &scan, 2_500, false, &mut SilentSink);

    assert_eq!(keys(&outcome), vec!["A"]);
    assert_eq!(outcome.bytes_freed, 2_000);
    assert_eq!(outcome.final_total, 1_100);
    assert!(!tmp.path().join("2024/A.flv").exists());
    assert!(tmp.path().join("2025/B.mp4").exists());
    assert!(tmp.path().join("notes.txt").exists(), "unrelated files are never touched");
}

#[test]
fn generous_budget_removes_nothing() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());
    let scan = scan_tree(tmp.path());

    let outcome = evict_with(&LocalFileSystem, &scan, 5_000, false, &mut SilentSink);
    assert!(outcome.removed.is_empty());
    assert_eq!(outcome.final_total, 3_100);
    assert!(tmp.path().join("2024/A.flv").exists());
}

#[test]
fn small_budget_removes_every_cluster_in_age_order() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());
    let scan = scan_tree(tmp.path());

    let outcome = evict_with(&LocalFileSystem, &scan, 500, false, &mut SilentSink);
    assert_eq!(keys(&outcome), vec!["A", "B"]);
    assert_eq!(outcome.final_total, 0);
    assert!(!tmp.path().join("2025/B.jpg").exists(), "companions go with the cluster");
    assert!(tmp.path().join("lonely.xml").exists(), "orphans are never deleted");
}

/// A dry run must pick exactly the clusters a real run picks, and leave
/// every file in place.
#[test]
fn dry_run_previews_real_run() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());

    let dry = evict_with(
        &LocalFileSystem,
        &scan_tree(tmp.path()),
        500,
        true,
        &mut SilentSink,
    );
    assert!(tmp.path().join("2024/A.flv").exists());
    assert!(tmp.path().join("2025/B.mp4").exists());

    let real = evict_with(
        &LocalFileSystem,
        &scan_tree(tmp.path()),
        500,
        false,
        &mut SilentSink,
    );
    assert_eq!(keys(&dry), keys(&real));
    assert_eq!(dry.bytes_freed, real.bytes_freed);
    assert_eq!(dry.final_total, real.final_total);
}

/// scan → evict → scan → evict with the second budget at or above the first
/// run's final total removes nothing more.
#[test]
fn second_sweep_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());

    let first = evict_with(
        &LocalFileSystem,
        &scan_tree(tmp.path()),
        2_500,
        false,
        &mut SilentSink,
    );
    let rescan = scan_tree(tmp.path());
    assert_eq!(rescan.total_bytes, first.final_total);

    let second = evict_with(
        &LocalFileSystem,
        &rescan,
        first.final_total,
        false,
        &mut SilentSink,
    );
    assert!(second.removed.is_empty());
}

/// A failed media delete is reported; the cluster is still listed as
/// removed with its full size credited.
#[test]
fn delete_failure_is_reported_and_overcounted() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());
    let a = tmp.path().join("2024").join("A.flv");
    let fs_impl = DenyingFs {
        deny: vec![a.clone()],
    };

    let scan = scan_with(&fs_impl, tmp.path(), GroupingMode::WholeTree, &mut SilentSink).unwrap();
    let mut events: Vec<SweepEvent> = Vec::new();
    let outcome = evict_with(&fs_impl, &scan, 2_500, false, &mut events);

    assert_eq!(keys(&outcome), vec!["A"]);
    assert_eq!(outcome.bytes_freed, 2_000);
    assert_eq!(outcome.unreclaimed_bytes(), 2_000);
    assert!(a.exists(), "the denied file is still on disk");
    assert!(events.iter().any(|e| matches!(
        e,
        SweepEvent::DeleteFailed { path, message } if *path == a && message.contains("simulated")
    )));
}

#[test]
fn run_sweep_end_to_end() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());

    let config = SweepConfig::new(tmp.path())
        .with_budget_gb(0.0)
        .with_dry_run(false);
    let mut events: Vec<SweepEvent> = Vec::new();
    let outcome = run_sweep(&config, &LocalFileSystem, &mut events).unwrap();

    assert_eq!(keys(&outcome), vec!["A", "B"]);
    assert!(outcome.is_within_budget());
    assert!(matches!(events.first(), Some(SweepEvent::Started { dry_run: false, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, SweepEvent::ScanComplete { clusters: 2, .. })));
    assert!(matches!(events.last(), Some(SweepEvent::Finished { removed: 2, .. })));
}

#[test]
fn run_sweep_rejects_missing_root() {
    let tmp = TempDir::new().unwrap();
    let config = SweepConfig::new(tmp.path().join("does-not-exist"));
    let err = run_sweep(&config, &LocalFileSystem, &mut SilentSink).unwrap_err();
    assert!(matches!(err, SweepError::RootNotFound(_)));
}

#[test]
fn run_sweep_rejects_file_root() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("A.flv");
    write_file(&file, 10, 1);
    let err = run_sweep(&SweepConfig::new(&file), &LocalFileSystem, &mut SilentSink).unwrap_err();
    assert!(matches!(err, SweepError::RootNotADirectory(_)));
}

#[test]
fn run_sweep_rejects_negative_budget_before_scanning() {
    let tmp = TempDir::new().unwrap();
    let config = SweepConfig::new(tmp.path()).with_budget_gb(-1.0);
    let mut events: Vec<SweepEvent> = Vec::new();
    let err = run_sweep(&config, &LocalFileSystem, &mut events).unwrap_err();
    assert!(matches!(err, SweepError::InvalidBudget(_)));
    assert!(events.is_empty());
}

#[test]
fn empty_root_is_within_any_budget() {
    let tmp = TempDir::new().unwrap();
    let config = SweepConfig::new(tmp.path()).with_budget_gb(0.0);
    let outcome = run_sweep(&config, &LocalFileSystem, &mut SilentSink).unwrap();
    assert!(outcome.removed.is_empty());
    assert_eq!(outcome.final_total, 0);
}

/// Two media files with the same stem in different directories form one
/// cluster; evicting it removes both files and credits both sizes.
#[test]
fn same_stem_collision_deletes_both_media_files() {
    let tmp = TempDir::new().unwrap();
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    write_file(&a.join("x.mp4"), 300, 5);
    write_file(&b.join("x.mp4"), 700, 2);

    let scan = scan_tree(tmp.path());
    assert_eq!(scan.len(), 1);
    assert_eq!(scan.get("x").unwrap().displaced.len(), 1);

    let outcome = evict_with(&LocalFileSystem, &scan, 0, false, &mut SilentSink);
    assert_eq!(keys(&outcome), vec!["x"]);
    assert_eq!(outcome.bytes_freed, 1_000);
    assert!(outcome.failed_deletes.is_empty());
    assert!(!a.join("x.mp4").exists());
    assert!(!b.join("x.mp4").exists());
}

/// A budget with a fractional byte must not round up: 2 bytes of usage
/// against a 1.5-byte budget is over budget.
#[test]
fn fractional_byte_budget_is_not_rounded_up() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("a.mp4"), 2, 1);

    let config = SweepConfig::new(tmp.path())
        .with_budget_gb(1.5 / (1024.0 * 1024.0 * 1024.0))
        .with_dry_run(true);
    assert_eq!(config.budget_bytes().unwrap(), 1);

    let outcome = run_sweep(&config, &LocalFileSystem, &mut SilentSink).unwrap();
    assert_eq!(outcome.removed.len(), 1);
    assert_eq!(outcome.final_total, 0);
}
