/// Machine-readable exports of an [`EvictionOutcome`].
///
/// - [`write_json`] writes the whole outcome as one JSON document.
/// - [`write_csv`] writes one row per member file of every removed cluster,
///   in eviction order.
use crate::error::Result;
use crate::model::{Cluster, EvictionOutcome, FailedDelete, FileRef};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct OutcomeReport<'a> {
    dry_run: bool,
    budget_bytes: u64,
    bytes_freed: u64,
    final_total_bytes: u64,
    within_budget: bool,
    overshoot_bytes: u64,
    unreclaimed_bytes: u64,
    removed: Vec<ClusterReport<'a>>,
    failed_deletes: Vec<FailedRow<'a>>,
}

#[derive(Debug, Serialize)]
struct ClusterReport<'a> {
    key: &'a str,
    modified: Option<DateTime<Local>>,
    size: u64,
    members: Vec<MemberRow>,
}

#[derive(Debug, Serialize)]
struct MemberRow {
    role: &'static str,
    path: String,
    size: u64,
}

#[derive(Debug, Serialize)]
struct FailedRow<'a> {
    path: String,
    size: u64,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    order: usize,
    key: &'a str,
    modified: String,
    role: &'static str,
    path: String,
    size: u64,
}

/// Paths are exported as lossy UTF-8 so one odd file name cannot fail
/// the whole report.
fn lossy(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Members of `cluster` labelled with their role, in deletion order.
fn labelled_members(cluster: &Cluster) -> Vec<(&'static str, &FileRef)> {
    let mut members = Vec::with_capacity(3 + cluster.displaced.len());
    if let Some(f) = &cluster.media {
        members.push(("media", f));
    }
    if let Some(f) = &cluster.image {
        members.push(("image", f));
    }
    if let Some(f) = &cluster.caption {
        members.push(("caption", f));
    }
    members.extend(cluster.displaced.iter().map(|f| ("displaced", f)));
    members
}

/// Write `outcome` as pretty-printed JSON.
pub fn write_json<W: Write>(outcome: &EvictionOutcome, mut writer: W) -> Result<()> {
    let report = OutcomeReport {
        dry_run: outcome.dry_run,
        budget_bytes: outcome.budget,
        bytes_freed: outcome.bytes_freed,
        final_total_bytes: outcome.final_total,
        within_budget: outcome.is_within_budget(),
        overshoot_bytes: outcome.overshoot(),
        unreclaimed_bytes: outcome.unreclaimed_bytes(),
        removed: outcome
            .removed
            .iter()
            .map(|c| ClusterReport {
                key: c.key.as_str(),
                modified: c.modified.map(DateTime::<Local>::from),
                size: c.size,
                members: labelled_members(c)
                    .into_iter()
                    .map(|(role, f)| MemberRow {
                        role,
                        path: lossy(&f.path),
                        size: f.size,
                    })
                    .collect(),
            })
            .collect(),
        failed_deletes: outcome
            .failed_deletes
            .iter()
            .map(|f: &FailedDelete| FailedRow {
                path: lossy(&f.path),
                size: f.size,
                message: &f.message,
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writer.flush()?;
    Ok(())
}

/// Write the removal list as CSV with a header row.
pub fn write_csv<W: Write>(outcome: &EvictionOutcome, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (i, cluster) in outcome.removed.iter().enumerate() {
        let modified = cluster
            .modified
            .map(|t| DateTime::<Local>::from(t).to_rfc3339())
            .unwrap_or_default();
        for (role, file) in labelled_members(cluster) {
            wtr.serialize(CsvRow {
                order: i + 1,
                key: cluster.key.as_str(),
                modified: modified.clone(),
                role,
                path: lossy(&file.path),
                size: file.size,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
