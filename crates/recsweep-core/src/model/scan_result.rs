/// Result of one scan: the cluster arena, the stem index, and the grand total.
///
/// Built once per invocation by the scanner and consumed read-only by the
/// evictor. The only way to add bytes is through the `attach_*` methods, so
/// `total_bytes` always equals the sum of every cluster's `size`.
use super::cluster::{Cluster, ClusterIndex, ClusterKey, Companion, FileRef};
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// Counters collected while walking, used by the scan summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Directories listed, the root included.
    pub dirs_visited: u64,
    /// Files whose extension was media, image, or caption.
    pub files_classified: u64,
    /// Companion files with no media file of the same stem.
    pub orphan_companions: u64,
    /// Files that vanished or could not be stat'ed.
    pub stat_failures: u64,
    /// Directories that could not be listed.
    pub list_failures: u64,
    /// Slot collisions (same stem, same role seen twice).
    pub collisions: u64,
    pub duration: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Arena: clusters in discovery order.
    pub clusters: Vec<Cluster>,
    index: HashMap<ClusterKey, ClusterIndex>,
    /// Sum of all attributed bytes across all clusters.
    pub total_bytes: u64,
    pub stats: ScanStats,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    #[inline]
    pub fn cluster(&self, idx: ClusterIndex) -> &Cluster {
        &self.clusters[idx.idx()]
    }

    pub fn get(&self, key: &str) -> Option<&Cluster> {
        self.index.get(key).map(|&idx| self.cluster(idx))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate clusters with their indices, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (ClusterIndex, &Cluster)> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(i, c)| (ClusterIndex::new(i), c))
    }

    /// Record a media file, creating its cluster on first sighting.
    ///
    /// Returns the media file displaced by a stem collision, if any.
    pub fn attach_media(
        &mut self,
        key: &str,
        file: FileRef,
        modified: Option<SystemTime>,
    ) -> Option<FileRef> {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = ClusterIndex::new(self.clusters.len());
                self.clusters.push(Cluster::new(ClusterKey::new(key)));
                self.index.insert(ClusterKey::new(key), idx);
                idx
            }
        };
        self.total_bytes += file.size;
        self.clusters[idx.idx()].attach_media(file, modified)
    }

    /// Record a companion file against an existing cluster.
    ///
    /// Returns `Err(file)` without touching any total when no cluster exists
    /// for `key`; companions never create clusters.
    pub fn attach_companion(
        &mut self,
        key: &str,
        kind: Companion,
        file: FileRef,
    ) -> Result<Option<FileRef>, FileRef> {
        let Some(&idx) = self.index.get(key) else {
            return Err(file);
        };
        self.total_bytes += file.size;
        Ok(self.clusters[idx.idx()].attach_companion(kind, file))
    }
}
