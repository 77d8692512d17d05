/// Data model for recsweep.
///
/// Re-exports the cluster arena, scan result, and eviction outcome types.
pub mod cluster;
pub mod outcome;
pub mod scan_result;
pub mod size;

pub use cluster::{Cluster, ClusterIndex, ClusterKey, Companion, FileRef};
pub use outcome::{EvictionOutcome, FailedDelete};
pub use scan_result::{ScanResult, ScanStats};
