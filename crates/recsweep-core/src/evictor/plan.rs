/// Eviction planning — which clusters go, in which order.
///
/// Planning is pure: it reads the [`ScanResult`] and never touches the
/// filesystem. Dry runs and real runs execute the same plan, so a dry run
/// is an exact preview of the decisions a real run will make.
use crate::model::{ClusterIndex, ScanResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvictionPlan {
    /// Selected clusters, oldest first.
    pub selected: Vec<ClusterIndex>,
    /// Sum of the selected clusters' recorded sizes.
    pub bytes_freed: u64,
    /// Grand total minus `bytes_freed`.
    pub final_total: u64,
}

impl EvictionPlan {
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Every cluster ordered by representative timestamp, oldest first.
///
/// The sort is stable, so clusters with equal timestamps keep discovery
/// order. Clusters without a timestamp sort before all others.
pub fn age_order(scan: &ScanResult) -> Vec<ClusterIndex> {
    let mut order: Vec<ClusterIndex> = scan.iter().map(|(idx, _)| idx).collect();
    order.sort_by_key(|&idx| scan.cluster(idx).modified);
    order
}

/// Take clusters from the front of [`age_order`] until the running total
/// is within `budget` or no clusters remain.
pub fn plan_eviction(scan: &ScanResult, budget: u64) -> EvictionPlan {
    let mut plan = EvictionPlan {
        final_total: scan.total_bytes,
        ..Default::default()
    };
    if scan.total_bytes <= budget {
        return plan;
    }

    for idx in age_order(scan) {
        if plan.final_total <= budget {
            break;
        }
        let size = scan.cluster(idx).size;
        plan.selected.push(idx);
        plan.final_total = plan.final_total.saturating_sub(size);
        plan.bytes_freed += size;
    }
    plan
}
