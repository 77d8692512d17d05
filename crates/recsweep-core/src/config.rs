/// Sweep configuration, passed explicitly into [`run_sweep`](crate::run_sweep).
use crate::error::{Result, SweepError};
use crate::model::size::gb_to_bytes;
use std::fmt;
use std::path::PathBuf;

/// Default budget, in gigabytes.
pub const DEFAULT_BUDGET_GB: f64 = 90.0;

/// How companion files are matched to media files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingMode {
    /// Single pass over the tree. Within a directory media files are
    /// registered before companions, but a companion in a directory visited
    /// before its media file's directory is dropped. Directories without
    /// media are skipped.
    PerDirectory,
    /// Two passes: every media file in the tree first, then companions from
    /// any directory. Independent of listing order.
    #[default]
    WholeTree,
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerDirectory => f.write_str("per-directory"),
            Self::WholeTree => f.write_str("whole-tree"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub root: PathBuf,
    /// Budget in gigabytes (1 GB = 1024³ bytes).
    pub budget_gb: f64,
    /// When set, decisions are reported but nothing is deleted.
    pub dry_run: bool,
    pub grouping: GroupingMode,
}

impl SweepConfig {
    /// A dry-run configuration with the default budget and grouping.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            budget_gb: DEFAULT_BUDGET_GB,
            dry_run: true,
            grouping: GroupingMode::default(),
        }
    }

    pub fn with_budget_gb(mut self, budget_gb: f64) -> Self {
        self.budget_gb = budget_gb;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_grouping(mut self, grouping: GroupingMode) -> Self {
        self.grouping = grouping;
        self
    }

    /// The budget in bytes. Rejects negative, NaN and infinite budgets.
    pub fn budget_bytes(&self) -> Result<u64> {
        if !self.budget_gb.is_finite() || self.budget_gb < 0.0 {
            return Err(SweepError::InvalidBudget(self.budget_gb));
        }
        Ok(gb_to_bytes(self.budget_gb))
    }
}
