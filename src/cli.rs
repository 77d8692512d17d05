use clap::{Parser, ValueEnum};
use recsweep_core::config::DEFAULT_BUDGET_GB;
use recsweep_core::{GroupingMode, SweepConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "recsweep", version)]
#[command(
    about = "Keep a recordings folder under a size budget by deleting the oldest sessions",
    long_about = "Scans ROOT for recorded sessions (a media file plus its cover image and \
                  caption track, matched by file stem) and, when the total exceeds the \
                  budget, removes whole sessions oldest first until it fits. \
                  Nothing is deleted unless --execute is given."
)]
pub struct Cli {
    /// Root directory holding the recordings
    pub root: PathBuf,

    /// Maximum total size in GB (1 GB = 1024^3 bytes)
    #[arg(short = 'm', long, value_name = "GB", default_value_t = DEFAULT_BUDGET_GB)]
    pub max_size_gb: f64,

    /// Actually delete files. Without this flag the run is a dry run
    #[arg(long)]
    pub execute: bool,

    /// How companion files are matched to media files
    #[arg(long, value_enum, default_value_t = Grouping::WholeTree)]
    pub grouping: Grouping,

    /// Write the outcome as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Write the removal list as CSV to this file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Log debug detail (every deleted file, ignored companions)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Grouping {
    /// Match companions only against media seen so far (legacy behaviour)
    PerDirectory,
    /// Match companions against every media file in the tree
    WholeTree,
}

impl From<Grouping> for GroupingMode {
    fn from(g: Grouping) -> Self {
        match g {
            Grouping::PerDirectory => GroupingMode::PerDirectory,
            Grouping::WholeTree => GroupingMode::WholeTree,
        }
    }
}

impl Cli {
    pub fn to_config(&self) -> SweepConfig {
        SweepConfig::new(&self.root)
            .with_budget_gb(self.max_size_gb)
            .with_dry_run(!self.execute)
            .with_grouping(self.grouping.into())
    }
}
