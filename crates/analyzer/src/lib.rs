//! ghcard Statistics Analyzer
//!
//! Derives aggregate statistics from raw GitHub payloads and produces the
//! synthetic series that stand in for real commit history.

mod stats;
mod synthetic;

pub use stats::{aggregate, UserStats, COMMITS_PER_REPO, RECENT_REPO_LIMIT};
pub use synthetic::{
    synthetic_heatmap, synthetic_monthly_series, MonthlySample, HEATMAP_CELLS, HEATMAP_SIDE,
    MONTHS_PER_YEAR,
};

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
