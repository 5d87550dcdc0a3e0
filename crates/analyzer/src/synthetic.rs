//! Synthetic activity series
//!
//! Real commit history needs a heavier API than the two profile calls we
//! make, so the chart and heatmap are driven by random placeholders. The
//! generators take the RNG as an argument; the aggregation and layout code
//! never draw random numbers themselves.

use chrono::Month;
use rand::Rng;
use serde::Serialize;

pub const MONTHS_PER_YEAR: usize = 12;

/// Cells per heatmap row and column
pub const HEATMAP_SIDE: usize = 7;
pub const HEATMAP_CELLS: usize = HEATMAP_SIDE * HEATMAP_SIDE;

const MIN_MONTHLY_COMMITS: u32 = 10;
const MAX_MONTHLY_COMMITS: u32 = 39;

/// One (month, commit count) point of the activity chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySample {
    pub month: Month,
    pub commits: u32,
}

impl MonthlySample {
    pub fn new(month: Month, commits: u32) -> Self {
        Self { month, commits }
    }

    /// Three-letter month label ("Jan" .. "Dec")
    pub fn label(&self) -> &'static str {
        &self.month.name()[..3]
    }
}

/// Twelve samples in calendar order, January first
pub fn synthetic_monthly_series<R: Rng + ?Sized>(rng: &mut R) -> Vec<MonthlySample> {
    calendar_months()
        .map(|month| {
            MonthlySample::new(
                month,
                rng.gen_range(MIN_MONTHLY_COMMITS..=MAX_MONTHLY_COMMITS),
            )
        })
        .collect()
}

/// Per-cell heatmap intensities in `[0, 1)`, row-major
pub fn synthetic_heatmap<R: Rng + ?Sized>(rng: &mut R) -> Vec<f64> {
    (0..HEATMAP_CELLS).map(|_| rng.gen::<f64>()).collect()
}

fn calendar_months() -> impl Iterator<Item = Month> {
    std::iter::successors(Some(Month::January), |m| match m {
        Month::December => None,
        _ => Some(m.succ()),
    })
}
