//! Aggregation of profile and repository data

use crate::{AnalyzerError, Result};
use ghcard_collector::{RawRepo, RawUser};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Estimated commits per public repository. A placeholder heuristic, not a
/// measured value.
pub const COMMITS_PER_REPO: u64 = 15;

/// Number of repositories kept in [`UserStats::recent_repos`]
pub const RECENT_REPO_LIMIT: usize = 5;

/// Summary of a user's public GitHub activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub username: String,
    pub display_name: String,
    pub followers: u64,
    pub following: u64,
    pub public_repo_count: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub language_histogram: BTreeMap<String, u64>,
    pub recent_repos: Vec<RawRepo>,
    pub estimated_total_commits: u64,
    pub estimated_avg_commits_per_month: u64,
    pub estimated_peak_month_commits: u64,
}

impl UserStats {
    /// Languages ordered by repository count (descending), ties by name
    pub fn top_languages(&self, n: usize) -> Vec<(&str, u64)> {
        let mut langs: Vec<(&str, u64)> = self
            .language_histogram
            .iter()
            .map(|(lang, count)| (lang.as_str(), *count))
            .collect();
        langs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        langs.truncate(n);
        langs
    }
}

/// Build [`UserStats`] from a profile and the repository list in the order
/// the data source returned it.
pub fn aggregate(user: &RawUser, repos: &[RawRepo]) -> Result<UserStats> {
    if user.login.trim().is_empty() {
        return Err(AnalyzerError::InvalidInput("user has no login".to_string()));
    }

    let total_stars = saturating_sum(repos.iter().map(|r| r.stargazers_count));
    let total_forks = saturating_sum(repos.iter().map(|r| r.forks_count));

    let mut language_histogram = BTreeMap::new();
    for lang in repos.iter().filter_map(|r| r.language.as_deref()) {
        *language_histogram.entry(lang.to_string()).or_insert(0) += 1;
    }

    // Counts are unbounded, so the estimates clamp at u64::MAX.
    let estimated_total_commits = user.public_repos.saturating_mul(COMMITS_PER_REPO);
    let estimated_avg_commits_per_month = div_round(estimated_total_commits, 12);
    // round(avg * 2.5)
    let estimated_peak_month_commits =
        div_round(estimated_avg_commits_per_month.saturating_mul(5), 2);

    debug!(
        login = %user.login,
        repos = repos.len(),
        total_stars = total_stars,
        languages = language_histogram.len(),
        "Aggregated user stats"
    );

    Ok(UserStats {
        username: user.login.clone(),
        display_name: user
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&user.login)
            .to_string(),
        followers: user.followers,
        following: user.following,
        public_repo_count: user.public_repos,
        total_stars,
        total_forks,
        language_histogram,
        recent_repos: repos.iter().take(RECENT_REPO_LIMIT).cloned().collect(),
        estimated_total_commits,
        estimated_avg_commits_per_month,
        estimated_peak_month_commits,
    })
}

/// Integer division rounding half up
fn div_round(n: u64, d: u64) -> u64 {
    n / d + u64::from(n % d * 2 >= d)
}

fn saturating_sum(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}
