use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// How many pull requests the report keeps.
pub const RECENT_PR_LIMIT: usize = 10;

pub const HACKTOBERFEST_MONTH: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub contributions: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrState::Open => write!(f, "open"),
            PrState::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestAuthor {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: PrState,
    pub created_at: String,
    /// Empty when the PR was never merged.
    #[serde(default, deserialize_with = "null_as_default")]
    pub merged_at: String,
    /// Empty login when the account behind the PR was deleted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: PullRequestAuthor,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        !self.merged_at.is_empty()
    }
}

// The API sends `null` for an unmerged PR's `merged_at` and a ghost author's `user`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PrCounts {
    pub total: usize,
    pub merged: usize,
    pub open: usize,
}

/// Fold pull requests into merged/open counts.
///
/// Open PRs count as open regardless of `merged_at`; closed PRs count as
/// merged only when they carry a merge timestamp. Closed-without-merge PRs
/// land in neither bucket, so `merged + open <= total` always holds.
pub fn summarize(prs: &[PullRequest]) -> PrCounts {
    prs.iter().fold(
        PrCounts {
            total: prs.len(),
            ..PrCounts::default()
        },
        |mut counts, pr| {
            if pr.state == PrState::Open {
                counts.open += 1;
            } else if pr.is_merged() {
                counts.merged += 1;
            }
            counts
        },
    )
}

/// PRs whose `created_at` falls in `month` of `year`. Timestamps that do not
/// parse as RFC 3339 are not counted.
pub fn count_created_in(prs: &[PullRequest], year: i32, month: u32) -> usize {
    prs.iter()
        .filter_map(|pr| DateTime::parse_from_rfc3339(&pr.created_at).ok())
        .filter(|created| created.year() == year && created.month() == month)
        .count()
}

/// First `n` items in the order the API returned them. No re-sorting.
pub fn take_recent<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    items.iter().take(n).cloned().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub repository: String,
    pub total_prs: usize,
    pub merged_prs: usize,
    pub open_prs: usize,
    pub contributors: Vec<Contributor>,
    pub recent_prs: Vec<PullRequest>,
    pub generated_at: DateTime<Local>,
    /// PRs opened in October of the generation year. Console only, never persisted.
    #[serde(skip)]
    pub october_prs: usize,
}

impl StatsReport {
    pub fn new(
        repository: impl Into<String>,
        contributors: Vec<Contributor>,
        prs: &[PullRequest],
        generated_at: DateTime<Local>,
    ) -> Self {
        let counts = summarize(prs);
        Self {
            repository: repository.into(),
            total_prs: counts.total,
            merged_prs: counts.merged,
            open_prs: counts.open,
            contributors,
            recent_prs: take_recent(prs, RECENT_PR_LIMIT),
            october_prs: count_created_in(prs, generated_at.year(), HACKTOBERFEST_MONTH),
            generated_at,
        }
    }
}
