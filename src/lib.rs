//! Hacktoberfest repository statistics.
//!
//! Fetches a repository's contributors and pull requests from the GitHub
//! REST API, folds them into a [`StatsReport`], and renders or persists it.
//!
//! - [`config`]: run configuration (token, repository, API host)
//! - [`github`]: REST client
//! - [`stats`]: data model and aggregation
//! - [`report`]: console rendering, JSON persistence and CSV export

pub mod config;
pub mod error;
pub mod github;
pub mod report;
pub mod stats;

pub use config::Config;
pub use error::StatsError;
pub use github::GithubClient;
pub use stats::{Contributor, PrCounts, PrState, PullRequest, PullRequestAuthor, StatsReport};

use anyhow::{Context, Result};
use chrono::Local;
use std::io::Write;
use tracing::error;

/// Fetch contributors, then pull requests, and build the report.
///
/// The two calls run one after the other; the first failure aborts and no
/// partial report is produced.
pub async fn collect_stats(
    client: &GithubClient,
    config: &Config,
) -> Result<StatsReport, StatsError> {
    let contributors = client
        .fetch_contributors(&config.owner, &config.repo)
        .await?;
    let prs = client
        .fetch_pull_requests(&config.owner, &config.repo)
        .await?;

    Ok(StatsReport::new(
        config.repository(),
        contributors,
        &prs,
        Local::now(),
    ))
}

/// One full run: advisory, fetch, summary, then the JSON report and the
/// contributors CSV.
///
/// Only fetch failures and failures writing to `out` are returned. The
/// summary is written before anything touches the filesystem, so a failed
/// save is logged and the run still succeeds.
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    writeln!(out, "🎃 Hacktoberfest Statistics Generator")?;
    writeln!(out, "{}", "=".repeat(50))?;

    let client = GithubClient::new(config);
    if !client.has_token() {
        writeln!(
            out,
            "💡 Tip: Set GITHUB_TOKEN environment variable for higher API rate limits"
        )?;
    }

    let stats = collect_stats(&client, config)
        .await
        .context("Error generating stats")?;

    write!(out, "{}", report::render_console(&stats))?;

    match report::save(&stats, &config.output_dir) {
        Ok(path) => writeln!(out, "📊 Stats saved to: {}", path.display())?,
        Err(e) => error!("Error saving stats: {e}"),
    }

    match report::export_contributors_csv(
        &stats.contributors,
        &config.output_dir,
        &stats.generated_at,
    ) {
        Ok(Some(path)) => writeln!(out, "📋 Contributors exported to: {}", path.display())?,
        Ok(None) => {}
        Err(e) => error!("Error exporting contributors: {e}"),
    }

    Ok(())
}
