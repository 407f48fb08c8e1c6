use crate::error::StatsError;
use crate::stats::{Contributor, StatsReport};
use chrono::{DateTime, Datelike, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const RULE_WIDTH: usize = 60;
const CONSOLE_CONTRIBUTORS: usize = 5;
const CONSOLE_PRS: usize = 5;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Text summary of a report. Output depends only on `report`.
pub fn render_console(report: &StatsReport) -> String {
    let year = report.generated_at.year();
    let mut out = String::from("\n");

    out.push_str(&format!("{}\n", rule()));
    out.push_str(&format!("🎃 Hacktoberfest {year} Statistics\n"));
    out.push_str(&format!("Repository: {}\n", report.repository));
    out.push_str(&format!(
        "Generated: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("{}\n", rule()));
    out.push_str(&format!("📊 Total Pull Requests: {}\n", report.total_prs));
    out.push_str(&format!("✅ Merged Pull Requests: {}\n", report.merged_prs));
    out.push_str(&format!("🔄 Open Pull Requests: {}\n", report.open_prs));
    out.push_str(&format!(
        "🍂 Opened in October {year}: {}\n",
        report.october_prs
    ));
    out.push_str(&format!(
        "👥 Total Contributors: {}\n",
        report.contributors.len()
    ));
    out.push_str(&format!("{}\n", rule()));

    if !report.contributors.is_empty() {
        out.push_str("🏆 Top Contributors:\n");
        for (i, c) in report
            .contributors
            .iter()
            .take(CONSOLE_CONTRIBUTORS)
            .enumerate()
        {
            out.push_str(&format!(
                "  {}. {} ({} contributions)\n",
                i + 1,
                c.login,
                c.contributions
            ));
        }
    }

    if !report.recent_prs.is_empty() {
        out.push_str("\n🔄 Recent Pull Requests:\n");
        for pr in report.recent_prs.iter().take(CONSOLE_PRS) {
            out.push_str(&format!("  #{}: {} ({})\n", pr.number, pr.title, pr.state));
        }
    }

    out.push_str(&format!("\n🎉 Happy Hacktoberfest {year}! 🚀\n"));
    out
}

/// `hacktoberfest_stats_<YYYYMMDD_HHMMSS>.json`
pub fn report_filename(generated_at: &DateTime<Local>) -> String {
    format!(
        "hacktoberfest_stats_{}.json",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// `contributors_<YYYYMMDD_HHMMSS>.csv`
pub fn contributors_filename(generated_at: &DateTime<Local>) -> String {
    format!("contributors_{}.csv", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Write the report as 2-space indented JSON. Not crash-safe: a failure
/// midway can leave a partial file behind.
pub fn persist(report: &StatsReport, path: &Path) -> Result<(), StatsError> {
    let write_err = |source: std::io::Error| StatsError::Write {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(report).map_err(|e| write_err(e.into()))?;
    fs::write(path, json).map_err(write_err)?;
    Ok(())
}

/// Persist into `dir` under a timestamp-derived filename and return the path.
pub fn save(report: &StatsReport, dir: &Path) -> Result<PathBuf, StatsError> {
    let path = dir.join(report_filename(&report.generated_at));
    persist(report, &path)?;
    info!("Report written to {}", path.display());
    Ok(path)
}

#[derive(Serialize)]
struct ContributorRow<'a> {
    login: &'a str,
    contributions: u64,
    html_url: &'a str,
    avatar_url: &'a str,
}

/// Write contributors as CSV (login, contributions, html_url, avatar_url)
/// into `dir`. Returns `None` without creating a file when there is
/// nothing to export.
pub fn export_contributors_csv(
    contributors: &[Contributor],
    dir: &Path,
    generated_at: &DateTime<Local>,
) -> Result<Option<PathBuf>, StatsError> {
    if contributors.is_empty() {
        info!("No contributors to export");
        return Ok(None);
    }

    let path = dir.join(contributors_filename(generated_at));
    let write_err = |source: std::io::Error| StatsError::Write {
        path: path.clone(),
        source,
    };

    let mut writer = csv::Writer::from_path(&path).map_err(|e| write_err(e.into()))?;
    for c in contributors {
        writer
            .serialize(ContributorRow {
                login: &c.login,
                contributions: c.contributions,
                html_url: &c.html_url,
                avatar_url: &c.avatar_url,
            })
            .map_err(|e| write_err(e.into()))?;
    }
    writer.flush().map_err(write_err)?;

    info!("Contributors written to {}", path.display());
    Ok(Some(path))
}
