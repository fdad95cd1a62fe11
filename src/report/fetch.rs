use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::Cache;
use crate::error::{MetricsError, Result};
use crate::github::types::ContributionsCollection;
use crate::github::GithubClient;
use crate::model::{CategoryTotals, DailyActivity, RepositoryCommitTally, YearData};

/// Fetch one year of contribution data, reading completed years from the
/// cache when possible and storing them after a fetch.
pub fn fetch_year(
    client: &GithubClient,
    mut cache: Option<&mut Cache>,
    username: &str,
    year: i32,
    show_progress: bool,
) -> Result<YearData> {
    let completed = year < Utc::now().year();

    if completed {
        if let Some(cache) = cache.as_deref_mut() {
            match cache.get_year(username, year) {
                Ok(Some(data)) => return Ok(data),
                Ok(None) => {}
                Err(e) => eprintln!("warning: cache read failed: {e}"),
            }
        }
    }

    let pb = show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        pb.set_message(format!("Fetching contributions for @{username} ({year})..."));
        pb
    });

    let result = client.contributions(username, year);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let data = translate(year, result?)?;

    if completed {
        if let Some(cache) = cache.as_deref_mut() {
            if let Err(e) = cache.store_year(username, &data) {
                eprintln!("warning: cache write failed: {e}");
            }
        }
    }

    Ok(data)
}

fn translate(year: i32, collection: ContributionsCollection) -> Result<YearData> {
    let mut days = Vec::new();
    for week in collection.contribution_calendar.weeks {
        for day in week.contribution_days {
            let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d").map_err(|e| {
                MetricsError::Parse(format!("bad calendar date '{}': {e}", day.date))
            })?;
            days.push(DailyActivity::from_calendar(date, day.contribution_count));
        }
    }

    // Calendar weeks are range-aligned, so edge weeks can carry days from
    // the neighboring year; the aggregator rejects those.
    days.retain(|d| d.date.year() == year);
    days.sort_by_key(|d| d.date);
    days.dedup_by_key(|d| d.date);

    let tallies = collection
        .commit_contributions_by_repository
        .into_iter()
        .map(|repo| RepositoryCommitTally {
            repository_name: repo.repository.name_with_owner,
            commit_count: repo.contributions.total_count,
            is_private: repo.repository.is_private,
        })
        .collect();

    Ok(YearData {
        year,
        days,
        tallies,
        totals: Some(CategoryTotals {
            commits: collection.total_commit_contributions,
            pull_requests: collection.total_pull_request_contributions,
            issues: collection.total_issue_contributions,
            reviews: collection.total_pull_request_review_contributions,
        }),
        repositories_contributed: Some(collection.total_repositories_with_contributed_commits),
    })
}
