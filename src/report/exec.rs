use anyhow::Context;
use chrono::{Datelike, Utc};

use super::{build_year_report, fetch_year, output_json, output_ndjson, output_report};
use crate::cache::Cache;
use crate::cli::CommonArgs;
use crate::github::{discover_token, GithubClient};

pub fn exec(
    common: CommonArgs,
    years: Vec<i32>,
    json: bool,
    ndjson: bool,
    limit: usize,
) -> anyhow::Result<()> {
    let token =
        discover_token(common.token.as_deref()).context("Failed to resolve a GitHub token")?;
    let client = GithubClient::new(token).context("Failed to build the GitHub client")?;

    let username = match common.username {
        Some(name) => name,
        None => client
            .viewer_login()
            .context("Failed to resolve the authenticated user")?,
    };

    let mut years = if years.is_empty() {
        vec![Utc::now().year()]
    } else {
        years
    };
    years.sort_unstable();
    years.dedup();

    let quiet = json || ndjson;

    let mut cache = if common.no_cache {
        None
    } else {
        match Cache::new(common.cache.as_deref()) {
            Ok(cache) => Some(cache),
            Err(e) => {
                eprintln!("warning: cache unavailable: {e}");
                None
            }
        }
    };

    let mut reports = Vec::with_capacity(years.len());
    for year in years {
        let data = fetch_year(&client, cache.as_mut(), &username, year, !quiet)
            .with_context(|| format!("Failed to fetch contributions for {year}"))?;
        let report = build_year_report(&data, limit)
            .with_context(|| format!("Failed to aggregate contributions for {year}"))?;
        reports.push(report);
    }

    if json {
        output_json(&reports, &username)?;
    } else if ndjson {
        output_ndjson(&reports)?;
    } else {
        for report in &reports {
            output_report(report, &username);
        }
    }

    Ok(())
}
