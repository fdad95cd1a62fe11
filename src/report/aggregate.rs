use std::collections::HashMap;

use chrono::Datelike;

use crate::error::{MetricsError, Result};
use crate::model::{
    CategoryTotals, DailyActivity, DayFlag, MonthActivity, RepositoryCommitTally, YearData,
    YearReport,
};
use crate::util::month_key;

/// Sum each category across the sequence. All-zero for empty input.
pub fn compute_totals(days: &[DailyActivity]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for day in days {
        totals.commits += u64::from(day.commit_count);
        totals.pull_requests += u64::from(day.pr_count);
        totals.issues += u64::from(day.issue_count);
        totals.reviews += u64::from(day.review_count);
    }
    totals
}

/// Single chronological scan over the days. Returns
/// `(current_streak, longest_streak)`: the run of consecutive active days
/// ending at the most recent day (0 when that day is inactive), and the
/// longest such run anywhere in the sequence.
pub fn compute_streaks(days: &[DailyActivity]) -> (u32, u32) {
    let mut longest = 0u32;
    let mut run = 0u32;

    for day in days {
        if day.is_active() {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    // run is now the streak ending at the last day in the sequence
    (run, longest)
}

/// Group days by calendar month, per-day flags in date order. Months with
/// no data are omitted.
pub fn build_monthly_matrix(days: &[DailyActivity]) -> Vec<MonthActivity> {
    let mut month_map: HashMap<String, Vec<DayFlag>> = HashMap::new();

    for day in days {
        month_map.entry(month_key(day.date)).or_default().push(DayFlag {
            date: day.date,
            count: day.total(),
            active: day.is_active(),
        });
    }

    let mut months: Vec<MonthActivity> = month_map
        .into_iter()
        .map(|(month, days)| MonthActivity { month, days })
        .collect();

    months.sort_by(|a, b| a.month.cmp(&b.month));
    months
}

/// Descending by commit count, ties ascending by repository name,
/// truncated to `limit`.
pub fn rank_top_repositories(
    tallies: &[RepositoryCommitTally],
    limit: usize,
) -> Vec<RepositoryCommitTally> {
    let mut ranked = tallies.to_vec();
    ranked.sort_by(|a, b| {
        b.commit_count
            .cmp(&a.commit_count)
            .then_with(|| a.repository_name.cmp(&b.repository_name))
    });
    ranked.truncate(limit);
    ranked
}

fn validate_days(year: i32, days: &[DailyActivity]) -> Result<()> {
    let mut prev: Option<&DailyActivity> = None;
    for day in days {
        if day.date.year() != year {
            return Err(MetricsError::InvalidInput(format!(
                "day {} falls outside requested year {}",
                day.date, year
            )));
        }
        if let Some(prev) = prev {
            if day.date <= prev.date {
                return Err(MetricsError::InvalidInput(format!(
                    "days out of order or duplicated at {}",
                    day.date
                )));
            }
        }
        prev = Some(day);
    }
    Ok(())
}

/// Assemble the report for one year. Empty data degrades to a zero-valued
/// report rather than failing.
///
/// Exact category totals and the contributed-repository count are taken
/// from the source when it supplies them, otherwise derived from the days
/// and tallies.
pub fn build_year_report(data: &YearData, limit: usize) -> Result<YearReport> {
    validate_days(data.year, &data.days)?;

    let totals = data
        .totals
        .clone()
        .unwrap_or_else(|| compute_totals(&data.days));
    let repositories_contributed = data
        .repositories_contributed
        .unwrap_or(data.tallies.len() as u32);
    let (current_streak, longest_streak) = compute_streaks(&data.days);

    Ok(YearReport {
        year: data.year,
        totals,
        repositories_contributed,
        current_streak,
        longest_streak,
        monthly_matrix: build_monthly_matrix(&data.days),
        top_repositories: rank_top_repositories(&data.tallies, limit),
    })
}
