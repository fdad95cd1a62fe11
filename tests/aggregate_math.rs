use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use ghmetrics::error::MetricsError;
use ghmetrics::model::{DailyActivity, RepositoryCommitTally, YearData, YearReport};
use ghmetrics::report::{
    build_monthly_matrix, build_year_report, compute_streaks, compute_totals,
    rank_top_repositories,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn day(y: i32, m: u32, d: u32, commits: u32, prs: u32, issues: u32, reviews: u32) -> DailyActivity {
    DailyActivity {
        date: date(y, m, d),
        commit_count: commits,
        pr_count: prs,
        issue_count: issues,
        review_count: reviews,
    }
}

fn tally(name: &str, commits: u32) -> RepositoryCommitTally {
    RepositoryCommitTally {
        repository_name: name.to_string(),
        commit_count: commits,
        is_private: false,
    }
}

#[test]
fn empty_days_give_zero_totals_and_streaks() {
    let totals = compute_totals(&[]);
    assert_eq!(totals.contributions(), 0);
    assert_eq!(compute_streaks(&[]), (0, 0));
}

#[test]
fn totals_sum_each_category() {
    let days = vec![
        day(2024, 1, 1, 3, 1, 0, 2),
        day(2024, 1, 2, 0, 0, 4, 0),
        day(2024, 1, 3, 1, 2, 1, 1),
    ];
    let totals = compute_totals(&days);
    assert_eq!(totals.commits, 4);
    assert_eq!(totals.pull_requests, 3);
    assert_eq!(totals.issues, 5);
    assert_eq!(totals.reviews, 3);
    assert_eq!(totals.contributions(), 15);
}

#[test]
fn all_active_sequence_streaks_equal_length() {
    let days: Vec<_> = (1..=9).map(|d| day(2024, 3, d, 1, 0, 0, 0)).collect();
    assert_eq!(compute_streaks(&days), (9, 9));
}

#[test]
fn inactive_day_splits_streak() {
    // 7 days, day 4 inactive: runs of 3 and 3 around it
    let days: Vec<_> = (1..=7)
        .map(|d| day(2024, 5, d, if d == 4 { 0 } else { 2 }, 0, 0, 0))
        .collect();
    let (current, longest) = compute_streaks(&days);
    assert_eq!(longest, 3);
    assert_eq!(current, 3);
}

#[test]
fn current_streak_zero_when_last_day_inactive() {
    let days = vec![
        day(2024, 1, 1, 5, 0, 0, 0),
        day(2024, 1, 2, 5, 0, 0, 0),
        day(2024, 1, 3, 0, 0, 0, 0),
    ];
    assert_eq!(compute_streaks(&days), (0, 2));
}

#[test]
fn activity_counts_any_category() {
    // a review-only day keeps a streak alive
    let days = vec![
        day(2024, 1, 1, 1, 0, 0, 0),
        day(2024, 1, 2, 0, 0, 0, 1),
        day(2024, 1, 3, 0, 1, 0, 0),
    ];
    assert_eq!(compute_streaks(&days), (3, 3));
}

#[test]
fn readme_scenario_streaks_and_totals() {
    let days = vec![
        day(2024, 1, 1, 3, 0, 0, 0),
        day(2024, 1, 2, 0, 0, 0, 0),
        day(2024, 1, 3, 1, 0, 0, 0),
    ];
    let totals = compute_totals(&days);
    assert_eq!(totals.commits, 4);
    assert_eq!(compute_streaks(&days), (1, 1));
}

#[test]
fn monthly_matrix_groups_by_month_and_omits_empty_months() {
    let days = vec![
        day(2024, 1, 30, 2, 0, 0, 0),
        day(2024, 1, 31, 0, 0, 0, 0),
        day(2024, 3, 1, 1, 0, 0, 0),
    ];
    let matrix = build_monthly_matrix(&days);
    assert_eq!(matrix.len(), 2);
    assert_eq!(matrix[0].month, "2024-01");
    assert_eq!(matrix[1].month, "2024-03");
    assert_eq!(matrix[0].days.len(), 2);
    assert!(matrix[0].days[0].active);
    assert!(!matrix[0].days[1].active);
    assert_eq!(matrix[0].days[0].count, 2);
    assert_eq!(matrix[1].days.len(), 1);
}

#[test]
fn ranking_sorts_and_breaks_ties_alphabetically() {
    let tallies = vec![tally("repoC", 1), tally("repoB", 5), tally("repoA", 5)];
    let ranked = rank_top_repositories(&tallies, 2);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].repository_name, "repoA");
    assert_eq!(ranked[1].repository_name, "repoB");
}

#[test]
fn ranking_is_idempotent_on_sorted_input() {
    let tallies = vec![tally("a", 9), tally("b", 4), tally("c", 1)];
    let once = rank_top_repositories(&tallies, 10);
    let twice = rank_top_repositories(&once, 10);
    assert_eq!(once, twice);
}

#[test]
fn ranking_limit_beyond_len_returns_all() {
    let tallies = vec![tally("a", 1), tally("b", 2)];
    assert_eq!(rank_top_repositories(&tallies, 10).len(), 2);
}

#[test]
fn report_for_empty_year_is_zero_valued() {
    let data = YearData {
        year: 2023,
        ..Default::default()
    };
    let report = build_year_report(&data, 10).unwrap();
    assert_eq!(report.year, 2023);
    assert_eq!(report.totals.contributions(), 0);
    assert_eq!(report.current_streak, 0);
    assert_eq!(report.longest_streak, 0);
    assert!(report.monthly_matrix.is_empty());
    assert!(report.top_repositories.is_empty());
}

#[test]
fn report_rejects_day_outside_year() {
    let data = YearData {
        year: 2024,
        days: vec![day(2023, 12, 31, 1, 0, 0, 0)],
        ..Default::default()
    };
    let err = build_year_report(&data, 10).unwrap_err();
    assert!(matches!(err, MetricsError::InvalidInput(_)));
}

#[test]
fn report_rejects_duplicate_dates() {
    let data = YearData {
        year: 2024,
        days: vec![day(2024, 6, 1, 1, 0, 0, 0), day(2024, 6, 1, 2, 0, 0, 0)],
        ..Default::default()
    };
    let err = build_year_report(&data, 10).unwrap_err();
    assert!(matches!(err, MetricsError::InvalidInput(_)));
}

#[test]
fn report_rejects_out_of_order_days() {
    let data = YearData {
        year: 2024,
        days: vec![day(2024, 6, 2, 1, 0, 0, 0), day(2024, 6, 1, 1, 0, 0, 0)],
        ..Default::default()
    };
    let err = build_year_report(&data, 10).unwrap_err();
    assert!(matches!(err, MetricsError::InvalidInput(_)));
}

#[test]
fn report_prefers_source_totals_when_present() {
    let data = YearData {
        year: 2024,
        days: vec![day(2024, 2, 1, 7, 0, 0, 0)],
        totals: Some(ghmetrics::model::CategoryTotals {
            commits: 5,
            pull_requests: 1,
            issues: 1,
            reviews: 0,
        }),
        repositories_contributed: Some(3),
        ..Default::default()
    };
    let report = build_year_report(&data, 10).unwrap();
    assert_eq!(report.totals.commits, 5);
    assert_eq!(report.repositories_contributed, 3);
}

#[test]
fn year_report_round_trips_through_json() {
    let data = YearData {
        year: 2024,
        days: vec![
            day(2024, 1, 1, 3, 1, 0, 0),
            day(2024, 1, 2, 0, 0, 0, 0),
            day(2024, 2, 10, 2, 0, 1, 1),
        ],
        tallies: vec![tally("owner/repo", 12), tally("owner/other", 4)],
        ..Default::default()
    };
    let report = build_year_report(&data, 10).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let parsed: YearReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report, parsed);
}
