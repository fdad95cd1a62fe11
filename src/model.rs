use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One calendar day of recorded contributions. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub commit_count: u32,
    pub pr_count: u32,
    pub issue_count: u32,
    pub review_count: u32,
}

impl DailyActivity {
    /// The contribution calendar exposes a single aggregate count per day;
    /// it lands in `commit_count` and the remaining categories stay zero.
    /// Day-level consumers (streaks, the activity graph) only read the sum.
    pub fn from_calendar(date: NaiveDate, count: u32) -> Self {
        Self {
            date,
            commit_count: count,
            pr_count: 0,
            issue_count: 0,
            review_count: 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.commit_count + self.pr_count + self.issue_count + self.review_count
    }

    pub fn is_active(&self) -> bool {
        self.total() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCommitTally {
    pub repository_name: String,
    pub commit_count: u32,
    pub is_private: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub commits: u64,
    pub pull_requests: u64,
    pub issues: u64,
    pub reviews: u64,
}

impl CategoryTotals {
    pub fn contributions(&self) -> u64 {
        self.commits + self.pull_requests + self.issues + self.reviews
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFlag {
    pub date: NaiveDate,
    pub count: u32,
    pub active: bool,
}

/// Per-day activity flags for one calendar month, in date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthActivity {
    pub month: String,
    pub days: Vec<DayFlag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearReport {
    pub year: i32,
    pub totals: CategoryTotals,
    pub repositories_contributed: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub monthly_matrix: Vec<MonthActivity>,
    pub top_repositories: Vec<RepositoryCommitTally>,
}

/// Everything the retrieval layer hands to the aggregator for one year.
///
/// `totals` and `repositories_contributed` carry exact figures when the
/// source provides them (the GraphQL collection does); when absent they
/// are derived from `days` and `tallies`.
#[derive(Debug, Clone, Default)]
pub struct YearData {
    pub year: i32,
    pub days: Vec<DailyActivity>,
    pub tallies: Vec<RepositoryCommitTally>,
    pub totals: Option<CategoryTotals>,
    pub repositories_contributed: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub username: String,
    pub reports: Vec<YearReport>,
}
