use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::{MetricsError, Result};
use crate::model::{
    CategoryTotals, DailyActivity, RepositoryCommitTally, YearData, SCHEMA_VERSION,
};

/// Local store for completed-year contribution data. A finished year's
/// history never changes, so it is fetched once and read back afterwards.
/// The current year is always re-fetched.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_path: Option<P>) -> Result<Self> {
        let cache_dir = match cache_path {
            Some(path) => path.as_ref().to_path_buf(),
            None => default_cache_dir()?,
        };
        std::fs::create_dir_all(&cache_dir)?;
        let db_path = cache_dir.join("cache.db");
        let conn = Connection::open(&db_path)?;
        let mut cache = Self { conn };
        cache.initialize()?;
        Ok(cache)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS year_summary (
                username TEXT NOT NULL,
                year INTEGER NOT NULL,
                commits INTEGER NOT NULL,
                pull_requests INTEGER NOT NULL,
                issues INTEGER NOT NULL,
                reviews INTEGER NOT NULL,
                repositories_contributed INTEGER NOT NULL,
                fetched_at INTEGER NOT NULL,
                PRIMARY KEY (username, year)
            );
            CREATE TABLE IF NOT EXISTS daily_activity (
                username TEXT NOT NULL,
                year INTEGER NOT NULL,
                date TEXT NOT NULL,
                commit_count INTEGER NOT NULL,
                pr_count INTEGER NOT NULL,
                issue_count INTEGER NOT NULL,
                review_count INTEGER NOT NULL,
                PRIMARY KEY (username, year, date)
            );
            CREATE TABLE IF NOT EXISTS repo_tallies (
                username TEXT NOT NULL,
                year INTEGER NOT NULL,
                repository_name TEXT NOT NULL,
                commit_count INTEGER NOT NULL,
                is_private INTEGER NOT NULL,
                PRIMARY KEY (username, year, repository_name)
            );
            ",
        )?;
        self.check_schema_version()?;
        Ok(())
    }

    fn check_schema_version(&mut self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version == 0 {
            let set_stmt = format!("PRAGMA user_version = {SCHEMA_VERSION};");
            self.conn.execute_batch(&set_stmt)?;
        } else if user_version != SCHEMA_VERSION as i64 {
            return Err(MetricsError::Cache(format!(
                "Schema version mismatch: expected {}, found {}",
                SCHEMA_VERSION, user_version
            )));
        }

        Ok(())
    }

    pub fn get_year(&self, username: &str, year: i32) -> Result<Option<YearData>> {
        let summary = self.conn.query_row(
            "SELECT commits, pull_requests, issues, reviews, repositories_contributed
             FROM year_summary WHERE username = ? AND year = ?",
            params![username, year],
            |row| {
                Ok((
                    CategoryTotals {
                        commits: row.get(0)?,
                        pull_requests: row.get(1)?,
                        issues: row.get(2)?,
                        reviews: row.get(3)?,
                    },
                    row.get::<_, u32>(4)?,
                ))
            },
        );

        let (totals, repositories_contributed) = match summary {
            Ok(values) => values,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut stmt = self.conn.prepare(
            "SELECT date, commit_count, pr_count, issue_count, review_count
             FROM daily_activity WHERE username = ? AND year = ? ORDER BY date",
        )?;
        let days = stmt
            .query_map(params![username, year], |row| {
                Ok(DailyActivity {
                    date: row.get(0)?,
                    commit_count: row.get(1)?,
                    pr_count: row.get(2)?,
                    issue_count: row.get(3)?,
                    review_count: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT repository_name, commit_count, is_private
             FROM repo_tallies WHERE username = ? AND year = ? ORDER BY repository_name",
        )?;
        let tallies = stmt
            .query_map(params![username, year], |row| {
                let is_private: i64 = row.get(2)?;
                Ok(RepositoryCommitTally {
                    repository_name: row.get(0)?,
                    commit_count: row.get(1)?,
                    is_private: is_private != 0,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(YearData {
            year,
            days,
            tallies,
            totals: Some(totals),
            repositories_contributed: Some(repositories_contributed),
        }))
    }

    pub fn store_year(&mut self, username: &str, data: &YearData) -> Result<()> {
        let totals = data.totals.clone().unwrap_or_default();
        let repositories_contributed = data
            .repositories_contributed
            .unwrap_or(data.tallies.len() as u32);

        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO year_summary
             (username, year, commits, pull_requests, issues, reviews,
              repositories_contributed, fetched_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                username,
                data.year,
                totals.commits,
                totals.pull_requests,
                totals.issues,
                totals.reviews,
                repositories_contributed,
                Utc::now().timestamp(),
            ],
        )?;

        tx.execute(
            "DELETE FROM daily_activity WHERE username = ? AND year = ?",
            params![username, data.year],
        )?;
        tx.execute(
            "DELETE FROM repo_tallies WHERE username = ? AND year = ?",
            params![username, data.year],
        )?;

        {
            let mut insert_day = tx.prepare(
                "INSERT INTO daily_activity
                 (username, year, date, commit_count, pr_count, issue_count, review_count)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )?;
            for day in &data.days {
                insert_day.execute(params![
                    username,
                    data.year,
                    day.date,
                    day.commit_count,
                    day.pr_count,
                    day.issue_count,
                    day.review_count,
                ])?;
            }

            let mut insert_tally = tx.prepare(
                "INSERT INTO repo_tallies
                 (username, year, repository_name, commit_count, is_private)
                 VALUES (?, ?, ?, ?, ?)",
            )?;
            for tally in &data.tallies {
                insert_tally.execute(params![
                    username,
                    data.year,
                    tally.repository_name,
                    tally.commit_count,
                    if tally.is_private { 1 } else { 0 },
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

fn default_cache_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| MetricsError::Cache("cannot determine home directory".to_string()))?;
    Ok(home.join(".cache").join("ghmetrics"))
}
