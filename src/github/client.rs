use std::time::Duration;

use chrono::{Datelike, Utc};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{ContributionsCollection, ContributionsData, GraphQlResponse, ViewerData};
use crate::error::{MetricsError, Result};

const GRAPHQL_URL: &str = "https://api.github.com/graphql";

const VIEWER_QUERY: &str = "query { viewer { login } }";

const CONTRIBUTIONS_QUERY: &str = "
query($username: String!, $from: DateTime!, $to: DateTime!) {
    user(login: $username) {
        contributionsCollection(from: $from, to: $to) {
            totalCommitContributions
            totalIssueContributions
            totalPullRequestContributions
            totalPullRequestReviewContributions
            totalRepositoriesWithContributedCommits
            contributionCalendar {
                totalContributions
                weeks {
                    contributionDays {
                        date
                        contributionCount
                    }
                }
            }
            commitContributionsByRepository(maxRepositories: 100) {
                repository {
                    nameWithOwner
                    isPrivate
                }
                contributions {
                    totalCount
                }
            }
        }
    }
}
";

/// Blocking GraphQL client for the GitHub API.
pub struct GithubClient {
    http: Client,
    token: String,
}

impl GithubClient {
    pub fn new(token: String) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("ghmetrics/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, token })
    }

    fn query<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let response = self
            .http
            .post(GRAPHQL_URL)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MetricsError::Auth(
                "GitHub rejected the token (HTTP 401)".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(MetricsError::Api(format!("GitHub returned HTTP {status}")));
        }

        let body: GraphQlResponse<T> = response.json()?;
        if !body.errors.is_empty() {
            let messages: Vec<&str> = body.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(MetricsError::Api(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| MetricsError::Api("GraphQL response carried no data".to_string()))
    }

    /// Login of the user the token belongs to.
    pub fn viewer_login(&self) -> Result<String> {
        let data: ViewerData = self.query(VIEWER_QUERY, json!({}))?;
        Ok(data.viewer.login)
    }

    /// Contribution data for `username` over one calendar year. The upper
    /// bound is clamped to now when the year is still in progress.
    pub fn contributions(&self, username: &str, year: i32) -> Result<ContributionsCollection> {
        let from = format!("{year}-01-01T00:00:00Z");
        let now = Utc::now();
        let to = if year == now.year() {
            now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
        } else {
            format!("{year}-12-31T23:59:59Z")
        };

        let data: ContributionsData = self.query(
            CONTRIBUTIONS_QUERY,
            json!({ "username": username, "from": from, "to": to }),
        )?;

        let user = data
            .user
            .ok_or_else(|| MetricsError::UserNotFound(username.to_string()))?;
        Ok(user.contributions_collection)
    }
}
