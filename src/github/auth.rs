use std::process::Command;

use crate::error::{MetricsError, Result};

/// Resolve a GitHub token: an explicit `--token` wins, then the
/// `GITHUB_TOKEN` / `GH_TOKEN` environment variables, then `gh auth token`.
pub fn discover_token(explicit: Option<&str>) -> Result<String> {
    if let Some(token) = explicit {
        return Ok(token.to_string());
    }

    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(var) {
            let token = token.trim().to_string();
            if !token.is_empty() {
                return Ok(token);
            }
        }
    }

    gh_auth_token()
}

fn gh_auth_token() -> Result<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .map_err(|_| no_token())?;

    if !output.status.success() {
        return Err(no_token());
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(no_token());
    }
    Ok(token)
}

fn no_token() -> MetricsError {
    MetricsError::Auth(
        "no GitHub token found; set GITHUB_TOKEN or log in with `gh auth login`".to_string(),
    )
}
