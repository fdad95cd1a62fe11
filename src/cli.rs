use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghmetrics")]
#[command(about = "GitHub contribution metrics: totals, streaks, and activity graphs")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, short = 'u', help = "GitHub username (defaults to the authenticated user)")]
    pub username: Option<String>,

    #[arg(
        long,
        help = "Personal access token (defaults to GITHUB_TOKEN, GH_TOKEN, or `gh auth token`)"
    )]
    pub token: Option<String>,

    #[arg(long, help = "Path to cache directory")]
    pub cache: Option<PathBuf>,

    #[arg(long, help = "Bypass the completed-year cache", default_value_t = false)]
    pub no_cache: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    Report {
        #[arg(long, short = 'y', help = "Year to report (repeatable; defaults to the current year)")]
        year: Vec<i32>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Number of top repositories to show", default_value_t = 10)]
        limit: usize,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Report { year, json, ndjson, limit } => {
                crate::report::exec(self.common, year, json, ndjson, limit)
            }
        }
    }
}
