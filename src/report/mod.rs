pub mod aggregate;
pub mod exec;
pub mod fetch;
pub mod output;

pub use aggregate::{
    build_monthly_matrix, build_year_report, compute_streaks, compute_totals,
    rank_top_repositories,
};
pub use exec::exec;
pub use fetch::fetch_year;
pub use output::{output_json, output_ndjson, output_report};
