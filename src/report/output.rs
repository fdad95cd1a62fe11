use chrono::Utc;
use console::style;

use crate::model::{ReportOutput, YearReport, SCHEMA_VERSION};
use crate::util::{intensity_glyph, month_label};

pub fn output_json(reports: &[YearReport], username: &str) -> anyhow::Result<()> {
    let output = ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        username: username.to_string(),
        reports: reports.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(reports: &[YearReport]) -> anyhow::Result<()> {
    for report in reports {
        println!("{}", serde_json::to_string(report)?);
    }
    Ok(())
}

pub fn output_report(report: &YearReport, username: &str) {
    println!();
    println!(
        "{}",
        style(format!("GitHub Metrics Report: @{username} ({})", report.year))
            .bold()
            .cyan()
    );
    println!("{}", "─".repeat(50));

    let totals = &report.totals;
    print_row("Total contributions", totals.contributions());
    print_row("Commits", totals.commits);
    print_row("Pull requests", totals.pull_requests);
    print_row("Issues", totals.issues);
    print_row("Code reviews", totals.reviews);
    print_row("Repositories", u64::from(report.repositories_contributed));
    println!(
        "  {:<22} {}",
        "Current streak",
        style(format!("{} days", report.current_streak)).bold().green()
    );
    println!(
        "  {:<22} {}",
        "Longest streak",
        style(format!("{} days", report.longest_streak)).bold().green()
    );

    if !report.monthly_matrix.is_empty() {
        println!();
        println!("{}", style("Monthly Activity").bold());
        for month in &report.monthly_matrix {
            let graph: String = month
                .days
                .iter()
                .map(|day| intensity_glyph(day.count))
                .collect();
            let total: u64 = month.days.iter().map(|day| u64::from(day.count)).sum();
            println!(
                "  {} {} ({})",
                month_label(&month.month),
                style(graph).green(),
                total
            );
        }
        println!("  {} intensity: none, 1-3, 4-6, 7+", style("░▒▓█").green());
    }

    if !report.top_repositories.is_empty() {
        println!();
        println!("{}", style("Top Repositories").bold());
        println!(
            "  {:<42} {:>8}  {}",
            style("Repository").bold(),
            style("Commits").bold(),
            style("Type").bold()
        );
        for repo in &report.top_repositories {
            let visibility = if repo.is_private { "private" } else { "public" };
            println!(
                "  {:<42} {:>8}  {}",
                style(&repo.repository_name).cyan(),
                repo.commit_count,
                style(visibility).dim()
            );
        }
    }
}

fn print_row(label: &str, value: u64) {
    println!("  {:<22} {}", label, style(value).bold().green());
}
