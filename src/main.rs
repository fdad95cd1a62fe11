use anyhow::Result;
use clap::Parser;
use ghmetrics::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
