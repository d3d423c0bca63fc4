use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::{io, path::PathBuf};
use tracing::info;

use sports_reference_scraper::{
    config::ScraperConfig,
    error::ScrapeError,
    fetch::HttpFetcher,
    leagues::League,
    prompt::ask_league,
    scraper::LeagueScraper,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Scrape historical standings from sports-reference sites into CSV", long_about = None)]
struct Cli {
    /// League menu number (1-6); asked interactively when omitted
    #[arg(short, long)]
    league: Option<u32>,

    /// One greater than the last completed season to scrape
    #[arg(long)]
    latest_season: Option<i32>,

    /// Root directory for scraped CSV files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip building the combined -ALL.csv files
    #[arg(long)]
    no_combine: bool,
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ScraperConfig::from_env();
    if let Some(season) = cli.latest_season {
        config.output.latest_season = season;
    }
    if let Some(dir) = cli.output_dir {
        config.output.data_dir = dir;
    }

    let league = match cli.league {
        Some(choice) => League::from_choice(choice)
            .ok_or_else(|| ScrapeError::InvalidChoice(choice.to_string()))?,
        None => ask_league(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    std::fs::create_dir_all(&config.output.data_dir)
        .with_context(|| format!("Failed to create {:?}", config.output.data_dir))?;

    let fetcher = HttpFetcher::new(&config)?;
    let scraper = LeagueScraper::new(fetcher, &config).with_combine(!cli.no_combine);
    let summary = scraper.run(league)?;

    info!(
        "Wrote {} files ({} rows, {} filtered) and {} combined files; {} requests, {} bytes",
        summary.files_written,
        summary.rows_written,
        summary.rows_filtered,
        summary.combined_files.len(),
        summary.metrics.total_requests,
        summary.metrics.bytes_downloaded,
    );
    println!("Complete! Data can be found in: {}", scraper.data_dir().display());

    Ok(())
}
