use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::combine::combine_directory;
use crate::config::ScraperConfig;
use crate::fetch::PageSource;
use crate::leagues::{League, Subleague};
use crate::output::write_table;
use crate::table::extract_table;
use crate::types::{FetchJob, ScrapeSummary};

/// Runs the fetch → extract → write → combine pipeline for one league,
/// strictly sequentially.
pub struct LeagueScraper<S: PageSource> {
    source: S,
    data_dir: PathBuf,
    latest_season: i32,
    combine: bool,
    show_progress: bool,
}

impl<S: PageSource> LeagueScraper<S> {
    pub fn new(source: S, config: &ScraperConfig) -> Self {
        Self {
            source,
            data_dir: config.output.data_dir.clone(),
            latest_season: config.output.latest_season,
            combine: true,
            show_progress: true,
        }
    }

    pub fn with_combine(mut self, combine: bool) -> Self {
        self.combine = combine;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn run(&self, league: League) -> Result<ScrapeSummary> {
        info!("Scraping {} ({})", league, league.description());
        let mut summary = ScrapeSummary::default();

        for subleague in league.subleagues(self.latest_season) {
            self.scrape_subleague(&subleague, &mut summary)?;
        }

        summary.metrics = self.source.metrics();
        Ok(summary)
    }

    pub fn scrape_subleague(&self, subleague: &Subleague, summary: &mut ScrapeSummary) -> Result<()> {
        let dir = subleague.directory(&self.data_dir);
        std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create directory {:?}", dir))?;

        if subleague.is_per_team() {
            info!("Fetching standings data for team history of all current active {} franchises...", subleague.league);
        } else {
            info!("Fetching standings/table data for {} ({})...", subleague.name.to_uppercase(), subleague.span());
        }

        let jobs = subleague.jobs();
        if jobs.is_empty() {
            warn!("No seasons to scrape for {} ({})", subleague.name, subleague.span());
            return Ok(());
        }

        let progress = self.progress_bar(jobs.len() as u64)?;
        for job in &jobs {
            progress.set_message(job.file_name.clone());
            let (rows, filtered) = self.process_job(subleague, job, &dir)?;
            summary.files_written += 1;
            summary.rows_written += rows;
            summary.rows_filtered += filtered;
            progress.inc(1);
        }
        progress.finish_with_message(format!("{} done", subleague.name));

        if self.combine {
            info!("...done! Combining data into {}...", subleague.combined_file_name());
            let prefix = subleague.file_prefix();
            let report = combine_directory(
                &dir,
                subleague.name,
                prefix.as_deref(),
                subleague.quirks.row_filter.as_ref(),
            )?;
            info!("Wrote {} rows from {} files to {:?}", report.rows, report.files, report.output);
            summary.combined_files.push(report.output);
        }

        Ok(())
    }

    /// Fetches one page and writes its table. Returns rows written and rows
    /// removed by the subleague's row filter.
    fn process_job(&self, subleague: &Subleague, job: &FetchJob, dir: &Path) -> Result<(usize, usize)> {
        let html = self.source.fetch(&job.url)?;
        let mut table = extract_table(&html, &subleague.quirks)
            .with_context(|| format!("Failed to extract table from {}", job.url))?;

        let filtered = subleague
            .quirks
            .row_filter
            .map_or(0, |filter| table.retain_rows(&filter));
        table.append_column(job.column.header(), &job.column.value());

        let path = dir.join(&job.file_name);
        let rows = write_table(&path, &table)?;
        debug!("{} -> {:?} ({} rows, {} filtered)", job.url, path, rows, filtered);

        Ok((rows, filtered))
    }

    fn progress_bar(&self, len: u64) -> Result<ProgressBar> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg:>24} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta})")?,
        );
        Ok(pb)
    }
}
