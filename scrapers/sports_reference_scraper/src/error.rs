use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no table matching `{selector}` found on page")]
    TableNotFound { selector: String },

    #[error("table matching `{selector}` has no header row")]
    MissingHeader { selector: String },

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("no CSV files to combine in {}", dir.display())]
    NothingToCombine { dir: PathBuf },

    #[error("invalid league choice: {0}")]
    InvalidChoice(String),
}
