pub mod combine;
pub mod config;
pub mod error;
pub mod fetch;
pub mod leagues;
pub mod metrics;
pub mod output;
pub mod prompt;
pub mod scraper;
pub mod table;
pub mod types;
