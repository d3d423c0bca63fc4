use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    pub data_dir: PathBuf,
    /// One greater than the last completed season, e.g. 2022 when the
    /// latest finished season is 2021.
    pub latest_season: i32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("scraped_data"),
            latest_season: chrono::Utc::now().year(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimits {
    pub request_delay_ms: u64,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; SportsReferenceScraper/0.1)".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScraperConfig {
    pub output: OutputConfig,
    pub rate_limits: RateLimits,
    pub scraping: ScrapingConfig,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SCRAPED_DATA_DIR") {
            config.output.data_dir = PathBuf::from(dir);
        }
        if let Ok(Some(season)) = env::var("LATEST_SEASON").map_or(Ok(None), |s| s.parse::<i32>().map(Some)) {
            config.output.latest_season = season;
        }
        if let Ok(Some(delay)) = env::var("REQUEST_DELAY_MS").map_or(Ok(None), |d| d.parse::<u64>().map(Some)) {
            config.rate_limits.request_delay_ms = delay;
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Ok(Some(timeout)) = env::var("SCRAPER_TIMEOUT_SECS").map_or(Ok(None), |t| t.parse::<u64>().map(Some)) {
            config.scraping.request_timeout_secs = timeout;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "SCRAPED_DATA_DIR",
        "LATEST_SEASON",
        "REQUEST_DELAY_MS",
        "SCRAPER_USER_AGENT",
        "SCRAPER_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = ScraperConfig::from_env();
        assert_eq!(config.output.data_dir, PathBuf::from("scraped_data"));
        assert_eq!(config.rate_limits.request_delay_ms, 1000);
        assert_eq!(config.scraping.request_timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("SCRAPED_DATA_DIR", "/tmp/standings");
        env::set_var("LATEST_SEASON", "2022");
        env::set_var("REQUEST_DELAY_MS", "250");
        env::set_var("SCRAPER_TIMEOUT_SECS", "5");

        let config = ScraperConfig::from_env();
        assert_eq!(config.output.data_dir, PathBuf::from("/tmp/standings"));
        assert_eq!(config.output.latest_season, 2022);
        assert_eq!(config.rate_limits.request_delay_ms, 250);
        assert_eq!(config.scraping.request_timeout_secs, 5);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_unparseable_numbers() {
        clear_env();
        env::set_var("LATEST_SEASON", "next year");
        let config = ScraperConfig::from_env();
        assert_eq!(config.output.latest_season, OutputConfig::default().latest_season);
        clear_env();
    }
}
