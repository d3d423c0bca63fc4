use anyhow::{Context, Result};
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{thread, time::Duration};
use tracing::{debug, info};

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::metrics::{FetchMetrics, MetricsCollector};

/// Something that can turn a URL into page HTML.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String>;

    fn metrics(&self) -> FetchMetrics {
        FetchMetrics::default()
    }
}

/// Blocking HTTP fetcher that waits a fixed delay between requests.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    clock: DefaultClock,
    metrics: MetricsCollector,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.scraping.user_agent)
            .timeout(Duration::from_secs(config.scraping.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        // A zero delay yields no quota, i.e. no waiting at all
        let rate_limiter = Quota::with_period(Duration::from_millis(config.rate_limits.request_delay_ms))
            .map(RateLimiter::direct);

        Ok(Self {
            client,
            rate_limiter,
            clock: DefaultClock::default(),
            metrics: MetricsCollector::new(),
        })
    }

    fn wait_for_turn(&self) {
        let Some(limiter) = &self.rate_limiter else {
            return;
        };
        while let Err(not_until) = limiter.check() {
            let wait = not_until.wait_time_from(self.clock.now());
            debug!("Waiting {:?} before next request", wait);
            self.metrics.record_delay_wait(wait);
            thread::sleep(wait);
        }
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.wait_for_turn();

        info!("Fetching {}", url);
        let tracker = self.metrics.record_request_start();
        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(e) => {
                tracker.finish(None);
                self.metrics.record_error(e.to_string());
                return Err(e).with_context(|| format!("Failed to fetch {}", url));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracker.finish(None);
            self.metrics.record_error(format!("HTTP {} for {}", status, url));
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let text = match response.text() {
            Ok(text) => text,
            Err(e) => {
                tracker.finish(None);
                self.metrics.record_error(e.to_string());
                return Err(e).with_context(|| format!("Failed to read body of {}", url));
            }
        };
        tracker.finish(Some(text.len()));
        debug!("Got {} bytes from {}", text.len(), url);

        Ok(text)
    }

    fn metrics(&self) -> FetchMetrics {
        self.metrics.get_metrics()
    }
}
