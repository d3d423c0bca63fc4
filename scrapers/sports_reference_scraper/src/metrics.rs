use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FetchMetrics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub bytes_downloaded: u64,
    pub avg_response_time_ms: f64,
    pub delay_wait_time_ms: f64,
    pub last_error: Option<String>,
    pub last_error_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Default)]
pub struct MetricsCollector {
    metrics: Arc<Mutex<FetchMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request_start(&self) -> RequestTracker {
        RequestTracker {
            start_time: Instant::now(),
            collector: self.clone(),
        }
    }

    /// Accumulates time spent waiting between requests.
    pub fn record_delay_wait(&self, duration: Duration) {
        let mut metrics = self.lock();
        metrics.delay_wait_time_ms += duration.as_secs_f64() * 1000.0;
    }

    pub fn record_error(&self, error: String) {
        let mut metrics = self.lock();
        metrics.last_error = Some(error);
        metrics.last_error_time = Some(Utc::now());
    }

    pub fn get_metrics(&self) -> FetchMetrics {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FetchMetrics> {
        self.metrics.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub struct RequestTracker {
    start_time: Instant,
    collector: MetricsCollector,
}

impl RequestTracker {
    /// `bytes` is the body size for successful requests, `None` on failure.
    pub fn finish(self, bytes: Option<usize>) {
        let duration = self.start_time.elapsed();
        let mut metrics = self.collector.lock();

        metrics.total_requests += 1;
        match bytes {
            Some(len) => {
                metrics.successful_requests += 1;
                metrics.bytes_downloaded += len as u64;
            }
            None => metrics.failed_requests += 1,
        }

        // Exponential moving average, seeded by the first sample
        let sample = duration.as_secs_f64() * 1000.0;
        metrics.avg_response_time_ms = if metrics.total_requests == 1 {
            sample
        } else {
            let alpha = 0.1;
            metrics.avg_response_time_ms * (1.0 - alpha) + sample * alpha
        };
    }
}
