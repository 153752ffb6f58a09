// file: src/utils/telemetry.rs
// description: stage timing and page fetch throughput for index builds
// reference: https://docs.rs/tracing

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

/// Times one index build and logs each stage it passes through.
pub struct BuildTimer {
    site: String,
    start: Instant,
}

impl BuildTimer {
    pub fn start(site: &str) -> Self {
        info!("Index build started for {}", site);
        Self {
            site: site.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn stage(&self, stage: &str) {
        info!(
            "Index build [{}]: {} after {:.2}s",
            self.site,
            stage,
            self.elapsed().as_secs_f64()
        );
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Index build [{}] finished in {:.2}s",
            self.site,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    /// Finishes the build, logging how many pages made it into the index.
    pub fn finish_with_pages(self, indexed: usize) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Index build [{}] finished: {} pages indexed in {:.2}s",
            self.site,
            indexed,
            elapsed.as_secs_f64()
        );
        elapsed
    }
}

/// Fetch throughput of one build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchMetrics {
    pub pages: usize,
    pub bytes: u64,
    pub duration_ms: u64,
    pub pages_per_sec: f64,
    pub kib_per_sec: f64,
    pub avg_page_ms: f64,
}

impl FetchMetrics {
    pub fn new(pages: usize, bytes: u64, duration: Duration) -> Self {
        let duration_ms = duration.as_millis() as u64;
        let secs = duration.as_secs_f64();

        let (pages_per_sec, kib_per_sec) = if secs > 0.0 {
            (pages as f64 / secs, bytes as f64 / 1024.0 / secs)
        } else {
            (0.0, 0.0)
        };

        let avg_page_ms = if pages > 0 {
            duration_ms as f64 / pages as f64
        } else {
            0.0
        };

        Self {
            pages,
            bytes,
            duration_ms,
            pages_per_sec,
            kib_per_sec,
            avg_page_ms,
        }
    }

    pub fn format(&self) -> String {
        format!(
            "fetched {} pages ({} bytes) in {}ms: {:.2} pages/sec, {:.2} KiB/sec, {:.2}ms per page",
            self.pages,
            self.bytes,
            self.duration_ms,
            self.pages_per_sec,
            self.kib_per_sec,
            self.avg_page_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fetch_metrics() {
        let metrics = FetchMetrics::new(20, 40 * 1024, Duration::from_secs(4));
        assert_eq!(metrics.pages_per_sec, 5.0);
        assert_eq!(metrics.kib_per_sec, 10.0);
        assert_eq!(metrics.avg_page_ms, 200.0);
        assert_eq!(
            metrics.format(),
            "fetched 20 pages (40960 bytes) in 4000ms: 5.00 pages/sec, 10.00 KiB/sec, 200.00ms per page"
        );
    }

    #[test]
    fn test_fetch_metrics_without_pages_or_time() {
        let metrics = FetchMetrics::new(0, 0, Duration::ZERO);
        assert_eq!(metrics.pages_per_sec, 0.0);
        assert_eq!(metrics.kib_per_sec, 0.0);
        assert_eq!(metrics.avg_page_ms, 0.0);
    }

    #[test]
    fn test_build_timer() {
        let timer = BuildTimer::start("https://example.org/");
        std::thread::sleep(Duration::from_millis(10));
        timer.stage("pages fetched");
        let elapsed = timer.finish_with_pages(3);
        assert!(elapsed >= Duration::from_millis(10));
    }
}
