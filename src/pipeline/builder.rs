// file: src/pipeline/builder.rs
// description: fetches every manifest page concurrently and builds the site index
// reference: bounded concurrent fetching with futures streams

use crate::config::Config;
use crate::error::Result;
use crate::extractor::PageExtractor;
use crate::index::SiteIndex;
use crate::models::PageEntry;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::repository::SiteSource;
use crate::utils::{BuildTimer, FetchMetrics, Validator};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct IndexBuilder {
    parallel_workers: usize,
    extractor: PageExtractor,
    show_progress: bool,
    colored: bool,
}

impl IndexBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            parallel_workers: config.fetch.parallel_workers.max(1),
            extractor: PageExtractor::new(),
            show_progress: false,
            colored: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool, colored: bool) -> Self {
        self.show_progress = show_progress;
        self.colored = colored;
        self
    }

    /// Fails only when the manifest cannot be read. Pages that fail to fetch, or
    /// that have no text, are logged and left out.
    pub async fn build(&self, source: &SiteSource) -> Result<(SiteIndex, PipelineStats)> {
        let timer = BuildTimer::start(&source.location());

        let manifest = source.fetch_manifest().await?;
        info!(
            "Manifest lists {} pages at {}",
            manifest.len(),
            source.location()
        );

        if manifest.is_empty() {
            warn!("Manifest is empty, nothing to index");
            timer.finish();
            return Ok((SiteIndex::default(), PipelineStats::new()));
        }

        let progress = if self.show_progress {
            ProgressTracker::with_color(manifest.len(), self.colored)
        } else {
            ProgressTracker::hidden(manifest.len())
        };

        info!(
            "Fetching pages with {} concurrent requests...",
            self.parallel_workers
        );
        let progress_ref = &progress;
        let fetched: Vec<(&String, Option<String>)> = stream::iter(manifest.pages.iter())
            .map(|path| async move {
                match source.fetch_page(path).await {
                    Ok(html) => {
                        progress_ref.inc_pages_fetched();
                        progress_ref.add_bytes_fetched(html.len() as u64);
                        (path, Some(html))
                    }
                    Err(e) => {
                        progress_ref.inc_pages_failed();
                        warn!("Failed to fetch page {}: {}", path, e);
                        (path, None)
                    }
                }
            })
            .buffered(self.parallel_workers)
            .collect()
            .await;
        timer.stage("pages fetched");

        let resolver = source.resolver();
        let mut pages = Vec::with_capacity(fetched.len());
        for (path, html) in fetched {
            let Some(html) = html else {
                continue;
            };

            progress.set_message(format!("Extracting {}", path));
            let extracted = self.extractor.extract(path, &html);
            if let Err(e) = Validator::validate_content_not_empty(&extracted.text) {
                warn!("Skipping page {}: {}", path, e);
                continue;
            }

            debug!(
                "Extracted {} chars from {} ({})",
                extracted.text.len(),
                path,
                extracted.title
            );
            pages.push(PageEntry::new(
                path.clone(),
                resolver.resolve(path),
                extracted.title,
                extracted.text,
            ));
            progress.add_indexed_page();
        }

        progress.finish();
        let stats = progress.get_stats();
        let elapsed = timer.finish_with_pages(pages.len());
        debug!(
            "{}",
            FetchMetrics::new(stats.pages_fetched, stats.total_bytes_fetched, elapsed).format()
        );

        let index = SiteIndex::new(pages);
        log_build_summary(&stats, elapsed);
        Ok((index, stats))
    }
}

fn log_build_summary(stats: &PipelineStats, elapsed: Duration) {
    info!("=== Index Build Summary ===");
    info!("Duration: {:.2} seconds", elapsed.as_secs_f64());
    info!("Pages listed: {}", stats.pages_listed);
    info!("Pages fetched: {}", stats.pages_fetched);
    info!("Pages failed: {}", stats.pages_failed);
    info!("Pages indexed: {}", stats.pages_indexed);
    info!("Bytes fetched: {}", stats.total_bytes_fetched);
    info!("Success rate: {:.2}%", stats.success_rate());
}
