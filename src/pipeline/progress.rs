// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for index builds
// reference: uses indicatif for progress bars and tracks fetch metrics

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub pages_listed: usize,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub pages_indexed: usize,
    pub total_bytes_fetched: u64,
    pub duration_secs: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.pages_fetched as f64 / self.duration_secs
    }

    pub fn bytes_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.total_bytes_fetched as f64 / self.duration_secs
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.pages_fetched + self.pages_failed;
        if total == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / total as f64) * 100.0
    }

    pub fn format_summary(&self) -> String {
        format!(
            "{} of {} pages indexed ({} failed, {:.1}% fetched) | {} bytes in {:.2}s",
            self.pages_indexed,
            self.pages_listed,
            self.pages_failed,
            self.success_rate(),
            self.total_bytes_fetched,
            self.duration_secs
        )
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    total_pages: usize,
    pages_fetched: Arc<AtomicUsize>,
    pages_failed: Arc<AtomicUsize>,
    pages_indexed: Arc<AtomicUsize>,
    bytes_fetched: Arc<AtomicU64>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_pages: usize) -> Self {
        Self::with_color(total_pages, true)
    }

    pub fn with_color(total_pages: usize, colored: bool) -> Self {
        Self::build(MultiProgress::new(), total_pages, colored)
    }

    /// Tracks counts without drawing anything.
    pub fn hidden(total_pages: usize) -> Self {
        Self::build(
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            total_pages,
            false,
        )
    }

    fn build(multi_progress: MultiProgress, total_pages: usize, colored: bool) -> Self {
        let main_bar = create_progress_bar(&multi_progress, total_pages as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            total_pages,
            pages_fetched: Arc::new(AtomicUsize::new(0)),
            pages_failed: Arc::new(AtomicUsize::new(0)),
            pages_indexed: Arc::new(AtomicUsize::new(0)),
            bytes_fetched: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_pages_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_pages_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_indexed_page(&self) {
        self.pages_indexed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn add_bytes_fetched(&self, bytes: u64) {
        self.bytes_fetched.fetch_add(bytes, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Index build complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            pages_listed: self.total_pages,
            pages_fetched: self.pages_fetched.load(Ordering::SeqCst),
            pages_failed: self.pages_failed.load(Ordering::SeqCst),
            pages_indexed: self.pages_indexed.load(Ordering::SeqCst),
            total_bytes_fetched: self.bytes_fetched.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs_f64(),
        }
    }

    fn update_detail_bar(&self) {
        let fetched = self.pages_fetched.load(Ordering::SeqCst);
        let failed = self.pages_failed.load(Ordering::SeqCst);

        let message = format!("Fetched: {} | Failed: {}", fetched, failed);

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}
