// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod builder;
mod progress;

pub use builder::IndexBuilder;
pub use progress::{PipelineStats, ProgressTracker};
