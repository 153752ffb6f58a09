// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod chat;
pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod index;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod repository;
pub mod utils;

pub use chat::{Intent, Responder, WELCOME_MESSAGE};
pub use config::{Config, FetchConfig, RetrievalConfig, SiteConfig};
pub use error::{ChatError, Result};
pub use exporter::{IndexSnapshot, JsonExporter};
pub use extractor::{ExtractedPage, PageExtractor};
pub use index::{RankedPage, SiteIndex, Summarizer};
pub use models::{PageEntry, PageRecord, Reply, ReplyKind, ReplyLink, SearchResult};
pub use pipeline::{IndexBuilder, PipelineStats, ProgressTracker};
pub use repository::{LinkResolver, Manifest, ManifestGenerator, SiteSource};
pub use utils::{BuildTimer, FetchMetrics, Validator};
