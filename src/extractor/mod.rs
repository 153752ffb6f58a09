// file: src/extractor/mod.rs
// description: page content extraction module exports
// reference: internal module structure

pub mod page;
pub mod patterns;

pub use page::{ExtractedPage, PageExtractor};
