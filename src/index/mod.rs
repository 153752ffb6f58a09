// file: src/index/mod.rs
// description: page index and summarization module exports
// reference: internal module structure

pub mod site_index;
pub mod summary;

pub use site_index::{RankedPage, SiteIndex};
pub use summary::{Summarizer, format_bullets, make_snippet, split_into_sentences};
