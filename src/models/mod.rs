// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod reply;
pub mod search_result;

pub use document::{PageEntry, PageRecord};
pub use reply::{Reply, ReplyKind, ReplyLink};
pub use search_result::SearchResult;
