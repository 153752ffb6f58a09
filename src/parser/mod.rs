// file: src/parser/mod.rs
// description: html reading and tokenization module exports
// reference: internal module structure

pub mod html;
pub mod tokenizer;

pub use html::{Element, HtmlDocument, Node, Selector};
pub use tokenizer::{expand_query_tokens, normalize_token, tokenize};
