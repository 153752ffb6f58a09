// file: src/models/document.rs
// description: indexed page model with per-field token counts and content hashing
// reference: internal data structures

use crate::parser::tokenizer::{is_stop_word, tokenize};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};

/// The persisted form of a page: everything needed to rebuild a [`PageEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub path: String,
    pub url: String,
    pub title: String,
    pub text: String,
    pub content_hash: String,
}

#[derive(Debug, Clone)]
pub struct PageEntry {
    pub path: String,
    pub url: String,
    pub title: String,
    pub text: String,
    pub title_lower: String,
    pub text_lower: String,
    pub content_hash: String,
    title_counts: HashMap<String, usize>,
    text_counts: HashMap<String, usize>,
}

impl PageEntry {
    pub fn new(path: String, url: String, title: String, text: String) -> Self {
        let content_hash = Self::compute_hash(&title, &text);
        let title_lower = title.to_lowercase();
        let text_lower = text.to_lowercase();
        let title_counts = count_tokens(&title);
        let text_counts = count_tokens(&text);

        Self {
            path,
            url,
            title,
            text,
            title_lower,
            text_lower,
            content_hash,
            title_counts,
            text_counts,
        }
    }

    pub fn from_record(record: PageRecord) -> Self {
        Self::new(record.path, record.url, record.title, record.text)
    }

    pub fn to_record(&self) -> PageRecord {
        PageRecord {
            path: self.path.clone(),
            url: self.url.clone(),
            title: self.title.clone(),
            text: self.text.clone(),
            content_hash: self.content_hash.clone(),
        }
    }

    pub fn title_tf(&self, token: &str) -> usize {
        self.title_counts.get(token).copied().unwrap_or(0)
    }

    pub fn text_tf(&self, token: &str) -> usize {
        self.text_counts.get(token).copied().unwrap_or(0)
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.title_tf(token) + self.text_tf(token) > 0
    }

    /// Distinct non-stop-word tokens across title and body.
    pub fn unique_tokens(&self) -> BTreeSet<&str> {
        self.title_counts
            .keys()
            .chain(self.text_counts.keys())
            .map(String::as_str)
            .collect()
    }

    /// Lowercased title and path, used to match intent page hints.
    pub fn hint_haystack(&self) -> String {
        format!("{} {}", self.title_lower, self.path.to_lowercase())
    }

    fn compute_hash(title: &str, text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(title.as_bytes());
        hasher.update([0u8]);
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn count_tokens(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        if is_stop_word(&token) {
            continue;
        }
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}
