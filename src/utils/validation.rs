// file: src/utils/validation.rs
// description: input validation helpers for site locations, queries and page content
// reference: input validation patterns

use crate::error::{ChatError, Result};
use std::path::Path;

pub const MAX_QUERY_CHARS: usize = 500;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ChatError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(ChatError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ChatError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(ChatError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_query(query: &str) -> Result<()> {
        Self::validate_content_not_empty(query)
            .map_err(|_| ChatError::Validation("Question is empty".to_string()))?;

        let length = query.chars().count();
        if length > MAX_QUERY_CHARS {
            return Err(ChatError::Validation(format!(
                "Question too long ({} characters, max {})",
                length, MAX_QUERY_CHARS
            )));
        }

        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((byte, _)) => format!("{}...", &text[..byte]),
        }
    }
}
