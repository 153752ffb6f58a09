// file: src/models/search_result.rs
// description: Ranked page model with relevance scores
// reference: Used for ranked page listings and json output

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page path as listed in the manifest
    pub path: String,

    /// Absolute link to the page
    pub url: String,

    pub title: String,

    /// Relevance score (unbounded, higher is better)
    pub score: f64,

    /// Page text around the first significant query term
    pub preview: String,
}

impl SearchResult {
    pub fn new(path: String, url: String, title: String, score: f64, preview: String) -> Self {
        Self {
            path,
            url,
            title,
            score,
            preview,
        }
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_preview_chars: usize) -> String {
        let preview = if self.preview.chars().count() > max_preview_chars {
            let cut: String = self.preview.chars().take(max_preview_chars).collect();
            format!("{}...", cut)
        } else {
            self.preview.clone()
        };

        format!(
            "Score: {:.4} | {} ({})\n{}\n",
            self.score, self.title, self.url, preview
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary() {
        let result = SearchResult::new(
            "membership.html".to_string(),
            "https://example.org/membership.html".to_string(),
            "Membership".to_string(),
            8.5,
            "Members contribute monthly to the welfare fund".to_string(),
        );

        let summary = result.format_summary(20);
        assert!(summary.contains("8.5000"));
        assert!(summary.contains("Membership (https://example.org/membership.html)"));
        assert!(summary.contains("Members contribute m..."));
    }

    #[test]
    fn test_format_summary_short_preview_untouched() {
        let result = SearchResult::new(
            "a.html".to_string(),
            "a.html".to_string(),
            "A".to_string(),
            1.0,
            "Short — text".to_string(),
        );

        assert!(result.format_summary(50).ends_with("Short — text\n"));
    }
}
