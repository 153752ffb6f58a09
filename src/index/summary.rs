// file: src/index/summary.rs
// description: sentence splitting, snippet windows and query-focused bullet selection
// reference: extractive summarization heuristics

use crate::config::RetrievalConfig;
use crate::extractor::patterns::{
    BULLET_SEPARATOR, CODE_LIKE_SENTENCE, MARKUP_CHARS, NAV_WORDS, SENTENCE_PUNCTUATION,
    WHITESPACE, collapse_whitespace,
};
use crate::index::site_index::{SiteIndex, is_phrase_query};
use crate::models::PageEntry;
use crate::parser::tokenizer::significant_query_tokens;
use std::collections::HashSet;

const SNIPPET_LEAD_CHARS: usize = 80;
const SHORT_SENTENCE_CHARS: usize = 140;
const LONG_SENTENCE_CHARS: usize = 260;
const MAX_FORMATTED_BULLETS: usize = 4;
const MIN_BULLETS: usize = 2;

/// Sentences that are navigation residue or leaked markup/code.
pub fn is_junky_sentence(sentence: &str) -> bool {
    let sentence = sentence.trim();
    if sentence.is_empty() {
        return true;
    }

    let lower = sentence.to_lowercase();
    if lower.contains("[cdata[") {
        return true;
    }
    if CODE_LIKE_SENTENCE.is_match(sentence) || MARKUP_CHARS.is_match(sentence) {
        return true;
    }
    NAV_WORDS.find_iter(&lower).count() >= 4
}

pub fn split_into_sentences(text: &str, min_chars: usize) -> Vec<String> {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let clean = SENTENCE_PUNCTUATION.replace_all(&collapsed, "${1} ");
    let clean = clean.trim();
    if clean.is_empty() {
        return Vec::new();
    }

    let mut parts = split_after_terminators(clean);
    if parts.len() < 2 {
        parts = BULLET_SEPARATOR.split(clean).collect();
    }

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter(|part| part.chars().count() >= min_chars)
        .filter(|part| !is_junky_sentence(part))
        .map(str::to_string)
        .collect()
}

/// Splits after `.`, `!` or `?` when followed by a space.
fn split_after_terminators(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 0..bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') && bytes.get(i + 1) == Some(&b' ') {
            parts.push(&text[start..=i]);
            start = i + 1;
        }
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }

    parts
}

/// A window of `len` characters around the first occurrence of `term`.
pub fn make_snippet(text: &str, term: &str, len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let term = term.to_lowercase();
    let lower = text.to_lowercase();

    let found = if term.is_empty() {
        None
    } else {
        lower.find(&term).map(|byte| lower[..byte].chars().count())
    };

    match found {
        None => {
            let head: String = chars.iter().take(len).collect();
            if chars.len() > len {
                format!("{}…", head)
            } else {
                head
            }
        }
        Some(position) => {
            let start = position.saturating_sub(SNIPPET_LEAD_CHARS).min(chars.len());
            let end = (start + len).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            let prefix = if start > 0 { "…" } else { "" };
            let suffix = if start + len < chars.len() { "…" } else { "" };
            format!("{}{}{}", prefix, window, suffix)
        }
    }
}

pub fn format_bullets<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| collapse_whitespace(line.as_ref()))
        .filter(|line| !line.is_empty())
        .take(MAX_FORMATTED_BULLETS)
        .map(|line| format!("• {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct Summarizer<'a> {
    index: &'a SiteIndex,
    min_sentence_chars: usize,
    snippet_chars: usize,
}

impl<'a> Summarizer<'a> {
    pub fn new(index: &'a SiteIndex, config: &RetrievalConfig) -> Self {
        Self {
            index,
            min_sentence_chars: config.min_sentence_chars,
            snippet_chars: config.snippet_chars,
        }
    }

    /// Picks the sentences of `entry` that best answer `query`, at most `max_bullets`.
    pub fn pick_summary_bullets(
        &self,
        entry: &PageEntry,
        query: &str,
        max_bullets: usize,
    ) -> Vec<String> {
        let q = query.trim().to_lowercase();
        let tokens = significant_query_tokens(&q);

        let sentences = split_into_sentences(&entry.text, self.min_sentence_chars);
        if sentences.is_empty() {
            let term = tokens.first().map(String::as_str).unwrap_or("");
            let snippet = make_snippet(&entry.text, term, self.snippet_chars);
            return if snippet.is_empty() {
                Vec::new()
            } else {
                vec![snippet]
            };
        }

        let weights: Vec<(&str, f64)> = tokens
            .iter()
            .map(|token| (token.as_str(), self.index.idf(token)))
            .collect();
        let phrase = is_phrase_query(&q);

        let mut scored: Vec<(f64, &String)> = sentences
            .iter()
            .map(|sentence| {
                let lower = sentence.to_lowercase();
                let mut score = 0.0;

                for (token, weight) in &weights {
                    if lower.contains(token) {
                        score += 2.0 * weight;
                    }
                }

                if phrase && lower.contains(&q) {
                    score += 6.0;
                }

                let len = sentence.chars().count();
                if len <= SHORT_SENTENCE_CHARS {
                    score += 2.0;
                } else if len >= LONG_SENTENCE_CHARS {
                    score -= 2.0;
                }

                (score, sentence)
            })
            .filter(|(score, _)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut chosen = Vec::new();
        let mut seen = HashSet::new();
        for (_, sentence) in scored {
            if chosen.len() >= max_bullets {
                break;
            }
            if seen.insert(sentence.to_lowercase()) {
                chosen.push(sentence.clone());
            }
        }

        if chosen.len() < MIN_BULLETS {
            for sentence in sentences.iter().take(MIN_BULLETS) {
                if chosen.len() >= MIN_BULLETS {
                    break;
                }
                if seen.insert(sentence.to_lowercase()) {
                    chosen.push(sentence.clone());
                }
            }
        }

        chosen.truncate(max_bullets);
        chosen
    }
}
