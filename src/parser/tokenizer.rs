// file: src/parser/tokenizer.rs
// description: query and page tokenization with light stemming and synonym expansion
// reference: classic bag-of-words retrieval

use std::collections::HashSet;

/// Words that carry no retrieval signal. Checked after normalization.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "can", "could", "do", "does", "for",
    "from", "had", "has", "have", "how", "i", "if", "in", "into", "is", "it", "its", "me", "my",
    "of", "on", "or", "our", "ours", "please", "the", "their", "them", "then", "there", "they",
    "this", "to", "us", "was", "we", "what", "when", "where", "which", "who", "why", "will",
    "with", "you", "your",
];

const SYNONYMS: &[(&str, &[&str])] = &[
    (
        "membership",
        &["join", "member", "apply", "application", "register", "sign", "signup"],
    ),
    ("join", &["membership", "member", "apply", "application"]),
    ("register", &["registration", "signup", "sign", "apply"]),
    ("contact", &["email", "phone", "reach", "help", "support"]),
    (
        "governance",
        &["rules", "policy", "policies", "committee", "leadership"],
    ),
    ("contribution", &["monthly", "payment", "pay", "fee", "dues"]),
    ("monthly", &["contribution", "payment", "pay"]),
    ("ghana", &["gh", "accra"]),
    ("uk", &["united", "kingdom", "britain", "london"]),
];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

pub fn synonyms_for(token: &str) -> &'static [&'static str] {
    SYNONYMS
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, words)| *words)
        .unwrap_or(&[])
}

/// Strips one common English suffix. Tokens are ASCII, so byte length is char length.
pub fn normalize_token(token: &str) -> String {
    let len = token.len();
    if len > 4
        && let Some(stem) = token.strip_suffix("ing")
    {
        return stem.to_string();
    }
    if len > 3 {
        for suffix in ["ed", "es", "s"] {
            if let Some(stem) = token.strip_suffix(suffix) {
                return stem.to_string();
            }
        }
    }
    token.to_string()
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|piece| !piece.is_empty())
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Adds synonyms to the query tokens, dropping stop words. Order of first appearance is kept.
pub fn expand_query_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for raw in tokens {
        let token = normalize_token(raw.as_ref());
        if token.is_empty() || is_stop_word(&token) {
            continue;
        }
        let synonyms = synonyms_for(&token);
        if seen.insert(token.clone()) {
            out.push(token);
        }
        for synonym in synonyms {
            let synonym = normalize_token(synonym);
            if seen.insert(synonym.clone()) {
                out.push(synonym);
            }
        }
    }

    out
}

/// Expanded query terms long enough to be worth substring matching.
pub fn significant_query_tokens(query: &str) -> Vec<String> {
    expand_query_tokens(&tokenize(query))
        .into_iter()
        .filter(|token| token.len() >= 3 && !is_stop_word(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_token_suffixes() {
        assert_eq!(normalize_token("joining"), "join");
        assert_eq!(normalize_token("registered"), "register");
        assert_eq!(normalize_token("fees"), "fe");
        assert_eq!(normalize_token("members"), "member");
        assert_eq!(normalize_token("sing"), "sing");
        assert_eq!(normalize_token("bus"), "bus");
    }

    #[test]
    fn test_tokenize_splits_on_non_alphanumerics() {
        assert_eq!(
            tokenize("How do I JOIN? Monthly-fees (UK)!"),
            vec!["how", "do", "i", "join", "monthly", "fe", "uk"]
        );
    }

    #[test]
    fn test_tokenize_treats_non_ascii_as_separator() {
        assert_eq!(tokenize("café accra"), vec!["caf", "accra"]);
    }

    #[test]
    fn test_expand_query_tokens_adds_synonyms_and_drops_stop_words() {
        let expanded = expand_query_tokens(&tokenize("how can I join"));
        assert_eq!(
            expanded,
            vec!["join", "membership", "member", "apply", "application"]
        );
    }

    #[test]
    fn test_expand_query_tokens_deduplicates() {
        let expanded = expand_query_tokens(&["monthly", "contribution"]);
        assert_eq!(
            expanded,
            vec!["monthly", "contribution", "payment", "pay", "fee", "du"]
        );
    }

    #[test]
    fn test_significant_query_tokens_filters_short_terms() {
        let tokens = significant_query_tokens("uk");
        assert_eq!(tokens, vec!["united", "kingdom", "britain", "london"]);
    }
}
