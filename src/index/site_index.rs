// file: src/index/site_index.rs
// description: in-memory page index with idf weighting, ranking and confidence estimation
// reference: tf-idf ranking over a small fixed corpus

use crate::extractor::patterns::{MENTIONS_UK, PAGE_UK, QUERY_GHANA};
use crate::index::summary::make_snippet;
use crate::models::{PageEntry, PageRecord, SearchResult};
use crate::parser::tokenizer::{expand_query_tokens, significant_query_tokens, tokenize};
use std::collections::HashMap;
use tracing::debug;

const TITLE_WEIGHT: f64 = 4.0;
const BODY_WEIGHT: f64 = 1.5;
const TITLE_PHRASE_BOOST: f64 = 12.0;
const BODY_PHRASE_BOOST: f64 = 7.0;
const REGION_BOOST: f64 = 3.0;

const GAP_WEIGHT: f64 = 0.65;
const COVERAGE_WEIGHT: f64 = 0.35;

#[derive(Debug, Clone, Copy)]
pub struct RankedPage<'a> {
    pub score: f64,
    pub entry: &'a PageEntry,
}

#[derive(Debug, Clone, Default)]
pub struct SiteIndex {
    pages: Vec<PageEntry>,
    doc_freq: HashMap<String, usize>,
}

/// A multi-word query long enough to be matched as a phrase.
pub fn is_phrase_query(query: &str) -> bool {
    query.chars().count() >= 6 && query.contains(' ')
}

impl SiteIndex {
    pub fn new(pages: Vec<PageEntry>) -> Self {
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for page in &pages {
            for token in page.unique_tokens() {
                *doc_freq.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        debug!(
            "Indexed {} pages with {} distinct terms",
            pages.len(),
            doc_freq.len()
        );

        Self { pages, doc_freq }
    }

    pub fn from_records(records: Vec<PageRecord>) -> Self {
        Self::new(records.into_iter().map(PageEntry::from_record).collect())
    }

    pub fn pages(&self) -> &[PageEntry] {
        &self.pages
    }

    pub fn doc_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.doc_freq.len()
    }

    pub fn document_frequency(&self, token: &str) -> usize {
        self.doc_freq.get(token).copied().unwrap_or(0)
    }

    pub fn idf(&self, token: &str) -> f64 {
        let doc_count = self.doc_count();
        if doc_count == 0 {
            return 1.0;
        }
        let df = self.document_frequency(token);
        1.0 + ((doc_count as f64 + 1.0) / (df as f64 + 1.0)).ln()
    }

    /// Terms ordered by how many pages contain them, ties broken alphabetically.
    pub fn top_terms(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut terms: Vec<(&str, usize)> = self
            .doc_freq
            .iter()
            .map(|(token, df)| (token.as_str(), *df))
            .collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(limit);
        terms
    }

    pub fn rank_pages(&self, query: &str, limit: usize) -> Vec<RankedPage<'_>> {
        let q = query.trim().to_lowercase();
        let tokens = expand_query_tokens(&tokenize(&q));
        if tokens.is_empty() {
            return Vec::new();
        }

        let weights: Vec<(&str, f64)> = tokens
            .iter()
            .map(|token| (token.as_str(), self.idf(token)))
            .collect();
        let phrase = is_phrase_query(&q);
        let wants_ghana = QUERY_GHANA.is_match(&q);
        let wants_uk = MENTIONS_UK.is_match(&q);

        let mut results: Vec<RankedPage<'_>> = self
            .pages
            .iter()
            .filter_map(|entry| {
                let mut score = 0.0;

                for (token, weight) in &weights {
                    let title_tf = entry.title_tf(token);
                    let body_tf = entry.text_tf(token);
                    if title_tf > 0 {
                        score += title_tf as f64 * TITLE_WEIGHT * weight;
                    }
                    if body_tf > 0 {
                        score += body_tf as f64 * BODY_WEIGHT * weight;
                    }
                }

                if phrase {
                    if entry.title_lower.contains(&q) {
                        score += TITLE_PHRASE_BOOST;
                    } else if entry.text_lower.contains(&q) {
                        score += BODY_PHRASE_BOOST;
                    }
                }

                if wants_ghana || wants_uk {
                    let haystack = format!("{} {}", entry.title_lower, entry.text_lower);
                    if wants_ghana && haystack.contains("ghana") {
                        score += REGION_BOOST;
                    }
                    if wants_uk && PAGE_UK.is_match(&haystack) {
                        score += REGION_BOOST;
                    }
                }

                (score > 0.0).then_some(RankedPage { score, entry })
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);
        results
    }

    pub fn score_query(&self, query: &str) -> Option<RankedPage<'_>> {
        self.rank_pages(query, 1).into_iter().next()
    }

    /// Ranked pages as owned results, each with a snippet around the first query term.
    pub fn search(&self, query: &str, limit: usize, snippet_chars: usize) -> Vec<SearchResult> {
        let tokens = significant_query_tokens(query);
        let term = tokens.first().map(String::as_str).unwrap_or("");

        self.rank_pages(query, limit)
            .into_iter()
            .map(|ranked| {
                let entry = ranked.entry;
                SearchResult::new(
                    entry.path.clone(),
                    entry.url.clone(),
                    entry.title.clone(),
                    ranked.score,
                    make_snippet(&entry.text, term, snippet_chars),
                )
            })
            .collect()
    }

    /// Blends how clearly the top page beats the runner-up with how many query terms it covers.
    pub fn estimate_confidence(ranked: &[RankedPage<'_>], query: &str) -> f64 {
        let Some(best) = ranked.first() else {
            return 0.0;
        };
        if best.score <= 0.0 {
            return 0.0;
        }

        let second = ranked.get(1).map(|r| r.score).unwrap_or(0.0);
        let gap_ratio = if second > 0.0 {
            best.score / (best.score + second)
        } else {
            1.0
        };

        let tokens = significant_query_tokens(query);
        let coverage = if tokens.is_empty() {
            1.0
        } else {
            let matched = tokens
                .iter()
                .filter(|token| best.entry.contains_token(token))
                .count();
            matched as f64 / tokens.len() as f64
        };

        (gap_ratio * GAP_WEIGHT + coverage * COVERAGE_WEIGHT).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str, title: &str, text: &str) -> PageEntry {
        PageEntry::new(
            path.to_string(),
            format!("https://example.org/{}", path),
            title.to_string(),
            text.to_string(),
        )
    }

    fn sample_index() -> SiteIndex {
        SiteIndex::new(vec![
            page(
                "index.html",
                "Home",
                "Welcome to our community association serving families in Ghana and the UK.",
            ),
            page(
                "membership.html",
                "Membership",
                "Become a member by completing the registration form. Members join for life.",
            ),
            page(
                "contact-us.html",
                "Contact Us",
                "Email the committee or phone the office for help.",
            ),
            page(
                "monthly-contribution.html",
                "Monthly Contribution",
                "Each member pays a monthly contribution into the welfare fund.",
            ),
        ])
    }

    #[test]
    fn test_idf_formula() {
        let index = sample_index();
        // "member" appears in two of four pages
        let expected = 1.0 + (5.0f64 / 3.0).ln();
        assert!((index.idf("member") - expected).abs() < 1e-12);
        // unseen term
        let unseen = 1.0 + (5.0f64).ln();
        assert!((index.idf("zebra") - unseen).abs() < 1e-12);
    }

    #[test]
    fn test_idf_of_empty_index_is_one() {
        let index = SiteIndex::default();
        assert_eq!(index.idf("anything"), 1.0);
        assert!(index.rank_pages("membership", 3).is_empty());
    }

    #[test]
    fn test_title_matches_outrank_body_matches() {
        let index = sample_index();
        let ranked = index.rank_pages("membership", 3);
        assert_eq!(ranked[0].entry.path, "membership.html");
    }

    #[test]
    fn test_scores_are_sorted_and_limited() {
        let index = sample_index();
        let ranked = index.rank_pages("member contribution", 2);
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_stop_word_only_query_has_no_results() {
        let index = sample_index();
        assert!(index.rank_pages("what is the", 3).is_empty());
        assert!(index.score_query("   ").is_none());
    }

    #[test]
    fn test_phrase_boost_in_title() {
        let index = sample_index();
        let with_phrase = index.score_query("monthly contribution").unwrap();
        assert_eq!(with_phrase.entry.path, "monthly-contribution.html");

        let tokens_only: f64 = ["monthly", "contribution", "payment", "pay", "fee", "du"]
            .iter()
            .map(|t| {
                let e = with_phrase.entry;
                (e.title_tf(t) as f64 * 4.0 + e.text_tf(t) as f64 * 1.5) * index.idf(t)
            })
            .sum();
        assert!((with_phrase.score - (tokens_only + 12.0)).abs() < 1e-9);
    }

    #[test]
    fn test_region_boost_applies_to_matching_pages() {
        let index = sample_index();
        let ranked = index.rank_pages("ghana", 4);
        assert_eq!(ranked[0].entry.path, "index.html");
    }

    #[test]
    fn test_confidence_bounds() {
        let index = sample_index();
        assert_eq!(SiteIndex::estimate_confidence(&[], "membership"), 0.0);

        let ranked = index.rank_pages("registration form", 3);
        let confidence = SiteIndex::estimate_confidence(&ranked, "registration form");
        assert!((0.0..=1.0).contains(&confidence));
    }

    #[test]
    fn test_confidence_single_result_full_coverage() {
        let index = SiteIndex::new(vec![page("a.html", "Alpha", "Committee meets weekly.")]);
        let ranked = index.rank_pages("committee", 3);
        assert_eq!(ranked.len(), 1);
        let confidence = SiteIndex::estimate_confidence(&ranked, "committee");
        assert!((confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_uk_region_boost() {
        let index = SiteIndex::new(vec![
            page("office.html", "Office", "Our office is in London."),
            page("members.html", "Members", "Members live in the United Kingdom."),
        ]);
        let ranked = index.rank_pages("uk", 2);

        assert_eq!(ranked[0].entry.path, "members.html");
        let boosted = 1.5 * (index.idf("unit") + index.idf("kingdom")) + 3.0;
        assert!((ranked[0].score - boosted).abs() < 1e-12);

        assert_eq!(ranked[1].entry.path, "office.html");
        let plain = 1.5 * index.idf("london");
        assert!((ranked[1].score - plain).abs() < 1e-12);
    }

    #[test]
    fn test_phrase_boost_in_body() {
        let index = SiteIndex::new(vec![page(
            "events.html",
            "Events",
            "We hold a summer picnic every July.",
        )]);

        // one page holding every term gives idf 1.0
        let phrase = index.score_query("summer picnic").unwrap();
        assert!((phrase.score - (1.5 + 1.5 + 7.0)).abs() < 1e-12);

        let scattered = index.score_query("picnic summer").unwrap();
        assert!((scattered.score - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_with_runner_up() {
        let best = page("a.html", "Alpha", "Committee meets weekly.");
        let second = page("b.html", "Beta", "Committee notes.");
        let ranked = [
            RankedPage {
                score: 3.0,
                entry: &best,
            },
            RankedPage {
                score: 1.0,
                entry: &second,
            },
        ];

        // gap 3 / (3 + 1), two of three terms covered
        let confidence =
            SiteIndex::estimate_confidence(&ranked, "committee weekly treasurer");
        let expected = 0.75 * 0.65 + (2.0 / 3.0) * 0.35;
        assert!((confidence - expected).abs() < 1e-12);
    }

    #[test]
    fn test_search_returns_snippets() {
        let index = sample_index();
        let results = index.search("welfare fund", 2, 220);
        assert_eq!(results[0].path, "monthly-contribution.html");
        assert!(results[0].preview.contains("welfare fund"));
        assert!(results.len() <= 2);
    }

    #[test]
    fn test_top_terms() {
        let index = sample_index();
        let top = index.top_terms(1);
        assert_eq!(top, vec![("member", 2)]);
    }
}
