// file: src/extractor/patterns.rs
// description: compiled regex patterns for page cleanup, intent detection and reply fallbacks
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Page chrome and boilerplate lines
    pub static ref QUICK_LINKS_LINE: Regex = Regex::new(
        r"(?i)^quick\s+links\b"
    ).expect("QUICK_LINKS_LINE regex is valid");

    pub static ref COPYRIGHT_LINE: Regex = Regex::new(
        r"(?i)^copyright\b"
    ).expect("COPYRIGHT_LINE regex is valid");

    pub static ref COPYRIGHT_SYMBOL_LINE: Regex = Regex::new(
        r"^\s*©\s*\d{4}\b"
    ).expect("COPYRIGHT_SYMBOL_LINE regex is valid");

    pub static ref CDATA_LINE: Regex = Regex::new(
        r"(?i)^\[?cdata\["
    ).expect("CDATA_LINE regex is valid");

    pub static ref CODE_LIKE_LINE: Regex = Regex::new(
        r"(?i)(websocket|refreshcss|function\s*\(|\bvar\b|=>|\{\s*\}|\}\s*\{|\}\s*$)"
    ).expect("CODE_LIKE_LINE regex is valid");

    // Sentence quality
    pub static ref CODE_LIKE_SENTENCE: Regex = Regex::new(
        r"(?i)(function\s*\(|\bvar\b|=>|\{\s*\}|\}\s*$)"
    ).expect("CODE_LIKE_SENTENCE regex is valid");

    pub static ref MARKUP_CHARS: Regex = Regex::new(
        r"[{}<>]"
    ).expect("MARKUP_CHARS regex is valid");

    pub static ref NAV_WORDS: Regex = Regex::new(
        r"(?i)\b(home|about\s+us|membership|governance|contact\s+us)\b"
    ).expect("NAV_WORDS regex is valid");

    pub static ref BULLET_SEPARATOR: Regex = Regex::new(
        r"\s+(?:-|\x{2013}|\x{2014}|\x{2022})\s+"
    ).expect("BULLET_SEPARATOR regex is valid");

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).expect("WHITESPACE regex is valid");

    pub static ref SENTENCE_PUNCTUATION: Regex = Regex::new(
        r"\s*([.!?])\s*"
    ).expect("SENTENCE_PUNCTUATION regex is valid");

    // Conversation
    pub static ref GREETING: Regex = Regex::new(
        r"^(hi|hello|hey|yo|good\s*(morning|afternoon|evening))\b"
    ).expect("GREETING regex is valid");

    pub static ref INTENT_HOW_IT_WORKS: Regex = Regex::new(
        r"\bhow\b.*\bwork\b|\bhow\s+it\s+works\b|\bprocess\b|\bsteps\b"
    ).expect("INTENT_HOW_IT_WORKS regex is valid");

    pub static ref INTENT_CONTACT: Regex = Regex::new(
        r"\b(contact|email|phone|reach|support|help)\b"
    ).expect("INTENT_CONTACT regex is valid");

    pub static ref INTENT_MEMBERSHIP: Regex = Regex::new(
        r"\b(join|membership|member|apply|application|register|registration|signup|sign\s*up)\b"
    ).expect("INTENT_MEMBERSHIP regex is valid");

    pub static ref INTENT_CONTRIBUTION: Regex = Regex::new(
        r"\b(monthly|contribution|pay|payment|fee|dues)\b"
    ).expect("INTENT_CONTRIBUTION regex is valid");

    pub static ref INTENT_GOVERNANCE: Regex = Regex::new(
        r"\b(governance|policy|policies|committee|leadership|rules)\b"
    ).expect("INTENT_GOVERNANCE regex is valid");

    pub static ref INTENT_COMMUNITY_SUPPORT: Regex = Regex::new(
        r"\b(community|support|donate|donation|fund|funding|sponsor|sponsorship)\b"
    ).expect("INTENT_COMMUNITY_SUPPORT regex is valid");

    pub static ref MENTIONS_GHANA: Regex = Regex::new(
        r"\b(ghana|gh)\b"
    ).expect("MENTIONS_GHANA regex is valid");

    pub static ref MENTIONS_UK: Regex = Regex::new(
        r"\b(uk|united\s+kingdom)\b"
    ).expect("MENTIONS_UK regex is valid");

    pub static ref MENTIONS_UK_WORD: Regex = Regex::new(
        r"\buk\b"
    ).expect("MENTIONS_UK_WORD regex is valid");

    // Region boosts while ranking
    pub static ref QUERY_GHANA: Regex = Regex::new(
        r"\bghana\b"
    ).expect("QUERY_GHANA regex is valid");

    pub static ref PAGE_UK: Regex = Regex::new(
        r"(uk|united kingdom)"
    ).expect("PAGE_UK regex is valid");

    // Keyword fallbacks when nothing ranks
    pub static ref FALLBACK_CONTACT: Regex = Regex::new(
        r"contact|email|phone|reach|help"
    ).expect("FALLBACK_CONTACT regex is valid");

    pub static ref FALLBACK_MEMBERSHIP: Regex = Regex::new(
        r"membership|join|apply|member"
    ).expect("FALLBACK_MEMBERSHIP regex is valid");
}

/// Lines that are site chrome or leaked script rather than page content.
pub fn is_noise_line(line: &str) -> bool {
    QUICK_LINKS_LINE.is_match(line)
        || COPYRIGHT_LINE.is_match(line)
        || COPYRIGHT_SYMBOL_LINE.is_match(line)
        || CDATA_LINE.is_match(line)
        || CODE_LIKE_LINE.is_match(line)
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}
