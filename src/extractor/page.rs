// file: src/extractor/page.rs
// description: clean title and body text extraction from rendered site pages
// reference: main-content heuristics used by reader views

use crate::extractor::patterns::{collapse_whitespace, is_noise_line};
use crate::parser::html::{HtmlDocument, Selector};
use std::collections::HashSet;
use tracing::debug;

/// Candidate containers for the page's main content, in priority order.
const MAIN_SELECTORS: &str = "main, [role=\"main\"], #content, .content";

/// Subtrees that hold navigation, widgets or code instead of content.
const REMOVED_SELECTORS: &str = "script, style, noscript, svg, canvas, iframe, nav, header, \
     footer, form, button, #site-chatbot, .chatbot, .navbar, .footer, .hamburger, .dropdown";

const STEP_LABEL_SELECTOR: &str = ".how-step__label";

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    pub title: String,
    pub text: String,
}

pub struct PageExtractor {
    main_selectors: Vec<Selector>,
    removed_selectors: Vec<Selector>,
    step_label: Selector,
}

impl PageExtractor {
    pub fn new() -> Self {
        Self {
            main_selectors: Selector::parse_list(MAIN_SELECTORS),
            removed_selectors: Selector::parse_list(REMOVED_SELECTORS),
            step_label: Selector::Class(
                STEP_LABEL_SELECTOR.trim_start_matches('.').to_string(),
            ),
        }
    }

    pub fn extract(&self, path: &str, html: &str) -> ExtractedPage {
        let doc = HtmlDocument::parse(html);

        let title = doc.title().unwrap_or_else(|| path.to_string());

        let mut text = self.clean_text(&doc);
        if text.is_empty() {
            debug!("No main content found in {}, using whole body", path);
            let body = doc.body().unwrap_or_else(|| doc.root());
            text = collapse_whitespace(&body.inner_text().replace('\u{a0}', " "));
        }

        ExtractedPage { title, text }
    }

    fn clean_text(&self, doc: &HtmlDocument) -> String {
        let main = self
            .main_selectors
            .iter()
            .find_map(|selector| doc.select_first(selector))
            .or_else(|| doc.body())
            .unwrap_or_else(|| doc.root());

        let step_labels: Vec<String> = main
            .select_all(&self.step_label)
            .into_iter()
            .map(|label| collapse_whitespace(&label.inner_text()))
            .filter(|label| !label.is_empty())
            .collect();
        let step_prefix = if step_labels.len() >= 2 {
            format!("Key steps: {}. ", step_labels.join(" → "))
        } else {
            String::new()
        };

        let rendered = main
            .inner_text_excluding(&self.removed_selectors)
            .replace('\u{a0}', " ");

        let mut seen = HashSet::new();
        let lines: Vec<&str> = rendered
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| seen.insert(line.to_lowercase()))
            .filter(|line| !is_noise_line(line))
            .collect();

        let compact = collapse_whitespace(&lines.join(" "));
        format!("{}{}", step_prefix, compact).trim().to_string()
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MEMBERSHIP_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title> Membership | Anidaso </title><script>var x = 1;</script></head>
<body>
  <header class="navbar"><nav><a href="index.html">Home</a><a href="membership.html">Membership</a></nav></header>
  <main>
    <h1>Become a member</h1>
    <p>Membership is open to everyone&nbsp;living in Ghana or the UK.</p>
    <p>Membership is open to everyone living in Ghana or the UK.</p>
    <div class="how-step"><span class="how-step__label">Register</span></div>
    <div class="how-step"><span class="how-step__label">Pay monthly</span></div>
    <form><button>Submit</button></form>
    <p>Quick links</p>
    <div id="site-chatbot"><p>Ask the bot</p></div>
  </main>
  <footer class="footer">© 2025 Anidaso</footer>
</body>
</html>"#;

    #[test]
    fn test_extracts_title_and_main_content() {
        let extractor = PageExtractor::new();
        let page = extractor.extract("membership.html", MEMBERSHIP_PAGE);

        assert_eq!(page.title, "Membership | Anidaso");
        assert_eq!(
            page.text,
            "Key steps: Register → Pay monthly. Become a member \
             Membership is open to everyone living in Ghana or the UK. Register Pay monthly"
        );
    }

    #[test]
    fn test_falls_back_to_path_and_body() {
        let extractor = PageExtractor::new();
        let page = extractor.extract("about.html", "<body><nav>Only navigation</nav></body>");

        assert_eq!(page.title, "about.html");
        assert_eq!(page.text, "Only navigation");
    }

    #[test]
    fn test_role_main_is_used_when_no_main_element() {
        let extractor = PageExtractor::new();
        let page = extractor.extract(
            "contact-us.html",
            r#"<body><div>Sidebar</div><div role="main"><p>Email us any time.</p></div></body>"#,
        );

        assert_eq!(page.text, "Email us any time.");
    }

    #[test]
    fn test_single_step_label_has_no_prefix() {
        let extractor = PageExtractor::new();
        let page = extractor.extract(
            "how-it-works.html",
            r#"<main><p><span class="how-step__label">Register</span></p><p>Then wait.</p></main>"#,
        );

        assert_eq!(page.text, "Register Then wait.");
    }

    #[test]
    fn test_title_without_head_stays_out_of_text() {
        let extractor = PageExtractor::new();
        let page = extractor.extract("a.html", "<title>About Page</title><p>Body text here.</p>");

        assert_eq!(page.title, "About Page");
        assert_eq!(page.text, "Body text here.");
    }

    #[test]
    fn test_deeply_nested_page_is_extracted() {
        let html = format!(
            "<main>{}deep text{}</main>",
            "<div>".repeat(50_000),
            "</div>".repeat(50_000)
        );
        let page = PageExtractor::new().extract("deep.html", &html);

        assert_eq!(page.title, "deep.html");
        assert_eq!(page.text, "deep text");
    }
}
