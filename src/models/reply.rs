// file: src/models/reply.rs
// description: chatbot reply model with follow-up links
// reference: internal data structures

use crate::chat::intent::Intent;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplyKind {
    Greeting,
    Loading,
    Answer,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyLink {
    pub href: String,
    pub label: String,
}

impl ReplyLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }

    pub fn open_page(href: impl Into<String>) -> Self {
        Self::new(href, "Open page")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
    pub links: Vec<ReplyLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Reply {
    pub fn message(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            links: Vec::new(),
            intent: None,
            confidence: None,
        }
    }

    pub fn with_link(mut self, link: ReplyLink) -> Self {
        self.links.push(link);
        self
    }

    /// Plain-text rendering: the message, then the links.
    pub fn render(&self) -> String {
        let mut out = self.text.clone();
        let links: Vec<&ReplyLink> = self.links.iter().filter(|l| !l.href.is_empty()).collect();
        if links.is_empty() {
            return out;
        }

        out.push_str("\n\n");
        if links.len() > 1 {
            out.push_str("Related pages:\n");
        }
        let rendered: Vec<String> = links
            .iter()
            .map(|link| format!("  {}: {}", link.label, link.href))
            .collect();
        out.push_str(&rendered.join("\n"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_link() {
        let reply = Reply::message(ReplyKind::Fallback, "Try the contact page.")
            .with_link(ReplyLink::open_page("contact-us.html"));

        assert_eq!(
            reply.render(),
            "Try the contact page.\n\n  Open page: contact-us.html"
        );
    }

    #[test]
    fn test_render_multiple_links_adds_heading() {
        let reply = Reply::message(ReplyKind::Answer, "Answer")
            .with_link(ReplyLink::open_page("a.html"))
            .with_link(ReplyLink::new("b.html", "B"));

        let rendered = reply.render();
        assert!(rendered.contains("Related pages:\n  Open page: a.html\n  B: b.html"));
    }

    #[test]
    fn test_render_without_links() {
        let reply = Reply::message(ReplyKind::Greeting, "Hi");
        assert_eq!(reply.render(), "Hi");
    }

    #[test]
    fn test_serializes_kind_in_kebab_case() {
        let reply = Reply::message(ReplyKind::Loading, "wait");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["kind"], "loading");
        assert!(json.get("intent").is_none());
    }
}
