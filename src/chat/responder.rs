// file: src/chat/responder.rs
// description: turns a visitor question into a reply with summary bullets and page links
// reference: retrieval-backed faq assistants

use crate::chat::intent::Intent;
use crate::config::{Config, RetrievalConfig, SiteConfig};
use crate::extractor::patterns::{FALLBACK_CONTACT, FALLBACK_MEMBERSHIP, GREETING};
use crate::index::{SiteIndex, Summarizer, format_bullets};
use crate::models::{Reply, ReplyKind, ReplyLink};
use crate::repository::LinkResolver;
use tracing::debug;

const MAX_RELATED_LINKS: usize = 2;

pub const WELCOME_MESSAGE: &str =
    "Hi, I can help with site questions. Try asking about membership, how it works, or contact details.";

const LOADING_MESSAGE: &str = "I am still loading site content. Please try again in a moment.";

const REPHRASE_HINT: &str = "If this isn’t quite what you meant, try rephrasing with 1–2 specific \
     keywords (e.g., “membership UK”, “monthly contribution”, “contact”).";

pub struct Responder<'a> {
    index: &'a SiteIndex,
    links: &'a LinkResolver,
    site: &'a SiteConfig,
    retrieval: &'a RetrievalConfig,
}

impl<'a> Responder<'a> {
    pub fn new(index: &'a SiteIndex, links: &'a LinkResolver, config: &'a Config) -> Self {
        Self {
            index,
            links,
            site: &config.site,
            retrieval: &config.retrieval,
        }
    }

    pub fn respond(&self, query: &str) -> Reply {
        let q = query.trim().to_lowercase();

        if GREETING.is_match(&q) {
            return Reply::message(
                ReplyKind::Greeting,
                format!(
                    "Hi there, welcome to {}. How can I help you today?",
                    self.site.name
                ),
            );
        }

        if self.index.is_empty() {
            return Reply::message(ReplyKind::Loading, LOADING_MESSAGE);
        }

        let ranked = self.index.rank_pages(query, self.retrieval.rank_limit);
        let intent = Intent::detect(query);
        let Some(picked) = intent.pick_best(&ranked) else {
            return self.fallback(&q);
        };

        let best = picked.entry;
        let confidence = SiteIndex::estimate_confidence(&ranked, query);
        debug!(
            "Query {:?}: intent={}, page={}, score={:.3}, confidence={:.3}",
            query, intent, best.path, picked.score, confidence
        );

        let summarizer = Summarizer::new(self.index, self.retrieval);
        let bullets = summarizer.pick_summary_bullets(best, query, self.retrieval.max_bullets);
        let bullet_text = format_bullets(&bullets);

        let mut text = String::new();
        if let Some(intro) = intent.intro(&self.site.name) {
            text.push_str(&intro);
        }
        if !best.title.is_empty() {
            append_section(&mut text, &format!("Based on “{}”:", best.title), "\n");
        }
        if !bullet_text.is_empty() {
            append_section(&mut text, &bullet_text, "\n");
        }

        if let Some(next) = intent.next_step() {
            append_section(&mut text, next, "\n\n");
        } else if confidence < self.retrieval.confidence_threshold {
            append_section(&mut text, REPHRASE_HINT, "\n\n");
        }

        let mut links = vec![ReplyLink::open_page(best.url.clone())];
        links.extend(
            ranked
                .iter()
                .filter(|other| other.entry.path != best.path)
                .take(MAX_RELATED_LINKS)
                .map(|other| {
                    let label = if other.entry.title.is_empty() {
                        other.entry.path.clone()
                    } else {
                        other.entry.title.clone()
                    };
                    ReplyLink::new(other.entry.url.clone(), label)
                }),
        );

        Reply {
            kind: ReplyKind::Answer,
            text,
            links,
            intent: Some(intent),
            confidence: Some(confidence),
        }
    }

    fn fallback(&self, q: &str) -> Reply {
        let contact = self.links.resolve(&self.site.contact_page);

        if FALLBACK_CONTACT.is_match(q) {
            Reply::message(
                ReplyKind::Fallback,
                format!(
                    "Looks like you’re trying to contact {}. The Contact page is the best starting point.",
                    self.site.name
                ),
            )
            .with_link(ReplyLink::open_page(contact))
        } else if FALLBACK_MEMBERSHIP.is_match(q) {
            Reply::message(
                ReplyKind::Fallback,
                "It sounds like you’re asking about membership. The Membership page has the steps and options.",
            )
            .with_link(ReplyLink::open_page(
                self.links.resolve(&self.site.membership_page),
            ))
        } else {
            Reply::message(
                ReplyKind::Fallback,
                "I couldn’t find a direct match for that. Try rephrasing with a couple of specific \
                 words (like “membership UK” or “monthly contribution”), or use the Contact page.",
            )
            .with_link(ReplyLink::open_page(contact))
        }
    }
}

fn append_section(text: &mut String, section: &str, separator: &str) {
    if !text.is_empty() {
        text.push_str(separator);
    }
    text.push_str(section);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageEntry;

    fn page(path: &str, title: &str, text: &str) -> PageEntry {
        PageEntry::new(
            path.to_string(),
            format!("https://example.org/{}", path),
            title.to_string(),
            text.to_string(),
        )
    }

    fn site_index() -> SiteIndex {
        SiteIndex::new(vec![
            page(
                "index.html",
                "Home",
                "Welcome to our community association serving families in Ghana and the UK. \
                 We bring people together to support one another in good times and bad.",
            ),
            page(
                "membership.html",
                "Membership",
                "Become a member by completing the registration form with your details. \
                 Members join for life and gain a voice in every decision we make.",
            ),
            page(
                "contact-us.html",
                "Contact Us",
                "Email the committee or phone the office whenever you need help or advice.",
            ),
        ])
    }

    fn resolver() -> LinkResolver {
        LinkResolver::from_base_url("https://example.org/").unwrap()
    }

    #[test]
    fn test_greeting() {
        let index = site_index();
        let links = resolver();
        let config = Config::default_config();
        let reply = Responder::new(&index, &links, &config).respond("Hello!");

        assert_eq!(reply.kind, ReplyKind::Greeting);
        assert!(reply.text.contains("welcome to Anidaso"));
        assert!(reply.links.is_empty());
    }

    #[test]
    fn test_empty_index_reports_loading() {
        let index = SiteIndex::default();
        let links = resolver();
        let config = Config::default_config();
        let reply = Responder::new(&index, &links, &config).respond("membership");

        assert_eq!(reply.kind, ReplyKind::Loading);
    }

    #[test]
    fn test_membership_answer() {
        let index = site_index();
        let links = resolver();
        let config = Config::default_config();
        let reply = Responder::new(&index, &links, &config).respond("How do I become a member?");

        assert_eq!(reply.kind, ReplyKind::Answer);
        assert_eq!(reply.intent, Some(Intent::Membership));
        assert!(reply.text.starts_with("If you’re looking to join or register"));
        assert!(reply.text.contains("Based on “Membership”:"));
        assert!(reply.text.contains("• Become a member by completing the registration form"));
        assert!(reply.text.ends_with("follow the membership/registration instructions."));
        assert_eq!(
            reply.links[0],
            ReplyLink::open_page("https://example.org/membership.html")
        );
        assert!(reply.links.iter().skip(1).all(|l| l.href != reply.links[0].href));
    }

    fn picnic_index(first_page_mentions: usize) -> SiteIndex {
        let first = match first_page_mentions {
            1 => "The summer picnic is held in July with music and dancing for everyone.",
            _ => "The summer picnic is held in July. Every picnic has music and dancing for everyone.",
        };
        SiteIndex::new(vec![
            page("summer.html", "Summer Day", first),
            page(
                "lakeside.html",
                "Lakeside",
                "Bring food and friends to the picnic by the lake every August.",
            ),
        ])
    }

    #[test]
    fn test_low_confidence_adds_rephrase_hint() {
        // equal scores give a gap of 0.5, and only one of two terms is covered
        let index = picnic_index(1);
        let links = resolver();
        let config = Config::default_config();
        let reply = Responder::new(&index, &links, &config).respond("picnic raffle");

        assert_eq!(reply.intent, Some(Intent::General));
        let confidence = reply.confidence.unwrap();
        assert!((confidence - (0.5 * 0.65 + 0.5 * 0.35)).abs() < 1e-12);
        assert!(confidence < config.retrieval.confidence_threshold);
        assert!(reply.text.ends_with(REPHRASE_HINT));
    }

    #[test]
    fn test_confident_answer_has_no_rephrase_hint() {
        // two mentions against one give a gap of 2/3, with full coverage
        let index = picnic_index(2);
        let links = resolver();
        let config = Config::default_config();
        let reply = Responder::new(&index, &links, &config).respond("picnic");

        assert_eq!(reply.intent, Some(Intent::General));
        let confidence = reply.confidence.unwrap();
        assert!((confidence - (2.0 / 3.0 * 0.65 + 0.35)).abs() < 1e-12);
        assert!(confidence >= config.retrieval.confidence_threshold);
        assert!(!reply.text.contains(REPHRASE_HINT));
        assert!(reply.text.starts_with("Based on “Summer Day”:"));
    }

    #[test]
    fn test_intent_hint_promotes_lower_ranked_page() {
        let index = SiteIndex::new(vec![
            page("index.html", "Home", "Join us. Join our events. Join the choir."),
            page("membership.html", "Sign Up", "Fill in the form to apply."),
            page("events.html", "Events", "Join the summer picnic."),
        ]);
        let ranked = index.rank_pages("How can I join?", 3);
        let order: Vec<&str> = ranked.iter().map(|r| r.entry.path.as_str()).collect();
        assert_eq!(order, vec!["index.html", "membership.html", "events.html"]);

        let links = resolver();
        let config = Config::default_config();
        let reply = Responder::new(&index, &links, &config).respond("How can I join?");

        assert_eq!(reply.intent, Some(Intent::Membership));
        assert!(reply.text.contains("Based on “Sign Up”:"));
        assert_eq!(
            reply.links,
            vec![
                ReplyLink::open_page("https://example.org/membership.html"),
                ReplyLink::new("https://example.org/index.html", "Home"),
                ReplyLink::new("https://example.org/events.html", "Events"),
            ]
        );
    }

    #[test]
    fn test_fallbacks_when_nothing_ranks() {
        let index = site_index();
        let links = resolver();
        let config = Config::default_config();
        let responder = Responder::new(&index, &links, &config);

        let reply = responder.respond("zzz contactable");
        assert_eq!(reply.kind, ReplyKind::Fallback);
        assert_eq!(reply.links[0].href, "https://example.org/contact-us.html");

        let reply = responder.respond("xyz applying?");
        assert_eq!(reply.kind, ReplyKind::Fallback);
        assert_eq!(reply.links[0].href, "https://example.org/membership.html");

        let reply = responder.respond("quantum chromodynamics");
        assert_eq!(reply.kind, ReplyKind::Fallback);
        assert!(reply.text.starts_with("I couldn’t find a direct match"));
        assert_eq!(reply.links[0].href, "https://example.org/contact-us.html");
    }
}
