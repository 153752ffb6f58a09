// file: src/chat/intent.rs
// description: keyword-based intent detection and intent-aware page selection
// reference: rule-based intent classification

use crate::extractor::patterns::{
    INTENT_COMMUNITY_SUPPORT, INTENT_CONTACT, INTENT_CONTRIBUTION, INTENT_GOVERNANCE,
    INTENT_HOW_IT_WORKS, INTENT_MEMBERSHIP, MENTIONS_GHANA, MENTIONS_UK, MENTIONS_UK_WORD,
};
use crate::index::RankedPage;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    HowItWorks,
    Contact,
    Membership,
    Contribution,
    Governance,
    CommunitySupport,
    Ghana,
    Uk,
    General,
}

impl Intent {
    /// First matching rule wins, so the order here matters.
    pub fn detect(query: &str) -> Self {
        let q = query.to_lowercase();

        if INTENT_HOW_IT_WORKS.is_match(&q) {
            Self::HowItWorks
        } else if INTENT_CONTACT.is_match(&q) {
            Self::Contact
        } else if INTENT_MEMBERSHIP.is_match(&q) {
            Self::Membership
        } else if INTENT_CONTRIBUTION.is_match(&q) {
            Self::Contribution
        } else if INTENT_GOVERNANCE.is_match(&q) {
            Self::Governance
        } else if INTENT_COMMUNITY_SUPPORT.is_match(&q) {
            Self::CommunitySupport
        } else if MENTIONS_GHANA.is_match(&q) && !MENTIONS_UK_WORD.is_match(&q) {
            Self::Ghana
        } else if MENTIONS_UK.is_match(&q) {
            Self::Uk
        } else {
            Self::General
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::HowItWorks => "how-it-works",
            Self::Contact => "contact",
            Self::Membership => "membership",
            Self::Contribution => "contribution",
            Self::Governance => "governance",
            Self::CommunitySupport => "community-support",
            Self::Ghana => "ghana",
            Self::Uk => "uk",
            Self::General => "general",
        }
    }

    pub fn intro(&self, site_name: &str) -> Option<String> {
        let intro = match self {
            Self::HowItWorks => {
                return Some(format!(
                    "Here’s a quick, high-level overview of how {} works:",
                    site_name
                ));
            }
            Self::Contact => "If you want to get in touch, here’s the most relevant page:",
            Self::Membership => {
                "If you’re looking to join or register, this is the best place to start:"
            }
            Self::Contribution => "For payments and contributions, here’s what the site says:",
            Self::Governance => {
                "For governance and how things are managed, here’s the most relevant section:"
            }
            Self::CommunitySupport => {
                "For community support and ways to help, here’s what I found:"
            }
            Self::Ghana => "Got it, you’re asking about Ghana. Here’s the closest match:",
            Self::Uk => "Got it, you’re asking about the UK. Here’s the closest match:",
            Self::General => return None,
        };
        Some(intro.to_string())
    }

    pub fn next_step(&self) -> Option<&'static str> {
        match self {
            Self::HowItWorks => Some(
                "If you’re new, start by opening the page and follow the steps in order \
                 (register → become a member → monthly contribution → community support).",
            ),
            Self::Contact => Some("Next step: open the page and use the contact details/form."),
            Self::Membership => Some(
                "Next step: open the page and follow the membership/registration instructions.",
            ),
            Self::Contribution => {
                Some("Next step: open the page for the latest contribution/payment details.")
            }
            Self::Governance => Some("Next step: open the page to review the governance details."),
            Self::CommunitySupport => {
                Some("Next step: open the page to see the available support options.")
            }
            Self::Ghana => Some(
                "If you need Ghana-specific details, open the page and look for the Ghana section.",
            ),
            Self::Uk => Some(
                "If you need UK-specific details, open the page and look for the UK section.",
            ),
            Self::General => None,
        }
    }

    /// Title or path fragments that identify the page this intent is about.
    pub fn page_hints(&self) -> &'static [&'static str] {
        match self {
            Self::HowItWorks => &["how it works", "how-it-works"],
            Self::Contact => &["contact", "contact-us"],
            Self::Membership => &["membership", "become a member", "register"],
            Self::Contribution => &[
                "monthly contribution",
                "monthly-contribution",
                "contribution",
            ],
            Self::Governance => &["governance"],
            Self::CommunitySupport => &["community support", "community-support"],
            Self::Ghana => &["ghana"],
            Self::Uk => &["uk", "united kingdom"],
            Self::General => &[],
        }
    }

    /// The first ranked page whose title or path carries one of this intent's hints,
    /// else the top result.
    pub fn pick_best<'a>(&self, ranked: &[RankedPage<'a>]) -> Option<RankedPage<'a>> {
        let first = ranked.first().copied()?;
        let hints = self.page_hints();
        if hints.is_empty() {
            return Some(first);
        }

        ranked
            .iter()
            .find(|candidate| {
                let haystack = candidate.entry.hint_haystack();
                hints.iter().any(|hint| haystack.contains(hint))
            })
            .copied()
            .or(Some(first))
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageEntry;

    #[test]
    fn test_detect_intents_in_priority_order() {
        assert_eq!(Intent::detect("How does it work?"), Intent::HowItWorks);
        assert_eq!(Intent::detect("what are the steps to join"), Intent::HowItWorks);
        assert_eq!(Intent::detect("I need help joining"), Intent::Contact);
        assert_eq!(Intent::detect("Can I sign up?"), Intent::Membership);
        assert_eq!(Intent::detect("monthly dues"), Intent::Contribution);
        assert_eq!(Intent::detect("who is on the committee"), Intent::Governance);
        assert_eq!(Intent::detect("how to donate"), Intent::CommunitySupport);
        assert_eq!(Intent::detect("branches in Ghana"), Intent::Ghana);
        assert_eq!(Intent::detect("ghana or uk"), Intent::Uk);
        assert_eq!(Intent::detect("United Kingdom chapter"), Intent::Uk);
        assert_eq!(Intent::detect("tell me a story"), Intent::General);
    }

    #[test]
    fn test_general_has_no_intro_or_next_step() {
        assert!(Intent::General.intro("Site").is_none());
        assert!(Intent::General.next_step().is_none());
        assert!(
            Intent::HowItWorks
                .intro("Anidaso")
                .unwrap()
                .contains("how Anidaso works")
        );
    }

    #[test]
    fn test_region_intros() {
        assert_eq!(
            Intent::Ghana.intro("Anidaso").as_deref(),
            Some("Got it, you’re asking about Ghana. Here’s the closest match:")
        );
        assert_eq!(
            Intent::Uk.intro("Anidaso").as_deref(),
            Some("Got it, you’re asking about the UK. Here’s the closest match:")
        );
    }

    fn page(path: &str, title: &str) -> PageEntry {
        PageEntry::new(
            path.to_string(),
            path.to_string(),
            title.to_string(),
            "text".to_string(),
        )
    }

    #[test]
    fn test_pick_best_prefers_hinted_page() {
        let home = page("index.html", "Home");
        let contact = page("contact-us.html", "Get in touch");
        let ranked = vec![
            RankedPage {
                score: 9.0,
                entry: &home,
            },
            RankedPage {
                score: 4.0,
                entry: &contact,
            },
        ];

        let picked = Intent::Contact.pick_best(&ranked).unwrap();
        assert_eq!(picked.entry.path, "contact-us.html");

        let general = Intent::General.pick_best(&ranked).unwrap();
        assert_eq!(general.entry.path, "index.html");

        let governance = Intent::Governance.pick_best(&ranked).unwrap();
        assert_eq!(governance.entry.path, "index.html");

        assert!(Intent::Contact.pick_best(&[]).is_none());
    }

    #[test]
    fn test_serializes_as_kebab_case() {
        let json = serde_json::to_string(&Intent::CommunitySupport).unwrap();
        assert_eq!(json, "\"community-support\"");
        assert_eq!(Intent::HowItWorks.to_string(), "how-it-works");
    }
}
