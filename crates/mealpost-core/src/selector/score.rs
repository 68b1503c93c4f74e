//! Scoring rules: how strongly a date-matching post looks like a menu image.
//!
//! The rules are a fixed, enumerated set and scoring is a pure function of
//! the post, so the whole rule set can be tested without a feed.

use crate::domain::{MediaType, PostSummary};

/// One scoring rule. Bonuses are additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreRule {
    /// The accessibility text says the image shows text (a menu board, not food).
    TextualAccessibility,

    /// The post is a single image rather than a gallery.
    SingleImage,
}

/// Every rule, in the order they are evaluated.
pub const RULES: [ScoreRule; 2] = [ScoreRule::TextualAccessibility, ScoreRule::SingleImage];

/// Accessibility-text keywords that suggest a textual image (matched lowercase).
const TEXT_HINTS: [&str; 2] = ["text", "says"];

impl ScoreRule {
    pub fn bonus(&self) -> u32 {
        match self {
            ScoreRule::TextualAccessibility => 10,
            ScoreRule::SingleImage => 5,
        }
    }

    pub fn applies_to(&self, post: &PostSummary) -> bool {
        match self {
            ScoreRule::TextualAccessibility => {
                let text = post.accessibility_text.to_lowercase();
                TEXT_HINTS.iter().any(|hint| text.contains(hint))
            }
            ScoreRule::SingleImage => post.media_type == MediaType::SingleImage,
        }
    }
}

/// Rules that fire for `post`.
pub fn matched_rules(post: &PostSummary) -> Vec<ScoreRule> {
    RULES.into_iter().filter(|rule| rule.applies_to(post)).collect()
}

/// Sum of bonuses of every rule that fires for `post`. Zero when none fire.
pub fn score(post: &PostSummary) -> u32 {
    matched_rules(post).iter().map(ScoreRule::bonus).sum()
}
