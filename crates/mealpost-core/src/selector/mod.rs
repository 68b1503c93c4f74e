//! Candidate selection: pick the menu post for a date out of a recent window.
//!
//! Given posts ordered most-recent-first, the selector
//! 1. keeps posts whose caption names the target date (`3월 5일` / `3월5일`),
//! 2. scores them with the rules in [`score`],
//! 3. returns the best one. Equal scores keep input order (stable sort).
//!
//! The selector is pure. It never fetches more posts than it was given and
//! never looks past `scan_limit`.

pub mod score;

use tracing::{debug, info};

use crate::domain::{DateQuery, PostSummary};

pub use self::score::{ScoreRule, RULES};

/// Scan limit for "today" or future dates: the menu is among the latest posts.
pub const RECENT_SCAN_LIMIT: usize = 5;

/// Scan limit for back-dated queries: the post is further down the feed.
pub const BACKDATED_SCAN_LIMIT: usize = 20;

/// A date-matching post with its score.
///
/// Only lives for one [`select_menu_post`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub post: &'a PostSummary,
    pub score: u32,

    /// Position in the input (0 = most recent).
    pub original_rank: usize,
}

/// How many leading posts to scan for `target` when today is `today`.
pub fn scan_limit_for(target: DateQuery, today: DateQuery) -> usize {
    if target < today {
        BACKDATED_SCAN_LIMIT
    } else {
        RECENT_SCAN_LIMIT
    }
}

/// Date-matching posts within the first `scan_limit` posts, scored, in input order.
pub fn candidates(posts: &[PostSummary], target: DateQuery, scan_limit: usize) -> Vec<ScoredCandidate<'_>> {
    posts
        .iter()
        .take(scan_limit)
        .enumerate()
        .filter(|(_, post)| target.is_mentioned_in(&post.caption))
        .map(|(original_rank, post)| {
            let candidate = ScoredCandidate {
                post,
                score: score::score(post),
                original_rank,
            };
            debug!(
                post_id = %post.id,
                captured_at = %post.captured_at,
                score = candidate.score,
                rules = ?score::matched_rules(post),
                caption = %caption_preview(&post.caption),
                "date-matching candidate"
            );
            candidate
        })
        .collect()
}

/// Selects the post that best represents the menu image for `target`.
///
/// Returns `None` when no post among the first `scan_limit` mentions the date.
pub fn select_menu_post(posts: &[PostSummary], target: DateQuery, scan_limit: usize) -> Option<PostSummary> {
    let [spaced, unspaced] = target.caption_patterns();
    debug!(%target, scan_limit, %spaced, %unspaced, "scanning posts");

    let mut ranked = candidates(posts, target, scan_limit);
    if ranked.is_empty() {
        info!(%target, scan_limit, "no post mentions the date");
        return None;
    }

    // Stable: equal scores stay in most-recent-first order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    let best = &ranked[0];
    info!(
        post_id = %best.post.id,
        score = best.score,
        rank = best.original_rank,
        candidates = ranked.len(),
        "selected menu post"
    );
    Some(best.post.clone())
}

fn caption_preview(caption: &str) -> String {
    caption.chars().take(30).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaType;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    fn target() -> DateQuery {
        DateQuery::from_ymd(2024, 3, 5).unwrap()
    }

    fn post(id: &str, caption: &str, accessibility: &str, media: MediaType) -> PostSummary {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 2, 0, 0).unwrap();
        PostSummary::new(id, at, media, format!("https://img/{id}.jpg"))
            .with_caption(caption)
            .with_accessibility_text(accessibility)
    }

    fn menu_text(id: &str) -> PostSummary {
        post(id, "3월 5일 중식 메뉴", "Photo shows text of menu", MediaType::SingleImage)
    }

    fn food_gallery(id: &str) -> PostSummary {
        post(id, "3월5일 오늘의 점심", "", MediaType::MultiImage)
    }

    fn unrelated(id: &str) -> PostSummary {
        post(id, "3월 4일 메뉴", "Photo shows text", MediaType::SingleImage)
    }

    #[test]
    fn no_date_match_is_not_found() {
        let posts = vec![unrelated("a"), unrelated("b"), unrelated("c")];
        assert_eq!(select_menu_post(&posts, target(), 5), None);
    }

    #[test]
    fn empty_feed_is_not_found() {
        assert_eq!(select_menu_post(&[], target(), 5), None);
    }

    #[rstest]
    #[case::text_first(vec![menu_text("A"), food_gallery("B")])]
    #[case::text_last(vec![food_gallery("B"), menu_text("A")])]
    fn higher_score_wins_regardless_of_order(#[case] posts: Vec<PostSummary>) {
        let selected = select_menu_post(&posts, target(), 5).expect("a match");
        assert_eq!(selected.id.as_str(), "A");
    }

    #[test]
    fn candidate_scores_follow_rules() {
        let posts = vec![food_gallery("B"), menu_text("A")];
        let scored = candidates(&posts, target(), 5);

        let summary: Vec<_> = scored
            .iter()
            .map(|c| (c.post.id.as_str(), c.score, c.original_rank))
            .collect();
        assert_eq!(summary, vec![("B", 0, 0), ("A", 15, 1)]);
    }

    #[test]
    fn ties_keep_the_most_recent() {
        let posts = vec![food_gallery("newer"), food_gallery("older")];
        let selected = select_menu_post(&posts, target(), 5).expect("a match");
        assert_eq!(selected.id.as_str(), "newer");
    }

    #[test]
    fn tie_break_ignores_capture_time() {
        // Input order decides ties, even if timestamps disagree with it.
        let mut first = food_gallery("first");
        first.captured_at -= Duration::hours(3);
        let second = food_gallery("second");

        let selected = select_menu_post(&[first, second], target(), 5).expect("a match");
        assert_eq!(selected.id.as_str(), "first");
    }

    #[rstest]
    #[case::truncated(2, None)]
    #[case::full(5, Some("match"))]
    fn scan_limit_bounds_the_window(#[case] scan_limit: usize, #[case] expected: Option<&str>) {
        let posts = vec![
            unrelated("0"),
            unrelated("1"),
            unrelated("2"),
            food_gallery("match"),
            unrelated("4"),
        ];
        let selected = select_menu_post(&posts, target(), scan_limit);
        assert_eq!(selected.as_ref().map(|p| p.id.as_str()), expected);
    }

    #[test]
    fn zero_scan_limit_examines_nothing() {
        assert_eq!(select_menu_post(&[menu_text("A")], target(), 0), None);
    }

    #[test]
    fn later_higher_score_displaces_earlier_match() {
        let posts = vec![
            food_gallery("gallery"),
            post("single", "3월 5일", "", MediaType::SingleImage),
            post("says", "3월5일", "image that says LUNCH", MediaType::MultiImage),
        ];
        let selected = select_menu_post(&posts, target(), 5).expect("a match");
        assert_eq!(selected.id.as_str(), "says");
    }

    #[test]
    fn empty_captions_are_skipped_not_errors() {
        let posts = vec![post("blank", "", "", MediaType::SingleImage), food_gallery("B")];
        let selected = select_menu_post(&posts, target(), 5).expect("a match");
        assert_eq!(selected.id.as_str(), "B");
    }

    #[rstest]
    #[case::past(DateQuery::from_ymd(2024, 3, 4).unwrap(), BACKDATED_SCAN_LIMIT)]
    #[case::today(DateQuery::from_ymd(2024, 3, 5).unwrap(), RECENT_SCAN_LIMIT)]
    #[case::future(DateQuery::from_ymd(2024, 3, 6).unwrap(), RECENT_SCAN_LIMIT)]
    fn scan_limit_depends_on_date(#[case] target: DateQuery, #[case] expected: usize) {
        let today = DateQuery::from_ymd(2024, 3, 5).unwrap();
        assert_eq!(scan_limit_for(target, today), expected);
    }
}
