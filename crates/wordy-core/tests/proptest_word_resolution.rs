//! Property-based tests for word-at-point resolution.
//!
//! 1. A point strictly inside any glyph of a word resolves to that word.
//! 2. Resolved text is always trimmed.
//! 3. A point outside every child rectangle resolves to `None`.
//! 4. Detection never yields an empty word.

use proptest::prelude::*;
use wordy_core::detect::WordDetector;
use wordy_core::geometry::{Point, Viewport};
use wordy_core::page::HostPage;
use wordy_core::static_page::{StaticPage, TextMetrics};
use wordy_core::word::resolve_word_at;

// ── Strategies ──────────────────────────────────────────────────────────

fn words_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,10}", 1..8)
}

const ADVANCE: f64 = 9.0;
const LINE_HEIGHT: f64 = 18.0;
const ORIGIN: Point = Point::new(20.0, 40.0);

fn page_for(words: &[String]) -> StaticPage {
    let mut page = StaticPage::new(Viewport::new(2000.0, 1000.0));
    let p = page.append_element(page.root(), None, Some(16.0));
    page.append_text(
        p,
        &words.join(" "),
        ORIGIN,
        TextMetrics::new(ADVANCE, LINE_HEIGHT),
    );
    page
}

/// Center of the `glyph`-th char of the `word`-th word.
fn glyph_center(words: &[String], word: usize, glyph: usize) -> Point {
    let start: usize = words[..word].iter().map(|w| w.len() + 1).sum();
    let index = start + glyph;
    Point::new(
        ORIGIN.x + (index as f64 + 0.5) * ADVANCE,
        ORIGIN.y + LINE_HEIGHT / 2.0,
    )
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn point_inside_glyph_resolves_its_word(
        words in words_strategy(),
        pick in any::<prop::sample::Index>(),
        glyph_pick in any::<prop::sample::Index>(),
    ) {
        let page = page_for(&words);
        let word = pick.index(words.len());
        let glyph = glyph_pick.index(words[word].len());
        let point = glyph_center(&words, word, glyph);

        let resolved = resolve_word_at(&page, &page.root(), point);
        prop_assert_eq!(resolved.as_deref(), Some(words[word].as_str()));
    }

    #[test]
    fn resolved_text_is_trimmed(
        words in words_strategy(),
        x in 0.0f64..400.0,
    ) {
        let page = page_for(&words);
        let point = Point::new(ORIGIN.x + x, ORIGIN.y + 1.0);
        if let Some(text) = resolve_word_at(&page, &page.root(), point) {
            prop_assert_eq!(text.trim(), text.as_str());
        }
    }

    #[test]
    fn point_outside_children_is_none(
        words in words_strategy(),
        dy in 1.0f64..500.0,
    ) {
        let page = page_for(&words);
        let below = Point::new(ORIGIN.x + 1.0, ORIGIN.y + LINE_HEIGHT + dy);
        prop_assert_eq!(resolve_word_at(&page, &page.root(), below), None);
        prop_assert_eq!(page.element_from_point(below), None);
    }

    #[test]
    fn detection_never_empty(
        words in words_strategy(),
        x in 0.0f64..400.0,
    ) {
        let page = page_for(&words);
        let detector = WordDetector::new("assistant-tooltip");
        let point = Point::new(ORIGIN.x + x, ORIGIN.y + 1.0);
        if let Some(detection) = detector.detect_at(&page, point) {
            prop_assert!(!detection.candidate.word.is_empty());
            prop_assert!(detection.candidate.supported);
        }
    }
}
