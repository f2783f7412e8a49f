#![forbid(unsafe_code)]

//! Word-at-point resolution and candidate shaping.
//!
//! [`resolve_word_at`] descends from a node to the text node under a
//! viewport point and expands the caret there to whole-word boundaries
//! (UAX #29 word segmentation, the same boundaries `Range.expand("word")`
//! uses). [`WordCandidate::from_raw`] then applies the caller-side rules:
//! contraction splitting and the supported word shape.
//!
//! # Invariants
//!
//! 1. Recursion strictly descends the tree, so resolution terminates.
//! 2. A point inside no child rectangle of an element resolves to `None`;
//!    there is no fallback to the element itself.
//! 3. Resolved text never has leading or trailing whitespace.

use unicode_segmentation::UnicodeSegmentation;

use crate::geometry::Point;
use crate::page::TextGeometry;

/// Resolve the word under `point`, starting the search at `node`.
pub fn resolve_word_at<G: TextGeometry>(
    page: &G,
    node: &G::Node,
    point: Point,
) -> Option<String> {
    if page.is_text(node) {
        let caret = page.caret_from_point(point)?;
        return Some(expand_to_word(&caret.text, caret.offset).trim().to_string());
    }

    for child in page.child_nodes(node) {
        let Some(rect) = page.content_rect(&child) else {
            continue;
        };
        if rect.contains(point) {
            return resolve_word_at(page, &child, point);
        }
    }
    None
}

/// The word segment of `text` containing byte `offset`.
///
/// A caret at the very end of the text expands to the last segment.
/// Whitespace runs are their own segments, so a caret between words yields
/// whitespace that trims to the empty string.
#[must_use]
pub fn expand_to_word(text: &str, offset: usize) -> &str {
    let mut last = "";
    for (start, segment) in text.split_word_bound_indices() {
        if offset < start + segment.len() {
            return segment;
        }
        last = segment;
    }
    last
}

/// Split a simple contraction at its apostrophe and keep the leading part.
///
/// Applies only to `word'word` shapes where both sides are ASCII word
/// characters (`[A-Za-z0-9_]`): `it's` becomes `it`, `we've` becomes `we`.
/// Anything else is returned unchanged.
#[must_use]
pub fn split_contraction(word: &str) -> &str {
    let is_word_char = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let Some((head, tail)) = word.split_once(['\'', '\u{2019}']) else {
        return word;
    };
    let simple = !head.is_empty()
        && !tail.is_empty()
        && head.chars().all(is_word_char)
        && tail.chars().all(is_word_char);
    if simple {
        head
    } else {
        word
    }
}

/// Whether a word may be sent to the lookup service.
///
/// Supported words consist only of ASCII letters, whitespace, and
/// underscores. The empty string is trivially supported.
#[must_use]
pub fn is_supported_word(word: &str) -> bool {
    word.chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '_')
}

/// A detected word after sanitizing, with its lookup eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCandidate {
    pub word: String,
    pub supported: bool,
}

impl WordCandidate {
    /// Shape raw resolved or selected text into a candidate.
    ///
    /// Returns `None` for text that is empty after trimming.
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let word = split_contraction(trimmed);
        Some(Self {
            word: word.to_string(),
            supported: is_supported_word(word),
        })
    }
}
