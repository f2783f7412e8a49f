#![forbid(unsafe_code)]

//! Turning pointer positions and selections into word detections.
//!
//! [`WordDetector`] is the caller side of the resolver: it finds the element
//! under the pointer, skips the tooltip overlay itself, resolves the word,
//! and shapes it into a [`WordCandidate`] together with the font size and
//! scroll offset needed to place the tooltip.

use crate::geometry::{Point, ScrollOffset};
use crate::page::HostPage;
use crate::word::{WordCandidate, resolve_word_at};

/// Font size assumed when the host cannot compute one.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// A word found under the pointer or in a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub candidate: WordCandidate,
    /// Integer pixel font size of the element the word came from.
    pub font_size: f64,
    /// Viewport pointer position at detection time.
    pub pointer: Point,
    /// Document scroll offset at detection time.
    pub scroll: ScrollOffset,
}

/// Detects words on a host page, ignoring the reserved tooltip element.
#[derive(Debug, Clone)]
pub struct WordDetector {
    tooltip_id: String,
}

impl WordDetector {
    /// Create a detector that ignores the element with `tooltip_id`.
    #[must_use]
    pub fn new(tooltip_id: impl Into<String>) -> Self {
        Self {
            tooltip_id: tooltip_id.into(),
        }
    }

    /// The reserved tooltip element id.
    #[must_use]
    pub fn tooltip_id(&self) -> &str {
        &self.tooltip_id
    }

    /// Detect the word under a viewport point.
    ///
    /// Returns `None` on a resolution miss: nothing under the pointer, the
    /// pointer is over the tooltip, or only whitespace is there.
    pub fn detect_at<P: HostPage>(&self, page: &P, point: Point) -> Option<Detection> {
        let element = page.element_from_point(point)?;
        if page.within_id(&element, &self.tooltip_id) {
            return None;
        }
        let raw = resolve_word_at(page, &element, point)?;
        let candidate = WordCandidate::from_raw(&raw)?;

        #[cfg(feature = "tracing")]
        crate::logging::trace!(word = %candidate.word, supported = candidate.supported, "word resolved");

        Some(Detection {
            candidate,
            font_size: font_size_px(page, &element),
            pointer: point,
            scroll: page.scroll_offset(),
        })
    }

    /// Detect a word from selected text ending at `point`.
    pub fn detect_selection<P: HostPage>(
        &self,
        page: &P,
        text: &str,
        point: Point,
    ) -> Option<Detection> {
        let candidate = WordCandidate::from_raw(text)?;
        let font_size = match page.element_from_point(point) {
            Some(element) if page.within_id(&element, &self.tooltip_id) => return None,
            Some(element) => font_size_px(page, &element),
            None => DEFAULT_FONT_SIZE,
        };
        Some(Detection {
            candidate,
            font_size,
            pointer: point,
            scroll: page.scroll_offset(),
        })
    }
}

/// Integer part of the computed font size, like `parseInt("15.5px")`.
fn font_size_px<P: HostPage>(page: &P, element: &P::Node) -> f64 {
    page.font_size(element)
        .filter(|size| size.is_finite() && *size > 0.0)
        .map_or(DEFAULT_FONT_SIZE, f64::trunc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;
    use crate::static_page::{StaticPage, TextMetrics};

    const TOOLTIP_ID: &str = "assistant-tooltip";

    fn page() -> StaticPage {
        let mut page = StaticPage::new(Viewport::new(1000.0, 800.0));
        let p = page.append_element(page.root(), None, Some(15.5));
        page.append_text(
            p,
            "it's a day",
            Point::new(0.0, 0.0),
            TextMetrics::new(10.0, 20.0),
        );
        let tooltip = page.append_element(page.root(), Some(TOOLTIP_ID), Some(16.0));
        page.append_text(
            tooltip,
            "definition",
            Point::new(0.0, 100.0),
            TextMetrics::new(10.0, 20.0),
        );
        page.set_scroll(ScrollOffset::new(0.0, 250.0));
        page
    }

    #[test]
    fn detects_and_sanitizes_contraction() {
        let detector = WordDetector::new(TOOLTIP_ID);
        let detection = detector.detect_at(&page(), Point::new(15.0, 10.0)).unwrap();
        assert_eq!(detection.candidate.word, "it");
        assert!(detection.candidate.supported);
        assert_eq!(detection.font_size, 15.0);
        assert_eq!(detection.scroll, ScrollOffset::new(0.0, 250.0));
    }

    #[test]
    fn ignores_tooltip_overlay() {
        let detector = WordDetector::new(TOOLTIP_ID);
        assert_eq!(detector.detect_at(&page(), Point::new(15.0, 110.0)), None);
    }

    #[test]
    fn whitespace_is_a_miss() {
        let detector = WordDetector::new(TOOLTIP_ID);
        assert_eq!(detector.detect_at(&page(), Point::new(45.0, 10.0)), None);
    }

    #[test]
    fn nothing_under_pointer_is_a_miss() {
        let detector = WordDetector::new(TOOLTIP_ID);
        assert_eq!(detector.detect_at(&page(), Point::new(900.0, 700.0)), None);
    }

    #[test]
    fn selection_uses_same_shaping() {
        let detector = WordDetector::new(TOOLTIP_ID);
        let detection = detector
            .detect_selection(&page(), " day ", Point::new(85.0, 10.0))
            .unwrap();
        assert_eq!(detection.candidate.word, "day");
        assert_eq!(detection.font_size, 15.0);
    }

    #[test]
    fn selection_inside_tooltip_is_ignored() {
        let detector = WordDetector::new(TOOLTIP_ID);
        assert_eq!(
            detector.detect_selection(&page(), "definition", Point::new(15.0, 110.0)),
            None
        );
    }
}
