#![forbid(unsafe_code)]

//! In-memory page model.
//!
//! [`StaticPage`] is a small arena-backed node tree with a deterministic
//! single-line, fixed-advance text layout. It implements [`HostPage`] so the
//! resolver, detector, and runtime can be driven headlessly.
//!
//! # Layout model
//!
//! Each text node is laid out on one line starting at its `origin`; every
//! char occupies `advance` pixels horizontally and the line is
//! `line_height` pixels tall. An element's content rectangle is the union of
//! its descendant text rectangles.

use crate::geometry::{Point, Rect, ScrollOffset, Viewport};
use crate::page::{Caret, HostPage, TextGeometry};

/// Handle to a node in a [`StaticPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Fixed text metrics for one text node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Horizontal advance per char.
    pub advance: f64,
    /// Line box height.
    pub line_height: f64,
}

impl TextMetrics {
    #[must_use]
    pub const fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        parent: Option<NodeId>,
        id: Option<String>,
        font_size: Option<f64>,
        children: Vec<NodeId>,
    },
    Text {
        parent: NodeId,
        content: String,
        origin: Point,
        metrics: TextMetrics,
    },
}

/// Arena-backed page with a root element.
#[derive(Debug, Clone)]
pub struct StaticPage {
    nodes: Vec<NodeData>,
    scroll: ScrollOffset,
    viewport: Viewport,
}

impl StaticPage {
    /// Create a page with an empty root element (the `<body>`).
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            nodes: vec![NodeData::Element {
                parent: None,
                id: None,
                font_size: Some(16.0),
                children: Vec::new(),
            }],
            scroll: ScrollOffset::default(),
            viewport,
        }
    }

    /// The root element.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Set the document scroll offset.
    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    /// Append a child element under `parent`.
    ///
    /// `font_size` falls back to the nearest ancestor's when `None`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        id: Option<&str>,
        font_size: Option<f64>,
    ) -> NodeId {
        let node = NodeId(self.nodes.len());
        self.nodes.push(NodeData::Element {
            parent: Some(parent),
            id: id.map(str::to_string),
            font_size,
            children: Vec::new(),
        });
        self.push_child(parent, node);
        node
    }

    /// Append a text node under `parent`, laid out from `origin`.
    pub fn append_text(
        &mut self,
        parent: NodeId,
        content: &str,
        origin: Point,
        metrics: TextMetrics,
    ) -> NodeId {
        let node = NodeId(self.nodes.len());
        self.nodes.push(NodeData::Text {
            parent,
            content: content.to_string(),
            origin,
            metrics,
        });
        self.push_child(parent, node);
        node
    }

    /// Rectangle covering the glyph at `index` in a text node.
    #[must_use]
    pub fn glyph_rect(&self, node: NodeId, index: usize) -> Option<Rect> {
        match self.nodes.get(node.0)? {
            NodeData::Text {
                content,
                origin,
                metrics,
                ..
            } if index < content.chars().count() => Some(Rect::new(
                origin.x + index as f64 * metrics.advance,
                origin.y,
                metrics.advance,
                metrics.line_height,
            )),
            _ => None,
        }
    }

    fn push_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(NodeData::Element { children, .. }) = self.nodes.get_mut(parent.0) {
            children.push(child);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        match self.nodes.get(node.0)? {
            NodeData::Element { parent, .. } => *parent,
            NodeData::Text { parent, .. } => Some(*parent),
        }
    }

    fn text_rect(content: &str, origin: Point, metrics: TextMetrics) -> Rect {
        Rect::new(
            origin.x,
            origin.y,
            content.chars().count() as f64 * metrics.advance,
            metrics.line_height,
        )
    }

    fn deepest_element_at(&self, node: NodeId, point: Point) -> Option<NodeId> {
        let NodeData::Element { children, .. } = self.nodes.get(node.0)? else {
            return None;
        };
        if !self.content_rect(&node).is_some_and(|r| r.contains(point)) {
            return None;
        }
        children
            .iter()
            .filter(|child| !self.is_text(child))
            .find_map(|child| self.deepest_element_at(*child, point))
            .or(Some(node))
    }
}

impl TextGeometry for StaticPage {
    type Node = NodeId;

    fn is_text(&self, node: &NodeId) -> bool {
        matches!(self.nodes.get(node.0), Some(NodeData::Text { .. }))
    }

    fn child_nodes(&self, node: &NodeId) -> Vec<NodeId> {
        match self.nodes.get(node.0) {
            Some(NodeData::Element { children, .. }) => children.clone(),
            _ => Vec::new(),
        }
    }

    fn content_rect(&self, node: &NodeId) -> Option<Rect> {
        match self.nodes.get(node.0)? {
            NodeData::Text {
                content,
                origin,
                metrics,
                ..
            } => Some(Self::text_rect(content, *origin, *metrics)),
            NodeData::Element { children, .. } => children
                .iter()
                .filter_map(|child| self.content_rect(child))
                .reduce(|acc, rect| acc.union(&rect)),
        }
    }

    fn caret_from_point(&self, point: Point) -> Option<Caret> {
        self.nodes.iter().find_map(|node| match node {
            NodeData::Text {
                content,
                origin,
                metrics,
                ..
            } if Self::text_rect(content, *origin, *metrics).contains(point) => {
                let chars = content.chars().count();
                if chars == 0 || metrics.advance <= 0.0 {
                    return Some(Caret::new(content.clone(), 0));
                }
                let index = (((point.x - origin.x) / metrics.advance).floor() as usize).min(chars - 1);
                let offset = content
                    .char_indices()
                    .nth(index)
                    .map_or(content.len(), |(byte, _)| byte);
                Some(Caret::new(content.clone(), offset))
            }
            _ => None,
        })
    }
}

impl HostPage for StaticPage {
    fn element_from_point(&self, point: Point) -> Option<NodeId> {
        self.deepest_element_at(self.root(), point)
    }

    fn within_id(&self, node: &NodeId, id: &str) -> bool {
        let mut current = Some(*node);
        while let Some(n) = current {
            if let Some(NodeData::Element { id: Some(own), .. }) = self.nodes.get(n.0)
                && own == id
            {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    fn font_size(&self, node: &NodeId) -> Option<f64> {
        let mut current = Some(*node);
        while let Some(n) = current {
            if let Some(NodeData::Element {
                font_size: Some(size),
                ..
            }) = self.nodes.get(n.0)
            {
                return Some(*size);
            }
            current = self.parent(n);
        }
        None
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_paragraph() -> (StaticPage, NodeId, NodeId) {
        let mut page = StaticPage::new(Viewport::new(1000.0, 800.0));
        let p = page.append_element(page.root(), None, Some(20.0));
        let text = page.append_text(
            p,
            "hello world",
            Point::new(10.0, 10.0),
            TextMetrics::new(8.0, 16.0),
        );
        (page, p, text)
    }

    #[test]
    fn text_rect_spans_glyphs() {
        let (page, _, text) = page_with_paragraph();
        assert_eq!(
            page.content_rect(&text),
            Some(Rect::new(10.0, 10.0, 88.0, 16.0))
        );
    }

    #[test]
    fn element_rect_is_union_of_children() {
        let (mut page, p, _) = page_with_paragraph();
        page.append_text(p, "ab", Point::new(10.0, 40.0), TextMetrics::new(8.0, 16.0));
        assert_eq!(
            page.content_rect(&p),
            Some(Rect::new(10.0, 10.0, 88.0, 46.0))
        );
    }

    #[test]
    fn empty_element_has_no_rect() {
        let mut page = StaticPage::new(Viewport::new(100.0, 100.0));
        let div = page.append_element(page.root(), None, None);
        assert_eq!(page.content_rect(&div), None);
    }

    #[test]
    fn caret_offset_is_byte_offset() {
        let mut page = StaticPage::new(Viewport::new(100.0, 100.0));
        page.append_text(
            page.root(),
            "éa",
            Point::new(0.0, 0.0),
            TextMetrics::new(10.0, 10.0),
        );
        let caret = page.caret_from_point(Point::new(15.0, 5.0)).unwrap();
        assert_eq!(caret.offset, 2);
    }

    #[test]
    fn element_from_point_finds_deepest() {
        let (page, p, _) = page_with_paragraph();
        assert_eq!(page.element_from_point(Point::new(20.0, 15.0)), Some(p));
        assert_eq!(page.element_from_point(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn font_size_inherits_from_ancestor() {
        let (mut page, p, _) = page_with_paragraph();
        let span = page.append_element(p, None, None);
        assert_eq!(page.font_size(&span), Some(20.0));
    }

    #[test]
    fn within_id_walks_ancestors() {
        let mut page = StaticPage::new(Viewport::new(100.0, 100.0));
        let tooltip = page.append_element(page.root(), Some("assistant-tooltip"), None);
        let inner = page.append_element(tooltip, None, None);
        assert!(page.within_id(&inner, "assistant-tooltip"));
        assert!(!page.within_id(&page.root(), "assistant-tooltip"));
    }
}
