#![forbid(unsafe_code)]

//! Host page geometry seams.
//!
//! The hover core never touches a real DOM. Hosts implement these traits
//! over whatever handle type they have (a `web_sys::Node`, an accessibility
//! tree element, or the in-memory [`StaticPage`](crate::static_page::StaticPage)
//! used in tests), and the resolver and detector stay pure.

use crate::geometry::{Point, Rect, ScrollOffset, Viewport};

/// A collapsed text caret as returned by `document.caretRangeFromPoint`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caret {
    /// Full contents of the text node holding the caret.
    pub text: String,
    /// UTF-8 byte offset of the caret inside `text`, on a char boundary.
    pub offset: usize,
}

impl Caret {
    #[must_use]
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }
}

/// Read access to node structure and text geometry.
pub trait TextGeometry {
    /// Cheap node handle.
    type Node: Clone;

    /// Whether `node` is a text node (as opposed to an element).
    fn is_text(&self, node: &Self::Node) -> bool;

    /// Child nodes in document order.
    fn child_nodes(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Bounding rectangle of the node's contents, as a range selecting the
    /// node contents would report it. `None` when the node has no layout.
    fn content_rect(&self, node: &Self::Node) -> Option<Rect>;

    /// Caret at a viewport point, or `None` when no text is there.
    fn caret_from_point(&self, point: Point) -> Option<Caret>;
}

/// Everything the detector needs from the page beyond text geometry.
pub trait HostPage: TextGeometry {
    /// Topmost element at a viewport point (`document.elementFromPoint`).
    fn element_from_point(&self, point: Point) -> Option<Self::Node>;

    /// Whether the node or one of its ancestors carries the given `id`
    /// (`element.closest('#id')`).
    fn within_id(&self, node: &Self::Node, id: &str) -> bool;

    /// Computed font size of an element in pixels.
    fn font_size(&self, node: &Self::Node) -> Option<f64>;

    /// Current document scroll offset.
    fn scroll_offset(&self) -> ScrollOffset;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;
}
