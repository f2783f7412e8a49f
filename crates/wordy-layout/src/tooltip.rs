#![forbid(unsafe_code)]

//! Tooltip style records and the viewport adjuster.
//!
//! [`TooltipStyles`] is the resolved override record the renderer applies on
//! top of its base styles. [`TooltipStylesPatch`] is an incremental change to
//! it: every field can be kept, cleared, or set, which is how the adjuster
//! flips the horizontal anchor (clear `left`, set `right`).
//!
//! # Adjustment rules
//!
//! Given the rendered rectangle (viewport coordinates) and a screen-edge
//! padding `p`, each axis is corrected independently:
//!
//! | Axis | Condition | Patch |
//! |------|-----------|-------|
//! | horizontal | `width > vw - 2p` | `left = p`, `width = vw - 2p` |
//! | horizontal | else `right > vw - p` | clear `left`, `right = p` |
//! | vertical | `height > vh - 2p` | `top = scrollY + p`, `height = vh - 2p` |
//! | vertical | else `bottom > vh - p` | `top = top + scrollY - height - 1.5 * fontSize` |
//!
//! Overflow on one axis never blocks correction on the other.
//!
//! # Invariants
//!
//! 1. Within an axis the two branches are exclusive; the size clamp wins.
//! 2. A tooltip already inside the padded viewport yields an empty patch.
//! 3. Applying an empty patch leaves styles unchanged.

use serde::{Deserialize, Serialize};
use wordy_core::geometry::{Point, Rect, ScrollOffset, Viewport};

/// Screen-edge padding in pixels.
pub const DEFAULT_PADDING: f64 = 16.0;

/// Vertical gap, in multiples of the font size, left between the pointer
/// and a tooltip flipped above it.
const FLIP_ABOVE_FONT_FACTOR: f64 = 1.5;

// ---------------------------------------------------------------------------
// Resolved styles
// ---------------------------------------------------------------------------

/// Absolute position offsets in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
}

/// Explicit size clamps in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Override record layered on top of the tooltip's base styles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipStyles {
    #[serde(default)]
    pub position: TooltipPosition,
    #[serde(default)]
    pub size: TooltipSize,
}

impl TooltipStyles {
    /// Styles placing the tooltip at `position` with no size clamps.
    #[must_use]
    pub const fn at(position: TooltipPosition) -> Self {
        Self {
            position,
            size: TooltipSize {
                width: None,
                height: None,
            },
        }
    }

    /// Whether no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge a patch into these styles, field by field.
    pub fn apply(&mut self, patch: &TooltipStylesPatch) {
        patch.position.left.apply_to(&mut self.position.left);
        patch.position.top.apply_to(&mut self.position.top);
        patch.position.right.apply_to(&mut self.position.right);
        patch.position.bottom.apply_to(&mut self.position.bottom);
        patch.size.width.apply_to(&mut self.size.width);
        patch.size.height.apply_to(&mut self.size.height);
    }

    /// CSS declarations for the set fields, in a stable order.
    #[must_use]
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        [
            ("left", self.position.left),
            ("top", self.position.top),
            ("right", self.position.right),
            ("bottom", self.position.bottom),
            ("width", self.size.width),
            ("height", self.size.height),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, format!("{v}px"))))
        .collect()
    }
}

/// Default placement for a freshly detected word: just below the pointer,
/// one font size down, in document coordinates.
#[must_use]
pub fn default_position(pointer: Point, scroll: ScrollOffset, font_size: f64) -> TooltipPosition {
    TooltipPosition {
        left: Some(pointer.x + scroll.x),
        top: Some(pointer.y + scroll.y + font_size),
        right: None,
        bottom: None,
    }
}

// ---------------------------------------------------------------------------
// Patches
// ---------------------------------------------------------------------------

/// A three-way field edit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edit<T> {
    /// Leave the field as it is.
    #[default]
    Keep,
    /// Unset the field.
    Clear,
    /// Replace the field.
    Set(T),
}

impl<T: Copy> Edit<T> {
    /// Apply the edit to an optional field.
    #[inline]
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *field = None,
            Self::Set(value) => *field = Some(value),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Edits to the position offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionPatch {
    #[serde(default)]
    pub left: Edit<f64>,
    #[serde(default)]
    pub top: Edit<f64>,
    #[serde(default)]
    pub right: Edit<f64>,
    #[serde(default)]
    pub bottom: Edit<f64>,
}

/// Edits to the size clamps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizePatch {
    #[serde(default)]
    pub width: Edit<f64>,
    #[serde(default)]
    pub height: Edit<f64>,
}

/// Incremental change to [`TooltipStyles`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipStylesPatch {
    #[serde(default)]
    pub position: PositionPatch,
    #[serde(default)]
    pub size: SizePatch,
}

impl TooltipStylesPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.left.is_keep()
            && self.position.top.is_keep()
            && self.position.right.is_keep()
            && self.position.bottom.is_keep()
            && self.size.width.is_keep()
            && self.size.height.is_keep()
    }
}

// ---------------------------------------------------------------------------
// Viewport adjustment
// ---------------------------------------------------------------------------

/// Viewport collision corrector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipLayout {
    /// Minimum distance kept between the tooltip and the viewport edges.
    pub padding: f64,
}

impl Default for TooltipLayout {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
        }
    }
}

impl TooltipLayout {
    #[must_use]
    pub const fn new(padding: f64) -> Self {
        Self { padding }
    }

    /// Compute the corrective patch for a rendered tooltip.
    ///
    /// `rendered` is the tooltip's measured bounding box in viewport
    /// coordinates; `font_size` is the target word's font size.
    #[must_use]
    pub fn adjust(
        &self,
        rendered: Rect,
        viewport: Viewport,
        scroll: ScrollOffset,
        font_size: f64,
    ) -> TooltipStylesPatch {
        let p = self.padding;
        let mut patch = TooltipStylesPatch::default();

        if rendered.width > viewport.width - 2.0 * p {
            patch.position.left = Edit::Set(p);
            patch.size.width = Edit::Set(viewport.width - 2.0 * p);
        } else if rendered.right() > viewport.width - p {
            patch.position.left = Edit::Clear;
            patch.position.right = Edit::Set(p);
        }

        if rendered.height > viewport.height - 2.0 * p {
            patch.position.top = Edit::Set(scroll.y + p);
            patch.size.height = Edit::Set(viewport.height - 2.0 * p);
        } else if rendered.bottom() > viewport.height - p {
            patch.position.top = Edit::Set(
                rendered.top + scroll.y - rendered.height - font_size * FLIP_ABOVE_FONT_FACTOR,
            );
        }

        patch
    }
}

/// [`TooltipLayout::adjust`] with the default padding.
#[must_use]
pub fn adjust_for_viewport(
    rendered: Rect,
    viewport: Viewport,
    scroll: ScrollOffset,
    font_size: f64,
) -> TooltipStylesPatch {
    TooltipLayout::default().adjust(rendered, viewport, scroll, font_size)
}
