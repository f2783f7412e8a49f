#![forbid(unsafe_code)]

//! Tooltip placement primitives and viewport correction.
//!
//! The tooltip is absolutely positioned in document coordinates. Its styles
//! are a partial override record: a default position derived from the
//! pointer, plus corrective patches computed after each render so the
//! tooltip stays fully on screen.

pub mod tooltip;

pub use tooltip::{
    DEFAULT_PADDING, Edit, PositionPatch, SizePatch, TooltipLayout, TooltipPosition, TooltipSize,
    TooltipStyles, TooltipStylesPatch, adjust_for_viewport, default_position,
};
pub use wordy_core::geometry::{Point, Rect, ScrollOffset, Viewport};
