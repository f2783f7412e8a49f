#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: page geometry, input events, debouncing, and word-at-point resolution.
//!
//! # Role in Wordy
//! `wordy-core` is the input layer. It owns the normalized page events a host
//! feeds in, the geometry the hover core reasons about, and the pure
//! resolution logic that turns a pointer position into a single word.
//!
//! # Primary responsibilities
//! - **PageEvent**: canonical input events (keys, pointer motion, selection, focus).
//! - **Debouncer**: trailing-edge debouncing of pointer motion.
//! - **HostPage**: the seam to the real document (element lookup, text carets, fonts).
//! - **Word resolution**: descend to the text node under a point and expand to a word.
//! - **WordDetector**: sanitize and validate candidates, skipping the tooltip overlay.
//!
//! # How it fits in the system
//! The runtime (`wordy-runtime`) consumes [`detect::Detection`] values and
//! drives the hover/translation machine. Layout (`wordy-layout`) only needs
//! the geometry types, so `wordy-core` sits at the bottom of the stack.

pub mod debounce;
pub mod detect;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod page;
pub mod static_page;
pub mod word;

pub use debounce::Debouncer;
pub use detect::{Detection, WordDetector};
pub use event::{Key, KeyEvent, PageEvent, Platform};
pub use geometry::{Point, Rect, ScrollOffset, Viewport};
pub use page::{Caret, HostPage, TextGeometry};
pub use static_page::{NodeId, StaticPage, TextMetrics};
pub use word::{WordCandidate, resolve_word_at};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
