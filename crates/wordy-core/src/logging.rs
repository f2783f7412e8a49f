#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled the usual macros are re-exported here
//! so call sites can write `crate::logging::debug!` without depending on
//! `tracing` directly. Without the feature the module is empty and call
//! sites are compiled out behind `#[cfg(feature = "tracing")]`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
