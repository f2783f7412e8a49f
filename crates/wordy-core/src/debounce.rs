#![forbid(unsafe_code)]

//! Trailing-edge debouncing for high-frequency input.
//!
//! Pointer motion arrives far faster than word resolution is worth running.
//! [`Debouncer`] keeps only the latest value and releases it once the input
//! has been quiet for the configured interval, so at most one resolution
//! runs per debounce window.
//!
//! # Usage
//!
//! ```
//! use wordy_core::debounce::Debouncer;
//! use web_time::{Duration, Instant};
//!
//! let mut debouncer = Debouncer::new(Duration::from_millis(100));
//! let start = Instant::now();
//!
//! debouncer.push((10, 10), start);
//! debouncer.push((20, 25), start + Duration::from_millis(40));
//!
//! // Still inside the window measured from the latest push.
//! assert!(debouncer.poll(start + Duration::from_millis(120)).is_none());
//!
//! // Quiet long enough: only the latest value comes out.
//! assert_eq!(debouncer.poll(start + Duration::from_millis(140)), Some((20, 25)));
//! ```
//!
//! # Design
//!
//! The debouncer is clock-agnostic: callers pass `now` explicitly, which
//! keeps it deterministic under test and usable from a host timer callback.

use web_time::{Duration, Instant};

/// Latest-value-wins trailing debouncer.
///
/// Not thread-safe; owned by the single event processing path.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// The configured quiet interval.
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a value, replacing any pending one and restarting the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.interval,
        });
    }

    /// Release the pending value if the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// When the pending value becomes due, for scheduling a host timer.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Check if a value is waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without releasing it.
    ///
    /// Used on mode changes such as hotkey release or focus loss.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
