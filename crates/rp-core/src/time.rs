//! Continuous time model.
//!
//! # Design
//!
//! Departure and arrival times are `f64` seconds.  Unlike an integer tick
//! counter, a float gives the arrival time algebra the two values it needs
//! at its edges: `-inf` (an arrival function valid for every earlier
//! departure) and `+inf` (unreachable, or a domain with no upper bound).
//!
//! Comparisons that decide whether the reference time has moved use the
//! [`EPSILON`] tolerance; everything else compares exactly so that segment
//! boundaries shared by two pieces stay bit-identical.

use std::fmt;

use crate::{RpError, RpResult};

/// A point in time, in seconds.
pub type Time = f64;

/// Numeric tolerance used when advancing the reference departure time and
/// when recording the minimum buffer a departure needs.
pub const EPSILON: Time = 0.0001;

// ── SafeInterval ──────────────────────────────────────────────────────────────

/// Half-open time window `[begin, end)` during which a location is free for
/// one agent.
///
/// Also used for any other half-open departure window, e.g. the window a
/// compound arrival time function covers.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafeInterval {
    pub begin: Time,
    pub end: Time,
}

impl SafeInterval {
    /// The interval that contains every finite time.
    pub const UNBOUNDED: SafeInterval = SafeInterval {
        begin: f64::NEG_INFINITY,
        end: f64::INFINITY,
    };

    #[inline]
    pub fn new(begin: Time, end: Time) -> Self {
        Self { begin, end }
    }

    /// Like [`new`](Self::new) but rejects NaN bounds and `begin > end`.
    pub fn checked(begin: Time, end: Time) -> RpResult<Self> {
        if begin.is_nan() || end.is_nan() || begin > end {
            return Err(RpError::InvalidInterval { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// `[begin, +inf)`.
    #[inline]
    pub fn starting_at(begin: Time) -> Self {
        Self { begin, end: f64::INFINITY }
    }

    #[inline]
    pub fn contains(&self, t: Time) -> bool {
        self.begin <= t && t < self.end
    }

    /// `true` if the two windows share at least one instant.
    #[inline]
    pub fn overlaps(&self, other: &SafeInterval) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.begin < self.end)
    }

    /// Length of the window (`+inf` if unbounded, `0` if empty).
    #[inline]
    pub fn len(&self) -> Time {
        if self.is_empty() { 0.0 } else { self.end - self.begin }
    }

    /// The common part of two windows, or `None` if they do not overlap.
    pub fn intersect(&self, other: &SafeInterval) -> Option<SafeInterval> {
        let w = SafeInterval::new(self.begin.max(other.begin), self.end.min(other.end));
        if w.is_empty() { None } else { Some(w) }
    }
}

impl fmt::Display for SafeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.begin, self.end)
    }
}
