//! Gapless merged profile of many arrival time functions.
//!
//! # Layout
//!
//! ```text
//!   atfs:     [sentinel, f1, f2, ...]      append-only, indexed by AtfId
//!   payloads: [p0,       p1, p2, ...]      parallel to atfs
//!   segments: [x0,x1)->AtfId ...           sorted, tiles the whole window
//! ```
//!
//! The profile is created over a departure window and seeded with the
//! unreachable sentinel, so every departure time inside the window is
//! always covered.  Adding a function replaces the covering segments by
//! their lower envelope with the new one.
//!
//! After every mutation three invariants are asserted, in all build
//! profiles, around the rewritten range (the rest is unchanged):
//!
//! - segments are pairwise non-overlapping,
//! - consecutive segments touch (`a.x1 == b.x0`) and span the window,
//! - arrival bounds are non-decreasing (`a.y1 <= b.y0`, within `EPSILON`).

use std::fmt;
use std::ops::Range;

use rp_core::{AtfId, EPSILON, QueryRng, SafeInterval, Time};

use crate::{EdgeAtf, Segment, lower_envelope};

/// Profile over the departure window `window`, with one payload per ATF.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompoundAtf<T> {
    window: SafeInterval,
    atfs: Vec<EdgeAtf>,
    payloads: Vec<T>,
    segments: Vec<Segment>,
}

impl<T> CompoundAtf<T> {
    /// The sentinel's id.
    pub const SENTINEL: AtfId = AtfId(0);

    /// Empty profile: the unreachable sentinel, carrying
    /// `unreachable_payload`, covers all of `window`.
    pub fn new(window: SafeInterval, unreachable_payload: T) -> Self {
        let sentinel = EdgeAtf::unreachable();
        let segments = if window.is_empty() {
            Vec::new()
        } else {
            vec![Segment::of(window.begin, window.end, Self::SENTINEL, &sentinel)]
        };
        Self { window, atfs: vec![sentinel], payloads: vec![unreachable_payload], segments }
    }

    /// Merge `atf` into the profile.  Only its part inside the window is
    /// considered.
    ///
    /// Only the segments around the merged range are rewritten and
    /// rechecked; the rest of the profile is untouched.
    ///
    /// # Panics
    ///
    /// If the merged segments break one of the module invariants.
    pub fn add(&mut self, atf: EdgeAtf, payload: T) -> AtfId {
        let id = AtfId(self.atfs.len() as u32);
        let pieces: Vec<Segment> = atf
            .segments(id)
            .filter_map(|s| s.clip(self.window.begin, self.window.end, &atf))
            .collect();
        self.atfs.push(atf);
        self.payloads.push(payload);

        let (Some(first), Some(last)) = (pieces.first(), pieces.last()) else {
            return id;
        };
        let (lo, hi) = (first.x0, last.x1);
        for piece in pieces {
            self.merge(piece);
        }

        let begin = self.segments.partition_point(|s| s.x1 < lo).saturating_sub(1);
        let end = (self.segments.partition_point(|s| s.x0 <= hi) + 1).min(self.segments.len());
        let end = self.coalesce(begin..end);
        self.assert_invariants(begin.saturating_sub(1)..(end + 1).min(self.segments.len()));
        id
    }

    /// Replace every segment `piece` overlaps with its lower envelope
    /// against `piece`.  The window stays tiled since each envelope spans
    /// exactly the segment it replaces.
    fn merge(&mut self, piece: Segment) {
        let first = self.segments.partition_point(|s| s.x1 <= piece.x0);
        let last = self.segments.partition_point(|s| s.x0 < piece.x1);
        if first >= last {
            return;
        }
        let challenger_atf = &self.atfs[piece.owner.index()];
        let mut replacement = Vec::with_capacity(2 * (last - first) + 1);
        for existing in &self.segments[first..last] {
            match piece.clip(existing.x0, existing.x1, challenger_atf) {
                Some(challenger) => {
                    replacement.extend(lower_envelope(existing, &challenger, &self.atfs));
                }
                None => replacement.push(*existing),
            }
        }
        self.segments.splice(first..last, replacement);
    }

    /// Join touching same-owner segments in `range`; returns the new end of
    /// the range.
    fn coalesce(&mut self, range: Range<usize>) -> usize {
        let mut merged: Vec<Segment> = Vec::with_capacity(range.len());
        for s in &self.segments[range.clone()] {
            Segment::push_or_extend(&mut merged, s.x0, s.x1, s.owner, &self.atfs[s.owner.index()]);
        }
        let end = range.start + merged.len();
        self.segments.splice(range, merged);
        end
    }

    /// Check the invariants between the segments in `range` and that the
    /// profile still spans the window.
    fn assert_invariants(&self, range: Range<usize>) {
        let local = &self.segments[range];
        assert!(
            local.windows(2).all(|w| w[0].x1 <= w[1].x0),
            "compound ATF segments overlap: {self}"
        );
        assert!(
            local.windows(2).all(|w| w[0].x1 == w[1].x0) && self.spans_window(),
            "compound ATF segments leave a gap: {self}"
        );
        assert!(
            local.windows(2).all(|w| w[0].y1 <= w[1].y0 + EPSILON),
            "compound ATF is not monotonic: {self}"
        );
    }

    fn spans_window(&self) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(a), Some(b)) => a.x0 == self.window.begin && b.x1 == self.window.end,
            _ => self.window.is_empty(),
        }
    }

    pub fn is_non_overlapping(&self) -> bool {
        self.segments.windows(2).all(|w| w[0].x1 <= w[1].x0)
    }

    /// Consecutive segments touch exactly and together span the window.
    pub fn is_bumper_to_bumper(&self) -> bool {
        self.segments.windows(2).all(|w| w[0].x1 == w[1].x0) && self.spans_window()
    }

    pub fn is_monotonic_non_decreasing(&self) -> bool {
        self.segments.windows(2).all(|w| w[0].y1 <= w[1].y0 + EPSILON)
    }

    #[inline]
    pub fn window(&self) -> SafeInterval {
        self.window
    }

    #[inline]
    pub fn covers(&self, t: Time) -> bool {
        self.window.contains(t)
    }

    fn segment_at(&self, t: Time) -> &Segment {
        let i = self.segments.partition_point(|s| s.x1 <= t);
        let seg = &self.segments[i];
        assert!(seg.contains(t), "departure time {t} outside profile window {}", self.window);
        seg
    }

    /// The ATF serving departure time `t`.
    ///
    /// # Panics
    ///
    /// If `t` is outside the window.  Check with [`covers`](Self::covers)
    /// first when in doubt.
    pub fn lookup(&self, t: Time) -> &EdgeAtf {
        &self.atfs[self.segment_at(t).owner.index()]
    }

    /// The payload of the ATF serving `t`.  Panics like [`lookup`](Self::lookup).
    pub fn lookup_payload(&self, t: Time) -> &T {
        &self.payloads[self.segment_at(t).owner.index()]
    }

    /// Best arrival time for departure `t`; `+inf` outside the window.
    pub fn arrival_time(&self, t: Time) -> Time {
        if !self.covers(t) {
            return f64::INFINITY;
        }
        self.lookup(t).arrival_time(t)
    }

    pub fn atf(&self, id: AtfId) -> &EdgeAtf {
        &self.atfs[id.index()]
    }

    pub fn payload(&self, id: AtfId) -> &T {
        &self.payloads[id.index()]
    }

    /// Every ATF added so far, sentinel first.
    pub fn entries(&self) -> impl Iterator<Item = (AtfId, &EdgeAtf, &T)> {
        self.atfs
            .iter()
            .zip(&self.payloads)
            .enumerate()
            .map(|(i, (atf, p))| (AtfId(i as u32), atf, p))
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments whose owner can actually be reached.
    pub fn reachable_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !self.atfs[s.owner.index()].is_unreachable())
    }

    /// `n` uniformly drawn departure times with their arrival times.  Empty
    /// if the window is not finite.
    pub fn sample_departure_times(&self, n: usize, rng: &mut QueryRng) -> Vec<(Time, Time)> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let Some(t) = rng.time_in(self.window) else { break };
            out.push((t, self.arrival_time(t)));
        }
        out
    }
}

impl<T> fmt::Display for CompoundAtf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "compound ATF over {}", self.window)?;
        for s in &self.segments {
            writeln!(
                f,
                "  [{}, {}) -> {} {} y=[{}, {}]",
                s.x0,
                s.x1,
                s.owner,
                self.atfs[s.owner.index()],
                s.y0,
                s.y1
            )?;
        }
        Ok(())
    }
}
