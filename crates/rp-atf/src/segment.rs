//! Departure-time segments and the lower envelope of two of them.

use rp_core::{AtfId, Time};

use crate::EdgeAtf;

/// `[x0, x1)` of departure times served by the ATF `owner`.
///
/// `y0`/`y1` bound the arrival times at the two ends.  They are used for
/// ordering checks only; lookups always re-evaluate the owning ATF.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub x0: Time,
    pub x1: Time,
    pub y0: Time,
    pub y1: Time,
    pub owner: AtfId,
}

impl Segment {
    /// Segment `[x0, x1)` of `atf`, with arrival bounds taken from it.
    pub fn of(x0: Time, x1: Time, owner: AtfId, atf: &EdgeAtf) -> Self {
        Segment {
            x0,
            x1,
            y0: atf.arrival_time(x0),
            y1: atf.inclusive_arrival_time(x1),
            owner,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1
    }

    #[inline]
    pub fn contains(&self, t: Time) -> bool {
        self.x0 <= t && t < self.x1
    }

    /// The part of this segment inside `[lo, hi)`, or `None` if empty.
    pub fn clip(&self, lo: Time, hi: Time, atf: &EdgeAtf) -> Option<Segment> {
        let (x0, x1) = (self.x0.max(lo), self.x1.min(hi));
        (x0 < x1).then(|| Segment::of(x0, x1, self.owner, atf))
    }

    /// Append `[x0, x1)` to `out`, extending the last piece when it has the
    /// same owner and ends at `x0`.
    pub(crate) fn push_or_extend(out: &mut Vec<Segment>, x0: Time, x1: Time, owner: AtfId, atf: &EdgeAtf) {
        match out.last_mut() {
            Some(last) if last.owner == owner && last.x1 == x0 => {
                last.x1 = x1;
                last.y1 = atf.inclusive_arrival_time(x1);
            }
            _ => out.push(Segment::of(x0, x1, owner, atf)),
        }
    }
}

/// Pointwise-earlier composite of two segments over their combined domain.
///
/// `atfs` is indexed by segment owner.  The result is ordered, gapless over
/// the union of both domains when they touch or overlap, and has adjacent
/// pieces with the same owner coalesced.  On ties the incumbent keeps its
/// piece, so repeated merges of equal functions are stable.
pub fn lower_envelope(incumbent: &Segment, challenger: &Segment, atfs: &[EdgeAtf]) -> Vec<Segment> {
    let inc = &atfs[incumbent.owner.index()];
    let chl = &atfs[challenger.owner.index()];
    let lo = incumbent.x0.min(challenger.x0);
    let hi = incumbent.x1.max(challenger.x1);

    let mut cuts: Vec<Time> = [
        incumbent.x0,
        incumbent.x1,
        challenger.x0,
        challenger.x1,
        inc.alpha(),
        chl.alpha(),
    ]
    .into_iter()
    .filter(|t| lo <= *t && *t <= hi)
    .collect();
    sort_dedup(&mut cuts);

    // Between two cuts each function is either flat or has slope one, so
    // the two cross at most once.
    let crossings: Vec<Time> = cuts
        .windows(2)
        .filter_map(|w| crossover(inc, chl, w[0], w[1]))
        .collect();
    cuts.extend(crossings);
    sort_dedup(&mut cuts);

    let mut out: Vec<Segment> = Vec::with_capacity(cuts.len());
    for w in cuts.windows(2) {
        let (l, r) = (w[0], w[1]);
        if l >= r {
            continue;
        }
        let in_inc = incumbent.x0 <= l && r <= incumbent.x1;
        let in_chl = challenger.x0 <= l && r <= challenger.x1;
        let owner = match (in_inc, in_chl) {
            (true, false) => incumbent.owner,
            (false, true) => challenger.owner,
            (true, true) => {
                let p = sample_point(l, r);
                if chl.arrival_time(p) < inc.arrival_time(p) {
                    challenger.owner
                } else {
                    incumbent.owner
                }
            }
            (false, false) => continue,
        };
        Segment::push_or_extend(&mut out, l, r, owner, &atfs[owner.index()]);
    }
    out
}

fn sort_dedup(cuts: &mut Vec<Time>) {
    cuts.sort_by(f64::total_cmp);
    cuts.dedup();
}

/// Departure time strictly inside `(l, r)` where a flat function meets one
/// of slope one.
fn crossover(a: &EdgeAtf, b: &EdgeAtf, l: Time, r: Time) -> Option<Time> {
    let t = match (r <= a.alpha(), r <= b.alpha()) {
        (true, false) => a.earliest_arrival_time() - b.delta(),
        (false, true) => b.earliest_arrival_time() - a.delta(),
        _ => return None,
    };
    (t.is_finite() && l < t && t < r).then_some(t)
}

/// A representative point of `[l, r)`.
fn sample_point(l: Time, r: Time) -> Time {
    match (l.is_finite(), r.is_finite()) {
        (true, true) => l + (r - l) / 2.0,
        (true, false) => l + 1.0,
        (false, true) => r - 1.0,
        (false, false) => 0.0,
    }
}
