//! Immutable four-parameter arrival time function.

use std::cmp::Ordering;
use std::fmt;

use rp_core::{AgentId, AtfId, SafeInterval, Time};

use crate::{Gamma, GammaItem, NeighbouringAgent, Segment};

/// Arrival time function over one edge or one partial path.
///
/// `zeta <= alpha` bounds the waiting part, `beta` is the exclusive end of
/// the domain and `delta` the travel time once moving.  The function is
/// non-decreasing on `[zeta, beta)`.  Composition never mutates; every
/// step of a search produces a new value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeAtf {
    zeta: Time,
    alpha: Time,
    beta: Time,
    delta: Time,
    gamma: Gamma,
}

impl EdgeAtf {
    pub fn new(zeta: Time, alpha: Time, beta: Time, delta: Time) -> Self {
        Self { zeta, alpha, beta, delta, gamma: Gamma::default() }
    }

    pub fn with_gamma(zeta: Time, alpha: Time, beta: Time, delta: Time, gamma: Gamma) -> Self {
        Self { zeta, alpha, beta, delta, gamma }
    }

    /// `[-inf, t_ref, +inf, 0]`: the empty path departing no earlier than
    /// `t_ref`.  Seeds every search.
    pub fn identity(t_ref: Time, gamma: Gamma) -> Self {
        Self::with_gamma(f64::NEG_INFINITY, t_ref, f64::INFINITY, 0.0, gamma)
    }

    /// `[-inf, 0, +inf, +inf]`: arrival is never possible.
    pub fn unreachable() -> Self {
        Self::new(f64::NEG_INFINITY, 0.0, f64::INFINITY, f64::INFINITY)
    }

    #[inline]
    pub fn zeta(&self) -> Time {
        self.zeta
    }

    #[inline]
    pub fn alpha(&self) -> Time {
        self.alpha
    }

    #[inline]
    pub fn beta(&self) -> Time {
        self.beta
    }

    #[inline]
    pub fn delta(&self) -> Time {
        self.delta
    }

    #[inline]
    pub fn gamma(&self) -> &Gamma {
        &self.gamma
    }

    #[inline]
    pub fn earliest_arrival_time(&self) -> Time {
        self.alpha + self.delta
    }

    /// Arrival time when departing at `t`; `+inf` outside `[zeta, beta)`.
    pub fn arrival_time(&self, t: Time) -> Time {
        if t < self.zeta || t >= self.beta {
            return f64::INFINITY;
        }
        self.value_in_domain(t)
    }

    /// As [`arrival_time`](Self::arrival_time) with `beta` treated as a
    /// closed bound.  Only used to bound segment ends.
    pub fn inclusive_arrival_time(&self, t: Time) -> Time {
        if t < self.zeta || t > self.beta {
            return f64::INFINITY;
        }
        self.value_in_domain(t)
    }

    #[inline]
    fn value_in_domain(&self, t: Time) -> Time {
        if t < self.alpha { self.earliest_arrival_time() } else { t + self.delta }
    }

    /// `beta <= alpha`: no departure can leave without waiting past the end
    /// of the domain.
    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.beta <= self.alpha
    }

    #[inline]
    pub fn is_unreachable(&self) -> bool {
        self.delta == f64::INFINITY
    }

    /// `[zeta, beta)`.
    #[inline]
    pub fn domain(&self) -> SafeInterval {
        SafeInterval::new(self.zeta, self.beta)
    }

    /// The waiting part `[zeta, min(alpha, beta))` and the moving part
    /// `[alpha, beta)`, skipping empty ones.
    pub fn segments(&self, owner: AtfId) -> impl Iterator<Item = Segment> + '_ {
        let waiting = (self.zeta, self.alpha.min(self.beta));
        let moving = (self.alpha.max(self.zeta), self.beta);
        [waiting, moving]
            .into_iter()
            .filter(|(x0, x1)| x0 < x1)
            .map(move |(x0, x1)| Segment::of(x0, x1, owner, self))
    }

    /// Extend this path by `edge`.
    ///
    /// The edge window opens later by the delay already imposed on the
    /// agent ahead and closes later by the delay imposed on the agent behind:
    ///
    /// ```text
    ///   alpha = max(self.alpha, edge.alpha - self.delta + gamma[before])
    ///   beta  = min(self.beta,  edge.beta  - self.delta + gamma[after])
    ///   delta = self.delta + edge.delta
    /// ```
    pub fn compose(
        &self,
        edge: &EdgeAtf,
        before: &NeighbouringAgent,
        after: &NeighbouringAgent,
        gamma: Gamma,
    ) -> EdgeAtf {
        let alpha = self.alpha.max(edge.alpha - self.delta + gamma.consumed(before.id));
        let beta = self.beta.min(edge.beta - self.delta + gamma.consumed(after.id));
        EdgeAtf::with_gamma(self.zeta, alpha, beta, self.delta + edge.delta, gamma)
    }

    /// A copy with `agent`'s gamma entry replaced.  Domain and delay are
    /// unchanged, so `item` must keep the consumption the ATF was composed
    /// with.
    pub fn with_gamma_item(&self, agent: AgentId, item: GammaItem) -> EdgeAtf {
        EdgeAtf { gamma: self.gamma.with_item(agent, item), ..self.clone() }
    }

    /// A copy whose domain ends no later than `bound`.
    pub fn restrict_beta(&self, bound: Time) -> EdgeAtf {
        EdgeAtf { beta: self.beta.min(bound), ..self.clone() }
    }

    /// Total order by earliest arrival time.
    pub fn cmp_by_earliest(&self, other: &EdgeAtf) -> Ordering {
        self.earliest_arrival_time().total_cmp(&other.earliest_arrival_time())
    }
}

impl fmt::Display for EdgeAtf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{},{},{},{}>", self.zeta, self.alpha, self.beta, self.delta, self.gamma)
    }
}
