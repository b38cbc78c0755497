//! Unit tests for rp-atf.

#[cfg(test)]
mod helpers {
    use rp_core::SafeInterval;

    use crate::{CompoundAtf, EdgeAtf};

    pub const INF: f64 = f64::INFINITY;

    /// `[-inf, alpha, beta, delta]`, the shape every search result has.
    pub fn path(alpha: f64, beta: f64, delta: f64) -> EdgeAtf {
        EdgeAtf::new(f64::NEG_INFINITY, alpha, beta, delta)
    }

    pub fn profile(begin: f64, end: f64) -> CompoundAtf<&'static str> {
        CompoundAtf::new(SafeInterval::new(begin, end), "none")
    }
}

#[cfg(test)]
mod neighbour {
    use rp_core::AgentId;

    use crate::NeighbouringAgent;

    #[test]
    fn none_is_absent_and_admits_anything() {
        let n = NeighbouringAgent::NONE;
        assert!(!n.is_present());
        assert!(n.admits(1e9));
        assert_eq!(n.trailing_allocations().count(), 0);
    }

    #[test]
    fn trailing_allocations_unsafe_zone_then_full_buffer() {
        let alloc = |max, len| NeighbouringAgent::new(AgentId(1), max, len).trailing_allocations().collect::<Vec<_>>();
        assert_eq!(alloc(10.0, 4.0), vec![4.0, 10.0]);
        assert_eq!(alloc(3.0, 4.0), vec![3.0], "zone longer than the buffer");
        assert_eq!(alloc(4.0, 4.0), vec![4.0], "zone equal to the buffer");
        assert_eq!(alloc(10.0, 0.0), vec![10.0]);
        assert!(alloc(0.0, 4.0).is_empty());
        assert!(alloc(f64::INFINITY, 0.0).is_empty());
    }

    #[test]
    fn admits_within_capacity() {
        let n = NeighbouringAgent::new(AgentId(0), 10.0, 4.0);
        assert!(n.admits(0.0));
        assert!(n.admits(10.0));
        assert!(!n.admits(10.1));
        assert!(!n.admits(-1.0));
    }
}

#[cfg(test)]
mod gamma {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use rp_core::{AgentId, NodeId};

    use crate::{Gamma, GammaItem};

    fn hash_of(g: &Gamma) -> u64 {
        let mut h = DefaultHasher::new();
        g.hash(&mut h);
        h.finish()
    }

    #[test]
    fn missing_entries_read_as_zero() {
        let g = Gamma::new(2);
        assert_eq!(g.consumed(AgentId(1)), 0.0);
        assert_eq!(g.consumed(AgentId(7)), 0.0);
        assert_eq!(g.consumed(AgentId::INVALID), 0.0);
    }

    #[test]
    fn with_item_grows_and_leaves_original() {
        let g = Gamma::new(1);
        let h = g.with_item(AgentId(3), GammaItem::new(1.0, 4.0));
        assert_eq!(g.consumed(AgentId(3)), 0.0);
        assert_eq!(h.consumed(AgentId(3)), 4.0);
        assert_eq!(h.len(), 4);
        assert_eq!(h.sum_of_delays(), 4.0);
        assert_eq!(h.sum_of_minimum_delays(), 1.0);
    }

    #[test]
    fn equality_ignores_length_and_provenance() {
        let a = Gamma::new(1).with_item(AgentId(0), GammaItem::new(1.0, 2.0));
        let b = Gamma::new(5)
            .with_item(AgentId(0), GammaItem::new(1.0, 2.0).with_origin(NodeId(3), None));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(Gamma::new(0), Gamma::new(3));
    }

    #[test]
    fn negative_zero_equals_zero() {
        let a = Gamma::new(1).with_item(AgentId(0), GammaItem::new(-0.0, 0.0));
        assert_eq!(a, Gamma::new(1));
        assert_eq!(hash_of(&a), hash_of(&Gamma::new(1)));
    }

    #[test]
    fn different_bounds_differ() {
        let a = Gamma::new(2).with_item(AgentId(1), GammaItem::new(0.0, 4.0));
        let b = Gamma::new(2).with_item(AgentId(1), GammaItem::new(2.0, 4.0));
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "[1:0..4]");
    }
}

#[cfg(test)]
mod edge {
    use rp_core::{AgentId, AtfId, NodeId, SnapshotId};

    use super::helpers::{INF, path};
    use crate::{EdgeAtf, Gamma, GammaItem, NeighbouringAgent};

    #[test]
    fn with_gamma_item_keeps_domain_and_key() {
        let gamma = Gamma::new(2).with_item(AgentId(1), GammaItem::new(1.0, 4.0));
        let f = EdgeAtf::with_gamma(f64::NEG_INFINITY, 3.0, 12.0, 5.0, gamma);
        let item = GammaItem::new(1.0, 4.0).with_origin(NodeId(3), Some(SnapshotId(0)));
        let g = f.with_gamma_item(AgentId(1), item);
        assert_eq!((g.alpha(), g.beta(), g.delta()), (3.0, 12.0, 5.0));
        assert_eq!(g.gamma(), f.gamma());
        assert_eq!(g.gamma().get(AgentId(1)).snapshot, Some(SnapshotId(0)));
    }

    #[test]
    fn earliest_arrival_is_alpha_plus_delta() {
        let f = EdgeAtf::new(0.0, 3.0, 10.0, 5.0);
        assert_eq!(f.earliest_arrival_time(), 8.0);
    }

    #[test]
    fn arrival_time_pieces() {
        let f = EdgeAtf::new(0.0, 3.0, 10.0, 5.0);
        assert_eq!(f.arrival_time(-1.0), INF);
        assert_eq!(f.arrival_time(0.0), 8.0);
        assert_eq!(f.arrival_time(2.9), 8.0);
        assert_eq!(f.arrival_time(3.0), 8.0);
        assert_eq!(f.arrival_time(7.0), 12.0);
        assert_eq!(f.arrival_time(10.0), INF);
        assert_eq!(f.inclusive_arrival_time(10.0), 15.0);
    }

    #[test]
    fn arrival_time_is_non_decreasing() {
        let f = EdgeAtf::new(-5.0, 3.0, 40.0, 2.5);
        let mut prev = f64::NEG_INFINITY;
        let mut t = -5.0;
        while t < 40.0 {
            let a = f.arrival_time(t);
            assert!(a >= prev, "arrival dropped at {t}");
            prev = a;
            t += 0.25;
        }
    }

    #[test]
    fn identity_and_unreachable() {
        let id = EdgeAtf::identity(7.0, Gamma::new(0));
        assert_eq!(id.arrival_time(2.0), 7.0);
        assert_eq!(id.arrival_time(9.0), 9.0);
        let u = EdgeAtf::unreachable();
        assert!(u.is_unreachable());
        assert_eq!(u.arrival_time(0.0), INF);
        assert_eq!(u.earliest_arrival_time(), INF);
    }

    #[test]
    fn compose_without_neighbours() {
        let cur = EdgeAtf::identity(0.0, Gamma::new(0));
        let edge = EdgeAtf::new(0.0, 0.0, 100.0, 5.0);
        let none = NeighbouringAgent::NONE;
        let p = cur.compose(&edge, &none, &none, Gamma::new(0));
        assert_eq!((p.alpha(), p.beta(), p.delta()), (0.0, 100.0, 5.0));
        assert_eq!(p.zeta(), f64::NEG_INFINITY);

        let next = EdgeAtf::new(0.0, 20.0, 50.0, 3.0);
        let q = p.compose(&next, &none, &none, Gamma::new(0));
        // window [20, 50) shifted back by the 5 already travelled
        assert_eq!((q.alpha(), q.beta(), q.delta()), (15.0, 45.0, 8.0));
        assert_eq!(q.earliest_arrival_time(), 23.0);
    }

    #[test]
    fn compose_applies_consumed_buffer() {
        let before = NeighbouringAgent::new(AgentId(0), INF, 0.0);
        let after = NeighbouringAgent::new(AgentId(1), 10.0, 4.0);
        let gamma = Gamma::new(2)
            .with_item(AgentId(0), GammaItem::new(1.0, 2.0))
            .with_item(AgentId(1), GammaItem::new(0.0, 4.0));
        let cur = EdgeAtf::identity(0.0, Gamma::new(2));
        let edge = EdgeAtf::new(0.0, 5.0, 20.0, 5.0);
        let p = cur.compose(&edge, &before, &after, gamma.clone());
        assert_eq!(p.alpha(), 7.0);
        assert_eq!(p.beta(), 24.0);
        assert_eq!(p.gamma(), &gamma);
    }

    #[test]
    fn collapse_and_restrict() {
        let p = path(22.0, 20.0, 5.0);
        assert!(p.is_collapsed());
        let q = path(0.0, 20.0, 5.0).restrict_beta(12.0);
        assert_eq!(q.beta(), 12.0);
        assert_eq!(path(0.0, 20.0, 5.0).restrict_beta(30.0).beta(), 20.0);
    }

    #[test]
    fn segments_split_at_alpha() {
        let segs: Vec<_> = EdgeAtf::new(0.0, 3.0, 10.0, 5.0).segments(AtfId(1)).collect();
        assert_eq!(segs.len(), 2);
        assert_eq!((segs[0].x0, segs[0].x1), (0.0, 3.0));
        assert_eq!((segs[1].x0, segs[1].x1), (3.0, 10.0));
        assert_eq!((segs[1].y0, segs[1].y1), (8.0, 15.0));

        // collapsed: only the waiting part, cut at beta
        let segs: Vec<_> = path(22.0, 20.0, 5.0).segments(AtfId(1)).collect();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].x1, 20.0);
    }

    #[test]
    fn ordering_by_earliest_arrival() {
        let mut v = vec![path(5.0, 9.0, 5.0), path(0.0, 9.0, 1.0), path(2.0, 9.0, 2.0)];
        v.sort_by(|a, b| a.cmp_by_earliest(b));
        let eats: Vec<f64> = v.iter().map(|f| f.earliest_arrival_time()).collect();
        assert_eq!(eats, vec![1.0, 4.0, 10.0]);
    }
}

#[cfg(test)]
mod segment {
    use rp_core::AtfId;

    use super::helpers::path;
    use crate::{EdgeAtf, Segment, lower_envelope};

    #[test]
    fn overlap_is_strict() {
        let f = path(0.0, 100.0, 1.0);
        let a = Segment::of(0.0, 10.0, AtfId(0), &f);
        let b = Segment::of(10.0, 20.0, AtfId(0), &f);
        let c = Segment::of(5.0, 15.0, AtfId(0), &f);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(a.contains(0.0) && !a.contains(10.0));
    }

    #[test]
    fn envelope_splits_at_crossover() {
        // t + 10 against max(t, 30): cross at 20
        let atfs = vec![EdgeAtf::unreachable(), path(0.0, 100.0, 10.0), path(30.0, 100.0, 0.0)];
        let inc = Segment::of(0.0, 100.0, AtfId(1), &atfs[1]);
        let chl = Segment::of(0.0, 100.0, AtfId(2), &atfs[2]);
        let env = lower_envelope(&inc, &chl, &atfs);
        assert_eq!(env.len(), 2);
        assert_eq!((env[0].x0, env[0].x1, env[0].owner), (0.0, 20.0, AtfId(1)));
        assert_eq!((env[1].x0, env[1].x1, env[1].owner), (20.0, 100.0, AtfId(2)));
    }

    #[test]
    fn ties_keep_incumbent() {
        let atfs = vec![path(0.0, 50.0, 5.0), path(0.0, 50.0, 5.0)];
        let inc = Segment::of(0.0, 50.0, AtfId(0), &atfs[0]);
        let chl = Segment::of(10.0, 30.0, AtfId(1), &atfs[1]);
        let env = lower_envelope(&inc, &chl, &atfs);
        assert_eq!(env.len(), 1);
        assert_eq!(env[0].owner, AtfId(0));
        assert_eq!((env[0].x0, env[0].x1), (0.0, 50.0));
    }

    #[test]
    fn challenger_inside_wins_middle() {
        let atfs = vec![path(0.0, 50.0, 9.0), path(0.0, 50.0, 5.0)];
        let inc = Segment::of(0.0, 50.0, AtfId(0), &atfs[0]);
        let chl = Segment::of(10.0, 30.0, AtfId(1), &atfs[1]);
        let env = lower_envelope(&inc, &chl, &atfs);
        let owners: Vec<_> = env.iter().map(|s| (s.x0, s.x1, s.owner.0)).collect();
        assert_eq!(owners, vec![(0.0, 10.0, 0), (10.0, 30.0, 1), (30.0, 50.0, 0)]);
    }

    #[test]
    fn clip_recomputes_bounds() {
        let f = path(0.0, 100.0, 1.0);
        let s = Segment::of(0.0, 100.0, AtfId(0), &f);
        let c = s.clip(10.0, 20.0, &f).unwrap();
        assert_eq!((c.x0, c.x1, c.y0, c.y1), (10.0, 20.0, 11.0, 21.0));
        assert!(s.clip(200.0, 300.0, &f).is_none());
    }
}

#[cfg(test)]
mod compound {
    use rp_core::{AtfId, QueryRng};

    use super::helpers::{INF, path, profile};
    use crate::EdgeAtf;

    fn assert_valid<T>(p: &crate::CompoundAtf<T>) {
        assert!(p.is_non_overlapping());
        assert!(p.is_bumper_to_bumper());
        assert!(p.is_monotonic_non_decreasing());
    }

    #[test]
    fn fresh_profile_is_unreachable_everywhere() {
        let p = profile(0.0, 100.0);
        assert_eq!(p.segments().len(), 1);
        assert_eq!(p.arrival_time(50.0), INF);
        assert_eq!(*p.lookup_payload(50.0), "none");
        assert_eq!(p.reachable_segments().count(), 0);
        assert_valid(&p);
    }

    #[test]
    fn single_path_tiles_window() {
        let mut p = profile(0.0, 100.0);
        let id = p.add(path(0.0, 100.0, 5.0), "a");
        assert_eq!(id, AtfId(1));
        assert_eq!(p.segments().len(), 1);
        assert_eq!(p.arrival_time(0.0), 5.0);
        assert_eq!(p.arrival_time(60.0), 65.0);
        assert_valid(&p);
    }

    #[test]
    fn partial_path_leaves_sentinel_tail() {
        let mut p = profile(0.0, 100.0);
        p.add(path(0.0, 20.0, 5.0), "a");
        let spans: Vec<_> = p.segments().iter().map(|s| (s.x0, s.x1, s.owner.0)).collect();
        assert_eq!(spans, vec![(0.0, 20.0, 1), (20.0, 100.0, 0)]);
        assert_eq!(p.arrival_time(25.0), INF);
        assert_valid(&p);
    }

    #[test]
    fn later_path_takes_over_after_crossover() {
        let mut p = profile(0.0, 100.0);
        p.add(path(0.0, 100.0, 10.0), "slow");
        p.add(path(30.0, 100.0, 0.0), "late");
        let spans: Vec<_> = p.segments().iter().map(|s| (s.x0, s.x1, s.owner.0)).collect();
        assert_eq!(spans, vec![(0.0, 20.0, 1), (20.0, 100.0, 2)]);
        assert_eq!(*p.lookup_payload(10.0), "slow");
        assert_eq!(*p.lookup_payload(25.0), "late");
        assert_eq!(p.arrival_time(25.0), 30.0);
        assert_valid(&p);
    }

    #[test]
    fn dominated_path_is_stored_but_unused() {
        let mut p = profile(0.0, 100.0);
        p.add(path(0.0, 100.0, 5.0), "fast");
        p.add(path(0.0, 100.0, 8.0), "slow");
        assert_eq!(p.segments().len(), 1);
        assert_eq!(p.entries().count(), 3);
        assert_eq!(*p.payload(AtfId(2)), "slow");
    }

    #[test]
    fn arrival_is_non_decreasing_across_segments() {
        let mut p = profile(0.0, 100.0);
        p.add(path(0.0, 20.0, 5.0), "a");
        p.add(path(20.0001, 24.0, 5.0), "b");
        p.add(path(30.0, 100.0, 15.0), "c");
        assert_valid(&p);
        let mut prev = f64::NEG_INFINITY;
        let mut t = 0.0;
        while t < 100.0 {
            let a = p.arrival_time(t);
            assert!(a >= prev, "arrival dropped at {t}");
            prev = a;
            t += 0.5;
        }
    }

    #[test]
    fn outside_window_is_unreachable() {
        let mut p = profile(10.0, 20.0);
        p.add(path(0.0, 100.0, 1.0), "a");
        assert!(!p.covers(5.0));
        assert_eq!(p.arrival_time(5.0), INF);
        assert_eq!(p.segments()[0].x0, 10.0);
    }

    #[test]
    #[should_panic]
    fn lookup_outside_window_panics() {
        let p = profile(10.0, 20.0);
        p.lookup(25.0);
    }

    #[test]
    fn sampling_is_deterministic() {
        let mut p = profile(0.0, 100.0);
        p.add(path(0.0, 100.0, 5.0), "a");
        let a = p.sample_departure_times(16, &mut QueryRng::new(9, 0));
        let b = p.sample_departure_times(16, &mut QueryRng::new(9, 0));
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.iter().all(|(t, y)| *y == t + 5.0));

        let open = crate::CompoundAtf::new(rp_core::SafeInterval::starting_at(0.0), ());
        assert!(open.sample_departure_times(4, &mut QueryRng::new(9, 0)).is_empty());
    }

    #[test]
    fn display_lists_segments() {
        let mut p = profile(0.0, 10.0);
        p.add(EdgeAtf::new(f64::NEG_INFINITY, 0.0, 10.0, 1.0), "a");
        let s = p.to_string();
        assert!(s.starts_with("compound ATF over <0,10>"));
        assert!(s.contains("AtfId(1)"));
    }

    #[test]
    fn long_staircase_then_dominating_path() {
        // Pieces shaped like consecutive searches: `[2k, 2k + 2)` each.
        let mut p = profile(0.0, 1200.0);
        for k in 0..500 {
            let a = 2.0 * k as f64;
            p.add(path(a, a + 2.0, 10.0), "step");
        }
        assert_eq!(p.segments().len(), 501);
        assert_valid(&p);

        // Faster over [100, 200), and its flat part wins from 95 on.
        let fast = p.add(path(100.0, 200.0, 5.0), "fast");
        assert_eq!(p.segments().len(), 450);
        assert_valid(&p);
        assert_eq!(p.arrival_time(50.0), 60.0);
        assert_eq!(p.arrival_time(94.5), 104.5);
        assert_eq!(p.arrival_time(97.0), 105.0);
        assert_eq!(p.arrival_time(150.0), 155.0);
        assert_eq!(p.arrival_time(201.0), 211.0);
        assert_eq!(p.arrival_time(1100.0), INF);
        let owned: Vec<_> = p.segments().iter().filter(|s| s.owner == fast).map(|s| (s.x0, s.x1)).collect();
        assert_eq!(owned, vec![(95.0, 200.0)]);
    }
}
