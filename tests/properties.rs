//! Cross-engine property checks (§8): fixtures shared across NCL, LCL, IBS
//! and DLFIT to confirm the four engines agree on the query contract every
//! one of them implements, even though each stores and traverses its
//! members completely differently. Per-engine unit tests already cover
//! engine-specific invariants (e.g. IBS rotation rebalancing, DLFIT's
//! `prev`/`next` overlay); this file only asserts what should hold
//! *regardless* of which engine answered the query.

use interval_collections::algebra::{overlaps, Inclusion, Interval};
use interval_collections::collection::{DynamicIntervalCollection, IntervalCollection};
use interval_collections::dlfit::FiniteIntervalTree;
use interval_collections::ibs::IntervalBST;
use interval_collections::lcl::LayeredContainmentList;
use interval_collections::ncl::NestedContainmentList;

fn iv(low: i64, high: i64) -> Interval<i64> {
    Interval::new(low, high)
}

/// §8 S1: A=[2,7) B=[4,12) C=[5,7) D=[6,8) E=[9,11) F=[11,17) G=[18,21)
fn s1_members() -> Vec<Interval<i64>> {
    vec![
        iv(2, 7),
        iv(4, 12),
        iv(5, 7),
        iv(6, 8),
        iv(9, 11),
        iv(11, 17),
        iv(18, 21),
    ]
}

fn sorted_hits<C: IntervalCollection<i64>>(c: &C, point: i64) -> Vec<(i64, i64)> {
    let mut hits: Vec<(i64, i64)> = c.find_overlaps_point(&point).map(|i| (i.low(), i.high())).collect();
    hits.sort_unstable();
    hits
}

#[test]
fn s1_stabbing_agrees_across_static_and_tree_engines() {
    let ncl = NestedContainmentList::new(s1_members());
    let lcl = LayeredContainmentList::new(s1_members());
    let mut ibs = IntervalBST::new();
    for m in s1_members() {
        ibs.add(m).unwrap();
    }

    for point in [6, 9, 11, 13] {
        let expected = sorted_hits(&ncl, point);
        assert_eq!(sorted_hits(&lcl, point), expected, "lcl disagrees with ncl at {point}");
        assert_eq!(sorted_hits(&ibs, point), expected, "ibs disagrees with ncl at {point}");
    }
}

/// Property 2: containment implies overlap, independent of which engine
/// is asked.
#[test]
fn containment_implies_overlap_holds_for_every_member_pair() {
    let members = s1_members();
    for a in &members {
        for b in &members {
            if interval_collections::algebra::contains(a, b) {
                assert!(overlaps(a, b));
            }
        }
    }
}

/// Property 3/4: query completeness and count consistency, checked against
/// a brute-force linear scan rather than another engine.
#[test]
fn find_overlaps_matches_brute_force_scan() {
    let members = s1_members();
    let ncl = NestedContainmentList::new(members.clone());
    let lcl = LayeredContainmentList::new(members.clone());

    for (lo, hi) in [(0, 5), (5, 10), (10, 20), (-5, 30)] {
        let q = iv(lo, hi);
        let mut expected: Vec<(i64, i64)> = members
            .iter()
            .filter(|m| overlaps(m, &q))
            .map(|m| (m.low(), m.high()))
            .collect();
        expected.sort_unstable();

        let mut ncl_hits: Vec<(i64, i64)> = ncl.find_overlaps(&q).map(|i| (i.low(), i.high())).collect();
        ncl_hits.sort_unstable();
        assert_eq!(ncl_hits, expected);
        assert_eq!(ncl.count_overlaps(&q), ncl.find_overlaps(&q).count());

        let mut lcl_hits: Vec<(i64, i64)> = lcl.find_overlaps(&q).map(|i| (i.low(), i.high())).collect();
        lcl_hits.sort_unstable();
        assert_eq!(lcl_hits, expected);
        assert_eq!(lcl.count_overlaps(&q), lcl.find_overlaps(&q).count());
    }
}

/// Property 5: existence consistency.
#[test]
fn find_overlap_existence_matches_find_overlaps_count() {
    let ncl = NestedContainmentList::new(s1_members());
    let lcl = LayeredContainmentList::new(s1_members());

    for (lo, hi) in [(0, 1), (6, 7), (30, 40)] {
        let q = iv(lo, hi);
        assert_eq!(ncl.find_overlap(&q).is_some(), ncl.find_overlaps(&q).count() > 0);
        assert_eq!(lcl.find_overlap(&q).is_some(), lcl.find_overlaps(&q).count() > 0);
    }
}

/// Property 6: span correctness, across every engine.
#[test]
fn span_covers_every_member_in_every_engine() {
    let members = s1_members();
    let ncl = NestedContainmentList::new(members.clone());
    let lcl = LayeredContainmentList::new(members.clone());
    let mut ibs = IntervalBST::new();
    for m in &members {
        ibs.add(*m).unwrap();
    }

    for c in [ncl.span().unwrap(), lcl.span().unwrap(), ibs.span().unwrap()] {
        for m in &members {
            assert!(interval_collections::algebra::contains(&c, m));
        }
    }
}

/// Property 7: maximum overlap upper-bounds every point's stabbing count.
#[test]
fn maximum_overlap_bounds_every_point_query() {
    let ncl = NestedContainmentList::new(s1_members());
    let lcl = LayeredContainmentList::new(s1_members());
    let max_ncl = ncl.maximum_overlap();
    let max_lcl = lcl.maximum_overlap();
    assert_eq!(max_ncl, max_lcl);
    for p in -5..25 {
        assert!(ncl.find_overlaps_point(&p).count() <= max_ncl);
        assert!(lcl.find_overlaps_point(&p).count() <= max_lcl);
    }
}

/// Property 8: add-remove is an inverse, for both dynamic engines.
#[test]
fn add_remove_inverse_holds_for_dynamic_engines() {
    let mut ibs: IntervalBST<i64> = IntervalBST::new();
    ibs.add(iv(0, 5)).unwrap();
    let before = ibs.count();
    ibs.add(iv(10, 15)).unwrap();
    ibs.remove(&iv(10, 15)).unwrap();
    assert_eq!(ibs.count(), before);
    assert_eq!(ibs.find_overlaps_point(&12).count(), 0);

    let mut t: FiniteIntervalTree<i64> = FiniteIntervalTree::new();
    t.add(iv(0, 5)).unwrap();
    let before = t.count();
    t.add(iv(10, 15)).unwrap();
    t.remove(&iv(10, 15)).unwrap();
    assert_eq!(t.count(), before);
    assert_eq!(t.find_overlaps_point(&12).count(), 0);
}

/// Property 9: clear idempotence, fires once, no-op thereafter.
#[test]
fn clear_is_idempotent_for_dynamic_engines() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut t: FiniteIntervalTree<i64> = FiniteIntervalTree::new();
    t.add(iv(0, 5)).unwrap();
    t.add(iv(10, 15)).unwrap();
    let fires = Rc::new(RefCell::new(0));
    let counter = fires.clone();
    t.subscribe(move |_| *counter.borrow_mut() += 1).unwrap();
    t.clear().unwrap();
    assert!(t.is_empty());
    let after_first = *fires.borrow();
    t.clear().unwrap();
    assert_eq!(*fires.borrow(), after_first);
}

/// Property 11: DLFIT members are pairwise non-overlapping at all times.
#[test]
fn dlfit_never_holds_overlapping_members() {
    let mut t: FiniteIntervalTree<i64> = FiniteIntervalTree::new();
    let candidates = [(0, 5), (4, 8), (5, 10), (12, 15), (14, 20), (20, 25)];
    for (lo, hi) in candidates {
        t.add(iv(lo, hi)).unwrap();
    }
    let members: Vec<Interval<i64>> = t.iter_sorted().cloned().collect();
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            assert!(!overlaps(&members[i], &members[j]));
        }
    }
}

/// §8 S3: inserting into a genuine gap never shifts anything.
#[test]
fn force_add_into_a_gap_shifts_nothing() {
    let mut t: FiniteIntervalTree<i64> = FiniteIntervalTree::new();
    t.add(iv(0, 1)).unwrap();
    t.add(iv(2, 3)).unwrap();
    let shifted = t
        .force_add(iv(1, 2), &mut |previous, next| {
            let len = next.high() - next.low();
            *next = Interval::new(previous.high(), previous.high() + len);
            false
        })
        .unwrap();
    assert!(!shifted);
    assert_eq!(t.count(), 3);
}

/// §8 S4-style cascade: every member downstream of the insertion point
/// ends up with a strictly larger low endpoint than it started with
/// (Property 12), and the result remains a valid non-overlapping, sorted
/// sequence.
#[test]
fn force_add_cascade_only_ever_increases_low_endpoints() {
    let mut t: FiniteIntervalTree<i64> = FiniteIntervalTree::new();
    for (lo, hi) in [(0, 2), (2, 3), (3, 4), (5, 6)] {
        t.add(iv(lo, hi)).unwrap();
    }
    let before: Vec<(i64, i64)> = t.iter_sorted().map(|i| (i.low(), i.high())).collect();

    let shifted = t
        .force_add(iv(1, 2), &mut |previous, next| {
            let len = next.high() - next.low();
            *next = Interval::new(previous.high(), previous.high() + len);
            false
        })
        .unwrap();
    assert!(shifted);

    let after: Vec<(i64, i64)> = t.iter_sorted().map(|i| (i.low(), i.high())).collect();
    // Every original member survives, shifted forward or untouched, and
    // the sequence is still sorted and pairwise non-overlapping.
    assert_eq!(after.len(), before.len() + 1);
    for w in after.windows(2) {
        assert!(w[0].1 <= w[1].0);
    }
    let inserted_pos = after.iter().position(|&m| m == (1, 2)).expect("inserted member present");
    for (original, shifted_member) in before.iter().zip(after[inserted_pos + 1..].iter()) {
        assert!(shifted_member.0 > original.0);
    }
}

/// A degenerate point interval overlaps a stabbing query exactly at its
/// own value, and nowhere else, across every engine.
#[test]
fn degenerate_point_interval_behaves_identically_across_engines() {
    let point = Interval::with_inclusion(5, 5, Inclusion::Closed);

    let ncl = NestedContainmentList::new(vec![point]);
    let lcl = LayeredContainmentList::new(vec![point]);
    let mut ibs = IntervalBST::new();
    ibs.add(point).unwrap();

    for p in [4, 5, 6] {
        let expected = usize::from(p == 5);
        assert_eq!(ncl.find_overlaps_point(&p).count(), expected);
        assert_eq!(lcl.find_overlaps_point(&p).count(), expected);
        assert_eq!(ibs.find_overlaps_point(&p).count(), expected);
    }
}
