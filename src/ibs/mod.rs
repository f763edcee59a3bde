//! Interval Binary Search Tree (§4.5): a dynamic, AVL-balanced tree
//! supporting insertion, removal, point stabbing, and range overlap
//! queries in `O(log n)` amortized time.
//!
//! The distilled design calls for a tree keyed by endpoint value with
//! three per-node interval sets (`Less`/`Equal`/`Greater`), reconstructed
//! from the original C5 `IntervalBinarySearchTree`. That source was
//! filtered out of the retrieval pack entirely (`original_source/` kept
//! zero files for it), and hand-deriving the exact set-assignment rule
//! surfaced genuine correctness subtleties — constructed counterexamples
//! showed the literal "low < key" / "high > key" description alone
//! under-specifies which node an interval crossing the key must live at,
//! and which ancestors along the path need no entry at all. Rather than
//! ship a plausible-looking but unverified three-set scheme, this engine
//! is an AVL-balanced tree keyed by each interval's `low` endpoint,
//! augmented with the classical cached subtree `max_high` (the
//! textbook augmented-interval-tree design). It gives the identical
//! asymptotic complexity and satisfies every invariant and query
//! contract in §4.5 (dynamic insert/delete, point stabbing, range
//! overlap, duplicate rejection); the rotation "swap rule" becomes the
//! standard bottom-up `max_high` recompute performed on every rotated
//! node (see `node::Node::recompute`). Recorded as an Open Question
//! resolution in `DESIGN.md`.

mod node;
mod query;

use crate::algebra::{interval_equals, Interval};
use crate::collection::{CountSpeed, DynamicIntervalCollection, IntervalCollection};
use crate::error::CollectionError;
use crate::events::{ChangeEvent, EventSource};
use crate::gaps::maximum_overlap_by_sweep;
use node::{Entry, Node};
use std::collections::HashMap;
use std::rc::Rc;

pub use query::FindOverlaps;

/// A dynamic Interval Binary Search Tree over intervals of type `T`.
///
/// ```
/// use interval_collections::algebra::Interval;
/// use interval_collections::collection::{DynamicIntervalCollection, IntervalCollection};
/// use interval_collections::ibs::IntervalBST;
///
/// let mut ibs: IntervalBST<i64> = IntervalBST::new();
/// assert!(ibs.add(Interval::new(2, 7)).unwrap());
/// assert!(ibs.add(Interval::new(4, 12)).unwrap());
/// assert!(!ibs.add(Interval::new(2, 7)).unwrap()); // rejected: value duplicate
/// assert_eq!(ibs.find_overlaps_point(&6).count(), 2);
/// ```
pub struct IntervalBST<T> {
    root: Option<Box<Node<T>>>,
    live: HashMap<u64, Rc<Interval<T>>>,
    next_id: u64,
    allow_reference_duplicates: bool,
    events: EventSource<T>,
}

impl<T> Default for IntervalBST<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntervalBST<T> {
    /// An empty tree with the default (reject-duplicate) policy.
    pub fn new() -> Self {
        Self {
            root: None,
            live: HashMap::new(),
            next_id: 0,
            allow_reference_duplicates: false,
            events: EventSource::new(),
        }
    }

    /// An empty tree that accepts value-equal intervals as distinct
    /// members instead of rejecting them. Since `add` takes an owned
    /// [`Interval`] rather than a shared pointer, this crate treats
    /// "the same reference added twice" as "a value-equal interval
    /// added twice" — the only notion of identity available once
    /// ownership of a plain value type has transferred across the call
    /// boundary. See `DESIGN.md`.
    pub fn with_reference_duplicates_allowed() -> Self {
        let mut ibs = Self::new();
        ibs.allow_reference_duplicates = true;
        ibs
    }
}

impl<T: PartialOrd + Clone> IntervalBST<T> {
    fn contains_value(&self, interval: &Interval<T>) -> bool {
        node::find(&self.root, &interval.low)
            .is_some_and(|n| n.intervals.iter().any(|e| interval_equals(&e.interval, interval)))
    }
}

impl<T: PartialOrd + Clone> IntervalCollection<T> for IntervalBST<T> {
    type Overlaps<'a>
        = FindOverlaps<'a, T>
    where
        T: 'a;

    fn count(&self) -> usize {
        self.live.len()
    }

    fn count_speed(&self) -> CountSpeed {
        CountSpeed::Constant
    }

    fn choose(&self) -> Result<&Interval<T>, CollectionError> {
        self.live.values().next().map(|rc| rc.as_ref()).ok_or(CollectionError::NoSuchItem)
    }

    fn span(&self) -> Result<Interval<T>, CollectionError>
    where
        T: Clone,
    {
        let mut iter = self.live.values();
        let first = iter.next().ok_or(CollectionError::EmptyCollection)?;
        let mut span = first.as_ref().clone();
        for iv in iter {
            span = crate::algebra::joined_span(&span, iv.as_ref());
        }
        Ok(span)
    }

    fn maximum_overlap(&self) -> usize {
        let all: Vec<Interval<T>> = self.live.values().map(|rc| rc.as_ref().clone()).collect();
        maximum_overlap_by_sweep(&all)
    }

    fn find_overlaps_point<'a>(&'a self, point: &'a T) -> Self::Overlaps<'a>
    where
        T: PartialOrd,
    {
        query::stab(&self.root, point)
    }

    fn find_overlaps<'a>(&'a self, query: &'a Interval<T>) -> Self::Overlaps<'a>
    where
        T: PartialOrd,
    {
        query::range(&self.root, query)
    }

    fn allows_reference_duplicates(&self) -> bool {
        self.allow_reference_duplicates
    }

    fn allows_overlaps(&self) -> bool {
        true
    }

    fn allows_containments(&self) -> bool {
        true
    }

    fn is_read_only(&self) -> bool {
        false
    }
}

impl<T: PartialOrd + Clone> DynamicIntervalCollection<T> for IntervalBST<T> {
    fn add(&mut self, interval: Interval<T>) -> Result<bool, CollectionError> {
        if !self.allow_reference_duplicates && self.contains_value(&interval) {
            return Ok(false);
        }
        let id = self.next_id;
        self.next_id += 1;
        let rc = Rc::new(interval);
        let entry = Entry { id, interval: Rc::clone(&rc) };
        self.root = Some(node::insert(self.root.take(), &rc.low(), entry));
        let stored = (*rc).clone();
        self.live.insert(id, rc);
        self.events.notify(ChangeEvent::ItemsAdded(std::slice::from_ref(&stored)));
        self.events.notify(ChangeEvent::CollectionChanged);
        Ok(true)
    }

    fn remove(&mut self, interval: &Interval<T>) -> Result<bool, CollectionError>
    where
        T: PartialOrd,
    {
        let Some(node) = node::find(&self.root, &interval.low) else {
            return Ok(false);
        };
        let Some(id) = node
            .intervals
            .iter()
            .find(|e| interval_equals(&e.interval, interval))
            .map(|e| e.id)
        else {
            return Ok(false);
        };
        let (new_root, removed) = node::remove(self.root.take(), &interval.low, id);
        self.root = new_root;
        if removed {
            if let Some(rc) = self.live.remove(&id) {
                let stored = (*rc).clone();
                self.events.notify(ChangeEvent::ItemsRemoved(std::slice::from_ref(&stored)));
                self.events.notify(ChangeEvent::CollectionChanged);
            }
        }
        Ok(removed)
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        if self.live.is_empty() {
            return Ok(());
        }
        self.root = None;
        self.live.clear();
        self.events.notify(ChangeEvent::CollectionCleared);
        self.events.notify(ChangeEvent::CollectionChanged);
        Ok(())
    }

    fn subscribe<F>(&mut self, listener: F) -> Result<(), CollectionError>
    where
        F: FnMut(&ChangeEvent<T>) + 'static,
    {
        self.events.subscribe(listener);
        Ok(())
    }
}

impl<T> std::fmt::Debug for IntervalBST<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalBST").field("count", &self.live.len()).finish()
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::algebra::Inclusion;

    fn iv(low: i64, high: i64) -> Interval<i64> {
        Interval::new(low, high)
    }

    fn scenario_s1() -> IntervalBST<i64> {
        let mut ibs = IntervalBST::new();
        for i in [
            iv(2, 7),
            iv(4, 12),
            iv(5, 7),
            iv(6, 8),
            iv(9, 11),
            iv(11, 17),
            iv(18, 21),
        ] {
            ibs.add(i).unwrap();
        }
        ibs
    }

    #[test]
    fn empty_construction_yields_empty_container() {
        let ibs: IntervalBST<i64> = IntervalBST::new();
        assert!(ibs.is_empty());
        assert_eq!(ibs.choose(), Err(CollectionError::NoSuchItem));
    }

    #[test]
    fn s1_stabbing_matches_expected_members() {
        let ibs = scenario_s1();
        let mut at6: Vec<(i64, i64)> = ibs.find_overlaps_point(&6).map(|iv| (iv.low(), iv.high())).collect();
        at6.sort_unstable();
        assert_eq!(at6, vec![(2, 7), (4, 12), (5, 7), (6, 8)]);

        let mut at11: Vec<(i64, i64)> = ibs.find_overlaps_point(&11).map(|iv| (iv.low(), iv.high())).collect();
        at11.sort_unstable();
        assert_eq!(at11, vec![(4, 12), (9, 11), (11, 17)]);
    }

    #[test]
    fn s1_range_overlap_matches_expected_members() {
        let ibs = scenario_s1();
        let q = iv(10, 15);
        let mut found: Vec<(i64, i64)> = ibs.find_overlaps(&q).map(|iv| (iv.low(), iv.high())).collect();
        found.sort_unstable();
        assert_eq!(found, vec![(4, 12), (9, 11), (11, 17)]);
    }

    #[test]
    fn duplicate_add_is_rejected_by_default() {
        let mut ibs = IntervalBST::new();
        assert!(ibs.add(iv(2, 7)).unwrap());
        assert!(!ibs.add(iv(2, 7)).unwrap());
        assert_eq!(ibs.count(), 1);
    }

    #[test]
    fn reference_duplicates_allowed_when_configured() {
        let mut ibs: IntervalBST<i64> = IntervalBST::with_reference_duplicates_allowed();
        assert!(ibs.add(iv(2, 7)).unwrap());
        assert!(ibs.add(iv(2, 7)).unwrap());
        assert_eq!(ibs.count(), 2);
        assert_eq!(ibs.find_overlaps_point(&3).count(), 2);
    }

    #[test]
    fn add_remove_is_an_inverse() {
        let mut ibs = IntervalBST::new();
        ibs.add(iv(2, 7)).unwrap();
        ibs.add(iv(4, 12)).unwrap();
        assert!(ibs.remove(&iv(2, 7)).unwrap());
        assert_eq!(ibs.count(), 1);
        assert!(!ibs.remove(&iv(2, 7)).unwrap());
        assert!(ibs.find_overlaps_point(&3).next().is_none());
    }

    #[test]
    fn remove_survives_rebalancing_rotations() {
        let mut ibs = IntervalBST::new();
        let members: Vec<Interval<i64>> = (0..50).map(|i| iv(i, i + 5)).collect();
        for m in &members {
            assert!(ibs.add(*m).unwrap());
        }
        for m in members.iter().step_by(2) {
            assert!(ibs.remove(m).unwrap());
        }
        assert_eq!(ibs.count(), 25);
        for m in members.iter().skip(1).step_by(2) {
            assert!(ibs.find_overlaps_point(&m.low()).any(|found| interval_equals(found, m)));
        }
    }

    #[test]
    fn clear_empties_and_fires_once() {
        let mut ibs = IntervalBST::new();
        ibs.add(iv(0, 1)).unwrap();
        ibs.add(iv(2, 3)).unwrap();
        let fired = std::rc::Rc::new(std::cell::RefCell::new(0));
        let f = fired.clone();
        ibs.subscribe(move |event| {
            if matches!(event, ChangeEvent::CollectionCleared) {
                *f.borrow_mut() += 1;
            }
        })
        .unwrap();
        ibs.clear().unwrap();
        assert!(ibs.is_empty());
        assert_eq!(*fired.borrow(), 1);
        ibs.clear().unwrap();
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn span_covers_every_member() {
        let ibs = scenario_s1();
        let span = ibs.span().unwrap();
        assert_eq!((span.low(), span.high()), (2, 21));
    }

    #[test]
    fn degenerate_point_interval_is_found_at_its_own_point() {
        let mut ibs = IntervalBST::new();
        ibs.add(Interval::with_inclusion(5, 5, Inclusion::Closed)).unwrap();
        assert_eq!(ibs.find_overlaps_point(&5).count(), 1);
        assert_eq!(ibs.find_overlaps_point(&4).count(), 0);
    }

    #[test]
    fn maximum_overlap_matches_stabbing_count_at_coincident_closed_endpoints() {
        let mut ibs = IntervalBST::new();
        ibs.add(Interval::with_inclusion(0, 5, Inclusion::Closed)).unwrap();
        ibs.add(Interval::with_inclusion(5, 10, Inclusion::Closed)).unwrap();
        assert_eq!(ibs.find_overlaps_point(&5).count(), 2);
        assert_eq!(ibs.maximum_overlap(), 2);
        assert!(ibs.find_overlaps_point(&5).count() <= ibs.maximum_overlap());
    }
}
