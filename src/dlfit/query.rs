use crate::algebra::{overlaps, Interval};
use std::cmp::Ordering;

use super::arena::{neighbors, Arena, NodeId};

/// Finds the first node that could possibly overlap `query`: since members
/// are pairwise non-overlapping and sorted by low endpoint, an overlapping
/// run (if any) is contiguous and begins at either the in-order
/// predecessor or successor of `query.low` — there is no need to consider
/// any node further away.
fn start_cursor<T: PartialOrd + Clone>(arena: &Arena<T>, root: Option<NodeId>, query: &Interval<T>) -> Option<NodeId> {
    let (pred, succ) = neighbors(arena, root, &query.low());
    if let Some(p) = pred {
        if overlaps(&arena.node(p).interval, query) {
            return Some(p);
        }
    }
    if let Some(s) = succ {
        if overlaps(&arena.node(s).interval, query) {
            return Some(s);
        }
    }
    None
}

/// The lazy sequence returned by [`super::FiniteIntervalTree::find_overlaps`]
/// and `find_overlaps_point`: walks the doubly linked in-order list
/// forward from the first overlapping member, stopping at the first
/// non-overlapping one (which, by the non-overlap invariant, bounds every
/// further member too).
pub struct FindOverlaps<'a, T> {
    arena: &'a Arena<T>,
    cursor: Option<NodeId>,
    query: Interval<T>,
}

impl<'a, T: PartialOrd + Clone> FindOverlaps<'a, T> {
    pub(super) fn new(arena: &'a Arena<T>, root: Option<NodeId>, query: Interval<T>) -> Self {
        let cursor = start_cursor(arena, root, &query);
        Self { arena, cursor, query }
    }
}

impl<'a, T: PartialOrd + Clone> Iterator for FindOverlaps<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let iv = &self.arena.node(id).interval;
        if !overlaps(iv, &self.query) {
            self.cursor = None;
            return None;
        }
        self.cursor = self.arena.node(id).next;
        Some(iv)
    }
}

/// The lazy sequence returned by [`super::FiniteIntervalTree::enumerate_from`]:
/// an `O(log n)` descent to the first member whose low endpoint is `>= x`,
/// then an `O(1)`-per-step walk along `next`.
pub struct EnumerateFrom<'a, T> {
    arena: &'a Arena<T>,
    cursor: Option<NodeId>,
}

impl<'a, T: PartialOrd + Clone> EnumerateFrom<'a, T> {
    pub(super) fn new(arena: &'a Arena<T>, root: Option<NodeId>, x: &T) -> Self {
        let mut cur = root;
        let mut first_at_or_after = None;
        while let Some(id) = cur {
            let node_low = arena.node(id).interval.low();
            match x.partial_cmp(&node_low) {
                Some(Ordering::Greater) => cur = arena.node(id).right,
                _ => {
                    first_at_or_after = Some(id);
                    cur = arena.node(id).left;
                }
            }
        }
        Self { arena, cursor: first_at_or_after }
    }
}

impl<'a, T: PartialOrd + Clone> Iterator for EnumerateFrom<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        self.cursor = self.arena.node(id).next;
        Some(&self.arena.node(id).interval)
    }
}
