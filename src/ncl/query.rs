use crate::algebra::{endpoint_before, Interval};

use super::Node;

/// Finds the half-open index range `[first, last)` of `nodes` (a sibling
/// slice, sorted by low endpoint with endpoints monotonically increasing
/// across the slice — guaranteed by the pairwise-non-containing sibling
/// invariant) that can possibly overlap `query`.
///
/// Two binary searches, exactly as described in §4.3: the first boundary
/// via the high-endpoint comparison against `query`'s low, the last via
/// the low-endpoint comparison against `query`'s high.
pub(super) fn overlap_range<T: PartialOrd>(nodes: &[Node<T>], query: &Interval<T>) -> (usize, usize) {
    let first = nodes.partition_point(|n| {
        endpoint_before(&n.interval.high, n.interval.high_included, &query.low, query.low_included)
    });
    let last = nodes.partition_point(|n| {
        !endpoint_before(&query.high, query.high_included, &n.interval.low, n.interval.low_included)
    });
    (first, last.max(first))
}

struct Frame {
    pos: usize,
    end: usize,
}

/// The lazy sequence returned by [`super::NestedContainmentList::find_overlaps`]
/// and [`super::NestedContainmentList::find_overlaps_point`].
///
/// Carries an explicit recursion stack rather than a closure, per the
/// design note in §9: a node's interval is yielded, then its child
/// sublist's own overlap range is computed and pushed as a new frame, so
/// the next call resumes inside the child before returning to further
/// siblings (pre-order: parent before children, as §4.3 specifies).
pub struct FindOverlaps<'a, T> {
    nodes: &'a [Node<T>],
    query: Interval<T>,
    stack: Vec<Frame>,
}

impl<'a, T: PartialOrd + Clone> FindOverlaps<'a, T> {
    pub(super) fn new(nodes: &'a [Node<T>], top_len: usize, query: Interval<T>) -> Self {
        let (first, last) = overlap_range(&nodes[..top_len], &query);
        let stack = if first < last {
            vec![Frame { pos: first, end: last }]
        } else {
            Vec::new()
        };
        Self { nodes, query, stack }
    }
}

impl<'a, T: PartialOrd + Clone> Iterator for FindOverlaps<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            if frame.pos >= frame.end {
                self.stack.pop();
                continue;
            }
            let idx = frame.pos;
            frame.pos += 1;
            let node = &self.nodes[idx];
            if let Some((start, len)) = node.children {
                let child_slice = &self.nodes[start..start + len];
                let (first, last) = overlap_range(child_slice, &self.query);
                if first < last {
                    self.stack.push(Frame {
                        pos: start + first,
                        end: start + last,
                    });
                }
            }
            return Some(&node.interval);
        }
    }
}
