use crate::algebra::{compare_for_nesting, strictly_contains, Interval};

use super::Node;

/// An intermediate, pointer-based tree produced by the absorb walk before
/// it is flattened into the arena layout NCL actually stores.
struct TreeNode<T> {
    interval: Interval<T>,
    children: Vec<TreeNode<T>>,
}

/// Builds the arena (`nodes`, `top_len`) for a [`super::NestedContainmentList`]
/// from an arbitrary (unsorted) collection of intervals.
pub(super) fn build<T: PartialOrd + Clone>(mut intervals: Vec<Interval<T>>) -> (Vec<Node<T>>, usize) {
    if intervals.is_empty() {
        return (Vec::new(), 0);
    }
    intervals.sort_by(compare_for_nesting);

    let mut idx = 0;
    let top = absorb(&intervals, &mut idx, None);
    debug_assert_eq!(idx, intervals.len());

    let top_len = top.len();
    let nodes = flatten(top);
    (nodes, top_len)
}

/// The recursive absorb walk of §4.3: consumes a run of the sorted slice
/// starting at `*idx`, accepting every interval strictly contained in
/// `bound` (or all of them, at the top level, where `bound` is `None`) as
/// either a sibling or a nested child.
fn absorb<T: PartialOrd + Clone>(
    sorted: &[Interval<T>],
    idx: &mut usize,
    bound: Option<&Interval<T>>,
) -> Vec<TreeNode<T>> {
    let mut siblings = Vec::new();
    while *idx < sorted.len() {
        let candidate = &sorted[*idx];
        if let Some(b) = bound {
            if !strictly_contains(b, candidate) {
                break;
            }
        }
        *idx += 1;
        let children = absorb(sorted, idx, Some(candidate));
        siblings.push(TreeNode {
            interval: candidate.clone(),
            children,
        });
    }
    siblings
}

/// Flattens the pointer tree into the contiguous arena layout: the
/// top-level siblings occupy `[0, top.len())`, and every node's children
/// are written out as a contiguous block later in the array (breadth
/// first, so a child range always lies entirely after its parent's own
/// sublist region, and sibling child ranges never interleave).
fn flatten<T: Clone>(top: Vec<TreeNode<T>>) -> Vec<Node<T>> {
    let mut nodes = Vec::new();
    for t in &top {
        nodes.push(Node {
            interval: clone_interval(&t.interval),
            children: None,
        });
    }

    let mut frontier: Vec<(usize, Vec<TreeNode<T>>)> = top
        .into_iter()
        .enumerate()
        .map(|(i, t)| (i, t.children))
        .collect();

    let mut cursor = 0;
    while cursor < frontier.len() {
        let node_idx = frontier[cursor].0;
        let children = std::mem::take(&mut frontier[cursor].1);
        if !children.is_empty() {
            let start = nodes.len();
            for child in &children {
                nodes.push(Node {
                    interval: clone_interval(&child.interval),
                    children: None,
                });
            }
            nodes[node_idx].children = Some((start, children.len()));
            for (offset, child) in children.into_iter().enumerate() {
                frontier.push((start + offset, child.children));
            }
        }
        cursor += 1;
    }
    nodes
}

fn clone_interval<T>(interval: &Interval<T>) -> Interval<T>
where
    Interval<T>: Clone,
{
    interval.clone()
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::algebra::Interval as Iv;

    fn iv(low: i64, high: i64) -> Iv<i64> {
        Iv::new(low, high)
    }

    #[test]
    fn siblings_stay_pairwise_non_containing_on_tied_low() {
        // B=[2,5) and A=[2,10) share a low endpoint; A must absorb B as a
        // child rather than leave them as containing siblings.
        let (nodes, top_len) = build(vec![iv(2, 5), iv(2, 10)]);
        assert_eq!(top_len, 1);
        assert_eq!(nodes[0].interval.low(), 2);
        assert_eq!(nodes[0].interval.high(), 10);
        let (start, len) = nodes[0].children.expect("A must have absorbed B");
        assert_eq!(len, 1);
        assert_eq!(nodes[start].interval.high(), 5);
    }

    #[test]
    fn flat_siblings_have_no_children() {
        let (nodes, top_len) = build(vec![iv(0, 5), iv(10, 15)]);
        assert_eq!(top_len, 2);
        assert!(nodes[0].children.is_none());
        assert!(nodes[1].children.is_none());
    }
}
