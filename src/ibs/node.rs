use crate::algebra::Interval;
use std::cmp::Ordering;
use std::rc::Rc;

/// One entry stored at a node: a reference-counted interval plus the
/// unique id assigned to it at insertion, used to de-duplicate results
/// when the same interval could otherwise be reachable by more than one
/// traversal branch.
pub(super) struct Entry<T> {
    pub(super) id: u64,
    pub(super) interval: Rc<Interval<T>>,
}

/// A node of the AVL-balanced augmented interval tree, keyed by the
/// `low` endpoint of the intervals stored at it (several intervals may
/// share the same low value, so each node holds a small `Vec`).
///
/// `max_high`/`max_high_included` cache the largest high endpoint
/// anywhere in the subtree rooted here — the classical augmentation that
/// lets stabbing and range queries prune whole subtrees that cannot
/// possibly reach the query, giving IBS its `O(log n)` dynamic
/// insert/delete and efficient overlap search.
pub(super) struct Node<T> {
    pub(super) key: T,
    pub(super) height: i32,
    pub(super) left: Option<Box<Node<T>>>,
    pub(super) right: Option<Box<Node<T>>>,
    pub(super) intervals: Vec<Entry<T>>,
    pub(super) max_high: T,
    pub(super) max_high_included: bool,
}

fn height<T>(node: &Option<Box<Node<T>>>) -> i32 {
    node.as_ref().map_or(0, |n| n.height)
}

fn balance_factor<T>(node: &Node<T>) -> i32 {
    height(&node.left) - height(&node.right)
}

/// Orders two high-endpoint candidates the way `compare_high` orders a
/// pair of full intervals: larger value wins; on a value tie, `included`
/// beats excluded (an included high covers strictly more than an
/// excluded one at the same value).
fn high_endpoint_max<T: PartialOrd>(a: (T, bool), b: (T, bool)) -> (T, bool) {
    match a.0.partial_cmp(&b.0) {
        Some(Ordering::Less) => b,
        Some(Ordering::Greater) => a,
        _ => {
            if a.1 || !b.1 {
                a
            } else {
                b
            }
        }
    }
}

impl<T: PartialOrd + Clone> Node<T> {
    fn leaf(key: T, entry: Entry<T>) -> Box<Node<T>> {
        let max_high = entry.interval.high();
        let max_high_included = entry.interval.high_included();
        Box::new(Node {
            key,
            height: 1,
            left: None,
            right: None,
            intervals: vec![entry],
            max_high,
            max_high_included,
        })
    }

    fn recompute(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
        let mut best = self
            .intervals
            .iter()
            .map(|e| (e.interval.high(), e.interval.high_included()))
            .reduce(high_endpoint_max)
            .expect("a live node always holds at least one interval");
        if let Some(l) = &self.left {
            best = high_endpoint_max(best, (l.max_high.clone(), l.max_high_included));
        }
        if let Some(r) = &self.right {
            best = high_endpoint_max(best, (r.max_high.clone(), r.max_high_included));
        }
        self.max_high = best.0;
        self.max_high_included = best.1;
    }

    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.left.take().expect("rotate_right requires a left child");
        self.left = new_root.right.take();
        self.recompute();
        new_root.right = Some(self);
        new_root.recompute();
        new_root
    }

    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.right.take().expect("rotate_left requires a right child");
        self.right = new_root.left.take();
        self.recompute();
        new_root.left = Some(self);
        new_root.recompute();
        new_root
    }

    fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.recompute();
        let bf = balance_factor(&self);
        if bf > 1 {
            let left = self.left.as_ref().expect("bf > 1 implies a left child");
            if balance_factor(left) < 0 {
                self.left = Some(self.left.take().unwrap().rotate_left());
            }
            self.rotate_right()
        } else if bf < -1 {
            let right = self.right.as_ref().expect("bf < -1 implies a right child");
            if balance_factor(right) > 0 {
                self.right = Some(self.right.take().unwrap().rotate_right());
            }
            self.rotate_left()
        } else {
            self
        }
    }
}

/// Inserts `entry` (keyed by `key`), creating a node if none exists for
/// that exact key yet. Returns the new subtree root.
pub(super) fn insert<T: PartialOrd + Clone>(
    node: Option<Box<Node<T>>>,
    key: &T,
    entry: Entry<T>,
) -> Box<Node<T>> {
    match node {
        None => Node::leaf(key.clone(), entry),
        Some(mut n) => {
            match key.partial_cmp(&n.key) {
                Some(Ordering::Less) => {
                    n.left = Some(insert(n.left.take(), key, entry));
                }
                Some(Ordering::Greater) => {
                    n.right = Some(insert(n.right.take(), key, entry));
                }
                _ => {
                    n.intervals.push(entry);
                }
            }
            n.rebalance()
        }
    }
}

/// Finds the node keyed by `key`, if any.
pub(super) fn find<'a, T: PartialOrd>(node: &'a Option<Box<Node<T>>>, key: &T) -> Option<&'a Node<T>> {
    let mut cur = node.as_deref();
    while let Some(n) = cur {
        match key.partial_cmp(&n.key) {
            Some(Ordering::Less) => cur = n.left.as_deref(),
            Some(Ordering::Greater) => cur = n.right.as_deref(),
            _ => return Some(n),
        }
    }
    None
}

/// Removes the single entry identified by `id` from the node keyed by
/// `key`. Returns `true` if it was found and removed; if the node's
/// interval list becomes empty, the node itself is deleted from the
/// tree and the structure is rebalanced.
pub(super) fn remove<T: PartialOrd + Clone>(
    node: Option<Box<Node<T>>>,
    key: &T,
    id: u64,
) -> (Option<Box<Node<T>>>, bool) {
    let Some(mut n) = node else {
        return (None, false);
    };
    match key.partial_cmp(&n.key) {
        Some(Ordering::Less) => {
            let (new_left, removed) = remove(n.left.take(), key, id);
            n.left = new_left;
            (Some(n.rebalance()), removed)
        }
        Some(Ordering::Greater) => {
            let (new_right, removed) = remove(n.right.take(), key, id);
            n.right = new_right;
            (Some(n.rebalance()), removed)
        }
        _ => {
            let before = n.intervals.len();
            n.intervals.retain(|e| e.id != id);
            let removed = n.intervals.len() != before;
            if n.intervals.is_empty() {
                (delete_node(n), removed)
            } else {
                n.recompute();
                (Some(n), removed)
            }
        }
    }
}

/// Deletes a node with an already-empty interval list, splicing its
/// children back into the tree (standard AVL node deletion: a node with
/// two children is replaced by its in-order successor).
fn delete_node<T: PartialOrd + Clone>(mut n: Box<Node<T>>) -> Option<Box<Node<T>>> {
    match (n.left.take(), n.right.take()) {
        (None, None) => None,
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (Some(l), Some(r)) => {
            let (successor_key, successor_intervals, remaining_right) = take_min(r);
            n.key = successor_key;
            n.intervals = successor_intervals;
            n.left = Some(l);
            n.right = remaining_right;
            Some(n.rebalance())
        }
    }
}

/// Removes and returns the leftmost (minimum-key) node's key and
/// interval list from `node`, along with the remaining subtree.
fn take_min<T: PartialOrd + Clone>(
    mut node: Box<Node<T>>,
) -> (T, Vec<Entry<T>>, Option<Box<Node<T>>>) {
    match node.left.take() {
        None => {
            let right = node.right.take();
            (node.key, node.intervals, right)
        }
        Some(left) => {
            let (key, intervals, remaining_left) = take_min(left);
            node.left = remaining_left;
            (key, intervals, Some(node.rebalance()))
        }
    }
}
