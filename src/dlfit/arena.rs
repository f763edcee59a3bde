//! The slab backing a [`super::FiniteIntervalTree`]: nodes are addressed by
//! `usize` index rather than by pointer, so the in-order `prev`/`next`
//! threading (an ordinary doubly linked list under the hood) can hold
//! stable references to sibling nodes without `Rc`/`RefCell` bookkeeping.
//! Grounded in the same arena-of-indices approach used by `ncl`/`lcl`'s
//! backing `Vec`, generalized here with a free-list so individual slots
//! can be reclaimed on removal (static containers never free a slot once
//! built; this one does, constantly).

use crate::algebra::Interval;
use std::cmp::Ordering;

pub(super) type NodeId = usize;

pub(super) struct Node<T> {
    pub(super) interval: Interval<T>,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
    pub(super) height: i32,
    pub(super) prev: Option<NodeId>,
    pub(super) next: Option<NodeId>,
}

enum Slot<T> {
    Occupied(Node<T>),
    Free(Option<NodeId>),
}

/// Node storage plus a free-list of reclaimed slots.
///
/// A rotation never changes the in-order sequence of nodes, only the
/// parent/child shape above them — so `prev`/`next` need no attention at
/// all during `rotate_left`/`rotate_right`/`rebalance`; they are set once
/// (on insertion) and cleared once (on removal).
pub(super) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<NodeId>,
}

impl<T> Arena<T> {
    pub(super) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
        }
    }

    pub(super) fn alloc(&mut self, interval: Interval<T>) -> NodeId {
        let node = Node {
            interval,
            left: None,
            right: None,
            height: 1,
            prev: None,
            next: None,
        };
        match self.free_head.take() {
            Some(id) => {
                self.free_head = match &self.slots[id] {
                    Slot::Free(next_free) => *next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };
                self.slots[id] = Slot::Occupied(node);
                id
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    pub(super) fn dealloc(&mut self, id: NodeId) {
        self.slots[id] = Slot::Free(self.free_head.take());
        self.free_head = Some(id);
    }

    pub(super) fn node(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id] {
            Slot::Occupied(n) => n,
            Slot::Free(_) => unreachable!("dangling node id"),
        }
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id] {
            Slot::Occupied(n) => n,
            Slot::Free(_) => unreachable!("dangling node id"),
        }
    }
}

fn height<T>(arena: &Arena<T>, id: Option<NodeId>) -> i32 {
    id.map_or(0, |id| arena.node(id).height)
}

fn balance_factor<T>(arena: &Arena<T>, id: NodeId) -> i32 {
    height(arena, arena.node(id).left) - height(arena, arena.node(id).right)
}

fn recompute<T>(arena: &mut Arena<T>, id: NodeId) {
    let l = arena.node(id).left;
    let r = arena.node(id).right;
    arena.node_mut(id).height = 1 + height(arena, l).max(height(arena, r));
}

fn rotate_right<T>(arena: &mut Arena<T>, id: NodeId) -> NodeId {
    let new_root = arena.node(id).left.expect("rotate_right requires a left child");
    let shifted = arena.node(new_root).right;
    arena.node_mut(id).left = shifted;
    arena.node_mut(new_root).right = Some(id);
    recompute(arena, id);
    recompute(arena, new_root);
    new_root
}

fn rotate_left<T>(arena: &mut Arena<T>, id: NodeId) -> NodeId {
    let new_root = arena.node(id).right.expect("rotate_left requires a right child");
    let shifted = arena.node(new_root).left;
    arena.node_mut(id).right = shifted;
    arena.node_mut(new_root).left = Some(id);
    recompute(arena, id);
    recompute(arena, new_root);
    new_root
}

fn rebalance<T>(arena: &mut Arena<T>, id: NodeId) -> NodeId {
    recompute(arena, id);
    let bf = balance_factor(arena, id);
    if bf > 1 {
        let left = arena.node(id).left.expect("bf > 1 implies a left child");
        if balance_factor(arena, left) < 0 {
            let rotated = rotate_left(arena, left);
            arena.node_mut(id).left = Some(rotated);
        }
        rotate_right(arena, id)
    } else if bf < -1 {
        let right = arena.node(id).right.expect("bf < -1 implies a right child");
        if balance_factor(arena, right) > 0 {
            let rotated = rotate_right(arena, right);
            arena.node_mut(id).right = Some(rotated);
        }
        rotate_left(arena, id)
    } else {
        id
    }
}

/// Places an already-allocated, childless node `id` into `root` by
/// comparing its interval's low endpoint against each node on the descent.
/// Non-overlapping members never share a low value, so ties (which should
/// not occur) fall right rather than panicking.
pub(super) fn insert_by_key<T: PartialOrd + Clone>(arena: &mut Arena<T>, root: Option<NodeId>, id: NodeId) -> NodeId {
    match root {
        None => id,
        Some(r) => {
            let key_new = arena.node(id).interval.low();
            let key_r = arena.node(r).interval.low();
            match key_new.partial_cmp(&key_r) {
                Some(Ordering::Less) => {
                    let left = arena.node(r).left;
                    let new_left = insert_by_key(arena, left, id);
                    arena.node_mut(r).left = Some(new_left);
                }
                _ => {
                    let right = arena.node(r).right;
                    let new_right = insert_by_key(arena, right, id);
                    arena.node_mut(r).right = Some(new_right);
                }
            }
            rebalance(arena, r)
        }
    }
}

/// Finds the node keyed by `key` (an interval's low endpoint), if any.
pub(super) fn find_by_key<T: PartialOrd + Clone>(arena: &Arena<T>, root: Option<NodeId>, key: &T) -> Option<NodeId> {
    let mut cur = root;
    while let Some(id) = cur {
        let node_key = arena.node(id).interval.low();
        match key.partial_cmp(&node_key) {
            Some(Ordering::Less) => cur = arena.node(id).left,
            Some(Ordering::Greater) => cur = arena.node(id).right,
            _ => return Some(id),
        }
    }
    None
}

/// The in-order predecessor and successor node ids for `key`, found by the
/// same descent `find_by_key` would use. Used both to validate an `add`
/// against its immediate neighbors and to splice a new node into the
/// linked list.
pub(super) fn neighbors<T: PartialOrd + Clone>(
    arena: &Arena<T>,
    root: Option<NodeId>,
    key: &T,
) -> (Option<NodeId>, Option<NodeId>) {
    let mut cur = root;
    let mut pred = None;
    let mut succ = None;
    while let Some(id) = cur {
        let node_key = arena.node(id).interval.low();
        match key.partial_cmp(&node_key) {
            Some(Ordering::Less) => {
                succ = Some(id);
                cur = arena.node(id).left;
            }
            Some(Ordering::Greater) => {
                pred = Some(id);
                cur = arena.node(id).right;
            }
            _ => {
                pred = arena.node(id).prev;
                succ = arena.node(id).next;
                break;
            }
        }
    }
    (pred, succ)
}

/// Removes the node keyed by `key` from the tree structure, returning the
/// new subtree root and the id of the node that is now detached (to be
/// freed, or reused, by the caller). Two-child deletion promotes the
/// in-order successor — which is exactly the removed node's own `next`
/// link — into its place, so `prev`/`next` on every *other* node are left
/// completely untouched by this call; only the caller's own unlink of the
/// target's immediate neighbors (done before this call, using the
/// still-valid `prev`/`next` on the target) is needed.
pub(super) fn remove_by_key<T: PartialOrd + Clone>(
    arena: &mut Arena<T>,
    root: Option<NodeId>,
    key: &T,
) -> (Option<NodeId>, Option<NodeId>) {
    let Some(id) = root else {
        return (None, None);
    };
    let node_key = arena.node(id).interval.low();
    match key.partial_cmp(&node_key) {
        Some(Ordering::Less) => {
            let left = arena.node(id).left;
            let (new_left, removed) = remove_by_key(arena, left, key);
            arena.node_mut(id).left = new_left;
            (Some(rebalance(arena, id)), removed)
        }
        Some(Ordering::Greater) => {
            let right = arena.node(id).right;
            let (new_right, removed) = remove_by_key(arena, right, key);
            arena.node_mut(id).right = new_right;
            (Some(rebalance(arena, id)), removed)
        }
        _ => {
            let left = arena.node(id).left;
            let right = arena.node(id).right;
            match (left, right) {
                (None, None) => (None, Some(id)),
                (Some(l), None) => (Some(l), Some(id)),
                (None, Some(r)) => (Some(r), Some(id)),
                (Some(l), Some(r)) => {
                    let (new_right, successor) = take_min(arena, r);
                    arena.node_mut(successor).left = Some(l);
                    arena.node_mut(successor).right = new_right;
                    (Some(rebalance(arena, successor)), Some(id))
                }
            }
        }
    }
}

/// Removes the specific node `target_id` from the tree, navigating by its
/// *current* key (valid for ordinary descent) but confirming the leaf by
/// id rather than by key equality. Used by `force_add`'s shift cascade,
/// where a node already re-keyed earlier in the same cascade can
/// transiently collide with the key of the node about to be removed next
/// — plain `remove_by_key` would stop at whichever same-keyed node it met
/// first during descent, not necessarily `target_id`. `insert_by_key`
/// sends ties right, so a same-keyed collision is checked there first.
pub(super) fn remove_by_id<T: PartialOrd + Clone>(
    arena: &mut Arena<T>,
    root: Option<NodeId>,
    key: &T,
    target_id: NodeId,
) -> (Option<NodeId>, bool) {
    let Some(id) = root else {
        return (None, false);
    };
    let node_key = arena.node(id).interval.low();
    match key.partial_cmp(&node_key) {
        Some(Ordering::Less) => {
            let left = arena.node(id).left;
            let (new_left, removed) = remove_by_id(arena, left, key, target_id);
            arena.node_mut(id).left = new_left;
            (Some(rebalance(arena, id)), removed)
        }
        Some(Ordering::Greater) => {
            let right = arena.node(id).right;
            let (new_right, removed) = remove_by_id(arena, right, key, target_id);
            arena.node_mut(id).right = new_right;
            (Some(rebalance(arena, id)), removed)
        }
        _ if id == target_id => {
            let left = arena.node(id).left;
            let right = arena.node(id).right;
            match (left, right) {
                (None, None) => (None, true),
                (Some(l), None) => (Some(l), true),
                (None, Some(r)) => (Some(r), true),
                (Some(l), Some(r)) => {
                    let (new_right, successor) = take_min(arena, r);
                    arena.node_mut(successor).left = Some(l);
                    arena.node_mut(successor).right = new_right;
                    (Some(rebalance(arena, successor)), true)
                }
            }
        }
        _ => {
            // Same key, different node: a collision introduced earlier in
            // a shift cascade. Try the right subtree first (where
            // `insert_by_key` places ties), then the left.
            let right = arena.node(id).right;
            let (new_right, removed) = remove_by_id(arena, right, key, target_id);
            if removed {
                arena.node_mut(id).right = new_right;
                return (Some(rebalance(arena, id)), true);
            }
            let left = arena.node(id).left;
            let (new_left, removed) = remove_by_id(arena, left, key, target_id);
            arena.node_mut(id).left = new_left;
            (Some(rebalance(arena, id)), removed)
        }
    }
}

/// Detaches and returns the leftmost node's id from `id`'s subtree, along
/// with the remaining (rebalanced) subtree.
fn take_min<T: PartialOrd + Clone>(arena: &mut Arena<T>, id: NodeId) -> (Option<NodeId>, NodeId) {
    match arena.node(id).left {
        None => (arena.node(id).right, id),
        Some(l) => {
            let (new_left, min_id) = take_min(arena, l);
            arena.node_mut(id).left = new_left;
            (Some(rebalance(arena, id)), min_id)
        }
    }
}
