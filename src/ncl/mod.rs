//! Nested Containment List (§4.3): a static, recursively-nested
//! containment structure queried with two binary searches per level.
//!
//! Grounded in the teacher crate's arena-of-indices style for its
//! backing `Vec` (`types/container/interval_container.rs` stores records
//! in one flat `Vec` and queries it by index range); NCL's arena is the
//! same idea generalized to a *tree* of contiguous ranges, per the design
//! note in §9 ("Arena + indices, not pointers, for static containers").

mod build;
mod query;

use crate::algebra::{Inclusion, Interval};
use crate::collection::{CountSpeed, IntervalCollection};
use crate::error::CollectionError;
use crate::gaps::maximum_overlap_by_sweep;

pub use query::FindOverlaps;

/// One arena slot: an interval plus the `(start, length)` range, later in
/// the array, of the intervals strictly contained in it.
#[derive(Debug, Clone)]
struct Node<T> {
    interval: Interval<T>,
    children: Option<(usize, usize)>,
}

/// A static Nested Containment List over intervals of type `T`.
///
/// Built once from a batch of intervals (`O(n log n)`); read-only
/// thereafter. Overlap queries recurse into nested sublists using two
/// binary searches per level rather than a full linear scan.
///
/// ```
/// use interval_collections::algebra::Interval;
/// use interval_collections::collection::IntervalCollection;
/// use interval_collections::ncl::NestedContainmentList;
///
/// let ncl = NestedContainmentList::new(vec![
///     Interval::new(2, 7),
///     Interval::new(4, 12),
/// ]);
/// assert_eq!(ncl.find_overlaps_point(&6).count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct NestedContainmentList<T> {
    nodes: Vec<Node<T>>,
    top_len: usize,
}

impl<T: PartialOrd + Clone> NestedContainmentList<T> {
    /// Builds a new list from an arbitrary (unsorted) collection of
    /// intervals. An empty input yields an empty container.
    pub fn new(intervals: impl IntoIterator<Item = Interval<T>>) -> Self {
        let (nodes, top_len) = build::build(intervals.into_iter().collect());
        Self { nodes, top_len }
    }

    fn top(&self) -> &[Node<T>] {
        &self.nodes[..self.top_len]
    }

    fn all_intervals(&self) -> impl Iterator<Item = &Interval<T>> {
        self.nodes.iter().map(|n| &n.interval)
    }
}

impl<T: PartialOrd + Clone> IntervalCollection<T> for NestedContainmentList<T> {
    type Overlaps<'a>
        = FindOverlaps<'a, T>
    where
        T: 'a;

    fn count(&self) -> usize {
        self.nodes.len()
    }

    fn count_speed(&self) -> CountSpeed {
        CountSpeed::Constant
    }

    fn choose(&self) -> Result<&Interval<T>, CollectionError> {
        self.nodes
            .first()
            .map(|n| &n.interval)
            .ok_or(CollectionError::NoSuchItem)
    }

    /// The span is cached implicitly: since siblings at any level are
    /// pairwise non-containing and sorted by low endpoint, the top
    /// level's first low and last high bound every member (nested
    /// children can never extend past their parent). See `ncl::build`
    /// for the proof sketch.
    fn span(&self) -> Result<Interval<T>, CollectionError>
    where
        T: Clone,
    {
        let top = self.top();
        let first = top.first().ok_or(CollectionError::EmptyCollection)?;
        let last = top.last().ok_or(CollectionError::EmptyCollection)?;
        Ok(Interval::with_flags(
            first.interval.low(),
            last.interval.high(),
            first.interval.low_included(),
            last.interval.high_included(),
        ))
    }

    fn maximum_overlap(&self) -> usize {
        let all: Vec<Interval<T>> = self.all_intervals().cloned().collect();
        maximum_overlap_by_sweep(&all)
    }

    fn find_overlaps_point<'a>(&'a self, point: &'a T) -> Self::Overlaps<'a>
    where
        T: PartialOrd,
    {
        let query = Interval::with_inclusion(point.clone(), point.clone(), Inclusion::Closed);
        FindOverlaps::new(&self.nodes, self.top_len, query)
    }

    fn find_overlaps<'a>(&'a self, query: &'a Interval<T>) -> Self::Overlaps<'a>
    where
        T: PartialOrd,
    {
        FindOverlaps::new(&self.nodes, self.top_len, query.clone())
    }

    fn allows_reference_duplicates(&self) -> bool {
        true
    }

    fn allows_overlaps(&self) -> bool {
        true
    }

    fn allows_containments(&self) -> bool {
        true
    }

    fn is_read_only(&self) -> bool {
        true
    }
}
