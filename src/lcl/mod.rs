//! Layered Containment List (§4.4): a static array-of-layers structure
//! where each layer is a chain of pairwise non-containing intervals,
//! threaded to the next layer by pointer arrays. Trades NCL's recursive
//! tree for a flat structure that gives `count_overlaps` a payoff the
//! tree can't: counting never has to materialize a single `Interval`.

mod build;
mod query;

use crate::algebra::{Inclusion, Interval};
use crate::collection::{CountSpeed, IntervalCollection};
use crate::error::CollectionError;
use crate::gaps::maximum_overlap_by_sweep;

pub use query::FindOverlaps;

/// One layer: a pairwise non-containing, low-sorted run of intervals,
/// plus the sentinel-terminated pointer array into the next layer.
#[derive(Debug, Clone)]
struct Layer<T> {
    intervals: Vec<Interval<T>>,
    pointers: Vec<usize>,
}

/// A static Layered Containment List over intervals of type `T`.
///
/// ```
/// use interval_collections::algebra::Interval;
/// use interval_collections::collection::IntervalCollection;
/// use interval_collections::lcl::LayeredContainmentList;
///
/// let lcl = LayeredContainmentList::new(vec![
///     Interval::new(0, 10),
///     Interval::new(1, 8),
///     Interval::new(2, 6),
/// ]);
/// assert_eq!(lcl.find_overlaps_point(&4).count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct LayeredContainmentList<T> {
    layers: Vec<Layer<T>>,
    len: usize,
}

impl<T: PartialOrd + Clone> LayeredContainmentList<T> {
    /// Builds a new list from an arbitrary (unsorted) collection of
    /// intervals. An empty input yields an empty container.
    pub fn new(intervals: impl IntoIterator<Item = Interval<T>>) -> Self {
        let intervals: Vec<Interval<T>> = intervals.into_iter().collect();
        let len = intervals.len();
        let layers = build::build(intervals);
        Self { layers, len }
    }

    fn all_intervals(&self) -> impl Iterator<Item = &Interval<T>> {
        self.layers.iter().flat_map(|l| l.intervals.iter())
    }
}

impl<T: PartialOrd + Clone> IntervalCollection<T> for LayeredContainmentList<T> {
    type Overlaps<'a>
        = FindOverlaps<'a, T>
    where
        T: 'a;

    fn count(&self) -> usize {
        self.len
    }

    fn count_speed(&self) -> CountSpeed {
        CountSpeed::Constant
    }

    fn choose(&self) -> Result<&Interval<T>, CollectionError> {
        self.layers
            .first()
            .and_then(|l| l.intervals.first())
            .ok_or(CollectionError::NoSuchItem)
    }

    fn span(&self) -> Result<Interval<T>, CollectionError>
    where
        T: Clone,
    {
        let layer0 = self.layers.first().ok_or(CollectionError::EmptyCollection)?;
        let first = layer0.intervals.first().ok_or(CollectionError::EmptyCollection)?;
        let last = layer0.intervals.last().ok_or(CollectionError::EmptyCollection)?;
        Ok(Interval::with_flags(
            first.low(),
            last.high(),
            first.low_included(),
            last.high_included(),
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
        FindOverlaps::new(&self.layers, query)
    }

    fn find_overlaps<'a>(&'a self, query: &'a Interval<T>) -> Self::Overlaps<'a>
    where
        T: PartialOrd,
    {
        FindOverlaps::new(&self.layers, query.clone())
    }

    fn find_overlap<'a>(&'a self, query: &'a Interval<T>) -> Option<&'a Interval<T>>
    where
        T: PartialOrd,
    {
        query::find_overlap(&self.layers, query)
    }

    fn count_overlaps(&self, query: &Interval<T>) -> usize
    where
        T: PartialOrd,
    {
        query::count_overlaps(&self.layers, query)
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
