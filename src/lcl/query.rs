use crate::algebra::{endpoint_before, overlaps, Interval};

use super::Layer;

/// Finds the half-open index range `[first, last)` within `interval_slice`
/// (a layer, or a pointer-delimited sub-range of one) that can possibly
/// overlap `query`. Identical reasoning to `ncl::query::overlap_range`:
/// the slice is sorted by low endpoint with monotonically increasing high
/// endpoints.
pub(super) fn overlap_range<T: PartialOrd>(interval_slice: &[Interval<T>], query: &Interval<T>) -> (usize, usize) {
    let first = interval_slice.partition_point(|n| {
        endpoint_before(&n.high, n.high_included, &query.low, query.low_included)
    });
    let last = interval_slice.partition_point(|n| {
        !endpoint_before(&query.high, query.high_included, &n.low, n.low_included)
    });
    (first, last.max(first))
}

struct Frame {
    layer: usize,
    pos: usize,
    end: usize,
}

/// The lazy sequence returned by [`super::LayeredContainmentList::find_overlaps`].
pub struct FindOverlaps<'a, T> {
    layers: &'a [Layer<T>],
    query: Interval<T>,
    stack: Vec<Frame>,
}

impl<'a, T: PartialOrd + Clone> FindOverlaps<'a, T> {
    pub(super) fn new(layers: &'a [Layer<T>], query: Interval<T>) -> Self {
        let stack = if let Some(layer0) = layers.first() {
            let (first, last) = overlap_range(&layer0.intervals, &query);
            if first < last {
                vec![Frame { layer: 0, pos: first, end: last }]
            } else {
                Vec::new()
            }
        } else {
            Vec::new()
        };
        Self { layers, query, stack }
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
            let (layer_idx, idx) = (frame.layer, frame.pos);
            frame.pos += 1;
            let layer = &self.layers[layer_idx];

            if let Some(next_layer) = self.layers.get(layer_idx + 1) {
                let child_start = layer.pointers[idx];
                let child_end = layer.pointers[idx + 1];
                let child_slice = &next_layer.intervals[child_start..child_end];
                let (first, last) = overlap_range(child_slice, &self.query);
                if first < last {
                    self.stack.push(Frame {
                        layer: layer_idx + 1,
                        pos: child_start + first,
                        end: child_start + last,
                    });
                }
            }
            return Some(&layer.intervals[idx]);
        }
    }
}

/// Counts overlaps without materializing any `Interval` reference: the
/// performance payoff described in §4.4. At each layer, the overlap range
/// width (`last - first`) is added directly to the total, and only the
/// per-node pointer bookkeeping needed to descend is performed.
pub(super) fn count_overlaps<T: PartialOrd>(layers: &[Layer<T>], query: &Interval<T>) -> usize {
    let Some(layer0) = layers.first() else {
        return 0;
    };
    let (first, last) = overlap_range(&layer0.intervals, query);
    count_range(layers, 0, first, last, query)
}

fn count_range<T: PartialOrd>(
    layers: &[Layer<T>],
    layer_idx: usize,
    first: usize,
    last: usize,
    query: &Interval<T>,
) -> usize {
    if first >= last {
        return 0;
    }
    let mut total = last - first;
    if let Some(next_layer) = layers.get(layer_idx + 1) {
        let layer = &layers[layer_idx];
        for idx in first..last {
            let child_start = layer.pointers[idx];
            let child_end = layer.pointers[idx + 1];
            let (cfirst, clast) = overlap_range(&next_layer.intervals[child_start..child_end], query);
            total += count_range(
                layers,
                layer_idx + 1,
                child_start + cfirst,
                child_start + clast,
                query,
            );
        }
    }
    total
}

/// A single binary search in layer 0 (§4.4's `FindOverlap` shortcut): if
/// the boundary candidate overlaps `query`, it is returned; otherwise no
/// member of the collection overlaps `query` at all (every deeper-layer
/// interval lies within some layer-0 interval, so if none of those
/// overlap, nothing nested under them can either).
pub(super) fn find_overlap<'a, T: PartialOrd>(layers: &'a [Layer<T>], query: &Interval<T>) -> Option<&'a Interval<T>> {
    let layer0 = layers.first()?;
    let first = layer0.intervals.partition_point(|n| {
        endpoint_before(&n.high, n.high_included, &query.low, query.low_included)
    });
    let candidate = layer0.intervals.get(first)?;
    if overlaps(candidate, query) {
        Some(candidate)
    } else {
        None
    }
}

#[cfg(test)]
mod testing {
    use super::super::LayeredContainmentList;
    use crate::algebra::Interval;
    use crate::collection::IntervalCollection;

    fn iv(low: i64, high: i64) -> Interval<i64> {
        Interval::new(low, high)
    }

    fn scenario_s1() -> LayeredContainmentList<i64> {
        LayeredContainmentList::new(vec![
            iv(2, 7),
            iv(4, 12),
            iv(5, 7),
            iv(6, 8),
            iv(9, 11),
            iv(11, 17),
            iv(18, 21),
        ])
    }

    #[test]
    fn s1_stabbing_matches_ncl() {
        let lcl = scenario_s1();
        let mut at6: Vec<(i64, i64)> = lcl
            .find_overlaps_point(&6)
            .map(|iv| (iv.low(), iv.high()))
            .collect();
        at6.sort_unstable();
        assert_eq!(at6, vec![(2, 7), (4, 12), (5, 7), (6, 8)]);

        let mut at11: Vec<(i64, i64)> = lcl
            .find_overlaps_point(&11)
            .map(|iv| (iv.low(), iv.high()))
            .collect();
        at11.sort_unstable();
        assert_eq!(at11, vec![(4, 12), (9, 11), (11, 17)]);
    }

    #[test]
    fn s5_count_overlaps_fast_path() {
        let lcl = LayeredContainmentList::new(vec![
            Interval::with_inclusion(0, 10, crate::algebra::Inclusion::Closed),
            Interval::with_inclusion(1, 8, crate::algebra::Inclusion::Closed),
            Interval::with_inclusion(2, 6, crate::algebra::Inclusion::Closed),
            Interval::with_inclusion(3, 9, crate::algebra::Inclusion::Closed),
            Interval::with_inclusion(4, 5, crate::algebra::Inclusion::Closed),
        ]);
        let point_query = Interval::with_inclusion(0, 0, crate::algebra::Inclusion::Closed);
        assert_eq!(lcl.count_overlaps(&point_query), 1);
        assert_eq!(lcl.find_overlaps_point(&4).count(), 5);
    }

    #[test]
    fn find_overlap_shortcut_matches_existence() {
        let lcl = scenario_s1();
        let q = iv(13, 14);
        let found = lcl.find_overlap(&q);
        assert!(found.is_some());
        let q_empty = iv(30, 40);
        assert!(lcl.find_overlap(&q_empty).is_none());
    }
}
