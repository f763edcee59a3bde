use crate::algebra::{compare_for_nesting, strictly_contains, Interval};

use super::Layer;

/// Builds the layer array for a [`super::LayeredContainmentList`]: a
/// greedy nesting decomposition (§4.4) followed by a pointer-array pass.
pub(super) fn build<T: PartialOrd + Clone>(mut intervals: Vec<Interval<T>>) -> Vec<Layer<T>> {
    if intervals.is_empty() {
        return Vec::new();
    }
    intervals.sort_by(compare_for_nesting);

    let mut layers: Vec<Vec<Interval<T>>> = Vec::new();
    for iv in intervals {
        let mut l = 0;
        loop {
            if l == layers.len() {
                layers.push(Vec::new());
            }
            let fits = match layers[l].last() {
                None => true,
                // Only the last element of the layer needs checking: all
                // earlier siblings have a strictly smaller high endpoint
                // (the pairwise non-containing invariant forces highs to
                // increase monotonically along a layer), so if `iv` isn't
                // contained in the layer's current tail it cannot be
                // contained in anything earlier in the layer either.
                Some(last) => !strictly_contains(last, &iv),
            };
            if fits {
                layers[l].push(iv);
                break;
            }
            l += 1;
        }
    }

    let pointers = compute_pointers(&layers);
    layers
        .into_iter()
        .zip(pointers)
        .map(|(intervals, pointers)| Layer { intervals, pointers })
        .collect()
}

/// For each layer `L`, computes a sentinel-terminated pointer array:
/// `pointers[i]` is the index in layer `L+1` of the first interval
/// strictly contained in layer-`L` interval `i`; `pointers[len]` is the
/// "past last" sentinel. The deepest layer gets an all-sentinel array
/// (there is no layer beneath it).
///
/// A single left-to-right merge pass over each adjacent pair of layers
/// suffices: both layers preserve the global construction order, and
/// every layer-`L+1` interval is strictly contained in exactly one
/// layer-`L` interval (§4.4's invariant), so the children of consecutive
/// layer-`L` parents form disjoint, contiguous, order-preserving runs in
/// layer `L+1`.
fn compute_pointers<T: PartialOrd>(layers: &[Vec<Interval<T>>]) -> Vec<Vec<usize>> {
    let mut all_pointers = Vec::with_capacity(layers.len());
    for l in 0..layers.len() {
        let this_len = layers[l].len();
        let mut pointers = Vec::with_capacity(this_len + 1);
        if l + 1 < layers.len() {
            let next = &layers[l + 1];
            let mut cursor = 0;
            for parent in &layers[l] {
                pointers.push(cursor);
                while cursor < next.len() && strictly_contains(parent, &next[cursor]) {
                    cursor += 1;
                }
            }
            pointers.push(cursor);
        } else {
            pointers.extend(std::iter::repeat(0).take(this_len + 1));
        }
        all_pointers.push(pointers);
    }
    all_pointers
}
