use criterion::Criterion;
use interval_collections::algebra::Interval;
use interval_collections::collection::{DynamicIntervalCollection, IntervalCollection};
use interval_collections::ibs::IntervalBST;

const N: usize = 10_000;
const SIZE: usize = 100;

fn fixture() -> IntervalBST<usize> {
    let mut ibs = IntervalBST::new();
    for x in 0..N {
        ibs.add(Interval::new(x, x + SIZE)).unwrap();
    }
    ibs
}

pub fn add(c: &mut Criterion) {
    c.bench_function("ibs-add", |bench| {
        bench.iter(|| {
            let mut ibs = IntervalBST::new();
            for x in 0..N {
                ibs.add(Interval::new(x, x + SIZE)).unwrap();
            }
            ibs
        });
    });
}

pub fn find_overlaps_point(c: &mut Criterion) {
    let ibs = fixture();
    c.bench_function("ibs-find-overlaps-point", |bench| {
        bench.iter(|| ibs.find_overlaps_point(&(N / 2)).count());
    });
}

pub fn find_overlaps_range(c: &mut Criterion) {
    let ibs = fixture();
    let query = Interval::new(N / 2, N / 2 + SIZE);
    c.bench_function("ibs-find-overlaps-range", |bench| {
        bench.iter(|| ibs.find_overlaps(&query).count());
    });
}
