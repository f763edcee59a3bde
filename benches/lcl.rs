use criterion::Criterion;
use interval_collections::algebra::Interval;
use interval_collections::collection::IntervalCollection;
use interval_collections::lcl::LayeredContainmentList;

const N: usize = 10_000;
const SIZE: usize = 100;

fn fixture() -> LayeredContainmentList<usize> {
    let records = (0..N).map(|x| Interval::new(x, x + SIZE)).collect::<Vec<_>>();
    LayeredContainmentList::new(records)
}

pub fn build(c: &mut Criterion) {
    let records: Vec<Interval<usize>> = (0..N).map(|x| Interval::new(x, x + SIZE)).collect();
    c.bench_function("lcl-build", |bench| {
        bench.iter(|| LayeredContainmentList::new(records.clone()));
    });
}

pub fn find_overlaps_point(c: &mut Criterion) {
    let lcl = fixture();
    c.bench_function("lcl-find-overlaps-point", |bench| {
        bench.iter(|| lcl.find_overlaps_point(&(N / 2)).count());
    });
}

/// The payoff described in §4.4: counting never materializes an interval.
pub fn count_overlaps(c: &mut Criterion) {
    let lcl = fixture();
    let query = Interval::new(N / 2, N / 2 + SIZE);
    c.bench_function("lcl-count-overlaps", |bench| {
        bench.iter(|| lcl.count_overlaps(&query));
    });
}
