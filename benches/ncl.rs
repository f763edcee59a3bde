use criterion::Criterion;
use interval_collections::algebra::Interval;
use interval_collections::collection::IntervalCollection;
use interval_collections::ncl::NestedContainmentList;

const N: usize = 10_000;
const SIZE: usize = 100;

fn fixture() -> NestedContainmentList<usize> {
    let records = (0..N).map(|x| Interval::new(x, x + SIZE)).collect::<Vec<_>>();
    NestedContainmentList::new(records)
}

pub fn build(c: &mut Criterion) {
    let records: Vec<Interval<usize>> = (0..N).map(|x| Interval::new(x, x + SIZE)).collect();
    c.bench_function("ncl-build", |bench| {
        bench.iter(|| NestedContainmentList::new(records.clone()));
    });
}

pub fn find_overlaps_point(c: &mut Criterion) {
    let ncl = fixture();
    c.bench_function("ncl-find-overlaps-point", |bench| {
        bench.iter(|| ncl.find_overlaps_point(&(N / 2)).count());
    });
}

pub fn count_overlaps(c: &mut Criterion) {
    let ncl = fixture();
    let query = Interval::new(N / 2, N / 2 + SIZE);
    c.bench_function("ncl-count-overlaps", |bench| {
        bench.iter(|| ncl.count_overlaps(&query));
    });
}
