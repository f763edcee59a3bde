mod ibs;
mod lcl;
mod ncl;

use criterion::{criterion_group, criterion_main};

criterion_group!(
    ncl_benches,
    ncl::build,
    ncl::find_overlaps_point,
    ncl::count_overlaps
);
criterion_group!(
    lcl_benches,
    lcl::build,
    lcl::find_overlaps_point,
    lcl::count_overlaps
);
criterion_group!(
    ibs_benches,
    ibs::add,
    ibs::find_overlaps_point,
    ibs::find_overlaps_range
);
criterion_group!(
    dlfit_benches,
    dlfit::add,
    dlfit::find_overlaps_point,
    dlfit::enumerate_from
);
criterion_main!(ncl_benches, lcl_benches, ibs_benches, dlfit_benches);
