#![warn(clippy::pedantic, clippy::perf)]
#![allow(
    clippy::module_inception,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

//! # interval-collections
//!
//! A library of interval-indexing containers: data structures that store
//! one-dimensional intervals and answer stabbing, range, counting,
//! existence, and gap queries over them.
//!
//! Four container engines cover the hard engineering, each optimized for a
//! different workload:
//!
//! - [`ncl::NestedContainmentList`] — static, recursive sublists of
//!   strictly-contained intervals; two binary searches per query level.
//! - [`lcl::LayeredContainmentList`] — static, array-of-layers, with the
//!   same two-binary-search query shape but a `count_overlaps` fast path
//!   that never materializes an interval.
//! - [`ibs::IntervalBST`] — dynamic, AVL-balanced, augmented interval tree
//!   supporting insertion and removal alongside point/range queries.
//! - [`dlfit::FiniteIntervalTree`] — dynamic AVL tree over pairwise
//!   non-overlapping intervals, with in-order predecessor/successor links
//!   and a conflict-resolving `force_add`.
//!
//! All four are built on the same foundation: the [`algebra`] module's
//! `Interval<T>` value type and its comparison/overlap/containment
//! primitives, plus the sorted-sequence helpers in [`gaps`]. Containers
//! never depend on one another. Every container implements the shared
//! read surface in [`collection::IntervalCollection`]; the two dynamic
//! engines additionally implement [`collection::DynamicIntervalCollection`].
//!
//! ## Example
//!
//! ```
//! use interval_collections::algebra::Interval;
//! use interval_collections::collection::IntervalCollection;
//! use interval_collections::ncl::NestedContainmentList;
//!
//! let ncl = NestedContainmentList::new(vec![
//!     Interval::new(2, 7),
//!     Interval::new(4, 12),
//!     Interval::new(5, 7),
//!     Interval::new(6, 8),
//!     Interval::new(9, 11),
//!     Interval::new(11, 17),
//!     Interval::new(18, 21),
//! ]);
//! assert_eq!(ncl.find_overlaps_point(&6).count(), 4);
//! assert_eq!(ncl.find_overlaps_point(&9).count(), 2);
//! ```
//!
//! ## Dynamic containers
//!
//! ```
//! use interval_collections::algebra::Interval;
//! use interval_collections::collection::{DynamicIntervalCollection, IntervalCollection};
//! use interval_collections::ibs::IntervalBST;
//!
//! let mut ibs: IntervalBST<i64> = IntervalBST::new();
//! assert!(ibs.add(Interval::new(2, 7)).unwrap());
//! assert!(ibs.add(Interval::new(4, 12)).unwrap());
//! assert!(!ibs.add(Interval::new(2, 7)).unwrap()); // duplicate, rejected
//! assert!(ibs.remove(&Interval::new(2, 7)).unwrap());
//! assert_eq!(ibs.count(), 1);
//! ```

/// Interval algebra: the `Interval<T>` value type and comparison /
/// overlap / containment primitives every container is built on.
pub mod algebra;

/// The uniform query/mutation surface every container exposes.
pub mod collection;

/// Dynamic Doubly-Linked Finite Interval Tree.
pub mod dlfit;

/// Errors raised by interval construction and the collection surface.
pub mod error;

/// Change-event notification for dynamic containers.
pub mod events;

/// Sorted-interval helpers and gap enumeration.
pub mod gaps;

/// Dynamic Interval Binary Search Tree.
pub mod ibs;

/// Static Layered Containment List.
pub mod lcl;

/// Static Nested Containment List.
pub mod ncl;

pub use algebra::{Inclusion, Interval};
pub use collection::{CountSpeed, DynamicIntervalCollection, IntervalCollection};
pub use error::{CollectionError, IntervalError};
