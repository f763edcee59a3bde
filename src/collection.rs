//! The uniform query/mutation surface every container exposes (§4.7, §6).
//!
//! Mirrors the teacher crate's trait-per-concern split
//! (`traits/container/*.rs`): one trait for the read surface every engine
//! shares, a second extending it for the two dynamic engines.

use crate::algebra::Interval;
use crate::error::CollectionError;
use crate::events::ChangeEvent;
use std::marker::PhantomData;

/// How expensive `count()` is. Every engine in this crate caches its
/// length, so all four report `Constant`; the enum exists so a future
/// engine with an O(n) count isn't silently assumed to be free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSpeed {
    Constant,
    Linear,
}

/// The read-only query surface shared by every container: NCL, LCL, IBS,
/// and DLFIT.
pub trait IntervalCollection<T> {
    /// A lazy iterator over overlaps, returned by `find_overlaps`. Each
    /// engine has a different natural iterator shape (recursion stack,
    /// tree walk, linked-list walk), so it is an associated type rather
    /// than a boxed trait object — callers needing a common trait object
    /// type can box via `.find_overlaps(..).collect::<Vec<_>>()` or
    /// `Box::new(..) as Box<dyn Iterator<Item = _>>`.
    type Overlaps<'a>: Iterator<Item = &'a Interval<T>>
    where
        Self: 'a,
        T: 'a;

    /// `true` iff the collection has no members.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The number of members.
    fn count(&self) -> usize;

    /// How expensive `count()` is for this engine.
    fn count_speed(&self) -> CountSpeed {
        CountSpeed::Constant
    }

    /// Returns a reference to an arbitrary member, or
    /// `Err(NoSuchItem)` if the collection is empty.
    fn choose(&self) -> Result<&Interval<T>, CollectionError>;

    /// The smallest interval covering every member, or
    /// `Err(EmptyCollection)` if there are none.
    fn span(&self) -> Result<Interval<T>, CollectionError>
    where
        T: Clone;

    /// The largest number of members that simultaneously contain any
    /// single point (a.k.a. maximum depth).
    fn maximum_overlap(&self) -> usize;

    /// A lazy sequence of every member overlapping `point`.
    fn find_overlaps_point<'a>(&'a self, point: &'a T) -> Self::Overlaps<'a>
    where
        T: PartialOrd;

    /// A lazy sequence of every member overlapping `query`.
    fn find_overlaps<'a>(&'a self, query: &'a Interval<T>) -> Self::Overlaps<'a>
    where
        T: PartialOrd;

    /// Returns a reference to the first overlap found, or `None` if no
    /// member overlaps `query`.
    fn find_overlap<'a>(&'a self, query: &'a Interval<T>) -> Option<&'a Interval<T>>
    where
        T: PartialOrd,
    {
        self.find_overlaps(query).next()
    }

    /// The number of members overlapping `query`.
    fn count_overlaps(&self, query: &Interval<T>) -> usize
    where
        T: PartialOrd,
    {
        self.find_overlaps(query).count()
    }

    /// `true` iff re-adding an interval already referentially present is
    /// accepted (producing a reference duplicate) rather than rejected.
    fn allows_reference_duplicates(&self) -> bool;

    /// `true` iff two members may overlap without one containing the
    /// other.
    fn allows_overlaps(&self) -> bool;

    /// `true` iff one member may strictly contain another.
    fn allows_containments(&self) -> bool;

    /// `true` iff `add`/`remove`/`clear` are rejected with `ReadOnly`.
    fn is_read_only(&self) -> bool;
}

/// Extends [`IntervalCollection`] with mutation. Both the two dynamic
/// engines (IBS, DLFIT) and the [`ReadOnlyCollection`] shim over a static
/// engine (NCL, LCL) implement this trait, so callers programming against
/// the capability-set abstraction (§9's "select at construction" design
/// note) can call `add`/`remove`/`clear` uniformly and match on the
/// `Err(CollectionError::ReadOnly)` a static engine's wrapper reports
/// rather than branching on `is_read_only()` themselves.
pub trait DynamicIntervalCollection<T>: IntervalCollection<T> {
    /// Inserts `interval`. Returns `Ok(true)` iff it was actually
    /// inserted, `Ok(false)` when duplicate-rejected under the
    /// collection's duplicate policy, or `Err(ReadOnly)` on a read-only
    /// collection. Fires `ItemsAdded` iff it returns `Ok(true)`.
    fn add(&mut self, interval: Interval<T>) -> Result<bool, CollectionError>;

    /// Removes `interval` if present. Returns `Ok(true)` iff something
    /// was removed, or `Err(ReadOnly)` on a read-only collection. Fires
    /// `ItemsRemoved` iff it returns `Ok(true)`.
    fn remove(&mut self, interval: &Interval<T>) -> Result<bool, CollectionError>
    where
        T: PartialOrd;

    /// Empties the collection, or fails with `Err(ReadOnly)` on a
    /// read-only collection. Fires `CollectionCleared` iff the
    /// collection was non-empty; a `clear()` on an already-empty
    /// collection is a no-op and fires nothing.
    fn clear(&mut self) -> Result<(), CollectionError>;

    /// Subscribes a listener to this collection's change events, or
    /// fails with `Err(ReadOnly)` on a read-only collection (which never
    /// fires an event to subscribe to in the first place).
    fn subscribe<F>(&mut self, listener: F) -> Result<(), CollectionError>
    where
        F: FnMut(&ChangeEvent<T>) + 'static;
}

/// A blanket read-only shim (§4.7: "Static containers fail such calls
/// with `ReadOnly`") wrapping any static [`IntervalCollection`] (NCL,
/// LCL) so it can be handed to code written against
/// [`DynamicIntervalCollection`] — every mutator simply returns
/// `Err(CollectionError::ReadOnly)` without touching `inner`.
pub struct ReadOnlyCollection<T, C> {
    inner: C,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C: IntervalCollection<T>> ReadOnlyCollection<T, C> {
    /// Wraps `inner`, a static container, behind the dynamic-mutation
    /// contract.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// Unwraps back to the underlying static container.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<T, C: IntervalCollection<T>> IntervalCollection<T> for ReadOnlyCollection<T, C> {
    type Overlaps<'a>
        = C::Overlaps<'a>
    where
        Self: 'a,
        T: 'a;

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn count(&self) -> usize {
        self.inner.count()
    }

    fn count_speed(&self) -> CountSpeed {
        self.inner.count_speed()
    }

    fn choose(&self) -> Result<&Interval<T>, CollectionError> {
        self.inner.choose()
    }

    fn span(&self) -> Result<Interval<T>, CollectionError>
    where
        T: Clone,
    {
        self.inner.span()
    }

    fn maximum_overlap(&self) -> usize {
        self.inner.maximum_overlap()
    }

    fn find_overlaps_point<'a>(&'a self, point: &'a T) -> Self::Overlaps<'a>
    where
        T: PartialOrd,
    {
        self.inner.find_overlaps_point(point)
    }

    fn find_overlaps<'a>(&'a self, query: &'a Interval<T>) -> Self::Overlaps<'a>
    where
        T: PartialOrd,
    {
        self.inner.find_overlaps(query)
    }

    fn find_overlap<'a>(&'a self, query: &'a Interval<T>) -> Option<&'a Interval<T>>
    where
        T: PartialOrd,
    {
        self.inner.find_overlap(query)
    }

    fn count_overlaps(&self, query: &Interval<T>) -> usize
    where
        T: PartialOrd,
    {
        self.inner.count_overlaps(query)
    }

    fn allows_reference_duplicates(&self) -> bool {
        self.inner.allows_reference_duplicates()
    }

    fn allows_overlaps(&self) -> bool {
        self.inner.allows_overlaps()
    }

    fn allows_containments(&self) -> bool {
        self.inner.allows_containments()
    }

    fn is_read_only(&self) -> bool {
        true
    }
}

impl<T, C: IntervalCollection<T>> DynamicIntervalCollection<T> for ReadOnlyCollection<T, C> {
    fn add(&mut self, _interval: Interval<T>) -> Result<bool, CollectionError> {
        Err(CollectionError::ReadOnly)
    }

    fn remove(&mut self, _interval: &Interval<T>) -> Result<bool, CollectionError>
    where
        T: PartialOrd,
    {
        Err(CollectionError::ReadOnly)
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Err(CollectionError::ReadOnly)
    }

    fn subscribe<F>(&mut self, _listener: F) -> Result<(), CollectionError>
    where
        F: FnMut(&ChangeEvent<T>) + 'static,
    {
        Err(CollectionError::ReadOnly)
    }
}
