use thiserror::Error;

/// Errors raised while constructing an [`Interval`](crate::algebra::Interval).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    /// `low > high`, or `low == high` without both endpoints included.
    #[error("invalid interval bounds: low must be < high, or low == high with both endpoints included")]
    InvalidBounds,
}

/// Errors raised by the collection query/mutation surface (§7 of the spec).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Raised by `span` and `choose` on an empty container.
    #[error("the collection is empty")]
    EmptyCollection,

    /// Raised by `add`/`remove`/`clear` on a read-only container.
    #[error("the collection is read-only")]
    ReadOnly,

    /// Raised when a caller-supplied callback (e.g. `force_add`'s shift
    /// function) breaks its contract, or a mutation is otherwise invalid.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Raised by `choose` on an empty collection.
    #[error("no such item")]
    NoSuchItem,
}
