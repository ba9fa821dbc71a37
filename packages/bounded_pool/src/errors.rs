use thiserror::Error;

/// The pool has no slot left to hand out: every slot is live.
///
/// Both the free list and the untouched tail of the storage are empty. This
/// is recoverable only on the caller's side, by removing values or by using
/// a pool with a larger capacity — the pool itself never retries, never
/// grows and never reclaims live slots.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("pool is exhausted: all {capacity} slots are live")]
#[non_exhaustive]
pub struct Exhausted {
    /// The fixed capacity of the pool that rejected the request.
    pub capacity: usize,
}

/// Errors that can occur when claiming slots through the count-parameterized
/// [`claim()`][1] entry point.
///
/// [1]: crate::BoundedPool::claim
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum ClaimError {
    /// The pool has no slot left to hand out.
    #[error(transparent)]
    Exhausted(#[from] Exhausted),

    /// More than one contiguous slot was requested. The pool serves slots
    /// one at a time; a multi-slot request signals a caller that needs a
    /// different kind of allocator, not a transient condition.
    #[error("cannot claim {requested} contiguous slots: the pool serves single slots only")]
    UnsupportedCount {
        /// The slot count of the rejected request.
        requested: usize,
    },
}
