//! A fixed-capacity typed object pool with slot reuse and recoverable
//! exhaustion.
//!
//! This crate provides [`BoundedPool`], an arena that owns storage for a
//! compile-time number of values of one type, hands out opaque [`SlotKey`]s
//! for the values it holds, and recycles released slots through an internal
//! free list. Capacity is part of the pool's type: a `BoundedPool<T, 16>`
//! can never hold a seventeenth value, and running out is a normal,
//! recoverable [`Exhausted`] error rather than a panic or a reallocation.
//!
//! # Key features
//!
//! - **Fixed footprint**: all storage is allocated at construction; the pool
//!   never grows, never shrinks and never reallocates.
//! - **Slot reuse**: released slots are recycled in LIFO order before
//!   untouched storage is carved out.
//! - **Keyed access**: values are reached through copyable [`SlotKey`]s, so
//!   containers can link values to each other without references or raw
//!   pointers.
//! - **Recoverable exhaustion**: a full pool refuses further insertions with
//!   an error the caller can act on; it never overcommits.
//! - **Checked misuse**: stale or foreign keys panic (or return `None` from
//!   the checked variants); they cannot corrupt other slots.
//! - **Shared handles**: [`PoolHandle`] is a cloneable single-threaded
//!   handle through which several containers can draw from one arena, with
//!   handle equality meaning "interchangeable".
//!
//! # Example
//!
//! ```rust
//! use bounded_pool::{BoundedPool, Exhausted};
//!
//! let mut pool = BoundedPool::<u64, 3>::new();
//!
//! let a = pool.insert(1).unwrap();
//! let b = pool.insert(2).unwrap();
//! let c = pool.insert(3).unwrap();
//!
//! // The pool is full; insertion fails visibly instead of growing.
//! let error: Exhausted = pool.insert(4).unwrap_err();
//! assert_eq!(error.capacity, 3);
//!
//! // Releasing any slot makes room again, and the released slot is the
//! // first one reused.
//! pool.remove(b);
//! let d = pool.insert(4).unwrap();
//! assert_eq!(d, b);
//!
//! assert_eq!(*pool.get(a), 1);
//! assert_eq!(*pool.get(c), 3);
//! assert_eq!(*pool.get(d), 4);
//! # pool.remove(a);
//! # pool.remove(c);
//! # pool.remove(d);
//! ```

mod errors;
mod handle;
mod key;
mod pool;

pub use errors::*;
pub use handle::*;
pub use key::*;
pub use pool::*;
