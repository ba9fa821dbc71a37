//! Node-based containers that draw their storage from a `bounded_pool`
//! arena.
//!
//! This crate provides two deliberately small containers built on
//! [`bounded_pool`]: [`PooledList`], a singly-linked list, and
//! [`PooledMap`], a minimal ordered key-value container. Both claim exactly
//! one pool slot per element, release exactly one per removal, and surface
//! pool exhaustion as an ordinary [`Exhausted`][bounded_pool::Exhausted]
//! error.
//!
//! Each container publishes the slots it claims beyond one-per-element as a
//! `NODE_OVERHEAD` constant, so sizing an arena is arithmetic rather than
//! guesswork: a map holding `n` entries needs a pool of
//! `n + PooledMap::NODE_OVERHEAD` slots.
//!
//! # Example
//!
//! ```rust
//! use pooled_collections::{PooledList, PooledMap};
//!
//! // A list sized for exactly four elements.
//! let mut list = PooledList::<u32, 4>::new();
//! for value in 0..4 {
//!     list.push_back(value).unwrap();
//! }
//! assert!(list.push_back(4).is_err());
//!
//! // A map sized for exactly four entries plus its published overhead.
//! const MAP_CAPACITY: usize = 4 + PooledMap::<u32, u32, 0>::NODE_OVERHEAD;
//! let mut map = PooledMap::<u32, u32, MAP_CAPACITY>::new().unwrap();
//! for key in 0..4 {
//!     map.insert(key, key * key).unwrap();
//! }
//! assert!(map.insert(4, 16).is_err());
//! ```

mod list;
mod map;

pub use list::*;
pub use map::*;
