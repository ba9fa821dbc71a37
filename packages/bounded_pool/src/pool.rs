use std::any::type_name;
use std::mem;

use crate::{ClaimError, Exhausted, SlotKey};

/// A fixed-capacity typed object pool with slot reuse.
///
/// The pool owns storage for up to `CAPACITY` values of type `T`, allocated
/// once at construction and never resized. Inserting a value claims one slot
/// and returns a [`SlotKey`]; removing a value by its key releases the slot
/// onto an internal free list, where it is preferred over untouched storage
/// by the next insertion. Every operation is O(1).
///
/// There are multiple ways to insert values into the pool:
///
/// * [`insert()`][1] - inserts a value and returns the key. This is the
///   simplest way to add a value but requires you to later look it up by the
///   key.
/// * [`begin_insert().insert()`][2] - two-phase insertion; you may obtain the
///   key in advance from the inserter through [`key()`][3], which may be
///   useful if the value needs to know its own key in the pool. Abandoning
///   the inserter without committing a value changes nothing.
/// * [`claim()`][4] - the count-parameterized entry point for callers that
///   are generic over an allocation request size. Only zero-slot and
///   single-slot requests are supported.
///
/// # Exhaustion
///
/// When every slot is live, insertion fails with [`Exhausted`]. The pool
/// never grows, never wraps around and never reclaims a live slot; recovery
/// is the caller's business, by removing values or choosing a larger
/// `CAPACITY`.
///
/// # Slot states
///
/// Each of the `CAPACITY` slots is in exactly one of three states: untouched
/// (never handed out yet), live (holding a value), or free (released and
/// linked into the free list). A slot leaves the untouched state at most
/// once; after that it alternates between live and free for the lifetime of
/// the pool. [`touched()`][5] reports how many slots have ever left the
/// untouched state.
///
/// # Example
///
/// ```rust
/// use bounded_pool::BoundedPool;
///
/// let mut pool = BoundedPool::<String, 2>::new();
///
/// let greeting = pool.insert("hello".to_string()).unwrap();
/// let farewell = pool.insert("goodbye".to_string()).unwrap();
///
/// // Both slots are live now, so the next insertion fails.
/// assert!(pool.insert("overflow".to_string()).is_err());
///
/// // Removing a value makes its slot available again.
/// let value = pool.remove(greeting);
/// assert_eq!(value, "hello");
/// assert!(pool.insert("again".to_string()).is_ok());
/// # pool.remove(farewell);
/// ```
///
/// [1]: Self::insert
/// [2]: SlotInserter::insert
/// [3]: SlotInserter::key
/// [4]: Self::claim
/// [5]: Self::touched
#[derive(Debug)]
pub struct BoundedPool<T, const CAPACITY: usize> {
    /// Slot storage. The full capacity is allocated up front and the vector
    /// never reallocates: its length only grows, one slot at a time, as
    /// slots are claimed from the untouched tail. Indices of slots that
    /// have been handed out once stay stable forever.
    slots: Vec<Slot<T>>,

    /// Head of the free list: the most recently released slot, if any.
    /// Think of this as a stack of released slots, with the stack links
    /// stored in the vacant slots themselves.
    free_head: Option<SlotKey>,

    /// The number of live values in the pool.
    count: usize,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied { value: T },

    Vacant { next_free: Option<SlotKey> },
}

impl<T, const CAPACITY: usize> BoundedPool<T, CAPACITY> {
    /// Creates a new pool, allocating storage for all `CAPACITY` slots up
    /// front.
    ///
    /// A pool with `CAPACITY == 0` is permitted; every single-slot claim on
    /// it fails with [`Exhausted`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let pool = BoundedPool::<u32, 8>::new();
    ///
    /// assert_eq!(pool.capacity(), 8);
    /// assert!(pool.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(CAPACITY),
            free_head: None,
            count: 0,
        }
    }

    /// The number of live values in the pool.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let mut pool = BoundedPool::<u32, 4>::new();
    /// assert_eq!(pool.len(), 0);
    ///
    /// let key = pool.insert(42).unwrap();
    /// assert_eq!(pool.len(), 1);
    ///
    /// pool.remove(key);
    /// assert_eq!(pool.len(), 0);
    /// ```
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Trivial accessor, mutation tells us nothing.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the pool holds no live values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether every slot is live, so the next single-slot claim would fail.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let mut pool = BoundedPool::<u32, 1>::new();
    /// assert!(!pool.is_full());
    ///
    /// let key = pool.insert(42).unwrap();
    /// assert!(pool.is_full());
    /// # pool.remove(key);
    /// ```
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == CAPACITY
    }

    /// The fixed capacity of the pool, in slots.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Trivial accessor, mutation tells us nothing.
    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// The number of slots that have ever been handed out, live or since
    /// released.
    ///
    /// This high-water mark only grows, and it is bounded by
    /// [`capacity()`][1]. Slots beyond it are untouched storage.
    ///
    /// [1]: Self::capacity
    #[must_use]
    pub fn touched(&self) -> usize {
        self.slots.len()
    }

    /// Claims `count` contiguous slots.
    ///
    /// This is the entry point for callers that are generic over an
    /// allocation request size:
    ///
    /// * `count == 0` returns `Ok(None)`. Nothing is claimed, no state
    ///   changes, and the request succeeds even on a full pool.
    /// * `count == 1` returns an inserter for one slot, exactly as
    ///   [`begin_insert()`][1] does.
    /// * `count > 1` fails with [`ClaimError::UnsupportedCount`]: the pool
    ///   guarantees single-slot service only and cannot satisfy multi-slot
    ///   contiguous requests, regardless of how much room is left.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::{BoundedPool, ClaimError};
    ///
    /// let mut pool = BoundedPool::<u32, 4>::new();
    ///
    /// // A zero-slot claim is a successful no-op.
    /// assert!(pool.claim(0).unwrap().is_none());
    ///
    /// // A single-slot claim yields an inserter.
    /// let inserter = pool.claim(1).unwrap().unwrap();
    /// let key = inserter.insert(42);
    ///
    /// // Multi-slot claims are not a capability of this pool.
    /// assert!(matches!(
    ///     pool.claim(2),
    ///     Err(ClaimError::UnsupportedCount { requested: 2 })
    /// ));
    /// # pool.remove(key);
    /// ```
    ///
    /// # Errors
    ///
    /// [`ClaimError::Exhausted`] for a single-slot claim on a full pool;
    /// [`ClaimError::UnsupportedCount`] for any multi-slot claim.
    ///
    /// [1]: Self::begin_insert
    pub fn claim(
        &mut self,
        count: usize,
    ) -> Result<Option<SlotInserter<'_, T, CAPACITY>>, ClaimError> {
        match count {
            0 => Ok(None),
            1 => Ok(Some(self.begin_insert()?)),
            _ => Err(ClaimError::UnsupportedCount { requested: count }),
        }
    }

    /// Begins inserting a value into the pool.
    ///
    /// The returned inserter knows the [`key()`][1] the value will occupy
    /// before the value exists, which is useful when the value needs to know
    /// its own key. No state changes until [`insert()`][2] commits a value;
    /// abandoning the inserter is a no-op and the claimed slot stays where
    /// it was (on the free list or in the untouched tail).
    ///
    /// The free list is consulted first: the most recently released slot is
    /// reused before any untouched slot is carved out.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let mut pool = BoundedPool::<u32, 4>::new();
    ///
    /// let inserter = pool.begin_insert().unwrap();
    /// let key = inserter.key();
    /// let committed = inserter.insert(42);
    ///
    /// assert_eq!(committed, key);
    /// assert_eq!(*pool.get(key), 42);
    /// # pool.remove(key);
    /// ```
    ///
    /// # Errors
    ///
    /// [`Exhausted`] when every slot is live.
    pub fn begin_insert(&mut self) -> Result<SlotInserter<'_, T, CAPACITY>, Exhausted> {
        #[cfg(debug_assertions)]
        self.integrity_check();

        let key = match self.free_head {
            Some(key) => key,
            None if self.slots.len() < CAPACITY => SlotKey::new(self.slots.len()),
            None => return Err(Exhausted { capacity: CAPACITY }),
        };

        Ok(SlotInserter { pool: self, key })
    }

    /// Inserts a value into the pool and returns its key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let mut pool = BoundedPool::<&str, 4>::new();
    ///
    /// let key = pool.insert("pooled").unwrap();
    /// assert_eq!(*pool.get(key), "pooled");
    /// # pool.remove(key);
    /// ```
    ///
    /// # Errors
    ///
    /// [`Exhausted`] when every slot is live.
    pub fn insert(&mut self, value: T) -> Result<SlotKey, Exhausted> {
        Ok(self.begin_insert()?.insert(value))
    }

    /// Removes a value from the pool, releasing its slot onto the free list.
    ///
    /// The slot becomes the first candidate for the next insertion. The
    /// pool's storage footprint does not change: released slots are recycled,
    /// never returned to the operating system.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let mut pool = BoundedPool::<String, 4>::new();
    ///
    /// let key = pool.insert("reclaim me".to_string()).unwrap();
    /// let value = pool.remove(key);
    ///
    /// assert_eq!(value, "reclaim me");
    /// assert!(pool.is_empty());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the key does not reference a live slot: never handed out by
    /// this pool, or already removed. Use [`try_remove()`][1] for the
    /// checked variant.
    ///
    /// [1]: Self::try_remove
    pub fn remove(&mut self, key: SlotKey) -> T {
        match self.try_remove(key) {
            Some(value) => value,
            None => panic!(
                "remove({}): slot is not live in pool of {}",
                key.index(),
                type_name::<T>()
            ),
        }
    }

    /// Removes a value from the pool if the key references a live slot.
    ///
    /// This is the checked variant of [`remove()`][1]: a stale, foreign or
    /// already-released key yields `None` and changes nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let mut pool = BoundedPool::<u32, 4>::new();
    ///
    /// let key = pool.insert(42).unwrap();
    /// assert_eq!(pool.try_remove(key), Some(42));
    ///
    /// // The key is stale now.
    /// assert_eq!(pool.try_remove(key), None);
    /// ```
    ///
    /// [1]: Self::remove
    pub fn try_remove(&mut self, key: SlotKey) -> Option<T> {
        let slot = self.slots.get_mut(key.index())?;

        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }

        let previous = mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(key);

        self.count = self
            .count
            .checked_sub(1)
            .expect("a live slot implies a non-zero live count");

        match previous {
            Slot::Occupied { value } => Some(value),
            Slot::Vacant { .. } => panic!(
                "slot {} became vacant between inspection and removal in pool of {}",
                key.index(),
                type_name::<T>()
            ),
        }
    }

    /// Gets a reference to a value in the pool by its key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let mut pool = BoundedPool::<String, 4>::new();
    /// let key = pool.insert("read me".to_string()).unwrap();
    ///
    /// assert_eq!(pool.get(key).as_str(), "read me");
    /// # pool.remove(key);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the key does not reference a live slot.
    #[must_use]
    pub fn get(&self, key: SlotKey) -> &T {
        match self.slots.get(key.index()) {
            Some(Slot::Occupied { value }) => value,
            _ => panic!(
                "get({}): slot is not live in pool of {}",
                key.index(),
                type_name::<T>()
            ),
        }
    }

    /// Gets an exclusive reference to a value in the pool by its key.
    ///
    /// # Panics
    ///
    /// Panics if the key does not reference a live slot.
    #[must_use]
    pub fn get_mut(&mut self, key: SlotKey) -> &mut T {
        match self.slots.get_mut(key.index()) {
            Some(Slot::Occupied { value }) => value,
            _ => panic!(
                "get_mut({}): slot is not live in pool of {}",
                key.index(),
                type_name::<T>()
            ),
        }
    }

    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    #[cfg(debug_assertions)]
    pub(crate) fn integrity_check(&self) {
        assert!(
            self.slots.len() <= CAPACITY,
            "touched count {} exceeds capacity {} in pool of {}",
            self.slots.len(),
            CAPACITY,
            type_name::<T>()
        );

        let occupied_count = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied { .. }))
            .count();

        assert!(
            occupied_count == self.count,
            "live count {} does not match the observed occupied count {} in pool of {}",
            self.count,
            occupied_count,
            type_name::<T>()
        );

        // Walk the free list: every vacant slot must be reachable exactly
        // once, every reachable slot must be vacant, and the walk must
        // terminate within the touched range (no cycles).
        let vacant_count = self
            .slots
            .len()
            .checked_sub(occupied_count)
            .expect("occupied slots are a subset of touched slots");

        let mut reached = 0_usize;
        let mut cursor = self.free_head;

        while let Some(key) = cursor {
            assert!(
                reached < vacant_count,
                "free list visits more slots than are vacant in pool of {} - cycle suspected",
                type_name::<T>()
            );

            match self.slots.get(key.index()) {
                Some(Slot::Vacant { next_free }) => cursor = *next_free,
                Some(Slot::Occupied { .. }) => panic!(
                    "free list reaches the occupied slot {} in pool of {}",
                    key.index(),
                    type_name::<T>()
                ),
                None => panic!(
                    "free list reaches the untouched index {} in pool of {}",
                    key.index(),
                    type_name::<T>()
                ),
            }

            reached = reached
                .checked_add(1)
                .expect("free list length is bounded by capacity");
        }

        assert!(
            reached == vacant_count,
            "free list reaches {} slots but {} are vacant in pool of {}",
            reached,
            vacant_count,
            type_name::<T>()
        );
    }
}

impl<T, const CAPACITY: usize> Default for BoundedPool<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

/// A two-phase insertion into a [`BoundedPool`], created by
/// [`begin_insert()`][1] or [`claim()`][2].
///
/// The inserter exposes the [`key()`][3] the value will occupy before the
/// value exists. Committing a value with [`insert()`][4] claims the slot;
/// dropping the inserter without committing changes nothing.
///
/// [1]: BoundedPool::begin_insert
/// [2]: BoundedPool::claim
/// [3]: Self::key
/// [4]: Self::insert
#[derive(Debug)]
pub struct SlotInserter<'p, T, const CAPACITY: usize> {
    pool: &'p mut BoundedPool<T, CAPACITY>,

    /// The slot the value will be committed into. Either the free list head
    /// or the first untouched index; in both cases it stays unclaimed until
    /// the commit.
    key: SlotKey,
}

impl<T, const CAPACITY: usize> SlotInserter<'_, T, CAPACITY> {
    /// The key the committed value will occupy.
    #[must_use]
    pub fn key(&self) -> SlotKey {
        self.key
    }

    /// Commits a value into the claimed slot and returns its key.
    pub fn insert(self, value: T) -> SlotKey {
        let index = self.key.index();

        if index == self.pool.slots.len() {
            // Carve a fresh slot out of the untouched tail. The capacity was
            // verified when the inserter was created and the pool cannot have
            // changed since: the inserter holds it exclusively.
            self.pool.slots.push(Slot::Occupied { value });
        } else {
            let slot = self
                .pool
                .slots
                .get_mut(index)
                .expect("inserter key is within the touched range");

            let previous = mem::replace(slot, Slot::Occupied { value });

            match previous {
                Slot::Vacant { next_free } => self.pool.free_head = next_free,
                Slot::Occupied { .. } => panic!(
                    "inserter targeted the occupied slot {} in pool of {}",
                    index,
                    type_name::<T>()
                ),
            }
        }

        self.pool.count = self
            .pool
            .count
            .checked_add(1)
            .expect("live count is bounded by capacity");

        self.key
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn smoke_test() {
        let mut pool = BoundedPool::<u32, 3>::new();

        let a = pool.insert(42).unwrap();
        let b = pool.insert(43).unwrap();
        let c = pool.insert(44).unwrap();

        assert_eq!(*pool.get(a), 42);
        assert_eq!(*pool.get(b), 43);
        assert_eq!(*pool.get(c), 44);

        assert_eq!(pool.len(), 3);
        assert!(pool.is_full());

        pool.remove(b);

        assert_eq!(pool.len(), 2);

        let d = pool.insert(45).unwrap();

        assert_eq!(*pool.get(a), 42);
        assert_eq!(*pool.get(c), 44);
        assert_eq!(*pool.get(d), 45);

        assert!(pool.is_full());
    }

    #[test]
    fn insert_beyond_capacity_is_exhausted() {
        let mut pool = BoundedPool::<u32, 3>::new();

        for value in 0..3 {
            assert!(pool.insert(value).is_ok());
        }

        assert_eq!(pool.insert(99), Err(Exhausted { capacity: 3 }));

        // The failed insertion changed nothing.
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.touched(), 3);
    }

    #[test]
    fn freed_slot_is_reused_before_untouched_tail() {
        let mut pool = BoundedPool::<u32, 8>::new();

        let keys = (0..4)
            .map(|value| pool.insert(value).unwrap())
            .collect::<Vec<_>>();

        // Half the pool is still untouched, yet the freed slot wins.
        let freed = *keys.get(1).unwrap();
        pool.remove(freed);

        let reused = pool.insert(100).unwrap();

        assert_eq!(reused, freed);
        assert_eq!(pool.touched(), 4);
    }

    #[test]
    fn free_list_reuse_is_lifo() {
        let mut pool = BoundedPool::<u32, 4>::new();

        let keys = (0..4)
            .map(|value| pool.insert(value).unwrap())
            .collect::<Vec<_>>();

        let first_freed = *keys.first().unwrap();
        let second_freed = *keys.get(2).unwrap();
        pool.remove(first_freed);
        pool.remove(second_freed);

        // Most recently released comes back first.
        assert_eq!(pool.insert(100).unwrap(), second_freed);
        assert_eq!(pool.insert(101).unwrap(), first_freed);
    }

    #[test]
    fn removed_value_round_trips_intact() {
        let mut pool = BoundedPool::<String, 2>::new();

        let key = pool.insert("payload".to_string()).unwrap();
        let value = pool.remove(key);
        assert_eq!(value, "payload");

        // Reuse of the slot carries no clearing contract; the new value is
        // simply the new value.
        let key = pool.insert("fresh".to_string()).unwrap();
        assert_eq!(*pool.get(key), "fresh");
    }

    #[test]
    fn claim_zero_is_noop_even_when_full() {
        let mut pool = BoundedPool::<u32, 2>::new();

        assert!(pool.claim(0).unwrap().is_none());
        assert_eq!(pool.touched(), 0);

        let _a = pool.insert(1).unwrap();
        let _b = pool.insert(2).unwrap();
        assert!(pool.is_full());

        assert!(pool.claim(0).unwrap().is_none());
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.touched(), 2);
    }

    #[test]
    fn claim_one_behaves_like_begin_insert() {
        let mut pool = BoundedPool::<u32, 2>::new();

        let inserter = pool.claim(1).unwrap().unwrap();
        let key = inserter.insert(7);

        assert_eq!(*pool.get(key), 7);
    }

    #[test]
    fn claim_many_is_unsupported() {
        let mut pool = BoundedPool::<u32, 8>::new();

        for requested in [2, 3, 100] {
            assert_eq!(
                pool.claim(requested).unwrap_err(),
                ClaimError::UnsupportedCount { requested }
            );
        }

        // Nothing was claimed by the rejected requests.
        assert_eq!(pool.touched(), 0);
    }

    #[test]
    fn claim_one_on_full_pool_is_exhausted() {
        let mut pool = BoundedPool::<u32, 1>::new();
        let _key = pool.insert(1).unwrap();

        assert_eq!(
            pool.claim(1).unwrap_err(),
            ClaimError::Exhausted(Exhausted { capacity: 1 })
        );
    }

    #[test]
    fn abandoned_inserter_is_noop() {
        let mut pool = BoundedPool::<u32, 3>::new();

        let inserter = pool.begin_insert().unwrap();
        let expected = inserter.key();
        drop(inserter);

        assert_eq!(pool.len(), 0);
        assert_eq!(pool.touched(), 0);

        // The same slot is offered again.
        let inserter = pool.begin_insert().unwrap();
        assert_eq!(inserter.key(), expected);
        inserter.insert(20);

        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn begin_insert_returns_keys_in_index_order_from_untouched_tail() {
        let mut pool = BoundedPool::<u32, 3>::new();

        for expected_value in [10, 11, 12] {
            let inserter = pool.begin_insert().unwrap();
            let key = inserter.insert(expected_value);
            assert_eq!(*pool.get(key), expected_value);
        }

        assert_eq!(pool.touched(), 3);
    }

    #[test]
    fn try_remove_stale_key_is_none() {
        let mut pool = BoundedPool::<u32, 2>::new();

        let key = pool.insert(42).unwrap();
        assert_eq!(pool.try_remove(key), Some(42));
        assert_eq!(pool.try_remove(key), None);

        // The double release did not corrupt the free list.
        let first = pool.insert(1).unwrap();
        let second = pool.insert(2).unwrap();
        assert_ne!(first, second);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    #[should_panic]
    fn remove_stale_key_panics() {
        let mut pool = BoundedPool::<u32, 2>::new();

        let key = pool.insert(42).unwrap();
        pool.remove(key);
        pool.remove(key);
    }

    #[test]
    #[should_panic]
    fn get_stale_key_panics() {
        let mut pool = BoundedPool::<u32, 2>::new();

        let key = pool.insert(42).unwrap();
        pool.remove(key);
        _ = pool.get(key);
    }

    #[test]
    #[should_panic]
    fn get_mut_stale_key_panics() {
        let mut pool = BoundedPool::<u32, 2>::new();

        let key = pool.insert(42).unwrap();
        pool.remove(key);
        _ = pool.get_mut(key);
    }

    #[test]
    fn zero_capacity_pool_is_always_exhausted() {
        let mut pool = BoundedPool::<u32, 0>::new();

        assert!(pool.is_full());
        assert_eq!(pool.insert(1), Err(Exhausted { capacity: 0 }));
        assert!(pool.claim(0).unwrap().is_none());
    }

    #[test]
    fn touched_is_monotone_under_churn() {
        let mut pool = BoundedPool::<u32, 4>::new();

        let keys = (0..4)
            .map(|value| pool.insert(value).unwrap())
            .collect::<Vec<_>>();

        for key in &keys {
            pool.remove(*key);
        }

        assert_eq!(pool.touched(), 4);
        assert!(pool.is_empty());

        for value in 0..4 {
            _ = pool.insert(value).unwrap();
        }

        // Everything was served from the free list.
        assert_eq!(pool.touched(), 4);
    }

    #[test]
    fn calls_drop_on_remove() {
        struct Droppable {
            dropped: Rc<Cell<bool>>,
        }

        impl Drop for Droppable {
            fn drop(&mut self) {
                self.dropped.set(true);
            }
        }

        let dropped = Rc::new(Cell::new(false));
        let mut pool = BoundedPool::<Droppable, 3>::new();

        let key = pool
            .insert(Droppable {
                dropped: Rc::clone(&dropped),
            })
            .unwrap();
        pool.remove(key);

        assert!(dropped.get());
    }

    #[test]
    fn dropping_pool_drops_live_values() {
        struct Droppable {
            drops: Rc<Cell<usize>>,
        }

        impl Drop for Droppable {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));

        {
            let mut pool = BoundedPool::<Droppable, 4>::new();
            for _ in 0..3 {
                _ = pool
                    .insert(Droppable {
                        drops: Rc::clone(&drops),
                    })
                    .unwrap();
            }
        }

        assert_eq!(drops.get(), 3);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn integrity_survives_randomized_churn() {
        let mut pool = BoundedPool::<usize, 8>::new();
        let mut live = Vec::new();

        // Deterministic churn: a fixed pattern of bursts and releases that
        // exercises free-list reuse across the whole index range.
        for round in 0..32 {
            while !pool.is_full() {
                live.push(pool.insert(round).unwrap());
            }

            // Release every other live value, front-biased.
            let mut index = 0;
            live.retain(|key| {
                index += 1;
                if index % 2 == 0 {
                    true
                } else {
                    pool.remove(*key);
                    false
                }
            });

            pool.integrity_check();
        }

        assert_eq!(pool.touched(), 8);
    }
}
