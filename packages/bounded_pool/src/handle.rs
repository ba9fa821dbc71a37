use std::any::type_name;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::{BoundedPool, Exhausted, SlotKey};

/// A single-threaded cloneable handle to a shared [`BoundedPool`].
///
/// This type is how a pool is handed to the containers that allocate from
/// it: the arena is owned once, behind the handle, and every clone of the
/// handle refers to that same arena. A container that should have the pool
/// to itself simply keeps the only handle; two containers share storage
/// only when the caller deliberately clones one handle into both.
///
/// # Identity
///
/// Two handles compare equal when and only when they refer to the same
/// arena, which is exactly when a key obtained through one may be redeemed
/// through the other. Handles for a different item type or a different
/// capacity are different *types*, so confusing them is a compile error
/// rather than a runtime mismatch.
///
/// # Single-threaded design
///
/// This type is designed for single-threaded use and is neither [`Send`]
/// nor [`Sync`]. Access to the shared arena is mediated by a [`RefCell`]:
/// holding a borrowed value (from [`get()`][1] or [`pool()`][2]) while
/// mutating through any handle to the same arena panics, per the usual
/// `RefCell` discipline.
///
/// # Example
///
/// ```rust
/// use bounded_pool::PoolHandle;
///
/// let pool = PoolHandle::<u32, 4>::new();
/// let same_arena = pool.clone();
///
/// let key = pool.insert(42).unwrap();
///
/// // The clone sees, and may redeem, keys from the original.
/// assert_eq!(same_arena.remove(key), 42);
/// assert!(pool == same_arena);
/// ```
///
/// [1]: Self::get
/// [2]: Self::pool
pub struct PoolHandle<T, const CAPACITY: usize> {
    /// The shared arena, behind a `RefCell` for single-threaded interior
    /// mutability.
    inner: Rc<RefCell<BoundedPool<T, CAPACITY>>>,
}

impl<T, const CAPACITY: usize> PoolHandle<T, CAPACITY> {
    /// Creates a handle that owns a fresh arena with all `CAPACITY` slots
    /// untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::PoolHandle;
    ///
    /// let pool = PoolHandle::<String, 8>::new();
    ///
    /// assert_eq!(pool.capacity(), 8);
    /// assert!(pool.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BoundedPool::new())),
        }
    }

    /// Derives a handle for a different item type at the same capacity.
    ///
    /// The derived handle owns a fresh arena: pools are scoped to the
    /// handle family that created them, so rebinding never aliases the
    /// original storage. Containers use this to obtain a pool for their
    /// internal node type from a pool parameterized over the item type
    /// their callers see.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::PoolHandle;
    ///
    /// let items = PoolHandle::<u32, 8>::new();
    /// let nodes = items.rebind::<(u32, u64)>();
    ///
    /// assert_eq!(nodes.capacity(), items.capacity());
    /// ```
    #[must_use]
    pub fn rebind<U>(&self) -> PoolHandle<U, CAPACITY> {
        PoolHandle::new()
    }

    /// Inserts a value into the shared arena and returns its key.
    ///
    /// # Errors
    ///
    /// [`Exhausted`] when every slot is live.
    pub fn insert(&self, value: T) -> Result<SlotKey, Exhausted> {
        self.inner.borrow_mut().insert(value)
    }

    /// Removes a value from the shared arena, releasing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the key does not reference a live slot. Use
    /// [`try_remove()`][1] for the checked variant.
    ///
    /// [1]: Self::try_remove
    pub fn remove(&self, key: SlotKey) -> T {
        self.inner.borrow_mut().remove(key)
    }

    /// Removes a value from the shared arena if the key references a live
    /// slot.
    pub fn try_remove(&self, key: SlotKey) -> Option<T> {
        self.inner.borrow_mut().try_remove(key)
    }

    /// Gets a borrowed reference to a value in the shared arena by its key.
    ///
    /// The borrow is released when the returned [`Ref`] is dropped; until
    /// then, mutating operations through any handle to the same arena
    /// panic.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::PoolHandle;
    ///
    /// let pool = PoolHandle::<String, 4>::new();
    /// let key = pool.insert("shared read".to_string()).unwrap();
    ///
    /// {
    ///     let value = pool.get(key);
    ///     assert_eq!(value.as_str(), "shared read");
    /// }
    /// # pool.remove(key);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the key does not reference a live slot, or if the arena is
    /// exclusively borrowed.
    #[must_use]
    pub fn get(&self, key: SlotKey) -> Ref<'_, T> {
        Ref::map(self.inner.borrow(), |pool| pool.get(key))
    }

    /// Borrows the arena itself.
    ///
    /// This is the escape hatch for read-only multi-step operations.
    ///
    /// # Panics
    ///
    /// Panics if the arena is exclusively borrowed.
    #[must_use]
    pub fn pool(&self) -> Ref<'_, BoundedPool<T, CAPACITY>> {
        self.inner.borrow()
    }

    /// Exclusively borrows the arena itself.
    ///
    /// Multi-step operations (such as a container updating several nodes)
    /// take the arena once and work on it directly, including through the
    /// count-parameterized [`claim()`][1] surface.
    ///
    /// # Panics
    ///
    /// Panics if the arena is borrowed in any way.
    ///
    /// [1]: BoundedPool::claim
    #[must_use]
    pub fn pool_mut(&self) -> RefMut<'_, BoundedPool<T, CAPACITY>> {
        self.inner.borrow_mut()
    }

    /// The number of live values in the shared arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether the shared arena holds no live values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Whether every slot of the shared arena is live.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.inner.borrow().is_full()
    }

    /// The fixed capacity of the shared arena, in slots.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Trivial accessor, mutation tells us nothing.
    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// The number of slots of the shared arena that have ever been handed
    /// out.
    #[must_use]
    pub fn touched(&self) -> usize {
        self.inner.borrow().touched()
    }
}

impl<T, const CAPACITY: usize> Clone for PoolHandle<T, CAPACITY> {
    /// Returns another handle to the same arena.
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, const CAPACITY: usize> Default for PoolHandle<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAPACITY: usize> PartialEq for PoolHandle<T, CAPACITY> {
    /// Handles are equal when they refer to the same arena — exactly when a
    /// key obtained through one may be redeemed through the other.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T, const CAPACITY: usize> Eq for PoolHandle<T, CAPACITY> {}

impl<T, const CAPACITY: usize> fmt::Debug for PoolHandle<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolHandle")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &CAPACITY)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use static_assertions::assert_not_impl_any;

    use super::*;

    assert_not_impl_any!(PoolHandle<u32, 4>: Send, Sync);

    #[test]
    fn clones_share_one_arena() {
        let pool = PoolHandle::<u32, 2>::new();
        let clone = pool.clone();

        let key = pool.insert(42).unwrap();

        assert_eq!(clone.len(), 1);
        assert_eq!(*clone.get(key), 42);
        assert_eq!(clone.remove(key), 42);
        assert!(pool.is_empty());
    }

    #[test]
    fn clones_compare_equal() {
        let pool = PoolHandle::<u32, 2>::new();
        let clone = pool.clone();

        assert_eq!(pool, clone);
    }

    #[test]
    fn independent_handles_compare_unequal() {
        // Same item type, same capacity - still two distinct arenas.
        let first = PoolHandle::<u32, 2>::new();
        let second = PoolHandle::<u32, 2>::new();

        assert_ne!(first, second);
    }

    #[test]
    fn independent_handles_do_not_share_capacity() {
        let first = PoolHandle::<u32, 1>::new();
        let second = PoolHandle::<u32, 1>::new();

        let _key = first.insert(1).unwrap();

        // Exhausting one arena leaves the other untouched.
        assert!(first.is_full());
        assert!(second.insert(2).is_ok());
    }

    #[test]
    fn clones_share_exhaustion() {
        let pool = PoolHandle::<u32, 1>::new();
        let clone = pool.clone();

        let _key = pool.insert(1).unwrap();

        assert_eq!(clone.insert(2), Err(Exhausted { capacity: 1 }));
    }

    #[test]
    fn rebind_has_same_capacity_and_fresh_storage() {
        let items = PoolHandle::<u32, 3>::new();
        let _key = items.insert(1).unwrap();

        let nodes = items.rebind::<(u32, u32)>();

        assert_eq!(nodes.capacity(), 3);
        assert!(nodes.is_empty());
    }

    #[test]
    fn pool_mut_reaches_the_claim_surface() {
        let pool = PoolHandle::<u32, 2>::new();

        let key = {
            let mut arena = pool.pool_mut();
            let inserter = arena.claim(1).unwrap().unwrap();
            inserter.insert(42)
        };

        assert_eq!(*pool.get(key), 42);
    }

    #[test]
    fn debug_does_not_require_item_debug() {
        struct Opaque;

        let pool = PoolHandle::<Opaque, 2>::new();
        let rendered = format!("{pool:?}");

        assert!(rendered.contains("PoolHandle"));
        assert!(rendered.contains("capacity"));
    }
}
