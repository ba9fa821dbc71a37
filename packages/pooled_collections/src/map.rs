use std::cell::Ref;
use std::cmp::Ordering;
use std::mem;

use bounded_pool::{Exhausted, PoolHandle, SlotKey};

/// One entry of a [`PooledMap`], stored in the map's node arena.
///
/// The type is public so callers can name the node arena
/// (`PoolHandle<MapNode<K, V>, CAPACITY>`) when sharing one arena between
/// maps; its contents are an implementation detail. The sentinel head node
/// holds no entry, which is why the payload is optional.
#[derive(Debug)]
pub struct MapNode<K, V> {
    entry: Option<(K, V)>,
    next: Option<SlotKey>,
}

/// A minimal ordered key-value container whose entries live in a
/// fixed-capacity pool.
///
/// Entries form a sorted singly-linked chain behind a sentinel head node
/// that is claimed from the arena at construction. That sentinel is the
/// map's entire bookkeeping overhead, and it is published as
/// [`NODE_OVERHEAD`][1] so callers can size the arena without guessing:
/// a map that should hold `n` entries needs
/// `CAPACITY = n + PooledMap::NODE_OVERHEAD`.
///
/// Lookup and insertion walk the chain, so this container is for exercising
/// pooled storage with small, bounded entry counts, not for large maps.
///
/// # Example
///
/// ```rust
/// use pooled_collections::PooledMap;
///
/// // Room for 2 entries plus the published overhead.
/// const CAPACITY: usize = 2 + PooledMap::<u32, &str, 0>::NODE_OVERHEAD;
///
/// let mut map = PooledMap::<u32, &str, CAPACITY>::new().unwrap();
///
/// map.insert(2, "two").unwrap();
/// map.insert(1, "one").unwrap();
///
/// // The backing pool is full; a third distinct key is refused.
/// assert!(map.insert(3, "three").is_err());
///
/// // Replacing an existing key claims nothing and still succeeds.
/// assert_eq!(map.insert(1, "uno").unwrap(), Some("one"));
///
/// let keys: Vec<u32> = map.iter().map(|entry| entry.0).collect();
/// assert_eq!(keys, [1, 2]);
/// ```
///
/// [1]: Self::NODE_OVERHEAD
#[derive(Debug)]
pub struct PooledMap<K, V, const CAPACITY: usize> {
    nodes: PoolHandle<MapNode<K, V>, CAPACITY>,
    sentinel: SlotKey,
    len: usize,
}

const SENTINEL_HOLDS_NO_ENTRY: &str = "only the sentinel holds no entry and it is never exposed";

impl<K, V, const CAPACITY: usize> PooledMap<K, V, CAPACITY>
where
    K: Ord,
{
    /// Slots the map claims beyond one per entry: the sentinel head node.
    pub const NODE_OVERHEAD: usize = 1;

    /// The number of entries a map can hold at `CAPACITY`, after the
    /// published [`NODE_OVERHEAD`][Self::NODE_OVERHEAD].
    #[must_use]
    pub const fn entry_capacity() -> usize {
        CAPACITY.saturating_sub(Self::NODE_OVERHEAD)
    }

    /// Creates an empty map with a fresh node arena of its own.
    ///
    /// # Errors
    ///
    /// [`Exhausted`] when the arena cannot even hold the sentinel, which
    /// only happens at `CAPACITY == 0`.
    pub fn new() -> Result<Self, Exhausted> {
        Self::with_pool(PoolHandle::new())
    }

    /// Creates an empty map drawing nodes from the given arena.
    ///
    /// The sentinel head node is claimed from the arena immediately.
    ///
    /// # Errors
    ///
    /// [`Exhausted`] when the arena has no slot left for the sentinel.
    pub fn with_pool(nodes: PoolHandle<MapNode<K, V>, CAPACITY>) -> Result<Self, Exhausted> {
        let sentinel = nodes.insert(MapNode {
            entry: None,
            next: None,
        })?;

        Ok(Self {
            nodes,
            sentinel,
            len: 0,
        })
    }

    /// The number of entries in the map.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Trivial accessor, mutation tells us nothing.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a key-value pair, keeping entries sorted by key.
    ///
    /// A new key claims exactly one slot from the node arena. Inserting over
    /// an existing key claims nothing: the value is replaced in place and
    /// the previous value is returned.
    ///
    /// # Errors
    ///
    /// [`Exhausted`] when the key is new and the node arena has no slot
    /// left. The map is unchanged in that case.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, Exhausted> {
        let mut pool = self.nodes.pool_mut();

        // Walk to the last node whose key sorts before the new key.
        let mut prev = self.sentinel;
        loop {
            let Some(next_key) = pool.get(prev).next else {
                break;
            };

            let ordering = {
                let node = pool.get(next_key);
                let (existing, _) = node.entry.as_ref().expect(SENTINEL_HOLDS_NO_ENTRY);
                existing.cmp(&key)
            };

            match ordering {
                Ordering::Less => prev = next_key,
                Ordering::Equal => {
                    let node = pool.get_mut(next_key);
                    let entry = node.entry.as_mut().expect(SENTINEL_HOLDS_NO_ENTRY);
                    let previous = mem::replace(&mut entry.1, value);
                    return Ok(Some(previous));
                }
                Ordering::Greater => break,
            }
        }

        // Splice a fresh node in after `prev`.
        let next = pool.get(prev).next;
        let new_key = pool.insert(MapNode {
            entry: Some((key, value)),
            next,
        })?;
        pool.get_mut(prev).next = Some(new_key);

        self.len = self
            .len
            .checked_add(1)
            .expect("map length is bounded by the pool capacity");

        Ok(None)
    }

    /// A borrowed reference to the value for the given key, if present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_collections::PooledMap;
    ///
    /// let mut map = PooledMap::<u32, String, 4>::new().unwrap();
    /// map.insert(1, "one".to_string()).unwrap();
    ///
    /// assert_eq!(map.get(&1).unwrap().as_str(), "one");
    /// assert!(map.get(&2).is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Ref<'_, V>> {
        let found = self.find(key)?;

        Some(Ref::map(self.nodes.get(found), |node| {
            &node.entry.as_ref().expect(SENTINEL_HOLDS_NO_ENTRY).1
        }))
    }

    /// Whether the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry for the given key, releasing its slot for reuse.
    ///
    /// Returns the removed value, or `None` when the key is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut pool = self.nodes.pool_mut();

        let mut prev = self.sentinel;
        loop {
            let next_key = pool.get(prev).next?;

            let ordering = {
                let node = pool.get(next_key);
                let (existing, _) = node.entry.as_ref().expect(SENTINEL_HOLDS_NO_ENTRY);
                existing.cmp(key)
            };

            match ordering {
                Ordering::Less => prev = next_key,
                Ordering::Equal => {
                    let node = pool.remove(next_key);
                    pool.get_mut(prev).next = node.next;

                    drop(pool);
                    self.len = self
                        .len
                        .checked_sub(1)
                        .expect("a present entry implies a non-zero length");

                    let (_, value) = node.entry.expect(SENTINEL_HOLDS_NO_ENTRY);
                    return Some(value);
                }
                Ordering::Greater => return None,
            }
        }
    }

    /// Iterates the entries in ascending key order.
    ///
    /// Items are [`Ref`]-borrowed `(key, value)` pairs; mutating the map
    /// while an item is held panics, per the arena's single-threaded borrow
    /// discipline.
    #[must_use]
    pub fn iter(&self) -> MapIter<'_, K, V, CAPACITY> {
        let cursor = self.nodes.get(self.sentinel).next;

        MapIter {
            nodes: &self.nodes,
            cursor,
        }
    }

    fn find(&self, key: &K) -> Option<SlotKey> {
        let pool = self.nodes.pool();

        let mut cursor = pool.get(self.sentinel).next;
        while let Some(node_key) = cursor {
            let node = pool.get(node_key);
            let (existing, _) = node.entry.as_ref().expect(SENTINEL_HOLDS_NO_ENTRY);

            match existing.cmp(key) {
                Ordering::Less => cursor = node.next,
                Ordering::Equal => return Some(node_key),
                Ordering::Greater => return None,
            }
        }

        None
    }
}

impl<K, V, const CAPACITY: usize> Drop for PooledMap<K, V, CAPACITY> {
    /// Releases the sentinel and every entry node back to the arena, which
    /// may be shared with other consumers that outlive this map.
    fn drop(&mut self) {
        let mut pool = self.nodes.pool_mut();

        let mut cursor = Some(self.sentinel);
        while let Some(key) = cursor {
            let node = pool.remove(key);
            cursor = node.next;
        }
    }
}

impl<'a, K, V, const CAPACITY: usize> IntoIterator for &'a PooledMap<K, V, CAPACITY>
where
    K: Ord,
{
    type Item = Ref<'a, (K, V)>;
    type IntoIter = MapIter<'a, K, V, CAPACITY>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`PooledMap`], in ascending key order.
#[derive(Debug)]
pub struct MapIter<'a, K, V, const CAPACITY: usize> {
    nodes: &'a PoolHandle<MapNode<K, V>, CAPACITY>,
    cursor: Option<SlotKey>,
}

impl<'a, K, V, const CAPACITY: usize> Iterator for MapIter<'a, K, V, CAPACITY> {
    type Item = Ref<'a, (K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor.take()?;
        let node = self.nodes.get(key);

        self.cursor = node.next;

        Some(Ref::map(node, |node| {
            node.entry.as_ref().expect(SENTINEL_HOLDS_NO_ENTRY)
        }))
    }
}

#[cfg(test)]
mod tests {
    use bounded_pool::PoolHandle;
    use static_assertions::assert_not_impl_any;

    use super::*;

    // The backing arena is single-threaded, and so is the map.
    assert_not_impl_any!(PooledMap<u32, u32, 4>: Send, Sync);

    #[test]
    fn entries_iterate_in_key_order() {
        let mut map = PooledMap::<u32, &str, 8>::new().unwrap();

        map.insert(3, "three").unwrap();
        map.insert(1, "one").unwrap();
        map.insert(2, "two").unwrap();

        let observed: Vec<(u32, &str)> = map.iter().map(|entry| (entry.0, entry.1)).collect();
        assert_eq!(observed, [(1, "one"), (2, "two"), (3, "three")]);
    }

    #[test]
    fn sentinel_counts_against_the_pool() {
        let nodes = PoolHandle::<MapNode<u32, u32>, 4>::new();
        let map = PooledMap::with_pool(nodes.clone()).unwrap();

        // The freshly built empty map already claimed its sentinel.
        assert_eq!(nodes.len(), 1);
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn capacity_is_entries_plus_published_overhead() {
        // Room for exactly 3 entries.
        const CAPACITY: usize = 3 + PooledMap::<u32, u32, 0>::NODE_OVERHEAD;

        let mut map = PooledMap::<u32, u32, CAPACITY>::new().unwrap();

        for key in 0..3 {
            assert!(map.insert(key, key * 10).is_ok());
        }

        let error = map.insert(3, 30).unwrap_err();
        assert_eq!(error.capacity, CAPACITY);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn replacing_a_key_claims_no_slot() {
        let mut map = PooledMap::<u32, &str, 2>::new().unwrap();

        // One entry fills the arena (1 sentinel + 1 entry).
        map.insert(1, "one").unwrap();

        // Replacement succeeds even though the arena is full.
        assert_eq!(map.insert(1, "uno").unwrap(), Some("one"));
        assert_eq!(*map.get(&1).unwrap(), "uno");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_releases_the_slot() {
        let mut map = PooledMap::<u32, &str, 2>::new().unwrap();

        map.insert(1, "one").unwrap();
        assert!(map.insert(2, "two").is_err());

        assert_eq!(map.remove(&1), Some("one"));
        assert_eq!(map.remove(&1), None);

        // The released slot serves the next distinct key.
        map.insert(2, "two").unwrap();
        assert_eq!(*map.get(&2).unwrap(), "two");
    }

    #[test]
    fn get_and_contains_agree() {
        let mut map = PooledMap::<u32, &str, 4>::new().unwrap();

        map.insert(5, "five").unwrap();

        assert!(map.contains_key(&5));
        assert!(!map.contains_key(&4));
        assert!(map.get(&4).is_none());
        assert_eq!(*map.get(&5).unwrap(), "five");
    }

    #[test]
    fn zero_capacity_map_cannot_be_built() {
        let result = PooledMap::<u32, u32, 0>::new();

        assert!(result.is_err());
    }

    #[test]
    fn drop_releases_sentinel_and_entries() {
        let nodes = PoolHandle::<MapNode<u32, u32>, 4>::new();

        {
            let mut map = PooledMap::with_pool(nodes.clone()).unwrap();
            map.insert(1, 10).unwrap();
            map.insert(2, 20).unwrap();
            assert_eq!(nodes.len(), 3);
        }

        assert!(nodes.is_empty());
    }

    #[test]
    fn removal_in_arbitrary_order_keeps_order_invariant() {
        let mut map = PooledMap::<u32, u32, 8>::new().unwrap();

        for key in [4, 1, 6, 3, 2] {
            map.insert(key, key).unwrap();
        }

        map.remove(&3);
        map.remove(&6);
        map.insert(5, 5).unwrap();

        let observed: Vec<u32> = map.iter().map(|entry| entry.0).collect();
        assert_eq!(observed, [1, 2, 4, 5]);
    }

    #[test]
    fn overhead_is_published_as_one() {
        assert_eq!(PooledMap::<u32, u32, 8>::NODE_OVERHEAD, 1);
        assert_eq!(PooledMap::<u32, u32, 8>::entry_capacity(), 7);
    }
}
