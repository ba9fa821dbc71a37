use std::cell::Ref;

use bounded_pool::{Exhausted, PoolHandle, SlotKey};

/// One element of a [`PooledList`], stored in the list's node arena.
///
/// The type is public so callers can name the node arena
/// (`PoolHandle<ListNode<T>, CAPACITY>`) when sharing one arena between
/// lists; its contents are an implementation detail.
#[derive(Debug)]
pub struct ListNode<T> {
    value: T,
    next: Option<SlotKey>,
}

/// A singly-linked list whose nodes live in a fixed-capacity pool.
///
/// Every pushed element claims exactly one slot from the node arena and
/// every popped element releases exactly one, so the list can never hold
/// more than `CAPACITY` elements. Pushing into a full list fails with
/// [`Exhausted`] instead of allocating.
///
/// Elements are linked by [`SlotKey`]s rather than references or pointers,
/// which is what lets them live in the arena in the first place.
///
/// # Example
///
/// ```rust
/// use pooled_collections::PooledList;
///
/// let mut list = PooledList::<u32, 3>::new();
///
/// list.push_back(1).unwrap();
/// list.push_back(2).unwrap();
/// list.push_back(3).unwrap();
///
/// // The backing pool is full now.
/// assert!(list.push_back(4).is_err());
///
/// let observed: Vec<u32> = list.iter().map(|value| *value).collect();
/// assert_eq!(observed, [1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct PooledList<T, const CAPACITY: usize> {
    nodes: PoolHandle<ListNode<T>, CAPACITY>,
    head: Option<SlotKey>,
    tail: Option<SlotKey>,
    len: usize,
}

impl<T, const CAPACITY: usize> PooledList<T, CAPACITY> {
    /// Slots the list claims beyond one per element: none. The list keeps
    /// no sentinel or header nodes in the arena.
    pub const NODE_OVERHEAD: usize = 0;

    /// The number of elements a list can hold at `CAPACITY`, after the
    /// published [`NODE_OVERHEAD`][Self::NODE_OVERHEAD].
    #[must_use]
    pub const fn entry_capacity() -> usize {
        CAPACITY.saturating_sub(Self::NODE_OVERHEAD)
    }

    /// Creates an empty list with a fresh node arena of its own.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_collections::PooledList;
    ///
    /// let list = PooledList::<String, 8>::new();
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_pool(PoolHandle::new())
    }

    /// Creates an empty list drawing nodes from the given arena.
    ///
    /// Handing two lists clones of one handle makes them share a slot
    /// budget; handing each its own handle keeps them independent. The
    /// arena may also be derived from an element-typed pool via
    /// [`rebind()`][1].
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::PoolHandle;
    /// use pooled_collections::{ListNode, PooledList};
    ///
    /// let nodes = PoolHandle::<ListNode<u32>, 4>::new();
    ///
    /// let mut first = PooledList::with_pool(nodes.clone());
    /// let mut second = PooledList::with_pool(nodes);
    ///
    /// // Four slots between the two lists.
    /// first.push_back(1).unwrap();
    /// first.push_back(2).unwrap();
    /// second.push_back(3).unwrap();
    /// second.push_back(4).unwrap();
    ///
    /// assert!(first.push_back(5).is_err());
    /// assert!(second.push_back(5).is_err());
    /// ```
    ///
    /// [1]: PoolHandle::rebind
    #[must_use]
    pub fn with_pool(nodes: PoolHandle<ListNode<T>, CAPACITY>) -> Self {
        Self {
            nodes,
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// The number of elements in the list.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Trivial accessor, mutation tells us nothing.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an element, claiming one slot from the node arena.
    ///
    /// # Errors
    ///
    /// [`Exhausted`] when the node arena has no slot left. The list is
    /// unchanged in that case.
    pub fn push_back(&mut self, value: T) -> Result<(), Exhausted> {
        let key = self.nodes.insert(ListNode { value, next: None })?;

        match self.tail {
            Some(tail_key) => self.nodes.pool_mut().get_mut(tail_key).next = Some(key),
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.len = self
            .len
            .checked_add(1)
            .expect("list length is bounded by the pool capacity");

        Ok(())
    }

    /// Removes and returns the first element, releasing its slot for reuse.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_collections::PooledList;
    ///
    /// let mut list = PooledList::<u32, 2>::new();
    /// list.push_back(1).unwrap();
    /// list.push_back(2).unwrap();
    ///
    /// assert_eq!(list.pop_front(), Some(1));
    ///
    /// // The released slot immediately serves the next push.
    /// list.push_back(3).unwrap();
    /// let observed: Vec<u32> = list.iter().map(|value| *value).collect();
    /// assert_eq!(observed, [2, 3]);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let head_key = self.head?;
        let node = self.nodes.remove(head_key);

        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }

        self.len = self
            .len
            .checked_sub(1)
            .expect("a non-empty list has a non-zero length");

        Some(node.value)
    }

    /// A borrowed reference to the first element, if any.
    #[must_use]
    pub fn front(&self) -> Option<Ref<'_, T>> {
        let key = self.head?;
        Some(Ref::map(self.nodes.get(key), |node| &node.value))
    }

    /// Iterates the elements in insertion order.
    ///
    /// Items are [`Ref`]-borrowed from the node arena; mutating the list
    /// (or any other consumer of the same arena) while an item is held
    /// panics, per the arena's single-threaded borrow discipline.
    #[must_use]
    pub fn iter(&self) -> ListIter<'_, T, CAPACITY> {
        ListIter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    /// Removes every element, releasing all claimed slots.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T, const CAPACITY: usize> Default for PooledList<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAPACITY: usize> Drop for PooledList<T, CAPACITY> {
    /// Releases every node back to the arena, which may be shared with
    /// other consumers that outlive this list.
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, T, const CAPACITY: usize> IntoIterator for &'a PooledList<T, CAPACITY> {
    type Item = Ref<'a, T>;
    type IntoIter = ListIter<'a, T, CAPACITY>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`PooledList`], in insertion order.
#[derive(Debug)]
pub struct ListIter<'a, T, const CAPACITY: usize> {
    nodes: &'a PoolHandle<ListNode<T>, CAPACITY>,
    cursor: Option<SlotKey>,
}

impl<'a, T, const CAPACITY: usize> Iterator for ListIter<'a, T, CAPACITY> {
    type Item = Ref<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor.take()?;
        let node = self.nodes.get(key);

        self.cursor = node.next;

        Some(Ref::map(node, |node| &node.value))
    }
}
