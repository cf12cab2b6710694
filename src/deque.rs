use crate::error::Error;
use crate::iterators::{Drain, IntoIter, Iter};
use crate::slot::{Slot, Used, NIL};
use std::fmt;
use std::iter::FromIterator;
use tracing::trace;

/// A double-ended queue with constant time insertion and removal at
/// both ends.
///
/// Nodes are kept in an arena and linked by index in both
/// directions, so the node before the last one is always one hop
/// away and `remove_last` never has to walk the chain. Removed nodes
/// are put on a free list and reused by later insertions before the
/// arena grows.
pub struct Deque<T> {
    // Index of the first element on the free list. NIL when the
    // free-list is empty.
    free_list: usize,
    // The index of the first node. NIL when the deque is empty.
    pub(crate) front: usize,
    // The index of the last node. NIL when the deque is empty.
    pub(crate) back: usize,
    // The number of slots currently used by entries.
    len_used: usize,
    // The number of slots currently on the free list.
    len_free: usize,
    // The arena backing the node chain.
    pub(crate) slots: Vec<Slot<T>>,
}

impl<T> fmt::Debug for Deque<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deque<T> {
    /// Creates an empty `Deque`. No allocations are performed until
    /// values are added.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let deque: Deque<u32> = Deque::new();
    /// assert!(deque.is_empty());
    /// ```
    pub fn new() -> Deque<T> {
        Deque {
            free_list: NIL,
            front: NIL,
            back: NIL,
            len_used: 0,
            len_free: 0,
            slots: Vec::new(),
        }
    }

    /// Create a new `Deque` instance with a freelist at least
    /// `capacity` elements deep.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let deque: Deque<u32> = Deque::with_capacity(16);
    /// assert_eq!(16, deque.len_freelist());
    /// ```
    pub fn with_capacity(capacity: usize) -> Deque<T> {
        let mut vec = Vec::with_capacity(capacity);

        let mut next = NIL;
        for i in 0..capacity {
            vec.push(Slot::new_free(next));
            next = i;
        }

        Deque {
            free_list: next,
            front: NIL,
            back: NIL,
            len_used: 0,
            len_free: capacity,
            slots: vec,
        }
    }

    /// Reserves capacity for at least `additional` more elements to
    /// be inserted into the given `Deque`. Note: this only expands
    /// the size of the underlying arena. It does not add the reserved
    /// elements to the free list.
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional)
    }

    /// Returns how many items could be held without growing the
    /// arena. Note: this is not necessarily `len() + len_freelist()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let d: Deque<u8> = Deque::with_capacity(16);
    /// assert_eq!(16, d.capacity());
    /// ```
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// The number of items in the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let mut d: Deque<u8> = Deque::new();
    ///
    /// d.add_first(1);
    /// d.add_last(2);
    /// assert_eq!(2, d.len());
    ///
    /// d.remove_first().unwrap();
    /// assert_eq!(1, d.len());
    /// ```
    pub fn len(&self) -> usize {
        self.len_used
    }

    /// True when the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let mut d: Deque<u8> = Deque::new();
    ///
    /// assert!(d.is_empty());
    ///
    /// d.add_first(1);
    /// assert!(!d.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        0 == self.len_used
    }

    /// The number of entries on the deque's freelist.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let mut d: Deque<u8> = Deque::new();
    ///
    /// d.add_first(1);
    /// assert_eq!(0, d.len_freelist());
    ///
    /// d.remove_first().unwrap();
    /// assert_eq!(1, d.len_freelist());
    ///
    /// d.add_last(2);
    /// assert_eq!(0, d.len_freelist());
    /// ```
    pub fn len_freelist(&self) -> usize {
        self.len_free
    }

    /// Insert `item` at the front of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let mut l = Deque::new();
    /// l.add_first(10);
    /// l.add_first(20);
    ///
    /// assert_eq!(Some(&20), l.peek_first());
    /// assert_eq!(Some(&10), l.peek_last());
    /// ```
    pub fn add_first(&mut self, item: T) {
        let new_ix = self.allocate(NIL, self.front, item);

        // The old first node now has a predecessor.
        if NIL != self.front {
            let front = self.front;
            self.node_mut(front).set_front(new_ix);
        }
        self.front = new_ix;

        // Going from empty to one item: the new node is also the last.
        if NIL == self.back {
            self.back = new_ix;
        }

        debug_assert!(self.check());
    }

    /// Insert `item` at the back of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let mut l = Deque::new();
    /// l.add_last(10);
    /// l.add_last(20);
    ///
    /// assert_eq!(Some(&10), l.peek_first());
    /// assert_eq!(Some(&20), l.peek_last());
    /// ```
    pub fn add_last(&mut self, item: T) {
        let new_ix = self.allocate(self.back, NIL, item);

        // The old last node becomes the second-to-last.
        if NIL != self.back {
            let back = self.back;
            self.node_mut(back).set_back(new_ix);
        }
        self.back = new_ix;

        if NIL == self.front {
            self.front = new_ix;
        }

        debug_assert!(self.check());
    }

    /// Remove the first item of the deque and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the deque holds no items. The deque
    /// is left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::{Deque, Error};
    ///
    /// let mut l = Deque::new();
    /// l.add_last(10);
    /// l.add_last(20);
    ///
    /// assert_eq!(Ok(10), l.remove_first());
    /// assert_eq!(Ok(20), l.remove_first());
    /// assert_eq!(Err(Error::Empty), l.remove_first());
    /// ```
    pub fn remove_first(&mut self) -> Result<T, Error> {
        if NIL == self.front {
            return Err(Error::Empty);
        }
        Ok(self.remove_unchecked(self.front))
    }

    /// Remove the last item of the deque and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the deque holds no items.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::{Deque, Error};
    ///
    /// let mut l = Deque::new();
    /// l.add_first(10);
    /// l.add_first(20);
    ///
    /// assert_eq!(Ok(10), l.remove_last());
    /// assert_eq!(Ok(20), l.remove_last());
    /// assert_eq!(Err(Error::Empty), l.remove_last());
    /// ```
    pub fn remove_last(&mut self) -> Result<T, Error> {
        if NIL == self.back {
            return Err(Error::Empty);
        }
        Ok(self.remove_unchecked(self.back))
    }

    /// Get the first item of the deque. If the deque is empty, `None`
    /// is returned.
    pub fn peek_first(&self) -> Option<&T> {
        if NIL != self.front {
            Some(self.node(self.front).item())
        } else {
            None
        }
    }

    /// Get the first item of the deque as a mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let mut l = Deque::new();
    /// l.add_last(10);
    ///
    /// if let Some(i) = l.peek_first_mut() {
    ///     *i += 10;
    /// }
    ///
    /// assert_eq!(Some(&20), l.peek_first());
    /// ```
    pub fn peek_first_mut(&mut self) -> Option<&mut T> {
        if NIL != self.front {
            let front = self.front;
            Some(self.node_mut(front).item_mut())
        } else {
            None
        }
    }

    /// Get the last item of the deque. If the deque is empty, `None`
    /// is returned.
    pub fn peek_last(&self) -> Option<&T> {
        if NIL != self.back {
            Some(self.node(self.back).item())
        } else {
            None
        }
    }

    /// Get the last item of the deque as a mutable reference.
    pub fn peek_last_mut(&mut self) -> Option<&mut T> {
        if NIL != self.back {
            let back = self.back;
            Some(self.node_mut(back).item_mut())
        } else {
            None
        }
    }

    /// Create an iterator over the deque from the first item to the
    /// last. Use `.rev()` to walk from the last item to the first.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let mut d: Deque<u8> = Deque::new();
    ///
    /// d.add_last(2);
    /// d.add_last(3);
    /// d.add_first(1);
    ///
    /// let v: Vec<&u8> = d.iter().collect();
    /// assert_eq!(vec![&1, &2, &3], v);
    ///
    /// let v: Vec<&u8> = d.iter().rev().collect();
    /// assert_eq!(vec![&3, &2, &1], v);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.front, self.back, self.len_used)
    }

    /// A draining iterator starting from the first item. All drained
    /// slots are moved onto the free list. Items not consumed before
    /// the iterator is dropped are removed as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::Deque;
    ///
    /// let mut d: Deque<u8> = (1..=3).collect();
    ///
    /// let v: Vec<u8> = d.drain().collect();
    /// assert_eq!(vec![1, 2, 3], v);
    /// assert!(d.is_empty());
    /// assert_eq!(3, d.len_freelist());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }

    /// Remove every item. The arena keeps its allocation.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list = NIL;
        self.front = NIL;
        self.back = NIL;
        self.len_used = 0;
        self.len_free = 0;

        debug_assert!(self.check());
    }

    fn node(&self, ix: usize) -> &Used<T> {
        self.slots[ix]
            .get_used()
            .expect("linked index is expected to be used")
    }

    fn node_mut(&mut self, ix: usize) -> &mut Used<T> {
        self.slots[ix]
            .get_used_mut()
            .expect("linked index is expected to be used")
    }

    fn remove_unchecked(&mut self, ix: usize) -> T {
        let (front, item, back) = self
            .free(ix)
            .into_used()
            .expect("removed index is expected to be used")
            .take();

        if self.front == ix {
            debug_assert_eq!(NIL, front);
            self.front = back;
        } else {
            debug_assert_ne!(NIL, front);
            self.node_mut(front).set_back(back);
        }

        // When the last node goes, its predecessor (the old
        // second-to-last) becomes the last node.
        if self.back == ix {
            debug_assert_eq!(NIL, back);
            self.back = front;
        } else {
            debug_assert_ne!(NIL, back);
            self.node_mut(back).set_front(front);
        }

        debug_assert!(self.check());
        item
    }

    fn allocate(&mut self, front: usize, back: usize, item: T) -> usize {
        self.len_used += 1;

        let s = Slot::new_used(front, back, item);

        if NIL == self.free_list {
            if self.slots.len() == self.slots.capacity() {
                trace!(
                    len = self.slots.len(),
                    capacity = self.slots.capacity(),
                    "growing deque arena"
                );
            }
            self.slots.push(s);
            self.slots.len() - 1
        } else {
            let ix = self.free_list;
            self.free_list = self.slots[ix]
                .get_free()
                .expect("free list is expected to hold free slots")
                .next();
            self.slots[ix] = s;
            self.len_free -= 1;
            ix
        }
    }

    fn free(&mut self, ix: usize) -> Slot<T> {
        debug_assert!(self.slots[ix].get_used().is_some());

        self.len_used -= 1;

        let mut v = Slot::new_free(self.free_list);
        std::mem::swap(&mut v, &mut self.slots[ix]);
        self.free_list = ix;
        self.len_free += 1;
        v
    }

    // Checks that the end links match the shape dictated by the
    // number of items.
    fn check(&self) -> bool {
        if self.len_used + self.len_free != self.slots.len() {
            return false;
        }

        let used = |ix: usize| self.slots.get(ix).and_then(|s| s.get_used());

        match self.len_used {
            0 => NIL == self.front && NIL == self.back,
            1 => {
                self.front == self.back
                    && used(self.front).map_or(false, |n| NIL == n.front() && NIL == n.back())
            }
            _ => {
                if self.front == self.back {
                    return false;
                }
                let first = match used(self.front) {
                    Some(n) => n,
                    None => return false,
                };
                let last = match used(self.back) {
                    Some(n) => n,
                    None => return false,
                };
                if NIL != first.front() || NIL == first.back() || NIL != last.back() {
                    return false;
                }
                // The second-to-last node must lead back to the last.
                used(last.front()).map_or(false, |n| n.back() == self.back)
            }
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut l = Self::new();
        l.extend(iter);
        l
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for i in iter {
            self.add_last(i);
        }
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'l, T> IntoIterator for &'l Deque<T> {
    type Item = &'l T;
    type IntoIter = Iter<'l, T>;

    fn into_iter(self) -> Iter<'l, T> {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_peek_works() {
        let mut l = Deque::new();
        l.add_first(10u8);

        assert_eq!(Some(&10), l.peek_first());
        assert_eq!(Some(&10), l.peek_last());
        assert!(l.check());

        let mut l = Deque::new();
        l.add_last(11u8);

        assert_eq!(Some(&11), l.peek_first());
        assert_eq!(Some(&11), l.peek_last());
        assert!(l.check());
    }

    #[test]
    fn add_first_twice_then_remove_last_returns_older() {
        let mut l = Deque::new();
        l.add_first('a');
        l.add_first('b');

        assert_eq!(Ok('a'), l.remove_last());
        assert_eq!(Ok('b'), l.remove_last());
        assert_eq!(Err(Error::Empty), l.remove_last());
    }

    #[test]
    fn add_last_twice_then_remove_first_returns_older() {
        let mut l = Deque::new();
        l.add_last('a');
        l.add_last('b');

        assert_eq!(Ok('a'), l.remove_first());
        assert_eq!(Ok('b'), l.remove_first());
        assert_eq!(Err(Error::Empty), l.remove_first());
    }

    #[test]
    fn remove_last_walks_back_through_second_to_last() {
        let mut l: Deque<u8> = (1..=5).collect();

        for expected in (1..=5).rev() {
            assert_eq!(Ok(expected), l.remove_last());
            assert!(l.check());
        }
        assert!(l.is_empty());
    }

    #[test]
    fn mixed_ends_keep_second_to_last_consistent() {
        let mut l = Deque::new();
        l.add_first(2u8);
        l.add_last(3);
        l.add_first(1);
        l.add_last(4);

        assert_eq!(Ok(4), l.remove_last());
        assert_eq!(Ok(1), l.remove_first());
        assert_eq!(Ok(3), l.remove_last());
        l.add_last(5);
        assert_eq!(vec![&2, &5], l.iter().collect::<Vec<&u8>>());
        assert_eq!(Ok(5), l.remove_last());
        assert_eq!(Ok(2), l.remove_last());
        assert!(l.is_empty());
    }

    #[test]
    fn counts_work_as_expected() {
        let mut l = Deque::new();
        l.add_first(10u8);
        l.add_first(11u8);
        assert_eq!(2, l.len());
        assert_eq!(0, l.len_freelist());

        l.remove_last().unwrap();
        assert_eq!(1, l.len());
        assert_eq!(1, l.len_freelist());

        l.remove_last().unwrap();
        assert_eq!(0, l.len());
        assert_eq!(2, l.len_freelist());

        l.add_first(12u8);
        assert_eq!(1, l.len());
        assert_eq!(1, l.len_freelist());

        l.add_first(13u8);
        assert_eq!(2, l.len());
        assert_eq!(0, l.len_freelist());
    }

    #[test]
    fn failed_removal_leaves_state_untouched() {
        let mut l: Deque<u8> = Deque::with_capacity(2);

        assert_eq!(Err(Error::Empty), l.remove_first());
        assert_eq!(Err(Error::Empty), l.remove_last());

        assert_eq!(0, l.len());
        assert_eq!(2, l.len_freelist());
        assert!(l.check());
    }

    #[test]
    fn can_be_created_from_iterator() {
        let mut l = Deque::from_iter(0..5);

        for expected in 0..5 {
            assert_eq!(Ok(expected), l.remove_first());
        }
        assert!(l.is_empty());
    }

    #[test]
    fn with_capacity_preallocates_free_list() {
        let mut l = Deque::with_capacity(3);
        assert_eq!(3, l.len_freelist());
        assert_eq!(0, l.len());

        l.add_first(());
        assert_eq!(2, l.len_freelist());
        assert_eq!(1, l.len());

        // The underlying capacity should not have changed.
        assert_eq!(3, l.capacity());

        l.add_first(());
        l.add_first(());
        l.add_first(());

        assert_eq!(0, l.len_freelist());
        assert_eq!(4, l.len());

        // The underlying capacity should have expanded to handle 4
        // items.
        assert!(3 < l.capacity());
    }

    #[test]
    fn peek_mut_allows_ends_to_change_value() {
        let mut l = Deque::new();
        l.add_first(10u8);
        l.add_last(20u8);

        if let Some(r) = l.peek_first_mut() {
            *r = 100;
        }
        if let Some(r) = l.peek_last_mut() {
            *r = 200;
        }

        assert_eq!(Some(&100), l.peek_first());
        assert_eq!(Some(&200), l.peek_last());
    }

    #[test]
    fn empty_list() {
        let mut l: Deque<u8> = Deque::new();
        l.add_first(1);
        l.remove_first().unwrap();

        assert!(l.is_empty());

        assert_eq!(None, l.peek_first());
        assert_eq!(None, l.peek_first_mut());

        assert_eq!(None, l.peek_last());
        assert_eq!(None, l.peek_last_mut());

        assert_eq!(Err(Error::Empty), l.remove_first());
        assert_eq!(Err(Error::Empty), l.remove_last());
    }

    #[test]
    fn reserve_increases_capacity() {
        let mut l: Deque<u8> = Deque::new();
        l.add_first(1);

        let cap = l.capacity();
        let res = cap + 16;

        l.reserve(res);

        assert!(l.capacity() >= res);
    }

    #[test]
    fn clear_resets_the_chain() {
        let mut l: Deque<u8> = (0..8).collect();
        l.remove_first().unwrap();

        l.clear();

        assert!(l.is_empty());
        assert_eq!(0, l.len_freelist());
        assert_eq!(None, l.peek_first());

        l.add_last(9);
        assert_eq!(Some(&9), l.peek_first());
        assert_eq!(Some(&9), l.peek_last());
    }

    #[test]
    fn debug_string() {
        let mut l: Deque<u8> = Deque::new();

        l.add_last(2);
        l.add_last(3);
        l.add_first(1);

        assert_eq!("[1, 2, 3]", format!("{:?}", l));
    }

    #[test]
    fn clone_and_eq_compare_items() {
        let mut a: Deque<u8> = (1..=3).collect();
        let b = a.clone();
        assert_eq!(a, b);

        // Same items, different arena layout.
        let mut c = Deque::new();
        c.add_first(9);
        c.remove_first().unwrap();
        c.add_last(2);
        c.add_last(3);
        c.add_first(1);
        assert_eq!(a, c);

        a.remove_last().unwrap();
        assert_ne!(a, b);
    }
}
