use crate::error::Error;
use crate::resize::{self, MIN_CAPACITY};
use crate::shuffle::{IntoIter, Iter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::fmt;
use std::iter::FromIterator;
use tracing::trace;

/// A queue that hands its items back in uniformly random order.
///
/// Items live in a dense buffer whose capacity doubles when full and
/// halves when one-quarter full (see the [`resize`] module).
/// `dequeue` picks a random occupied slot, moves the last occupied
/// item into it, and releases the last slot. Insertion order among
/// the remaining items is therefore not preserved, and no order is
/// promised after any `dequeue`.
///
/// Randomness comes from the generator `R`, which defaults to an
/// entropy-seeded [`StdRng`]. Supply a seeded generator through
/// [`with_seed`] or [`with_rng`] for reproducible runs.
///
/// The generator is kept in a `RefCell` so that `sample` and `iter`
/// can draw from it through a shared reference. The queue is meant
/// for single-threaded use.
///
/// [`resize`]: resize/index.html
/// [`StdRng`]: https://docs.rs/rand/0.7/rand/rngs/struct.StdRng.html
/// [`with_seed`]: #method.with_seed
/// [`with_rng`]: #method.with_rng
pub struct RandomizedQueue<T, R = StdRng> {
    // Slots [0, len) hold items, slots [len, capacity) are None.
    items: Box<[Option<T>]>,
    len: usize,
    rng: RefCell<R>,
}

impl<T> RandomizedQueue<T, StdRng> {
    /// Creates an empty queue driven by a generator seeded from the
    /// operating system.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::RandomizedQueue;
    ///
    /// let q: RandomizedQueue<u32> = RandomizedQueue::new();
    /// assert!(q.is_empty());
    /// assert_eq!(2, q.capacity());
    /// ```
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates an empty queue whose random choices are fully
    /// determined by `seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::RandomizedQueue;
    ///
    /// let mut a = RandomizedQueue::with_seed(7);
    /// let mut b = RandomizedQueue::with_seed(7);
    /// a.extend(0..10);
    /// b.extend(0..10);
    ///
    /// assert_eq!(a.dequeue(), b.dequeue());
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<T> Default for RandomizedQueue<T, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R: Rng> RandomizedQueue<T, R> {
    /// Creates an empty queue that draws from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self::with_capacity_and_rng(MIN_CAPACITY, rng)
    }

    /// Creates an empty queue with room for at least `capacity` items
    /// before its first resize. The capacity is rounded up to a power
    /// of two.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::RandomizedQueue;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let q: RandomizedQueue<u8> =
    ///     RandomizedQueue::with_capacity_and_rng(5, StdRng::seed_from_u64(1));
    /// assert_eq!(8, q.capacity());
    /// ```
    pub fn with_capacity_and_rng(capacity: usize, rng: R) -> Self {
        RandomizedQueue {
            items: empty_buffer(resize::initial_capacity(capacity)),
            len: 0,
            rng: RefCell::new(rng),
        }
    }

    /// The number of items in the queue.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the queue holds no items.
    pub fn is_empty(&self) -> bool {
        0 == self.len
    }

    /// The number of slots in the backing buffer. Always a power of
    /// two and never below 2.
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Add `item` to the queue, doubling the buffer first if it is
    /// full.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::RandomizedQueue;
    ///
    /// let mut q = RandomizedQueue::with_seed(0);
    /// q.enqueue("a");
    /// q.enqueue("b");
    /// assert_eq!(2, q.capacity());
    ///
    /// q.enqueue("c");
    /// assert_eq!(3, q.len());
    /// assert_eq!(4, q.capacity());
    /// ```
    pub fn enqueue(&mut self, item: T) {
        if let Some(capacity) = resize::grow_to(self.len, self.capacity()) {
            self.resize(capacity);
        }

        debug_assert!(self.items[self.len].is_none());
        self.items[self.len] = Some(item);
        self.len += 1;

        debug_assert!(self.check());
    }

    /// Remove and return an item chosen uniformly at random. Every
    /// item in the queue is equally likely to be picked, regardless
    /// of when it was added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue holds no items.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::{Error, RandomizedQueue};
    ///
    /// let mut q = RandomizedQueue::with_seed(3);
    /// q.extend(vec!["a", "b", "c", "d"]);
    ///
    /// let mut out: Vec<&str> = (0..4).map(|_| q.dequeue().unwrap()).collect();
    /// out.sort();
    /// assert_eq!(vec!["a", "b", "c", "d"], out);
    ///
    /// assert!(q.is_empty());
    /// assert_eq!(Err(Error::Empty), q.dequeue());
    /// ```
    pub fn dequeue(&mut self) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        let last = self.len - 1;
        let ix = self.rng.get_mut().gen_range(0, self.len);

        // Keep [0, len) dense by moving the last item into the hole,
        // then release the vacated slot.
        self.items.swap(ix, last);
        let item = self.items[last]
            .take()
            .expect("occupied slot is expected to hold an item");
        self.len = last;

        if let Some(capacity) = resize::shrink_to(self.len, self.capacity()) {
            self.resize(capacity);
        }

        debug_assert!(self.check());
        Ok(item)
    }

    /// Return, without removing, an item chosen uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue holds no items.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::RandomizedQueue;
    ///
    /// let mut q = RandomizedQueue::with_seed(11);
    /// q.extend(1..=3);
    ///
    /// let s = *q.sample().unwrap();
    /// assert!((1..=3).contains(&s));
    /// assert_eq!(3, q.len());
    /// ```
    pub fn sample(&self) -> Result<&T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        let ix = self.rng.borrow_mut().gen_range(0, self.len);
        Ok(self.items[ix]
            .as_ref()
            .expect("occupied slot is expected to hold an item"))
    }

    /// Create an iterator over a snapshot of the queue's items in a
    /// uniformly random order. Each call shuffles independently, so
    /// several iterators over the same queue produce independent
    /// permutations.
    ///
    /// # Examples
    ///
    /// ```
    /// use queuekit::RandomizedQueue;
    ///
    /// let mut q = RandomizedQueue::with_seed(5);
    /// q.extend(0..8u8);
    ///
    /// let mut seen: Vec<u8> = q.iter().copied().collect();
    /// seen.sort();
    /// assert_eq!((0..8).collect::<Vec<u8>>(), seen);
    /// assert_eq!(8, q.len());
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let mut rng = self.rng.borrow_mut();
        self.iter_with(&mut *rng)
    }

    /// Like [`iter`], but shuffles with a caller supplied generator.
    ///
    /// [`iter`]: #method.iter
    pub fn iter_with<G: Rng + ?Sized>(&self, rng: &mut G) -> Iter<'_, T> {
        Iter::new(self.occupied().collect(), rng)
    }

    /// Drop every item and return the buffer to its minimum capacity.
    pub fn clear(&mut self) {
        self.items = empty_buffer(MIN_CAPACITY);
        self.len = 0;
    }

    fn occupied(&self) -> impl Iterator<Item = &T> {
        self.items[..self.len].iter().filter_map(Option::as_ref)
    }

    fn resize(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        trace!(
            from = self.capacity(),
            to = capacity,
            len = self.len,
            "resizing randomized queue buffer"
        );

        let mut items = empty_buffer(capacity);
        for (dst, src) in items.iter_mut().zip(self.items[..self.len].iter_mut()) {
            *dst = src.take();
        }
        self.items = items;
    }

    fn check(&self) -> bool {
        let capacity = self.capacity();
        capacity.is_power_of_two()
            && capacity >= MIN_CAPACITY
            && self.len <= capacity
            && self.items[..self.len].iter().all(Option::is_some)
            && self.items[self.len..].iter().all(Option::is_none)
    }
}

fn empty_buffer<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

impl<T, R> fmt::Debug for RandomizedQueue<T, R> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("RandomizedQueue")
            .field("len", &self.len)
            .field("capacity", &self.items.len())
            .finish()
    }
}

impl<T, R: Rng> Extend<T> for RandomizedQueue<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for i in iter {
            self.enqueue(i);
        }
    }
}

impl<T> FromIterator<T> for RandomizedQueue<T, StdRng> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut q = Self::new();
        q.extend(iter);
        q
    }
}

impl<T, R: Rng> IntoIterator for RandomizedQueue<T, R> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consume the queue, yielding every item in a uniformly random
    /// order.
    fn into_iter(self) -> IntoIter<T> {
        let RandomizedQueue { items, len, rng } = self;
        let items = items
            .into_vec()
            .into_iter()
            .take(len)
            .flatten()
            .collect();
        IntoIter::new(items, &mut rng.into_inner())
    }
}

impl<'l, T, R: Rng> IntoIterator for &'l RandomizedQueue<T, R> {
    type Item = &'l T;
    type IntoIter = Iter<'l, T>;

    fn into_iter(self) -> Iter<'l, T> {
        self.iter()
    }
}
