use crate::deque::Deque;
use crate::slot::NIL;
use std::iter::FusedIterator;

/// An iterator over the deque from the first item to the last. It is
/// constructed from the [`iter`] method on `Deque`.
///
/// [`iter`]: struct.Deque.html#method.iter
pub struct Iter<'l, T> {
    target: &'l Deque<T>,
    next_front: usize,
    next_back: usize,
    remaining: usize,
}

impl<'l, T> Iter<'l, T> {
    pub(crate) fn new(target: &'l Deque<T>, front: usize, back: usize, len: usize) -> Self {
        Self {
            target,
            next_front: front,
            next_back: back,
            remaining: len,
        }
    }
}

impl<'l, T> Iterator for Iter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        if 0 == self.remaining {
            return None;
        }
        debug_assert_ne!(NIL, self.next_front);
        let r = self.target.slots[self.next_front]
            .get_used()
            .expect("self.target.slots[self.next_front] is expected to be used");
        self.next_front = r.back();
        self.remaining -= 1;
        Some(r.item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'l, T> DoubleEndedIterator for Iter<'l, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if 0 == self.remaining {
            return None;
        }
        debug_assert_ne!(NIL, self.next_back);
        let r = self.target.slots[self.next_back]
            .get_used()
            .expect("self.target.slots[self.next_back] is expected to be used");
        self.next_back = r.front();
        self.remaining -= 1;
        Some(r.item())
    }
}

impl<'l, T> ExactSizeIterator for Iter<'l, T> {}

impl<'l, T> FusedIterator for Iter<'l, T> {}

/// An owning iterator over the deque from the first item to the
/// last. It is constructed by `Deque::into_iter`.
pub struct IntoIter<T> {
    target: Deque<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(target: Deque<T>) -> Self {
        Self { target }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.target.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.target.len(), Some(self.target.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.target.remove_last().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// A draining iterator over the deque. It is constructed from the
/// [`drain`] method on `Deque`.
///
/// [`drain`]: struct.Deque.html#method.drain
pub struct Drain<'l, T> {
    target: &'l mut Deque<T>,
}

impl<'l, T> Drain<'l, T> {
    pub(crate) fn new(target: &'l mut Deque<T>) -> Self {
        Self { target }
    }
}

impl<'l, T> Iterator for Drain<'l, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.target.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.target.len(), Some(self.target.len()))
    }
}

impl<'l, T> DoubleEndedIterator for Drain<'l, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.target.remove_last().ok()
    }
}

impl<'l, T> ExactSizeIterator for Drain<'l, T> {}

impl<'l, T> Drop for Drain<'l, T> {
    fn drop(&mut self) {
        while self.target.remove_first().is_ok() {}
    }
}
