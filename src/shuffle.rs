//! Randomly ordered iterators over a `RandomizedQueue`.
//!
//! Both iterators shuffle their items once, at construction, with an
//! unbiased Fisher-Yates shuffle, and then walk the fixed result.

use rand::seq::SliceRandom;
use rand::Rng;
use std::iter::FusedIterator;
use std::vec;

/// An iterator over a snapshot of a queue's items in random order.
/// It is constructed from the [`iter`] method on `RandomizedQueue`.
///
/// [`iter`]: ../struct.RandomizedQueue.html#method.iter
pub struct Iter<'l, T> {
    items: vec::IntoIter<&'l T>,
}

impl<'l, T> Iter<'l, T> {
    pub(crate) fn new<G: Rng + ?Sized>(mut items: Vec<&'l T>, rng: &mut G) -> Self {
        items.shuffle(rng);
        Self {
            items: items.into_iter(),
        }
    }
}

impl<'l, T> Iterator for Iter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'l, T> ExactSizeIterator for Iter<'l, T> {}

impl<'l, T> FusedIterator for Iter<'l, T> {}

/// An owning iterator that yields every item of a consumed queue in
/// random order.
pub struct IntoIter<T> {
    items: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new<G: Rng + ?Sized>(mut items: Vec<T>, rng: &mut G) -> Self {
        items.shuffle(rng);
        Self {
            items: items.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
