//! Two queues with fixed contracts.
//!
//! [`Deque`] is a double-ended queue. Internally it keeps its nodes
//! in a `Vec`, and tracks the node before and after each one, along
//! with the first and last nodes, by index. As items are removed,
//! their slots are put on an internal free list which is used for
//! later insertions before the `Vec` is expanded.
//!
//! [`RandomizedQueue`] hands items back in uniformly random order. It
//! keeps its items in a dense buffer that doubles when full and
//! halves when one-quarter full, and takes its randomness from an
//! injectable, seedable generator.
//!
//! The [`permutation`] module drives a `RandomizedQueue` from a
//! token stream; it backs the `permutation` binary.

mod deque;
mod error;
mod iterators;
pub mod permutation;
mod randomized_queue;
pub mod resize;
mod shuffle;
mod slot;

pub use crate::deque::Deque;
pub use crate::error::Error;
pub use crate::iterators::{Drain, IntoIter, Iter};
pub use crate::randomized_queue::RandomizedQueue;

/// Iterators over a [`RandomizedQueue`].
pub mod randomized {
    pub use crate::shuffle::{IntoIter, Iter};
}
