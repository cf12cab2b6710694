//! Print a random subset of whitespace separated tokens.
//!
//! This is the library half of the `permutation` binary: it reads
//! every token from an input, feeds them to a [`RandomizedQueue`],
//! and writes `k` of them, one per line, each drawn uniformly at
//! random from the tokens not yet written.
//!
//! [`RandomizedQueue`]: ../struct.RandomizedQueue.html

use crate::error::Error;
use crate::randomized_queue::RandomizedQueue;
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Read every whitespace separated token from `input` until it is
/// exhausted. Tokens may span any number of lines.
///
/// # Examples
///
/// ```
/// use queuekit::permutation::read_tokens;
///
/// let tokens = read_tokens("to be or\n  not to\n".as_bytes()).unwrap();
/// assert_eq!(vec!["to", "be", "or", "not", "to"], tokens);
/// ```
pub fn read_tokens<B: BufRead>(input: B) -> io::Result<Vec<String>> {
    let mut tokens = Vec::new();
    for line in input.lines() {
        tokens.extend(line?.split_whitespace().map(String::from));
    }
    Ok(tokens)
}

/// Enqueue every token into `queue`, then dequeue `k` of them and
/// write each on its own line to `out`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] without writing anything if `k`
/// is larger than the number of items the queue ends up holding, and
/// [`Error::Io`] if writing fails.
///
/// # Examples
///
/// ```
/// use queuekit::permutation::permutation;
/// use queuekit::RandomizedQueue;
///
/// let mut out = Vec::new();
/// let tokens = vec!["a", "b", "c", "d"].into_iter().map(String::from);
///
/// permutation(tokens, 2, RandomizedQueue::with_seed(1), &mut out).unwrap();
///
/// let printed = String::from_utf8(out).unwrap();
/// assert_eq!(2, printed.lines().count());
/// ```
pub fn permutation<I, R, W>(
    tokens: I,
    k: usize,
    mut queue: RandomizedQueue<String, R>,
    out: &mut W,
) -> Result<(), Error>
where
    I: IntoIterator<Item = String>,
    R: Rng,
    W: Write + ?Sized,
{
    queue.extend(tokens);
    debug!(tokens = queue.len(), k, "filled randomized queue");

    if k > queue.len() {
        return Err(Error::InvalidArgument {
            requested: k,
            available: queue.len(),
        });
    }

    for _ in 0..k {
        let token = queue.dequeue()?;
        writeln!(out, "{}", token)?;
    }
    out.flush()?;
    Ok(())
}
