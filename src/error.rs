use std::fmt;
use std::io;

/// The error type shared by [`Deque`], [`RandomizedQueue`], and the
/// [`permutation`] driver.
///
/// [`Deque`]: struct.Deque.html
/// [`RandomizedQueue`]: struct.RandomizedQueue.html
/// [`permutation`]: permutation/index.html
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A removal or sampling operation was attempted on an empty
    /// container.
    Empty,
    /// More items were requested than the source can provide.
    InvalidArgument { requested: usize, available: usize },
    /// Reading input or writing output failed.
    Io(io::ErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => f.write_str("container is empty"),
            Error::InvalidArgument {
                requested,
                available,
            } => write!(
                f,
                "requested {} items but only {} are available",
                requested, available
            ),
            Error::Io(kind) => write!(f, "i/o failure: {:?}", kind),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e.kind())
    }
}
