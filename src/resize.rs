//! Capacity policy for the buffer behind a `RandomizedQueue`.
//!
//! The buffer doubles when an insertion finds it full and halves when
//! a removal leaves it exactly one-quarter full. Capacity never drops
//! below [`MIN_CAPACITY`] and is always a power of two, which keeps
//! both insertion and removal amortized O(1).

/// The smallest capacity a buffer is ever given.
pub const MIN_CAPACITY: usize = 2;

/// The capacity to allocate for a buffer that should hold at least
/// `requested` items.
pub fn initial_capacity(requested: usize) -> usize {
    requested.next_power_of_two().max(MIN_CAPACITY)
}

/// The capacity to grow to before inserting into a buffer holding
/// `len` items, or `None` if there is still room.
pub fn grow_to(len: usize, capacity: usize) -> Option<usize> {
    debug_assert!(len <= capacity);
    if len == capacity {
        Some(
            capacity
                .checked_mul(2)
                .expect("randomized queue capacity overflow"),
        )
    } else {
        None
    }
}

/// The capacity to shrink to after a removal left `len` items in the
/// buffer, or `None` if the buffer should stay as it is.
pub fn shrink_to(len: usize, capacity: usize) -> Option<usize> {
    debug_assert!(len <= capacity);
    if capacity > MIN_CAPACITY && len == capacity / 4 {
        Some(capacity / 2)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn initial_capacity_is_a_power_of_two_of_at_least_two() {
        assert_eq!(2, initial_capacity(0));
        assert_eq!(2, initial_capacity(1));
        assert_eq!(2, initial_capacity(2));
        assert_eq!(4, initial_capacity(3));
        assert_eq!(16, initial_capacity(9));
        assert_eq!(64, initial_capacity(64));
    }

    #[test]
    fn grows_only_when_full() {
        assert_eq!(None, grow_to(0, 2));
        assert_eq!(None, grow_to(1, 2));
        assert_eq!(Some(4), grow_to(2, 2));
        assert_eq!(None, grow_to(7, 8));
        assert_eq!(Some(16), grow_to(8, 8));
    }

    #[test]
    fn shrinks_only_at_one_quarter() {
        assert_eq!(Some(4), shrink_to(2, 8));
        assert_eq!(None, shrink_to(3, 8));
        assert_eq!(None, shrink_to(1, 8));
        assert_eq!(Some(2), shrink_to(1, 4));
        assert_eq!(None, shrink_to(0, 4));
    }

    #[test]
    fn never_shrinks_below_minimum() {
        assert_eq!(None, shrink_to(0, MIN_CAPACITY));
        assert_eq!(None, shrink_to(1, MIN_CAPACITY));
    }

    #[test]
    fn shrinking_leaves_room_to_grow_twice() {
        // After halving at one quarter the buffer is half full, so the
        // next resize is at least len operations away.
        let mut capacity = 64;
        let len = 16;
        capacity = shrink_to(len, capacity).unwrap();
        assert_eq!(32, capacity);
        assert_eq!(None, grow_to(len, capacity));
        assert_eq!(None, shrink_to(len, capacity));
    }
}
