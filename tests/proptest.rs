use proptest::prelude::*;
use queuekit::{Deque, Error, RandomizedQueue};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

proptest! {
    #[test]
    fn random_add_and_remove(
        adds in proptest::collection::vec(any::<bool>(), 0..64),
        removes in proptest::collection::vec(any::<bool>(), 0..64)
    ) {
        let mut l: Deque<usize> = Deque::new();
        let mut model = VecDeque::new();

        for (front, v) in adds.into_iter().zip(0..) {
            if front {
                l.add_first(v);
                model.push_front(v);
            } else {
                l.add_last(v);
                model.push_back(v);
            }
        }

        for front in removes {
            if front {
                prop_assert_eq!(model.pop_front().ok_or(Error::Empty), l.remove_first());
            } else {
                prop_assert_eq!(model.pop_back().ok_or(Error::Empty), l.remove_last());
            }
            prop_assert_eq!(model.len(), l.len());
            prop_assert_eq!(model.is_empty(), l.is_empty());
        }
    }
}

proptest! {
    #[test]
    fn random_interleaved_add_and_remove(
        action in proptest::collection::vec(any::<usize>(), 0..128)
    ){
        let mut l: Deque<usize> = Deque::new();
        let mut model = VecDeque::new();
        let mut inserts = 0;
        let mut removes = 0;

        for a in action {
            match a & 0x03 {
                0x00 => {
                    l.add_first(a);
                    model.push_front(a);
                    inserts += 1;
                },
                0x01 => {
                    l.add_last(a);
                    model.push_back(a);
                    inserts += 1;
                },
                0x02 => {
                    let r = l.remove_first();
                    prop_assert_eq!(model.pop_front().ok_or(Error::Empty), r);
                    if r.is_ok() {
                        removes += 1;
                    }
                },
                0x03 => {
                    let r = l.remove_last();
                    prop_assert_eq!(model.pop_back().ok_or(Error::Empty), r);
                    if r.is_ok() {
                        removes += 1;
                    }
                },
                _ => unreachable!(),
            }
        }

        prop_assert_eq!(inserts - removes, l.len());
        prop_assert!(l.iter().eq(model.iter()));
        prop_assert!(l.iter().rev().eq(model.iter().rev()));
    }
}

proptest! {
    #[test]
    fn round_trip_visits_every_item_once(
        adds in proptest::collection::vec(any::<bool>(), 0..64),
        removes in proptest::collection::vec(any::<bool>(), 64)
    ) {
        let mut l: Deque<usize> = Deque::new();
        let n = adds.len();

        for (front, v) in adds.into_iter().zip(0..) {
            if front {
                l.add_first(v);
            } else {
                l.add_last(v);
            }
        }

        let mut out = Vec::new();
        for front in removes.into_iter().take(n) {
            let r = if front { l.remove_first() } else { l.remove_last() };
            prop_assert!(r.is_ok());
            out.extend(r);
        }

        out.sort();
        prop_assert_eq!((0..n).collect::<Vec<usize>>(), out);
        prop_assert!(l.is_empty());
    }
}

proptest! {
    #[test]
    fn randomized_queue_dequeues_a_permutation(
        seed in any::<u64>(),
        items in proptest::collection::vec(any::<u32>(), 0..64),
    ) {
        let mut q = RandomizedQueue::with_rng(StdRng::seed_from_u64(seed));
        q.extend(items.iter().copied());

        let mut out = Vec::new();
        while let Ok(i) = q.dequeue() {
            prop_assert!(q.capacity().is_power_of_two());
            prop_assert!(q.capacity() >= 2);
            out.push(i);
        }

        let mut expected = items;
        expected.sort();
        out.sort();
        prop_assert_eq!(expected, out);
        prop_assert!(q.is_empty());
        prop_assert_eq!(2, q.capacity());
    }
}

proptest! {
    #[test]
    fn randomized_queue_interleaved_operations(
        seed in any::<u64>(),
        action in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut q = RandomizedQueue::with_seed(seed);
        let mut model: Vec<u8> = Vec::new();

        for a in action {
            if a % 3 == 0 {
                match q.dequeue() {
                    Ok(i) => {
                        let pos = model.iter().position(|m| *m == i);
                        prop_assert!(pos.is_some());
                        if let Some(pos) = pos {
                            model.swap_remove(pos);
                        }
                    }
                    Err(e) => {
                        prop_assert_eq!(Error::Empty, e);
                        prop_assert!(model.is_empty());
                    }
                }
            } else {
                q.enqueue(a);
                model.push(a);
            }

            prop_assert_eq!(model.len(), q.len());
            prop_assert!(q.len() <= q.capacity());
            prop_assert!(q.capacity().is_power_of_two());
        }

        let mut snapshot: Vec<u8> = q.iter().copied().collect();
        snapshot.sort();
        model.sort();
        prop_assert_eq!(model, snapshot);
    }
}
