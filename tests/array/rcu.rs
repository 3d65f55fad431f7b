use std::sync::{Arc, Barrier};
use std::thread;

use carray::{ConcurrentArray, MutexArray, RcuArray};

use super::common::{assert_elements_in_range, write_randomly, NUM_THREADS, NUM_WRITES};

#[test]
fn random_concurrent_writes_never_corrupt_elements() {
    let array = Arc::new(RcuArray::new(37));
    write_randomly(&array, NUM_THREADS, -300..=-100);
    assert_elements_in_range(&*array, -300..=-100);
}

#[test]
fn no_write_to_a_distinct_index_is_lost() {
    let array = RcuArray::new(NUM_THREADS);
    let barrier = Barrier::new(NUM_THREADS);

    thread::scope(|s| {
        for i in 0..NUM_THREADS {
            let array = &array;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for k in 1..=NUM_WRITES as i64 {
                    array.set(i, k).unwrap();
                }
            });
        }
    });

    assert_eq!(array.to_vec(), Ok(vec![NUM_WRITES as i64; NUM_THREADS]));
}

#[test]
fn agrees_with_mutex_array_on_distinct_indices() {
    let rcu = RcuArray::new(NUM_THREADS);
    let mutex = MutexArray::new(NUM_THREADS);

    thread::scope(|s| {
        for i in 0..NUM_THREADS {
            let (rcu, mutex) = (&rcu, &mutex);
            s.spawn(move || {
                let value = (i * i) as i64;
                rcu.set(i, value).unwrap();
                mutex.set(i, value).unwrap();
            });
        }
    });

    assert_eq!(rcu.to_vec(), mutex.to_vec());
}
