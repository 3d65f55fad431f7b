use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use carray::{ArrayError, ConcurrentArray, CowArray};

use super::common::{assert_elements_in_range, write_randomly, NUM_THREADS};

#[test]
fn reads_and_writes() {
    let array = CowArray::new(5);
    assert_eq!(array.get(0), Ok(0));
    assert_eq!(array.set(2, 42), Ok(()));
    assert_eq!(array.get(2), Ok(42));
    assert_eq!(
        array.get(10),
        Err(ArrayError::IndexOutOfRange {
            index: 10,
            length: 5
        })
    );
    assert_eq!(array.len(), 5);
}

#[test]
fn random_concurrent_writes_never_corrupt_elements() {
    let array = Arc::new(CowArray::new(37));
    write_randomly(&array, NUM_THREADS, 1_000..=2_000);
    assert_elements_in_range(&*array, 1_000..=2_000);
    assert_eq!(array.len(), 37);
}

#[test]
fn every_thread_writes_every_index() {
    const LENGTH: usize = 64;
    const WRITERS: usize = 100;

    let array = Arc::new(CowArray::new(LENGTH));
    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let array = array.clone();
            thread::spawn(move || {
                for j in 0..array.len() {
                    array.set(j, (i * j) as i64).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let max = ((WRITERS - 1) * (LENGTH - 1)) as i64;
    assert_elements_in_range(&*array, 0..=max);
}

#[test]
fn overlapping_writes_keep_only_the_last_published() {
    let array = CowArray::new(2);
    let staged = Barrier::new(2);
    let first_published = Barrier::new(2);

    thread::scope(|s| {
        s.spawn(|| {
            let write = array.stage(0, 1).unwrap();
            staged.wait();
            write.publish();
            first_published.wait();
        });
        s.spawn(|| {
            let write = array.stage(1, 2).unwrap();
            staged.wait();
            first_published.wait();
            write.publish();
        });
    });

    // Both writes copied the initial snapshot, so the write published last
    // replaced the first one entirely.
    assert_eq!(array.to_vec(), Ok(vec![0, 2]));
}

#[test]
fn sequential_writes_to_different_indices_are_all_kept() {
    let array = CowArray::new(2);
    array.stage(0, 1).unwrap().publish();
    array.stage(1, 2).unwrap().publish();
    assert_eq!(array.to_vec(), Ok(vec![1, 2]));
}

#[test]
fn readers_always_see_a_whole_snapshot() {
    const WRITES: i64 = 10_000;
    const READERS: usize = 4;

    let array = CowArray::new(2);
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            // Element 0 is always written before element 1, so every
            // snapshot has either equal elements, or element 0 one ahead.
            for k in 1..=WRITES {
                array.set(0, k).unwrap();
                array.set(1, k).unwrap();
            }
            done.store(true, Ordering::SeqCst);
        });
        for _ in 0..READERS {
            s.spawn(|| {
                while !done.load(Ordering::SeqCst) {
                    let view = array.to_vec().unwrap();
                    assert_eq!(view.len(), 2);
                    assert!(view[1] <= view[0] && view[0] <= view[1] + 1, "{view:?}");
                }
            });
        }
    });

    assert_eq!(array.to_vec(), Ok(vec![WRITES, WRITES]));
}

#[test]
fn len_is_unaffected_by_concurrent_writes() {
    let array = Arc::new(CowArray::new(11));
    let reader = {
        let array = array.clone();
        thread::spawn(move || {
            for _ in 0..1_000 {
                assert_eq!(array.len(), 11);
            }
        })
    };
    write_randomly(&array, 4, -5..=5);
    reader.join().unwrap();
    assert_eq!(array.len(), 11);
}
