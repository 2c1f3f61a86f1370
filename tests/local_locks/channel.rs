//! ChannelLock contention tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use lockkit::{ChannelLock, Lock, TimedLock};

/// Non-atomic read-modify-write: loses updates unless the caller holds the lock.
fn bump(counter: &AtomicUsize) {
    let v = counter.load(Ordering::Relaxed);
    thread::yield_now();
    counter.store(v + 1, Ordering::Relaxed);
}

// ============================================================================
// 1000 concurrent callers increment a counter under the lock
// ============================================================================

#[test]
fn thousand_callers_increment_exactly_once_each() {
    let lock = Arc::new(ChannelLock::new());
    let counter = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..1000)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                lock.lock();
                bump(&counter);
                lock.unlock();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.load(Ordering::SeqCst), 1000);
    assert!(!lock.is_locked());
}

// ============================================================================
// At most one holder at any instant
// ============================================================================

#[test]
fn never_two_holders_at_once() {
    let lock = Arc::new(ChannelLock::new());
    let inside = Arc::new(AtomicBool::new(false));
    let overlaps = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let inside = Arc::clone(&inside);
            let overlaps = Arc::clone(&overlaps);
            thread::spawn(move || {
                for _ in 0..50 {
                    let _guard = lock.guard();
                    if inside.swap(true, Ordering::SeqCst) {
                        overlaps.fetch_add(1, Ordering::SeqCst);
                    }
                    thread::yield_now();
                    inside.store(false, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
}

// ============================================================================
// try_lock: immediate when free, bounded by the timeout when held
// ============================================================================

#[test]
fn try_lock_free_then_held_by_other_thread() {
    let lock = Arc::new(ChannelLock::new());

    let start = Instant::now();
    assert!(lock.try_lock_for(Duration::from_millis(5)));
    assert!(start.elapsed() < Duration::from_millis(500));

    let contender = {
        let lock = Arc::clone(&lock);
        thread::spawn(move || {
            let start = Instant::now();
            let acquired = lock.try_lock_for(Duration::from_millis(5));
            (acquired, start.elapsed())
        })
    };

    let (acquired, waited) = contender.join().unwrap();
    assert!(!acquired);
    assert!(waited >= Duration::from_millis(5));
    assert!(waited < Duration::from_secs(2));

    lock.unlock();
}

#[test]
fn waiting_try_lock_succeeds_when_released_in_time() {
    let lock = Arc::new(ChannelLock::new());
    lock.lock();

    let contender = {
        let lock = Arc::clone(&lock);
        thread::spawn(move || lock.try_lock_for(Duration::from_secs(5)))
    };

    thread::sleep(Duration::from_millis(20));
    lock.unlock();

    assert!(contender.join().unwrap());
    assert!(lock.is_locked());
    lock.unlock();
}

// ============================================================================
// Only successful try_locks touch the counter
// ============================================================================

#[test]
fn try_lock_successes_match_counter() {
    let lock = Arc::new(ChannelLock::new());
    let counter = Arc::new(AtomicUsize::new(0));
    let successes = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let counter = Arc::clone(&counter);
            let successes = Arc::clone(&successes);
            thread::spawn(move || {
                if !lock.try_lock() {
                    return;
                }
                thread::sleep(Duration::from_millis(2));
                bump(&counter);
                successes.fetch_add(1, Ordering::SeqCst);
                lock.unlock();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let successes = successes.load(Ordering::SeqCst);
    assert!(successes >= 1);
    assert_eq!(counter.load(Ordering::SeqCst), successes);
}
