//! AsyncChannelLock tests on the tokio runtime.

use std::sync::Arc;
use std::time::{Duration, Instant};

use lockkit::AsyncChannelLock;
use tokio::sync::Mutex;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn tasks_increment_exactly_once_each() {
    let lock = Arc::new(AsyncChannelLock::new());
    // Only the channel lock serializes access; the tokio mutex is never contended.
    let counter = Arc::new(Mutex::new(0usize));

    let mut tasks = Vec::new();
    for _ in 0..200 {
        let lock = Arc::clone(&lock);
        let counter = Arc::clone(&counter);
        tasks.push(tokio::spawn(async move {
            lock.lock().await;
            let mut value = counter.try_lock().expect("lock already serializes access");
            *value += 1;
            drop(value);
            lock.unlock();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(*counter.lock().await, 200);
    assert!(!lock.is_locked());
}

#[tokio::test]
async fn try_lock_times_out_while_held() {
    let lock = AsyncChannelLock::new();
    assert!(lock.try_lock_for(Duration::from_millis(5)).await);

    let start = Instant::now();
    assert!(!lock.try_lock_for(Duration::from_millis(5)).await);
    assert!(start.elapsed() >= Duration::from_millis(5));

    lock.unlock();
    assert!(lock.try_lock().await);
    lock.unlock();
}

#[tokio::test]
#[should_panic(expected = "unlocked lock")]
async fn unlock_without_lock_panics() {
    AsyncChannelLock::new().unlock();
}
