//! Integration tests for concurrent cache traffic against a live sweeper

use lapse_cache::{CacheConfig, WeakEvictionCache};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_traffic_with_running_sweeper() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("lapse_cache=debug")
        .try_init();

    // Aggressive timings so entries cycle through demotion and
    // reclamation while the threads hammer the map.
    let config = CacheConfig::new(Duration::from_millis(100), Duration::from_millis(200));
    let cache = WeakEvictionCache::new(config).unwrap();

    const THREADS: usize = 8;
    const KEYS: usize = 16;
    let barrier = Arc::new(Barrier::new(THREADS));
    let deadline = Duration::from_secs(2);

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let cache = cache.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut rng = fastrand::Rng::with_seed(worker as u64);
                let started = Instant::now();
                while started.elapsed() < deadline {
                    let key = rng.usize(..KEYS);
                    match rng.u8(..4) {
                        0 => {
                            cache.add(key, Arc::new(worker)).unwrap();
                        }
                        1 | 2 => {
                            let _ = cache.try_get(&key).unwrap();
                        }
                        _ => {
                            cache.remove(&key).unwrap();
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread must not panic");
    }

    // A key can never hold more than one entry.
    assert!(cache.len() <= KEYS);

    // The cache is still fully functional after the storm.
    cache.add(KEYS, Arc::new(99)).unwrap();
    assert_eq!(*cache.try_get(&KEYS).unwrap().unwrap(), 99);

    cache.dispose().await.unwrap();
    assert!(cache.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dispose_stops_the_sweeper_promptly() {
    let config = CacheConfig::new(Duration::from_millis(100), Duration::from_millis(50));
    let cache = WeakEvictionCache::<String, u8>::new(config).unwrap();
    cache.add("k".to_string(), Arc::new(1)).unwrap();

    // Joinable disposal: the sweeper must be fully stopped well within
    // one sweep interval of the signal.
    tokio::time::timeout(Duration::from_secs(1), cache.dispose())
        .await
        .expect("disposal must not wait for the next tick")
        .unwrap();
    assert!(cache.is_empty());
}
