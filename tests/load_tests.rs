#[cfg(test)]
mod tests {
    use bringup_tasks::{
    pool::{
        Config,
        ThreadPool,
        },
    queue::{RetrievalOrder, TaskQueue},
    submit::create_free,
    worker::worker,
    };
    use std::{
        collections::HashSet,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
        thread,
        time::Instant,
    };

    fn measure<F, T>(name: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        println!("✓ {}: {:?}", name, elapsed);
        result
    }

    fn run_producers(order: RetrievalOrder, producers: usize, per_producer: usize, workers: usize) {
        let queue = Arc::new(TaskQueue::with_order(order));
        let executions = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(HashSet::new()));

        let worker_handles: Vec<_> = (0..workers)
            .map(|_| {
                let q = queue.clone();
                thread::spawn(move || worker(&q))
            })
            .collect();

        let producer_handles: Vec<_> = (0..producers)
            .map(|p| {
                let queue = queue.clone();
                let executions = executions.clone();
                let seen = seen.clone();
                thread::spawn(move || {
                    let events: Vec<_> = (0..per_producer)
                        .map(|m| {
                            let executions = executions.clone();
                            let seen = seen.clone();
                            create_free(&queue, move |id: usize| {
                                executions.fetch_add(1, Ordering::Relaxed);
                                assert!(seen.lock().unwrap().insert(id), "задача {} выполнена дважды", id);
                                id
                            }, (p * per_producer + m,))
                        })
                        .collect();

                    events
                        .into_iter()
                        .enumerate()
                        .all(|(m, e)| e.get() == Ok(p * per_producer + m))
                })
            })
            .collect();

        for handle in producer_handles {
            assert!(handle.join().unwrap(), "все результаты должны совпасть");
        }

        queue.stop();
        for handle in worker_handles {
            handle.join().unwrap();
        }

        let total = producers * per_producer;
        assert_eq!(executions.load(Ordering::Relaxed), total);
        assert_eq!(seen.lock().unwrap().len(), total);
        let stats = queue.stats();
        assert_eq!(stats.submitted, total);
        assert_eq!(stats.completed, total);
        assert_eq!(stats.failed, 0);
    }

    #[test]
    fn load_test_1_exactly_once_lifo() {
        println!("\n=== LOAD TEST 1: 8 продюсеров x 2k задач, 4 воркера (LIFO) ===");
        measure("16k tasks LIFO", || run_producers(RetrievalOrder::Lifo, 8, 2_000, 4));
    }

    #[test]
    fn load_test_2_exactly_once_fifo() {
        println!("\n=== LOAD TEST 2: 4 продюсера x 5k задач, 8 воркеров (FIFO) ===");
        measure("20k tasks FIFO", || run_producers(RetrievalOrder::Fifo, 4, 5_000, 8));
    }

    #[test]
    fn load_test_3_pool_many_small_tasks() {
        println!("\n=== LOAD TEST 3: 50k мелких задач через пул ===");
        let pool = ThreadPool::with_config(Config::io_bound()).unwrap();

        let events: Vec<_> = measure("submit 50k", || {
            (0..50_000u64).map(|i| pool.spawn(move || i * 2)).collect()
        });

        let sum: u64 = measure("collect 50k", || {
            events.into_iter().map(|e| e.get().unwrap()).sum()
        });
        assert_eq!(sum, (0..50_000u64).map(|i| i * 2).sum::<u64>());

        let metrics = pool.metrics();
        println!("  Утилизация: {:.1}%", metrics.utilization() * 100.0);
        pool.shutdown().unwrap();
    }

    #[test]
    fn load_test_4_mixed_return_types() {
        println!("\n=== LOAD TEST 4: разные типы результатов в одной очереди ===");
        let pool = ThreadPool::new(4).unwrap();

        let numbers: Vec<_> = (0..1_000u32).map(|i| pool.spawn(move || i)).collect();
        let strings: Vec<_> = (0..1_000u32).map(|i| pool.spawn(move || format!("step_{}", i))).collect();
        let units: Vec<_> = (0..1_000u32).map(|_| pool.spawn(|| ())).collect();

        for (i, e) in numbers.into_iter().enumerate() {
            assert_eq!(e.get(), Ok(i as u32));
        }
        for (i, e) in strings.into_iter().enumerate() {
            assert_eq!(e.get(), Ok(format!("step_{}", i)));
        }
        assert!(units.into_iter().all(|e| e.get().is_ok()));

        pool.shutdown().unwrap();
    }
}
