use bringup_tasks::{Config, PoolError, ThreadPool};
use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;


struct Board {
    name: &'static str,
    channels: u32,
}

impl Board {
    fn check_channel(&self, channel: u32, pattern: u32) -> bool {
        thread::sleep(Duration::from_millis(5));
        (channel ^ pattern) != u32::MAX && channel < self.channels
    }
}

fn main() -> Result<(), PoolError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::builder()
        .num_threads(4)
        .build()?;
    let pool = ThreadPool::with_config(config)?;
    let board = Arc::new(Board { name: "ku115", channels: 4 });

    let now = Instant::now();
    let checks: Vec<_> = (0..board.channels)
        .map(|ch| pool.submit_member(Board::check_channel, board.clone(), (ch, 0xA5A5_A5A5u32)))
        .collect();
    let sums: Vec<_> = (1..=3u32)
        .map(|i| pool.submit(|a: u32, b: u32| a + b, (i, i)))
        .collect();

    for (ch, event) in checks.into_iter().enumerate() {
        println!("{} channel {}: {:?}", board.name, ch, event.get());
    }
    for event in sums {
        println!("sum: {:?}", event.get());
    }

    let metrics = pool.metrics();
    println!(
        "metrics: {:?}, utilization: {:.1}%, queue pressure: {}",
        metrics,
        metrics.utilization() * 100.0,
        metrics.queue_pressure()
    );
    pool.shutdown()?;
    println!("elapsed: {:?}", now.elapsed());
    Ok(())
}
