use super::{
    errors::{panic_message, PoolError},
    handle::Event,
    model::PoolMetrics,
    queue::{RetrievalOrder, TaskQueue},
    submit::{create_free, create_member, Callable, MemberCallable},
    task::DeferredTask,
    worker::worker,
};
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};


/// Конфигурация пула потоков
#[derive(Debug, Clone)]
pub struct Config {
    pub num_threads: usize,
    pub thread_name_prefix: String,
    pub stack_size: Option<usize>,
    pub order: RetrievalOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            thread_name_prefix: "bringup-worker".to_string(),
            stack_size: None,
            order: RetrievalOrder::default(),
        }
    }
}

impl Config {
    pub fn cpu_bound() -> Self {
        Self {
            num_threads: num_cpus::get(),
            ..Default::default()
        }
    }

    /// Для задач, которые в основном ждут устройство
    pub fn io_bound() -> Self {
        Self {
            num_threads: num_cpus::get() * 2,
            ..Default::default()
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        if self.num_threads == 0 {
            return Err(PoolError::config("num_threads must be > 0"));
        }
        if self.num_threads > 1024 {
            return Err(PoolError::config("num_threads too large (max 1024)"));
        }
        if let Some(0) = self.stack_size {
            return Err(PoolError::config("stack_size must be > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn num_threads(mut self, n: usize) -> Self {
        self.config.num_threads = n;
        self
    }

    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn order(mut self, order: RetrievalOrder) -> Self {
        self.config.order = order;
        self
    }

    pub fn build(self) -> Result<Config, PoolError> {
        self.config.validate()?;
        Ok(self.config)
    }
}


/// Пул потоков с явным жизненным циклом: создаётся конструктором,
/// останавливается через `shutdown` (или при drop).
pub struct ThreadPool {
    queue: Arc<TaskQueue>,
    workers: Vec<JoinHandle<()>>,
    config: Config,
}

impl ThreadPool {
    pub fn new(num_threads: usize) -> Result<Self, PoolError> {
        let config = Config {
            num_threads,
            ..Default::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self, PoolError> {
        config.validate()?;

        let queue = Arc::new(TaskQueue::with_order(config.order));
        let mut workers = Vec::with_capacity(config.num_threads);

        // Запускаем воркеры
        for id in 0..config.num_threads {
            let mut builder = thread::Builder::new()
                .name(format!("{}-{}", config.thread_name_prefix, id));
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            let queue_clone = queue.clone();
            match builder.spawn(move || worker(&queue_clone)) {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    tracing::error!(worker = id, error = %e, "failed to spawn worker thread");
                    queue.stop();
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(PoolError::Spawn(e));
                }
            }
        }

        tracing::info!(
            workers = config.num_threads,
            order = ?config.order,
            "thread pool started"
        );

        Ok(Self {
            queue,
            workers,
            config,
        })
    }

    /// Замыкание без аргументов
    pub fn spawn<F, T>(&self, f: F) -> Event<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (task, event) = DeferredTask::new(f);
        self.queue.add_work(task);
        event
    }

    pub fn submit<F, Args>(&self, f: F, args: Args) -> Event<F::Output>
    where
        F: Callable<Args>,
        Args: Send + 'static,
    {
        create_free(&self.queue, f, args)
    }

    pub fn submit_member<F, C, Args>(&self, method: F, receiver: Arc<C>, args: Args) -> Event<F::Output>
    where
        F: MemberCallable<C, Args>,
        C: Send + Sync + 'static,
        Args: Send + 'static,
    {
        create_member(&self.queue, method, receiver, args)
    }

    #[inline]
    pub fn queue(&self) -> &Arc<TaskQueue> {
        &self.queue
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn num_threads(&self) -> usize {
        self.workers.len()
    }

    #[inline]
    pub fn metrics(&self) -> PoolMetrics {
        let stats = self.queue.stats();
        PoolMetrics {
            workers: self.workers.len(),
            idle_workers: self.queue.waiting(),
            queued_tasks: self.queue.len(),
            total_submitted: stats.submitted,
            completed_tasks: stats.completed,
            failed_tasks: stats.failed,
        }
    }

    /// Останавливает очередь и дожидается всех воркеров.
    /// Задачи, оставшиеся в очереди, не выполняются; их события вернут `ChannelClosed`
    /// после того, как очередь будет уничтожена.
    pub fn shutdown(mut self) -> Result<(), PoolError> {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> Result<(), PoolError> {
        self.queue.stop();

        let mut first_err = None;
        for handle in self.workers.drain(..) {
            if let Err(payload) = handle.join() {
                let msg = panic_message(&*payload);
                tracing::error!(error = %msg, "worker thread panicked");
                first_err.get_or_insert(PoolError::WorkerPanic(msg));
            }
        }

        tracing::info!(stats = ?self.queue.stats(), "thread pool stopped");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            let _ = self.stop_and_join();
        }
    }
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("workers", &self.workers.len())
            .field("queue", &self.queue)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(Config::builder().num_threads(0).build().is_err());
        assert!(Config::builder().num_threads(2048).build().is_err());
        assert!(Config::builder().num_threads(4).stack_size(0).build().is_err());

        let config = Config::builder()
            .num_threads(3)
            .thread_name_prefix("probe")
            .order(RetrievalOrder::Fifo)
            .build()
            .unwrap();
        assert_eq!(config.num_threads, 3);
        assert_eq!(config.thread_name_prefix, "probe");
        assert_eq!(config.order, RetrievalOrder::Fifo);
    }

    #[test]
    fn test_presets() {
        assert!(Config::io_bound().num_threads >= Config::cpu_bound().num_threads);
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(ThreadPool::new(0), Err(PoolError::Config(_))));
    }

    #[test]
    fn test_worker_thread_names() {
        let config = Config::builder()
            .num_threads(1)
            .thread_name_prefix("link-check")
            .build()
            .unwrap();
        let pool = ThreadPool::with_config(config).unwrap();

        let name = pool.spawn(|| thread::current().name().map(str::to_string));
        assert_eq!(name.get(), Ok(Some("link-check-0".to_string())));
        pool.shutdown().unwrap();
    }

    #[test]
    fn test_drop_stops_workers() {
        let pool = ThreadPool::new(2).unwrap();
        let queue = pool.queue().clone();
        drop(pool);
        assert!(queue.is_stopped());
    }
}
