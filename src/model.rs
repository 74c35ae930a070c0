#[derive(Debug, Clone)]
pub struct PoolMetrics {
    pub workers: usize,
    pub idle_workers: usize,
    pub queued_tasks: usize,
    pub total_submitted: usize,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
}

impl PoolMetrics {
    pub fn utilization(&self) -> f64 {
        if self.workers == 0 {
            return 0.0;
        }
        let busy = self.workers.saturating_sub(self.idle_workers);
        busy as f64 / self.workers as f64
    }

    pub fn queue_pressure(&self) -> f64 {
        self.queued_tasks as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.completed_tasks + self.failed_tasks;
        if total == 0 {
            return 1.0;
        }
        self.completed_tasks as f64 / total as f64
    }
}


/// Счётчики очереди: сколько задач принято и чем закончилось выполнение
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub submitted: usize,
    pub completed: usize,
    pub failed: usize,
}

impl QueueStats {
    pub fn finished(&self) -> usize {
        self.completed + self.failed
    }
}


/// Порядок выдачи результатов в `join_events`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinOrdering {
    #[default]
    Ordered,
    UnOrdered,
}
