//! MPMC очередь отложенных задач.

use super::{
    model::QueueStats,
    task::{DeferredTask, TaskStatus},
};
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Condvar, Mutex, MutexGuard, PoisonError,
    },
};


/// Порядок выдачи задач потребителям.
///
/// По умолчанию `Lifo`: последняя добавленная задача выдаётся первой.
/// `Fifo` включается явно.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetrievalOrder {
    #[default]
    Lifo,
    Fifo,
}

struct QueueState {
    tasks: VecDeque<DeferredTask>,
    stopped: bool,
    waiting: usize,
}

pub struct TaskQueue {
    state: Mutex<QueueState>,
    work: Condvar,
    order: RetrievalOrder,
    submitted: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::with_order(RetrievalOrder::default())
    }

    pub fn with_order(order: RetrievalOrder) -> Self {
        Self {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                stopped: false,
                waiting: 0,
            }),
            work: Condvar::new(),
            order,
            submitted: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    // Задачи не выполняются под этим локом, отравление не портит состояние
    #[inline]
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Добавляет задачу и будит одного ждущего потребителя.
    ///
    /// Допустимо и после [`stop`](Self::stop), но такие задачи никогда не выдаются.
    pub fn add_work(&self, task: DeferredTask) {
        if !task.valid() {
            tracing::warn!("ignoring empty task passed to add_work");
            return;
        }

        let mut state = self.lock();
        if state.stopped {
            tracing::debug!("task added to a stopped queue will not be delivered");
        }
        state.tasks.push_back(task);
        self.submitted.fetch_add(1, Ordering::Relaxed);
        self.work.notify_one();
    }

    /// Блокирует, пока не появится задача или очередь не остановят.
    ///
    /// После остановки возвращает пустую задачу (см. [`DeferredTask::valid`]),
    /// сколько бы задач ни осталось в очереди.
    pub fn get_work(&self) -> DeferredTask {
        let mut state = self.lock();
        while !state.stopped && state.tasks.is_empty() {
            state.waiting += 1;
            state = self.work.wait(state).unwrap_or_else(PoisonError::into_inner);
            state.waiting -= 1;
        }

        if state.stopped {
            return DeferredTask::default();
        }

        let task = match self.order {
            RetrievalOrder::Lifo => state.tasks.pop_back(),
            RetrievalOrder::Fifo => state.tasks.pop_front(),
        };
        task.unwrap_or_default()
    }

    /// Прекращает выдачу и будит всех ждущих. Повторный вызов ничего не меняет.
    pub fn stop(&self) {
        let mut state = self.lock();
        if !state.stopped {
            state.stopped = true;
            tracing::debug!(pending = state.tasks.len(), "task queue stopped");
        }
        self.work.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }

    /// Число потребителей, заблокированных в `get_work`
    pub fn waiting(&self) -> usize {
        self.lock().waiting
    }

    pub fn order(&self) -> RetrievalOrder {
        self.order
    }

    #[inline]
    pub fn record(&self, status: TaskStatus) {
        match status {
            TaskStatus::Completed => self.completed.fetch_add(1, Ordering::Relaxed),
            TaskStatus::Panicked => self.failed.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("TaskQueue")
            .field("queued", &state.tasks.len())
            .field("stopped", &state.stopped)
            .field("waiting", &state.waiting)
            .field("order", &self.order)
            .finish()
    }
}
