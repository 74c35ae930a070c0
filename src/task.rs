//! Отложенная задача со стёртым типом результата.
//!
//! [`DeferredTask`] хранит замыкание любого типа вместе с пишущим концом его
//! канала результата, поэтому задачи, возвращающие `u32`, `String` или `()`,
//! лежат в одной очереди.

use super::{
    errors::{panic_message, SpawnError},
    handle::{result_channel, Event, Outcome},
};
use std::{
    any::Any,
    fmt, mem,
    panic::{self, AssertUnwindSafe},
};

/// Итог выполнения задачи для учёта в метриках.
/// Само значение уходит в канал результата, а не сюда.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Completed,
    Panicked,
}

pub(crate) trait Runnable: Send {
    fn run(self: Box<Self>) -> TaskStatus;
}

struct TaskHolder<F, T> {
    func: F,
    outcome: Outcome<T>,
}

// Drop значения или payload паники сам может паниковать.
// Такая паника не должна выйти за пределы воркера.
fn drop_contained<V>(value: V) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(move || drop(value))) {
        Ok(()) => true,
        Err(payload) => {
            mem::forget(payload);
            false
        }
    }
}

fn describe_panic(payload: Box<dyn Any + Send>) -> SpawnError {
    let err = SpawnError::Panic(panic_message(&*payload));
    drop_contained(payload);
    err
}

impl<F, T> Runnable for TaskHolder<F, T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    fn run(self: Box<Self>) -> TaskStatus {
        let TaskHolder { func, outcome } = *self;

        let result = panic::catch_unwind(AssertUnwindSafe(func)).map_err(describe_panic);

        let mut status = match result {
            Ok(_) => TaskStatus::Completed,
            Err(_) => TaskStatus::Panicked,
        };

        // Event мог быть уже дропнут вызывающей стороной, значение уничтожается здесь
        if let Err(unsent) = outcome.send(result) {
            if !drop_contained(unsent) {
                status = TaskStatus::Panicked;
            }
        }
        status
    }
}

/// Единица отложенной работы со стёртым типом результата
#[derive(Default)]
pub struct DeferredTask {
    content: Option<Box<dyn Runnable>>,
}

impl DeferredTask {
    /// Упаковывает замыкание и возвращает пару (задача, событие результата)
    pub fn new<F, T>(func: F) -> (Self, Event<T>)
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (outcome, event) = result_channel();
        let task = Self {
            content: Some(Box::new(TaskHolder { func, outcome })),
        };
        (task, event)
    }

    #[inline]
    pub fn valid(&self) -> bool {
        self.content.is_some()
    }

    /// Забирает замыкание, оставляя `self` пустым (аналог moved-from)
    #[inline]
    pub fn take(&mut self) -> DeferredTask {
        DeferredTask {
            content: self.content.take(),
        }
    }

    /// Выполняет замыкание ровно один раз и оставляет задачу пустой.
    ///
    /// Значение или паника замыкания уходят в парный [`Event`];
    /// возвращаемый [`TaskStatus`] только сообщает, что из двух произошло.
    ///
    /// # Panics
    ///
    /// Вызов на пустой задаче (default, после `take` или повторный) это
    /// нарушение контракта, паникует. Сначала проверяйте [`valid`](Self::valid).
    pub fn execute(&mut self) -> TaskStatus {
        match self.content.take() {
            Some(runnable) => runnable.run(),
            None => panic!("execute() called on an empty DeferredTask"),
        }
    }
}

impl fmt::Debug for DeferredTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredTask")
            .field("valid", &self.valid())
            .finish()
    }
}
