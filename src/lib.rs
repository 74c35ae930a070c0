//! Пул потоков для параллельного запуска шагов bring-up валидации
//!
//! # Features
//! - Задачи со стёртым типом результата в одной очереди
//! - Блокирующая MPMC очередь с кооперативной остановкой
//! - `Event` для однократного получения результата, с `ready()` без блокировки
//! - Изоляция паник: упавшая задача не роняет воркер
//! - Метрики пула и async-мост для tokio

pub mod errors;
pub mod handle;
pub mod model;
pub mod pool;
pub mod queue;
pub mod result;
pub mod submit;
pub mod task;
pub mod worker;

pub use errors::{PoolError, SpawnError};
pub use handle::{join_events, Event};
pub use pool::{Config, ConfigBuilder, ThreadPool};
pub use queue::{RetrievalOrder, TaskQueue};
pub use result::SpawnResult;
pub use submit::{create_free, create_member};
pub use task::{DeferredTask, TaskStatus};
pub use worker::worker;
