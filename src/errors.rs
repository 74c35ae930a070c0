/// Ошибка выполнения отдельной задачи, доставляется через `Event`
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, thiserror::Error)]
pub enum SpawnError {
    #[error("task panicked: {0}")]
    Panic(String),

    /// Задача была уничтожена, так и не выполнившись
    #[error("result channel closed before the task ran")]
    ChannelClosed,

    #[error("blocking join failed: {0}")]
    JoinFailed(String),
}

/// Ошибки жизненного цикла пула
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("worker thread panicked: {0}")]
    WorkerPanic(String),
}

impl PoolError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PoolError::Config(msg.into())
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
