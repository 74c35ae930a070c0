use super::{
    errors::SpawnError,
    model::JoinOrdering,
    result::SpawnResult,
};
use crossbeam::channel::{self, Receiver, SendError, Sender};
use futures::{
    future,
    stream::{FuturesUnordered, StreamExt},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};


/// Пишущий конец канала результата.
/// При уничтожении (после отправки или без неё) помечает канал закрытым.
pub(crate) struct Outcome<T> {
    sender: Sender<SpawnResult<T>>,
    closed: Arc<AtomicBool>,
}

impl<T> Outcome<T> {
    #[inline]
    pub(crate) fn send(&self, result: SpawnResult<T>) -> Result<(), SendError<SpawnResult<T>>> {
        self.sender.send(result)
    }
}

impl<T> Drop for Outcome<T> {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::Release);
    }
}

/// Пара (отправитель, `Event`) для одной задачи
pub(crate) fn result_channel<T>() -> (Outcome<T>, Event<T>) {
    let (sender, receiver) = channel::bounded(1);
    let closed = Arc::new(AtomicBool::new(false));
    let outcome = Outcome {
        sender,
        closed: closed.clone(),
    };
    (outcome, Event { receiver, closed })
}


/// Handle на результат задачи.
///
/// Единственный владелец читающего конца канала результата. Не копируется,
/// только перемещается. Получение значения (`wait`/`get`) потребляет handle,
/// поэтому повторное чтение не скомпилируется.
#[derive(Debug)]
pub struct Event<T> {
    receiver: Receiver<SpawnResult<T>>,
    closed: Arc<AtomicBool>,
}

impl<T> Event<T> {

    /// Блокирует поток до завершения задачи.
    ///
    /// `Err(SpawnError::Panic)` если задача упала, `Err(SpawnError::ChannelClosed)`
    /// если задача была уничтожена без выполнения (очередь остановлена и дропнута).
    pub fn wait(self) -> SpawnResult<T> {
        self.receiver.recv().unwrap_or(Err(SpawnError::ChannelClosed))
    }

    #[inline(always)]
    pub fn get(self) -> SpawnResult<T> {
        self.wait()
    }

    /// Неблокирующая проверка готовности, без побочных эффектов.
    /// `true` и для задачи, уничтоженной без выполнения: `wait` тогда сразу
    /// вернёт `ChannelClosed`.
    #[inline]
    pub fn ready(&self) -> bool {
        !self.receiver.is_empty() || self.closed.load(Ordering::Acquire)
    }
}

impl<T: Send + 'static> Event<T> {
    /// Ожидание из async-кода: блокирующий `wait` уходит в blocking-пул tokio
    pub async fn wait_async(self) -> SpawnResult<T> {
        match tokio::task::spawn_blocking(move || self.wait()).await {
            Ok(result) => result,
            Err(join_err) => Err(SpawnError::JoinFailed(join_err.to_string())),
        }
    }
}

/// Ожидание набора событий.
/// `Ordered` сохраняет порядок отправки, `UnOrdered` отдаёт результаты по мере готовности.
pub async fn join_events<T>(events: Vec<Event<T>>, ordering: JoinOrdering) -> Vec<SpawnResult<T>>
where
    T: Send + 'static,
{
    if events.is_empty() {
        return Vec::new();
    }

    match ordering {
        JoinOrdering::Ordered => {
            future::join_all(events.into_iter().map(Event::wait_async)).await
        }
        JoinOrdering::UnOrdered => {
            let len = events.len();
            let mut futures: FuturesUnordered<_> = events
                .into_iter()
                .map(Event::wait_async)
                .collect();
            let mut results = Vec::with_capacity(len);

            while let Some(result) = futures.next().await {
                results.push(result);
            }
            results
        }
    }
}
