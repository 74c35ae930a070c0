use super::{
    queue::TaskQueue,
    task::TaskStatus,
};


/// Поточная функция воркера: забирает задачи из очереди, пока её не остановят.
///
/// Паника внутри задачи попадает в её `Event` и не завершает поток.
pub fn worker(queue: &TaskQueue) {
    let name = std::thread::current()
        .name()
        .unwrap_or("unnamed")
        .to_string();
    tracing::debug!(worker = %name, "worker started");

    let mut executed = 0usize;
    loop {
        let mut task = queue.get_work();
        if !task.valid() {
            break;
        }

        let status = task.execute();
        if status == TaskStatus::Panicked {
            tracing::warn!(worker = %name, "task panicked, result delivered to its event");
        }
        queue.record(status);
        executed += 1;
    }

    tracing::debug!(worker = %name, executed, "worker exiting");
}
