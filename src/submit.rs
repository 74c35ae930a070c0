//! Функции добавления работы в [`TaskQueue`].
//!
//! Обе возвращают [`Event`] с типом результата вызываемого объекта. Аргументы
//! передаются кортежем и перемещаются в задачу в момент отправки, при
//! выполнении они повторно не вычисляются.
//!
//! ```ignore
//! let sum = create_free(&queue, |a: u32, b: u32| a + b, (1, 1));
//! let id = create_member(&queue, Board::read_id, board.clone(), ());
//! ```

use super::{
    handle::Event,
    queue::TaskQueue,
    task::DeferredTask,
};
use std::sync::Arc;


/// Вызываемый объект, принимающий аргументы кортежем
pub trait Callable<Args>: Send + 'static {
    type Output: Send + 'static;

    fn call(self, args: Args) -> Self::Output;
}

/// Метод: получатель по разделяемой ссылке плюс кортеж аргументов
pub trait MemberCallable<C, Args>: Send + 'static {
    type Output: Send + 'static;

    fn call_on(self, receiver: &C, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg,)*> Callable<($($arg,)*)> for Func
        where
            Func: FnOnce($($arg),*) -> Out + Send + 'static,
            Out: Send + 'static,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            #[inline]
            fn call(self, ($($arg,)*): ($($arg,)*)) -> Out {
                self($($arg),*)
            }
        }

        impl<Func, Out, C, $($arg,)*> MemberCallable<C, ($($arg,)*)> for Func
        where
            Func: for<'r> FnOnce(&'r C, $($arg),*) -> Out + Send + 'static,
            Out: Send + 'static,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            #[inline]
            fn call_on(self, receiver: &C, ($($arg,)*): ($($arg,)*)) -> Out {
                self(receiver, $($arg),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A);
impl_callable!(A, B);
impl_callable!(A, B, C2);
impl_callable!(A, B, C2, D);
impl_callable!(A, B, C2, D, E);
impl_callable!(A, B, C2, D, E, G);


/// Свободная функция, замыкание или функтор
pub fn create_free<F, Args>(queue: &TaskQueue, func: F, args: Args) -> Event<F::Output>
where
    F: Callable<Args>,
    Args: Send + 'static,
{
    let (task, event) = DeferredTask::new(move || func.call(args));
    queue.add_work(task);
    event
}

/// Метод, привязанный к разделяемому получателю
pub fn create_member<F, C, Args>(
    queue: &TaskQueue,
    method: F,
    receiver: Arc<C>,
    args: Args,
) -> Event<F::Output>
where
    F: MemberCallable<C, Args>,
    C: Send + Sync + 'static,
    Args: Send + 'static,
{
    let (task, event) = DeferredTask::new(move || method.call_on(&receiver, args));
    queue.add_work(task);
    event
}
