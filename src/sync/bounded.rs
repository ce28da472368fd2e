//! 有界阻塞缓冲区
//!
//! 固定容量的 FIFO 队列，任意数量的生产者和消费者共享。
//! 特点:
//! - 单锁: 槽位数组、`head`、`tail`、`count` 只在同一把锁内整体更新
//! - 两个逻辑条件 ("未满" / "未空")，等待策略由 `Signaling` 决定
//! - 满时 push 等待，空时 pop 等待，从不覆盖、从不丢失
//! - 每次被唤醒后都重新检查条件 (虚假唤醒、被其他等待者抢先)
//! - 可取消: 丢弃 future，或触发绑定的 `Interrupt`；取消时缓冲区状态不变
//!
//! # 状态机
//!
//! ```text
//!          push            push
//! EMPTY ---------> PARTIAL ---------> FULL
//!       <---------         <---------
//!          pop             pop
//! ```
//!
//! EMPTY 时 pop 等待，FULL 时 push 等待；没有终止状态，缓冲区可无限复用。
//!
//! # Example
//! ```ignore
//! static BUFFER: StaticCell<CriticalBoundedBuffer<SensorData>> = StaticCell::new();
//! let buffer = BUFFER.init(CriticalBoundedBuffer::new(16)?);
//!
//! // 生产者任务
//! buffer.push(sample).await?;
//!
//! // 消费者任务
//! let sample = buffer.pop().await?;
//! ```

use core::cell::RefCell;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::interrupt::Interrupt;
use super::signaling::{Condition, SharedWaitSet, Signaling, SplitConditions};
use super::slots::Slots;
use super::waitqueue::Ticket;
use crate::config::DEFAULT_CAPACITY;
use crate::error::{BufferError, PushError};

#[cfg(any(test, feature = "std"))]
use super::park::block_on;
#[cfg(not(any(test, feature = "std")))]
use embassy_futures::block_on;

/// 锁保护的全部共享状态
struct State<T, S> {
    slots: Slots<T>,
    signals: S,
}

/// 有界阻塞缓冲区
///
/// # Type Parameters
/// * `M` - 锁实现 (通常是 `CriticalSectionRawMutex`)
/// * `T` - 元素类型, 按值移动进出缓冲区
/// * `S` - 等待策略, 默认 `SplitConditions`
///
/// 缓冲区在 `push` 完成到对应 `pop` 之间独占元素，
/// 销毁时仍在缓冲区中的元素随之释放。
pub struct BoundedBuffer<M: RawMutex, T, S: Signaling = SplitConditions> {
    state: Mutex<M, RefCell<State<T, S>>>,
    /// 构造后不可变，读取无需加锁
    capacity: usize,
}

/// 共享等待集 (经典管程) 版本
pub type MonitorBuffer<M, T> = BoundedBuffer<M, T, SharedWaitSet>;

impl<M: RawMutex, T, S: Signaling> BoundedBuffer<M, T, S> {
    /// 创建容量为 `capacity` 的空缓冲区
    ///
    /// # Errors
    /// `capacity == 0` 时返回 `BufferError::InvalidArgument`
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        let slots = Slots::new(capacity)?;
        crate::log_debug!("bounded buffer created: capacity={}", capacity);
        Ok(Self::from_slots(slots))
    }

    fn from_slots(slots: Slots<T>) -> Self {
        let capacity = slots.capacity();
        Self {
            state: Mutex::new(RefCell::new(State {
                slots,
                signals: S::default(),
            })),
            capacity,
        }
    }

    /// 在锁内访问共享状态
    ///
    /// 闭包返回 (或 panic 展开) 时锁自动释放。
    #[inline]
    fn with_state<R>(&self, f: impl FnOnce(&mut State<T, S>) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// 缓冲区容量
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 当前元素数量 (快照)
    pub fn len(&self) -> usize {
        self.with_state(|state| state.slots.len())
    }

    /// 是否为空 (快照)
    pub fn is_empty(&self) -> bool {
        self.with_state(|state| state.slots.is_empty())
    }

    /// 是否已满 (快照)
    pub fn is_full(&self) -> bool {
        self.with_state(|state| state.slots.is_full())
    }

    /// 放入一个元素，缓冲区满时等待
    ///
    /// 丢弃返回的 future 即取消等待，元素随 future 一起释放，缓冲区不变。
    /// 未绑定中断源，结果总是 `Ok`。
    pub fn push(&self, item: T) -> Push<'_, M, T, S> {
        Push {
            buffer: self,
            item: Some(item),
            ticket: None,
            interrupt: None,
        }
    }

    /// 放入一个元素，等待期间可被 `irq` 中断
    ///
    /// # Errors
    /// 等待空槽位时 `irq` 被触发，返回 `PushError`，元素原样交还
    pub fn push_interruptible<'a>(&'a self, item: T, irq: &'a Interrupt) -> Push<'a, M, T, S> {
        Push {
            buffer: self,
            item: Some(item),
            ticket: None,
            interrupt: Some(irq),
        }
    }

    /// 取出最旧的元素，缓冲区空时等待
    ///
    /// 丢弃返回的 future 即取消等待，缓冲区不变。
    /// 未绑定中断源，结果总是 `Ok`。
    pub fn pop(&self) -> Pop<'_, M, T, S> {
        Pop {
            buffer: self,
            ticket: None,
            interrupt: None,
        }
    }

    /// 取出最旧的元素，等待期间可被 `irq` 中断
    ///
    /// # Errors
    /// 等待数据时 `irq` 被触发，返回 `BufferError::Interrupted`
    pub fn pop_interruptible<'a>(&'a self, irq: &'a Interrupt) -> Pop<'a, M, T, S> {
        Pop {
            buffer: self,
            ticket: None,
            interrupt: Some(irq),
        }
    }

    /// 阻塞当前线程直到元素放入缓冲区或 `irq` 被触发
    pub fn blocking_push(&self, item: T, irq: &Interrupt) -> Result<(), PushError<T>> {
        block_on(self.push_interruptible(item, irq))
    }

    /// 阻塞当前线程直到取出元素或 `irq` 被触发
    pub fn blocking_pop(&self, irq: &Interrupt) -> Result<T, BufferError> {
        block_on(self.pop_interruptible(irq))
    }

    fn poll_push(
        &self,
        item: &mut Option<T>,
        ticket: &mut Option<Ticket>,
        irq: Option<&Interrupt>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<(), PushError<T>>> {
        // 已完成 (无论成功或被中断) 的 future 再次被轮询: 不触碰缓冲区
        let Some(value) = item.take() else {
            return Poll::Ready(Ok(()));
        };

        if let Some(irq) = irq {
            irq.register(cx.waker());
        }

        self.with_state(|state| {
            let value = match state.slots.push_back(value) {
                Ok(()) => {
                    if let Some(t) = ticket.take() {
                        state.signals.queue(Condition::NotFull).remove(t);
                    }
                    state.signals.signal(Condition::NotEmpty);
                    return Poll::Ready(Ok(()));
                }
                Err(value) => value,
            };

            if irq.is_some_and(Interrupt::take) {
                Self::abandon(state, ticket, Condition::NotFull);
                crate::log_debug!("push interrupted while full");
                return Poll::Ready(Err(PushError::interrupted(value)));
            }

            crate::log_trace!("push waiting: buffer full ({})", state.slots.capacity());
            *item = Some(value);
            state.signals.queue(Condition::NotFull).register(ticket, cx.waker());
            Poll::Pending
        })
    }

    fn poll_pop(
        &self,
        ticket: &mut Option<Ticket>,
        irq: Option<&Interrupt>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<T, BufferError>> {
        if let Some(irq) = irq {
            irq.register(cx.waker());
        }

        self.with_state(|state| {
            if let Some(value) = state.slots.pop_front() {
                if let Some(t) = ticket.take() {
                    state.signals.queue(Condition::NotEmpty).remove(t);
                }
                state.signals.signal(Condition::NotFull);
                return Poll::Ready(Ok(value));
            }

            if irq.is_some_and(Interrupt::take) {
                Self::abandon(state, ticket, Condition::NotEmpty);
                crate::log_debug!("pop interrupted while empty");
                return Poll::Ready(Err(BufferError::Interrupted));
            }

            crate::log_trace!("pop waiting: buffer empty");
            state.signals.queue(Condition::NotEmpty).register(ticket, cx.waker());
            Poll::Pending
        })
    }

    /// 等待者在未完成时离开 (中断或 future 被丢弃)
    fn abandon(state: &mut State<T, S>, ticket: &mut Option<Ticket>, cond: Condition) {
        if let Some(t) = ticket.take() {
            if state.signals.queue(cond).remove(t) {
                state.signals.forward(cond);
            }
        }
    }

    fn cancel(&self, ticket: &mut Option<Ticket>, cond: Condition) {
        if ticket.is_some() {
            self.with_state(|state| Self::abandon(state, ticket, cond));
        }
    }
}

impl<M: RawMutex, T, S: Signaling> Default for BoundedBuffer<M, T, S> {
    /// 容量为 `config::DEFAULT_CAPACITY` 的空缓冲区
    fn default() -> Self {
        Self::from_slots(Slots::allocate(DEFAULT_CAPACITY))
    }
}

/// `push` 返回的 future
///
/// 完成后再次轮询返回 `Ready(Ok(()))` 且不修改缓冲区；
/// 元素已在第一次完成时交出 (放入缓冲区或随 `PushError` 交还)。
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Push<'a, M: RawMutex, T, S: Signaling> {
    buffer: &'a BoundedBuffer<M, T, S>,
    item: Option<T>,
    ticket: Option<Ticket>,
    interrupt: Option<&'a Interrupt>,
}

impl<'a, M: RawMutex, T, S: Signaling> Future for Push<'a, M, T, S> {
    type Output = Result<(), PushError<T>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        this.buffer
            .poll_push(&mut this.item, &mut this.ticket, this.interrupt, cx)
    }
}

impl<'a, M: RawMutex, T, S: Signaling> Drop for Push<'a, M, T, S> {
    fn drop(&mut self) {
        self.buffer.cancel(&mut self.ticket, Condition::NotFull);
    }
}

// 不做结构性 pin 投影
impl<'a, M: RawMutex, T, S: Signaling> Unpin for Push<'a, M, T, S> {}

/// `pop` 返回的 future
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Pop<'a, M: RawMutex, T, S: Signaling> {
    buffer: &'a BoundedBuffer<M, T, S>,
    ticket: Option<Ticket>,
    interrupt: Option<&'a Interrupt>,
}

impl<'a, M: RawMutex, T, S: Signaling> Future for Pop<'a, M, T, S> {
    type Output = Result<T, BufferError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        this.buffer.poll_pop(&mut this.ticket, this.interrupt, cx)
    }
}

impl<'a, M: RawMutex, T, S: Signaling> Drop for Pop<'a, M, T, S> {
    fn drop(&mut self) {
        self.buffer.cancel(&mut self.ticket, Condition::NotEmpty);
    }
}
