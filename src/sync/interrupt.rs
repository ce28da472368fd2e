//! 等待中断源
//!
//! Rust 线程 / Embassy 任务无法被外部强行打断，
//! 生产者或消费者把一个 `Interrupt` 绑定到自己的等待操作上，
//! 其他任务调用 `interrupt()` 即可让正在等待的 push/pop 返回 `Interrupted`。
//!
//! 语义:
//! - 条件已经满足的操作不需要等待，正常完成，中断标志保持置位
//! - 需要等待 (或正在等待) 的操作消费中断标志并返回错误，缓冲区状态不变
//! - 一个 `Interrupt` 同一时刻只服务一个等待者 (通常每个线程/任务一个)

use core::cell::RefCell;
use core::task::Waker;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::waitqueue::WakerRegistration;

use super::primitives::AtomicFlag;

/// 可跨线程触发的等待中断源
///
/// # Example
/// ```ignore
/// static STOP: Interrupt = Interrupt::new();
///
/// // 消费者线程
/// match BUFFER.blocking_pop(&STOP) {
///     Ok(item) => handle(item),
///     Err(BufferError::Interrupted) => return,
///     Err(e) => log_error!("pop failed: {}", e),
/// }
///
/// // 控制线程
/// STOP.interrupt();
/// ```
pub struct Interrupt {
    raised: AtomicFlag,
    waker: Mutex<CriticalSectionRawMutex, RefCell<WakerRegistration>>,
}

impl Interrupt {
    /// 创建未触发的中断源
    pub const fn new() -> Self {
        Self {
            raised: AtomicFlag::new(),
            waker: Mutex::new(RefCell::new(WakerRegistration::new())),
        }
    }

    /// 触发中断并唤醒绑定的等待者
    pub fn interrupt(&self) {
        self.raised.set();
        self.waker.lock(|w| w.borrow_mut().wake());
    }

    /// 是否有尚未被消费的中断
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.raised.is_set()
    }

    /// 丢弃尚未被消费的中断
    #[inline]
    pub fn clear(&self) {
        self.raised.clear();
    }

    /// 绑定等待者的 waker，必须在检查标志之前调用
    pub(crate) fn register(&self, waker: &Waker) {
        self.waker.lock(|w| w.borrow_mut().register(waker));
    }

    /// 检查并消费中断
    #[inline]
    pub(crate) fn take(&self) -> bool {
        self.raised.take()
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}
