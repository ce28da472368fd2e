//! 同步原语封装
//!
//! 统一使用 CriticalSectionRawMutex，
//! 以确保在 ESP32-S3 单核/双核环境以及主机线程下的正确性

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use portable_atomic::{AtomicBool, Ordering};

use super::bounded::{BoundedBuffer, MonitorBuffer};

// ===== 类型别名: 简化使用 =====

/// 临界区有界缓冲区 - 分离条件，定向唤醒
///
/// # Example
/// ```ignore
/// let buffer: CriticalBoundedBuffer<Command> = CriticalBoundedBuffer::new(8)?;
///
/// // 生产者 (异步，缓冲区满时等待)
/// buffer.push(Command::Start).await?;
///
/// // 消费者 (异步，缓冲区空时等待)
/// let cmd = buffer.pop().await?;
/// ```
pub type CriticalBoundedBuffer<T> = BoundedBuffer<CriticalSectionRawMutex, T>;

/// 临界区管程缓冲区 - 共享等待集，广播唤醒
pub type CriticalMonitorBuffer<T> = MonitorBuffer<CriticalSectionRawMutex, T>;

// ===== 原子标志 =====

/// 原子标志 - 最快的任务间通知
///
/// 比 Signal 更轻量，适用于简单的布尔状态通知
pub struct AtomicFlag {
    flag: AtomicBool,
}

impl AtomicFlag {
    /// 创建新的原子标志
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// 设置标志
    #[inline(always)]
    pub fn set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// 清除标志
    #[inline(always)]
    pub fn clear(&self) {
        self.flag.store(false, Ordering::Release);
    }

    /// 检查并清除标志 (test-and-clear)
    #[inline(always)]
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::AcqRel)
    }

    /// 检查标志 (不清除)
    #[inline(always)]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for AtomicFlag {
    fn default() -> Self {
        Self::new()
    }
}
