//! pcbuffer - 有界阻塞生产者/消费者缓冲区
//!
//! 本库提供以下核心功能:
//! - 固定容量的环形 FIFO 缓冲区 (`BoundedBuffer`)
//! - 两种等待策略: 分离条件 (定向唤醒) 与共享等待集 (广播唤醒)
//! - 可取消的等待: 丢弃 future 或触发 `Interrupt`
//! - 条件编译日志系统
//!
//! 默认 `no_std` + `alloc`，可运行在 Embassy 执行器上；
//! 启用 `std` feature 后阻塞接口会挂起操作系统线程。
//!
//! # 示例
//!
//! ```rust,ignore
//! use pcbuffer::{CriticalBoundedBuffer, Interrupt};
//!
//! let buffer: CriticalBoundedBuffer<u32> = CriticalBoundedBuffer::new(4)?;
//! let irq = Interrupt::new();
//!
//! // 生产者 (异步)
//! buffer.push(42).await?;
//!
//! // 消费者 (阻塞线程，可被 irq 中断)
//! let value = buffer.blocking_pop(&irq)?;
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod error;
pub mod sync;
pub mod util;

// ===== 重导出常用类型 =====
pub use error::{BufferError, PushError};
pub use sync::bounded::{BoundedBuffer, MonitorBuffer, Pop, Push};
pub use sync::interrupt::Interrupt;
pub use sync::primitives::{CriticalBoundedBuffer, CriticalMonitorBuffer};
pub use sync::signaling::{Condition, SharedWaitSet, Signaling, SplitConditions};

// ===== 版本信息 =====
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 库配置常量
pub mod config {
    /// `Default` 构造的缓冲区槽位数
    pub const DEFAULT_CAPACITY: usize = 8;
}
