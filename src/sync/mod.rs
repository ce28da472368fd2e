//! 同步原语模块
//!
//! 提供线程/任务安全的有界缓冲区，基于 embassy-sync 的阻塞互斥锁:
//! - `BoundedBuffer`: 有界阻塞 FIFO 缓冲区
//! - `Signaling`: 等待策略 (分离条件 / 共享等待集)
//! - `Interrupt`: 等待中断源
//! - `CriticalBoundedBuffer` / `CriticalMonitorBuffer`: 固定使用临界区锁的别名

pub mod bounded;
pub mod interrupt;
pub mod primitives;
pub mod signaling;
pub mod slots;
pub mod waitqueue;

#[cfg(any(test, feature = "std"))]
pub mod park;

#[cfg(test)]
mod testing;

pub use bounded::{BoundedBuffer, MonitorBuffer, Pop, Push};
pub use interrupt::Interrupt;
pub use primitives::{AtomicFlag, CriticalBoundedBuffer, CriticalMonitorBuffer};
pub use signaling::{Condition, SharedWaitSet, Signaling, SplitConditions};
