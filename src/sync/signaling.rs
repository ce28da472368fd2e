//! 等待策略
//!
//! 缓冲区只有一把锁，但有两个逻辑条件:
//! - `NotFull`: 生产者等待空槽位
//! - `NotEmpty`: 消费者等待数据
//!
//! 两种实现方式:
//! - `SplitConditions` (默认): 两个独立等待队列，push/pop 只定向唤醒对方队列中的一个等待者
//! - `SharedWaitSet`: 生产者和消费者共用一个等待集 (经典管程)，无法区分等待者在等哪个条件，
//!   所以每次状态变化都广播唤醒全部等待者，由它们各自重新检查条件
//!
//! 两者对外行为和不变量完全相同，只是唤醒开销不同。

use super::waitqueue::WaitQueue;

/// 逻辑等待条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "log-defmt", derive(defmt::Format))]
pub enum Condition {
    /// 有空槽位 (生产者等待)
    NotFull,
    /// 有数据 (消费者等待)
    NotEmpty,
}

/// 等待策略: 决定等待者挂在哪个队列上，以及状态变化时唤醒谁
///
/// 所有方法都在缓冲区锁内调用。
pub trait Signaling: Default {
    /// 等待 `cond` 的等待者所在队列
    fn queue(&mut self, cond: Condition) -> &mut WaitQueue;

    /// `cond` 变为成立 (push 之后 `NotEmpty`，pop 之后 `NotFull`)
    fn signal(&mut self, cond: Condition);

    /// 一个已被通知的等待者未消费通知就被取消，把通知转交出去
    fn forward(&mut self, cond: Condition);
}

/// 分离条件: "未满" 和 "未空" 各一个队列，定向单个唤醒
#[derive(Default)]
pub struct SplitConditions {
    not_full: WaitQueue,
    not_empty: WaitQueue,
}

impl Signaling for SplitConditions {
    #[inline]
    fn queue(&mut self, cond: Condition) -> &mut WaitQueue {
        match cond {
            Condition::NotFull => &mut self.not_full,
            Condition::NotEmpty => &mut self.not_empty,
        }
    }

    #[inline]
    fn signal(&mut self, cond: Condition) {
        self.queue(cond).notify_one();
    }

    #[inline]
    fn forward(&mut self, cond: Condition) {
        // 被取消者持有的唤醒交给下一个未通知的等待者
        self.queue(cond).notify_one();
    }
}

/// 共享等待集: 单一队列，每次状态变化广播唤醒
#[derive(Default)]
pub struct SharedWaitSet {
    waiters: WaitQueue,
}

impl Signaling for SharedWaitSet {
    #[inline]
    fn queue(&mut self, _cond: Condition) -> &mut WaitQueue {
        &mut self.waiters
    }

    #[inline]
    fn signal(&mut self, _cond: Condition) {
        self.waiters.notify_all();
    }

    #[inline]
    fn forward(&mut self, _cond: Condition) {
        // 广播时其余等待者已经一并被通知
    }
}
