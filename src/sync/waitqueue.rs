//! 等待队列 - 一个逻辑等待条件
//!
//! 记录因某个条件 ("未满" / "未空") 而挂起的等待者 (waker)。
//! 与 embassy-sync 的 `MultiWakerRegistration` 不同，这里的每个等待者都有
//! 自己的 `Ticket`，因此可以:
//! - `notify_one`: 只唤醒一个尚未被通知的等待者 (按登记顺序)
//! - `notify_all`: 唤醒全部等待者
//! - `remove`: 等待者完成或被取消时退出队列，并告知它是否持有未消费的通知
//!
//! 队列只在缓冲区锁内访问，不做额外同步。

use alloc::vec::Vec;
use core::task::Waker;

/// 等待者在队列中的身份
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

struct Waiter {
    ticket: Ticket,
    waker: Waker,
    /// 已被唤醒但尚未重新检查条件
    notified: bool,
}

/// 单个等待条件的等待者集合
pub struct WaitQueue {
    waiters: Vec<Waiter>,
    next_ticket: u64,
}

impl WaitQueue {
    /// 创建空队列
    pub const fn new() -> Self {
        Self {
            waiters: Vec::new(),
            next_ticket: 0,
        }
    }

    /// 当前挂起的等待者数量
    #[inline]
    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }

    fn position(&self, ticket: Ticket) -> Option<usize> {
        self.waiters.iter().position(|w| w.ticket == ticket)
    }

    /// 分配一个不与在队等待者冲突的票据
    fn allocate(&mut self) -> Ticket {
        loop {
            let candidate = Ticket(self.next_ticket);
            self.next_ticket = self.next_ticket.wrapping_add(1);
            if self.position(candidate).is_none() {
                return candidate;
            }
        }
    }

    /// 登记 (或重新登记) 一个等待者
    ///
    /// `ticket` 为 `None` 时分配新票据并排到队尾；
    /// 已有票据时刷新 waker 并清除通知标志 (通知已被本次条件检查消费)。
    pub fn register(&mut self, ticket: &mut Option<Ticket>, waker: &Waker) {
        if let Some(existing) = *ticket {
            if let Some(index) = self.position(existing) {
                let waiter = &mut self.waiters[index];
                if !waiter.waker.will_wake(waker) {
                    waiter.waker = waker.clone();
                }
                waiter.notified = false;
                return;
            }
        }

        let fresh = self.allocate();
        self.waiters.push(Waiter {
            ticket: fresh,
            waker: waker.clone(),
            notified: false,
        });
        *ticket = Some(fresh);
    }

    /// 唤醒最早登记且尚未被通知的等待者
    ///
    /// # Returns
    /// 是否有等待者被唤醒
    pub fn notify_one(&mut self) -> bool {
        match self.waiters.iter_mut().find(|w| !w.notified) {
            Some(waiter) => {
                waiter.notified = true;
                waiter.waker.wake_by_ref();
                true
            }
            None => false,
        }
    }

    /// 唤醒全部等待者
    ///
    /// # Returns
    /// 被唤醒的数量
    pub fn notify_all(&mut self) -> usize {
        for waiter in self.waiters.iter_mut() {
            waiter.notified = true;
            waiter.waker.wake_by_ref();
        }
        self.waiters.len()
    }

    /// 移除等待者
    ///
    /// # Returns
    /// 该等待者是否持有未消费的通知 (取消时需要转交给下一个等待者)
    pub fn remove(&mut self, ticket: Ticket) -> bool {
        match self.position(ticket) {
            Some(index) => self.waiters.remove(index).notified,
            None => false,
        }
    }
}

impl Default for WaitQueue {
    fn default() -> Self {
        Self::new()
    }
}
