//! 测试辅助: 计数 waker 与手动轮询

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

/// 记录被唤醒次数的 waker
#[derive(Clone)]
pub struct CountingWaker {
    hits: Arc<Hits>,
}

struct Hits(AtomicUsize);

impl Wake for Hits {
    fn wake(self: Arc<Self>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl CountingWaker {
    pub fn new() -> Self {
        Self {
            hits: Arc::new(Hits(AtomicUsize::new(0))),
        }
    }

    pub fn waker(&self) -> Waker {
        Waker::from(self.hits.clone())
    }

    pub fn count(&self) -> usize {
        self.hits.0.load(Ordering::SeqCst)
    }
}

/// 用给定 waker 轮询一次
pub fn poll_once<F: Future + Unpin>(fut: &mut F, waker: &CountingWaker) -> Poll<F::Output> {
    let waker = waker.waker();
    let mut cx = Context::from_waker(&waker);
    Pin::new(fut).poll(&mut cx)
}
