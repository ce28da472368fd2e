//! 线程挂起式执行器 (feature = "std")
//!
//! 阻塞接口在主机线程上使用: 条件不满足时线程 park，
//! 被 waker 唤醒后 unpark 并重新轮询。
//! 没有 `std` 时阻塞接口退回 `embassy_futures::block_on` (忙轮询)。

use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};
use std::thread::{self, Thread};

/// 唤醒时 unpark 目标线程
struct ThreadUnparker {
    thread: Thread,
}

impl Wake for ThreadUnparker {
    fn wake(self: Arc<Self>) {
        self.thread.unpark();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.thread.unpark();
    }
}

/// 在当前线程上运行 future 直到完成
///
/// park 可能虚假返回，循环重新轮询即可。
pub fn block_on<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let waker = Waker::from(Arc::new(ThreadUnparker {
        thread: thread::current(),
    }));
    let mut cx = Context::from_waker(&waker);

    loop {
        if let Poll::Ready(output) = fut.as_mut().poll(&mut cx) {
            return output;
        }
        thread::park();
    }
}
