//! 缓冲区错误类型

use core::fmt;

/// 缓冲区错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "log-defmt", derive(defmt::Format))]
pub enum BufferError {
    /// 无效参数 (容量为 0)
    InvalidArgument,
    /// 等待期间被中断，缓冲区状态未改变
    Interrupted,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InvalidArgument => f.write_str("capacity must be at least 1"),
            BufferError::Interrupted => f.write_str("wait interrupted"),
        }
    }
}

/// `push` 失败: 错误原因加上未能入队的元素
///
/// 元素所有权交还给调用者，由调用者决定重试还是丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushError<T> {
    kind: BufferError,
    item: T,
}

impl<T> PushError<T> {
    pub(crate) const fn interrupted(item: T) -> Self {
        Self {
            kind: BufferError::Interrupted,
            item,
        }
    }

    /// 失败原因
    #[inline]
    pub fn kind(&self) -> BufferError {
        self.kind
    }

    /// 取回未入队的元素
    #[inline]
    pub fn into_item(self) -> T {
        self.item
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "push rejected: {}", self.kind)
    }
}

impl<T> From<PushError<T>> for BufferError {
    fn from(err: PushError<T>) -> Self {
        err.kind
    }
}
