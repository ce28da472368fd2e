//! 固定容量环形槽位数组
//!
//! `BoundedBuffer` 的存储部分，本身不做同步，
//! 所有访问都必须在缓冲区锁内进行。
//! - `head`: 最旧元素所在槽位 (仅 `count > 0` 时有效)
//! - `tail`: 下一次写入的槽位
//! - `count`: 已占用槽位数, `0 <= count <= capacity`
//!
//! 容量在运行时确定且可以是任意正整数，因此下标推进使用取模而不是掩码。

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::BufferError;

/// 环形槽位数组
pub struct Slots<T> {
    /// 数据存储, `None` 表示空槽位
    slots: Box<[Option<T>]>,
    /// 读取位置
    head: usize,
    /// 写入位置
    tail: usize,
    /// 已占用数量
    count: usize,
}

impl<T> Slots<T> {
    /// 分配 `capacity` 个空槽位
    ///
    /// # Errors
    /// `capacity == 0` 时返回 `BufferError::InvalidArgument`
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidArgument);
        }
        Ok(Self::allocate(capacity))
    }

    /// 调用者保证 `capacity > 0`
    pub(crate) fn allocate(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Self {
            slots: slots.into_boxed_slice(),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// 槽位总数
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 当前元素数量
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// 读取位置
    #[inline(always)]
    pub fn head(&self) -> usize {
        self.head
    }

    /// 写入位置
    #[inline(always)]
    pub fn tail(&self) -> usize {
        self.tail
    }

    #[inline(always)]
    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }

    /// 写入 `tail` 槽位
    ///
    /// # Returns
    /// - `Ok(())`: 写入成功
    /// - `Err(item)`: 已满，元素原样退回 (从不覆盖)
    pub fn push_back(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }

        let slot = &mut self.slots[self.tail];
        crate::debug_assert_msg!(slot.is_none(), "slot {} written while occupied", self.tail);
        *slot = Some(item);

        self.tail = self.advance(self.tail);
        self.count += 1;
        Ok(())
    }

    /// 取出 `head` 槽位的元素 (最旧的元素)
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.slots[self.head].take();
        crate::debug_assert_msg!(item.is_some(), "slot {} read while empty", self.head);

        self.head = self.advance(self.head);
        self.count -= 1;
        item
    }
}
