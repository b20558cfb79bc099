//! 链表上的位置引用
//!
//! 长度为 n 的链表有 n + 1 个合法位置：每个元素各一个，外加尾后位置。
//! 尾后位置可以作为插入点，但不能读取或删除。

use crate::error::{PreconditionViolation, Result};
use crate::list::{Link, List};

/// 只读游标
pub struct Cursor<'a, T> {
    current: Link<T>,
    index: usize,
    list: &'a List<T>,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {
    /// 当前位置的下标，尾后位置等于链表长度
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn current(&self) -> Option<&'a T> {
        self.current.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// 读取当前元素，尾后位置返回错误
    pub fn get(&self) -> Result<&'a T> {
        self.current()
            .ok_or(PreconditionViolation::EndPosition { operation: "get" })
    }

    /// 向后移动 `steps` 步，最远到尾后位置
    pub fn advance(&mut self, steps: usize) -> Result<()> {
        self.current = step_forward(self.list, self.current, self.index, steps)?;
        self.index += steps;
        Ok(())
    }

    /// 返回向后移动 `steps` 步的新游标
    pub fn advanced(mut self, steps: usize) -> Result<Self> {
        self.advance(steps)?;
        Ok(self)
    }
}

/// 可变游标，支持在当前位置插入、删除和拼接
pub struct CursorMut<'a, T> {
    current: Link<T>,
    index: usize,
    list: &'a mut List<T>,
}

impl<'a, T> CursorMut<'a, T> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn current(&mut self) -> Option<&mut T> {
        self.current.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    pub fn get(&self) -> Result<&T> {
        self.current
            .map(|node| unsafe { &(*node.as_ptr()).value })
            .ok_or(PreconditionViolation::EndPosition { operation: "get" })
    }

    pub fn advance(&mut self, steps: usize) -> Result<()> {
        self.current = step_forward(&*self.list, self.current, self.index, steps)?;
        self.index += steps;
        Ok(())
    }

    pub fn advanced(mut self, steps: usize) -> Result<Self> {
        self.advance(steps)?;
        Ok(self)
    }

    /// 以只读方式查看整个链表
    pub fn as_list(&self) -> &List<T> {
        &*self.list
    }

    /// 在当前位置之前插入，游标移到新元素上
    pub fn insert(&mut self, value: T) {
        let node = List::alloc(value);
        unsafe { self.list.link_before(self.current, node) };
        self.current = Some(node);
    }

    /// 用构造闭包在当前位置之前生成元素，游标移到新元素上
    pub fn emplace<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let node = List::alloc(make());
        unsafe {
            self.list.link_before(self.current, node);
            self.current = Some(node);
            &mut (*node.as_ptr()).value
        }
    }

    /// 删除当前元素，游标移到下一个位置
    pub fn erase(&mut self) -> Result<T> {
        let node = self
            .current
            .ok_or(PreconditionViolation::EndPosition { operation: "erase" })?;
        unsafe {
            self.current = (*node.as_ptr()).next;
            Ok(self.list.take(node))
        }
    }

    /// 把 other 的全部元素按原顺序接到当前位置之前，O(1)
    ///
    /// 游标仍指向原来的元素。
    pub fn splice(&mut self, other: &mut List<T>) {
        let moved = other.len();
        unsafe { self.list.splice_before(self.current, other) };
        self.index += moved;
        log::trace!("spliced {} elements before index {}", moved, self.index);
    }
}

impl<T: Clone> CursorMut<'_, T> {
    /// 插入 `count` 个 `value` 的副本，游标移到第一个新元素上
    pub fn insert_n(&mut self, count: usize, value: T) {
        for _ in 0..count {
            self.insert(value.clone());
        }
    }
}

fn step_forward<T>(list: &List<T>, from: Link<T>, index: usize, steps: usize) -> Result<Link<T>> {
    let remaining = list.len() - index;
    if steps > remaining {
        return Err(PreconditionViolation::AdvancePastEnd {
            requested: steps,
            remaining,
        });
    }
    let mut current = from;
    for _ in 0..steps {
        current = current.and_then(|node| unsafe { (*node.as_ptr()).next });
    }
    Ok(current)
}

impl<T> List<T> {
    /// 指向第一个元素的游标，空链表时即尾后位置
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor {
            current: self.head,
            index: 0,
            list: self,
        }
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            current: self.head,
            index: 0,
            list: self,
        }
    }

    /// 指向尾后位置的游标
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            current: None,
            index: self.len,
            list: self,
        }
    }
}
