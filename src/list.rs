use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::error::{PreconditionViolation, Result};

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// 双向链表的节点
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Link<T>,
    pub(crate) next: Link<T>,
}

/// 使用裸指针实现的双向链表
///
/// 两端的插入和删除都是 O(1)，借助游标（见 [`crate::cursor`]）可以在任意位置
/// 以 O(1) 插入或删除。不支持按下标随机访问。
pub struct List<T> {
    pub(crate) head: Link<T>,
    pub(crate) tail: Link<T>,
    pub(crate) len: usize,
    /// 使用 PhantomData 标记 T 的所有权
    _marker: PhantomData<Box<Node<T>>>,
}

// 与 Box<Node<T>> 一样，线程安全性只取决于 T
unsafe impl<T: Send> Send for List<T> {}
unsafe impl<T: Sync> Sync for List<T> {}

impl<T> List<T> {
    /// 创建一个新的空链表
    pub const fn new() -> Self {
        List {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// 检查链表是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 返回链表长度
    pub fn len(&self) -> usize {
        self.len
    }

    /// 理论上能容纳的最大元素个数，取决于平台的指针宽度
    pub fn max_len(&self) -> usize {
        isize::MAX as usize / mem::size_of::<Node<T>>()
    }

    /// 在链表头部插入元素
    pub fn push_front(&mut self, value: T) {
        let node = Self::alloc(value);
        unsafe { self.link_before(self.head, node) }
    }

    /// 在链表尾部插入元素，O(1) 操作
    pub fn push_back(&mut self, value: T) {
        let node = Self::alloc(value);
        unsafe { self.link_before(None, node) }
    }

    /// 用构造闭包直接生成头部元素，返回新元素的引用
    pub fn emplace_front<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let node = Self::alloc(make());
        unsafe {
            self.link_before(self.head, node);
            &mut (*node.as_ptr()).value
        }
    }

    /// 用构造闭包直接生成尾部元素，返回新元素的引用
    pub fn emplace_back<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let node = Self::alloc(make());
        unsafe {
            self.link_before(None, node);
            &mut (*node.as_ptr()).value
        }
    }

    /// 删除链表头部元素
    pub fn pop_front(&mut self) -> Result<T> {
        match self.head {
            Some(head) => Ok(unsafe { self.take(head) }),
            None => Err(PreconditionViolation::EmptyList {
                operation: "pop_front",
            }),
        }
    }

    /// 删除链表尾部元素
    pub fn pop_back(&mut self) -> Result<T> {
        match self.tail {
            Some(tail) => Ok(unsafe { self.take(tail) }),
            None => Err(PreconditionViolation::EmptyList {
                operation: "pop_back",
            }),
        }
    }

    /// 获取头部元素的引用
    pub fn front(&self) -> Result<&T> {
        self.head
            .map(|head| unsafe { &(*head.as_ptr()).value })
            .ok_or(PreconditionViolation::EmptyList { operation: "front" })
    }

    /// 获取尾部元素的引用
    pub fn back(&self) -> Result<&T> {
        self.tail
            .map(|tail| unsafe { &(*tail.as_ptr()).value })
            .ok_or(PreconditionViolation::EmptyList { operation: "back" })
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.head
            .map(|head| unsafe { &mut (*head.as_ptr()).value })
            .ok_or(PreconditionViolation::EmptyList {
                operation: "front_mut",
            })
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.tail
            .map(|tail| unsafe { &mut (*tail.as_ptr()).value })
            .ok_or(PreconditionViolation::EmptyList {
                operation: "back_mut",
            })
    }

    /// 清空链表，释放所有节点
    pub fn clear(&mut self) {
        while self.pop_front().is_ok() {}
    }

    /// 调整长度：过长则从尾部截断，过短则用 `fill` 生成的元素补齐
    pub fn resize_with<F>(&mut self, new_len: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        while self.len > new_len {
            let _ = self.pop_back();
        }
        while self.len < new_len {
            self.push_back(fill());
        }
    }

    /// O(1) 交换两个链表的全部内容
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// 把 other 的全部节点接到尾部，other 变为空
    pub fn append(&mut self, other: &mut Self) {
        unsafe { self.splice_before(None, other) }
    }

    /// 从下标 `at` 处一分为二，返回后半段
    pub fn split_off(&mut self, at: usize) -> Result<Self> {
        if at > self.len {
            return Err(PreconditionViolation::AdvancePastEnd {
                requested: at,
                remaining: self.len,
            });
        }
        let node = self.node_at(at);
        Ok(unsafe { self.split_before(node, at) })
    }

    /// 获取迭代器
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            _marker: PhantomData,
        }
    }

    /// 获取可变迭代器
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            head: self.head,
            tail: self.tail,
            len: self.len,
            _marker: PhantomData,
        }
    }

    pub(crate) fn alloc(value: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            value,
            prev: None,
            next: None,
        });
        unsafe { NonNull::new_unchecked(Box::into_raw(node)) }
    }

    /// 从头部走 `index` 步；`index == len` 时得到尾后位置 None
    pub(crate) fn node_at(&self, index: usize) -> Link<T> {
        let mut current = self.head;
        for _ in 0..index {
            current = current.and_then(|node| unsafe { (*node.as_ptr()).next });
        }
        current
    }

    /// 把游离节点链接到 `at` 之前，`at` 为 None 表示尾后位置
    ///
    /// `at` 必须属于本链表，`node` 不能属于任何链表。
    pub(crate) unsafe fn link_before(&mut self, at: Link<T>, node: NonNull<Node<T>>) {
        unsafe {
            let prev = match at {
                Some(at) => (*at.as_ptr()).prev,
                None => self.tail,
            };
            (*node.as_ptr()).prev = prev;
            (*node.as_ptr()).next = at;
            match prev {
                Some(prev) => (*prev.as_ptr()).next = Some(node),
                None => self.head = Some(node),
            }
            match at {
                Some(at) => (*at.as_ptr()).prev = Some(node),
                None => self.tail = Some(node),
            }
        }
        self.len += 1;
    }

    /// 把节点从链表中摘下，但不释放
    pub(crate) unsafe fn unlink(&mut self, node: NonNull<Node<T>>) {
        unsafe {
            let prev = (*node.as_ptr()).prev;
            let next = (*node.as_ptr()).next;
            match prev {
                Some(prev) => (*prev.as_ptr()).next = next,
                None => self.head = next,
            }
            match next {
                Some(next) => (*next.as_ptr()).prev = prev,
                None => self.tail = prev,
            }
            (*node.as_ptr()).prev = None;
            (*node.as_ptr()).next = None;
        }
        self.len -= 1;
    }

    /// 摘下节点并转换回 Box，取出其中的值
    pub(crate) unsafe fn take(&mut self, node: NonNull<Node<T>>) -> T {
        unsafe {
            self.unlink(node);
            Box::from_raw(node.as_ptr()).value
        }
    }

    /// 把 other 的整段节点接到 `at` 之前，只修改首尾四个指针
    pub(crate) unsafe fn splice_before(&mut self, at: Link<T>, other: &mut Self) {
        let (Some(first), Some(last)) = (other.head.take(), other.tail.take()) else {
            return;
        };
        let moved = mem::replace(&mut other.len, 0);
        unsafe {
            let prev = match at {
                Some(at) => (*at.as_ptr()).prev,
                None => self.tail,
            };
            (*first.as_ptr()).prev = prev;
            (*last.as_ptr()).next = at;
            match prev {
                Some(prev) => (*prev.as_ptr()).next = Some(first),
                None => self.head = Some(first),
            }
            match at {
                Some(at) => (*at.as_ptr()).prev = Some(last),
                None => self.tail = Some(last),
            }
        }
        self.len += moved;
    }

    /// 从 `node`（位于下标 `index`）处断开，返回包含 `node` 及其之后节点的链表
    pub(crate) unsafe fn split_before(&mut self, node: Link<T>, index: usize) -> Self {
        let Some(first) = node else {
            return Self::new();
        };
        let mut rest = Self::new();
        unsafe {
            let prev = (*first.as_ptr()).prev;
            match prev {
                Some(prev) => (*prev.as_ptr()).next = None,
                None => self.head = None,
            }
            (*first.as_ptr()).prev = None;
            rest.head = Some(first);
            rest.tail = self.tail;
            self.tail = prev;
        }
        rest.len = self.len - index;
        self.len = index;
        rest
    }
}

impl<T: PartialEq> List<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|item| item == value)
    }
}

impl<T: Default> List<T> {
    /// 调整长度，不足的部分用默认值补齐
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T: Clone> List<T> {
    /// 用 `count` 个 `value` 的副本替换全部内容
    pub fn assign(&mut self, count: usize, value: T) {
        self.clear();
        for _ in 0..count {
            self.push_back(value.clone());
        }
    }
}

// 迭代器实现
pub struct Iter<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.len -= 1;
            self.head = node.next;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.len -= 1;
            self.tail = node.prev;
            &node.value
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

// 可变迭代器实现
pub struct IterMut<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| unsafe {
            let node = &mut *node.as_ptr();
            self.len -= 1;
            self.head = node.next;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| unsafe {
            let node = &mut *node.as_ptr();
            self.len -= 1;
            self.tail = node.prev;
            &mut node.value
        })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

// 消费型迭代器
pub struct IntoIter<T>(List<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

// 从向量创建链表
impl<T> From<Vec<T>> for List<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

// 深拷贝：每个元素各克隆一次
impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

// Drop 实现，确保所有节点被正确释放
impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

// 按元素自身的 Display 输出，例如 [1.mp3, 2.mp3]
impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(item, f)?;
        }
        f.write_str("]")
    }
}
