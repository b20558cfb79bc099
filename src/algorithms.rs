//! 整表操作：排序、合并、去重、反转和按条件删除
//!
//! 这些操作只修改节点之间的指针，不移动也不复制元素。

use std::cmp::Ordering;
use std::mem;

use crate::list::List;

impl<T> List<T> {
    /// 稳定排序，O(n log n)
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.merge_sort(&mut compare);
    }

    /// 把已排序的 other 合并进已排序的本链表，other 变为空
    ///
    /// 相等的元素中，本链表原有的排在 other 的前面。
    pub fn merge_by<F>(&mut self, other: &mut Self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        log::trace!("merging {} elements into {}", other.len(), self.len());
        self.merge_with(other, &mut compare);
    }

    /// 删除相邻的重复元素，返回删除的个数
    ///
    /// `same` 的第一个参数是保留下来的元素，第二个是待检查的后继。
    pub fn unique_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let Some(mut kept) = self.head else {
            return 0;
        };
        let mut removed = 0;
        let mut current = unsafe { (*kept.as_ptr()).next };

        while let Some(node) = current {
            unsafe {
                current = (*node.as_ptr()).next;
                if same(&(*kept.as_ptr()).value, &(*node.as_ptr()).value) {
                    drop(self.take(node));
                    removed += 1;
                } else {
                    kept = node;
                }
            }
        }
        removed
    }

    /// 反转链表，O(n)
    pub fn reverse(&mut self) {
        let mut current = self.head;

        while let Some(node) = current {
            unsafe {
                let node = &mut *node.as_ptr();
                // 交换前后指针，原来的 next 现在存放在 prev 中
                mem::swap(&mut node.prev, &mut node.next);
                current = node.prev;
            }
        }

        mem::swap(&mut self.head, &mut self.tail);
    }

    /// 按顺序对每个元素调用一次 `predicate`，删除返回 true 的元素
    pub fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut current = self.head;

        while let Some(node) = current {
            unsafe {
                current = (*node.as_ptr()).next;
                if predicate(&(*node.as_ptr()).value) {
                    drop(self.take(node));
                    removed += 1;
                }
            }
        }
        removed
    }

    fn merge_sort<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 {
            return;
        }
        let mid = self.len / 2;
        let node = self.node_at(mid);
        let mut rest = unsafe { self.split_before(node, mid) };

        self.merge_sort(compare);
        rest.merge_sort(compare);
        self.merge_with(&mut rest, compare);
    }

    fn merge_with<F>(&mut self, other: &mut Self, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut current = self.head;

        while let Some(incoming) = other.head {
            // 跳过所有不大于 incoming 的元素
            while let Some(node) = current {
                let ordering =
                    unsafe { compare(&(*incoming.as_ptr()).value, &(*node.as_ptr()).value) };
                if ordering == Ordering::Less {
                    break;
                }
                current = unsafe { (*node.as_ptr()).next };
            }

            match current {
                // 剩下的都不小于本链表的最后一个元素，整段接到尾部
                None => {
                    unsafe { self.splice_before(None, other) };
                    break;
                }
                Some(_) => unsafe {
                    other.unlink(incoming);
                    self.link_before(current, incoming);
                },
            }
        }
    }
}

impl<T: Ord> List<T> {
    /// 升序稳定排序
    pub fn sort(&mut self) {
        self.sort_by(T::cmp);
    }

    /// 合并两个升序链表
    pub fn merge(&mut self, other: &mut Self) {
        self.merge_by(other, T::cmp);
    }
}

impl<T: PartialEq> List<T> {
    pub fn unique(&mut self) -> usize {
        self.unique_by(|kept, next| kept == next)
    }

    /// 删除所有等于 `value` 的元素，返回删除的个数
    pub fn remove(&mut self, value: &T) -> usize {
        self.remove_if(|item| item == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> List<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn collect(list: &List<String>) -> Vec<&str> {
        list.iter().map(String::as_str).collect()
    }

    fn is_ascending<T: Ord>(list: &List<T>) -> bool {
        let items: Vec<_> = list.iter().collect();
        items.windows(2).all(|pair| pair[0] <= pair[1])
    }

    #[test]
    fn test_sort() {
        let mut list = List::from(vec![5, 3, 9, 1, 3, 7, 0, 2]);
        list.sort();
        assert_eq!(list, List::from([0, 1, 2, 3, 3, 5, 7, 9]));

        // 反向遍历也要正确，说明 prev 指针已经重新链接
        let backward: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(backward, vec![9, 7, 5, 3, 3, 2, 1, 0]);
        assert_eq!(list.back(), Ok(&9));
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut list = strings(&["world.png", "are.wav", "hello.h", "we.jpg"]);
        list.sort();
        let once = list.clone();
        list.sort();
        assert_eq!(list, once);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut list = List::from(vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')]);
        list.sort_by(|a, b| a.0.cmp(&b.0));
        let items: Vec<_> = list.into_iter().collect();
        assert_eq!(items, vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn test_sort_small_lists() {
        let mut empty: List<i32> = List::new();
        empty.sort();
        assert!(empty.is_empty());

        let mut single = List::from(vec![1]);
        single.sort();
        assert_eq!(single, List::from([1]));
    }

    #[test]
    fn test_sort_then_merge_file_lists() {
        let mut list1 = strings(&[
            "hello.h",
            "world.png",
            "we.jpg",
            "are.wav",
            "investigating.iso",
            "list.cpp",
        ]);
        let mut list2 = strings(&["hello.h", "hellotest.wmv"]);

        list1.sort();
        list2.sort();
        list1.merge(&mut list2);

        assert!(list2.is_empty());
        assert_eq!(list1.len(), 8);
        assert!(is_ascending(&list1));
        assert_eq!(
            collect(&list1),
            vec![
                "are.wav",
                "hello.h",
                "hello.h",
                "hellotest.wmv",
                "investigating.iso",
                "list.cpp",
                "we.jpg",
                "world.png",
            ]
        );
    }

    #[test]
    fn test_merge_is_stable() {
        let mut list1 = List::from(vec![(1, "self"), (3, "self")]);
        let mut list2 = List::from(vec![(1, "other"), (2, "other"), (3, "other"), (4, "other")]);
        list1.merge_by(&mut list2, |a, b| a.0.cmp(&b.0));

        let items: Vec<_> = list1.iter().copied().collect();
        assert_eq!(
            items,
            vec![
                (1, "self"),
                (1, "other"),
                (2, "other"),
                (3, "self"),
                (3, "other"),
                (4, "other"),
            ]
        );
        assert!(list2.is_empty());
    }

    #[test]
    fn test_merge_with_empty() {
        let mut list1 = List::new();
        let mut list2 = List::from(vec![1, 2]);
        list1.merge(&mut list2);
        assert_eq!(list1, List::from([1, 2]));

        let mut empty = List::new();
        list1.merge(&mut empty);
        assert_eq!(list1, List::from([1, 2]));
        assert_eq!(list1.back(), Ok(&2));
    }

    #[test]
    fn test_merge_keeps_multiset() {
        let mut a = List::from(vec![1, 4, 4, 8]);
        let mut b = List::from(vec![0, 4, 9]);
        a.merge(&mut b);
        assert_eq!(a, List::from([0, 1, 4, 4, 4, 8, 9]));
        assert_eq!(a.front(), Ok(&0));
        assert_eq!(a.back(), Ok(&9));
    }

    #[test]
    fn test_unique_only_adjacent() {
        let mut list = List::from(vec![1, 1, 2, 1, 1, 1, 3, 3]);
        assert_eq!(list.unique(), 4);
        assert_eq!(list, List::from([1, 2, 1, 3]));
        assert_eq!(list.back(), Ok(&3));
    }

    #[test]
    fn test_unique_after_splice() {
        let mut list = strings(&[
            "test.cxx",
            "test.cxx",
            "test.cxx",
            "are.wav",
            "hello.h",
            "hello.h",
            "hellotest.wmv",
        ]);
        list.unique();
        assert_eq!(
            collect(&list),
            vec!["test.cxx", "are.wav", "hello.h", "hellotest.wmv"]
        );
    }

    #[test]
    fn test_reverse() {
        let mut list = List::from(vec![1, 2, 3, 4, 5]);
        list.reverse();
        assert_eq!(list, List::from([5, 4, 3, 2, 1]));
        assert_eq!(list.front(), Ok(&5));
        assert_eq!(list.back(), Ok(&1));

        list.reverse();
        let items: Vec<_> = list.into_iter().collect();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reverse_then_push() {
        let mut list = List::from(vec![1, 2]);
        list.reverse();
        list.push_back(0);
        list.push_front(3);
        assert_eq!(list, List::from([3, 2, 1, 0]));
    }

    #[test]
    fn test_remove() {
        let mut list = strings(&["list.cpp", "we.jpg", "list.cpp", "are.wav"]);
        assert_eq!(list.remove(&"list.cpp".to_string()), 2);
        assert_eq!(collect(&list), vec!["we.jpg", "are.wav"]);
        assert_eq!(list.remove(&"missing".to_string()), 0);
    }

    #[test]
    fn test_remove_if_empty_entries() {
        let mut list = strings(&["", "", "", "world.png", "we.jpg", "", "test.cxx"]);
        let mut seen = Vec::new();
        let removed = list.remove_if(|entry| {
            seen.push(entry.clone());
            entry.is_empty()
        });

        assert_eq!(removed, 4);
        assert_eq!(seen.len(), 7);
        assert_eq!(seen[3], "world.png");
        assert_eq!(collect(&list), vec!["world.png", "we.jpg", "test.cxx"]);
        assert_eq!(list.front().map(String::as_str), Ok("world.png"));
        assert_eq!(list.back().map(String::as_str), Ok("test.cxx"));
    }

    #[test]
    fn test_remove_if_everything() {
        let mut list = List::from(vec![1, 2, 3]);
        assert_eq!(list.remove_if(|_| true), 3);
        assert!(list.is_empty());
        list.push_back(4);
        assert_eq!(list.front(), Ok(&4));
    }
}
