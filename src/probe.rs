use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// 探针对象生命周期中的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    DefaultConstructed,
    Constructed(usize),
    Copied,
    Moved,
    Destroyed,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LifecycleEvent::DefaultConstructed => write!(f, "Some class default constructed!"),
            LifecycleEvent::Constructed(tag) => {
                write!(f, "Some class constructed with param {}", tag)
            }
            LifecycleEvent::Copied => write!(f, "Some class copy constructed"),
            LifecycleEvent::Moved => write!(f, "Some class move constructed"),
            LifecycleEvent::Destroyed => write!(f, "Some class destroyed"),
        }
    }
}

/// 接收生命周期事件的观察者
pub trait LifecycleObserver {
    fn notify(&self, event: LifecycleEvent);
}

/// 按发生顺序记录所有事件，便于在测试中断言
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Rc<RefCell<Vec<LifecycleEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录事件的快照
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: LifecycleEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// 以 trait 对象的形式交给探针
    pub fn observer(&self) -> Rc<dyn LifecycleObserver> {
        Rc::new(self.clone())
    }
}

impl LifecycleObserver for EventLog {
    fn notify(&self, event: LifecycleEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// 构造、复制、移动和析构都会通知观察者的值类型
pub struct LifecycleProbe {
    tag: Option<usize>,
    observer: Rc<dyn LifecycleObserver>,
}

impl LifecycleProbe {
    /// 默认构造
    pub fn new(observer: Rc<dyn LifecycleObserver>) -> Self {
        observer.notify(LifecycleEvent::DefaultConstructed);
        LifecycleProbe {
            tag: None,
            observer,
        }
    }

    /// 带参数构造
    pub fn with_tag(tag: usize, observer: Rc<dyn LifecycleObserver>) -> Self {
        observer.notify(LifecycleEvent::Constructed(tag));
        LifecycleProbe {
            tag: Some(tag),
            observer,
        }
    }

    pub fn tag(&self) -> Option<usize> {
        self.tag
    }

    /// 把内容转移到一个新的探针中，随后旧探针被析构
    pub fn transfer(self) -> Self {
        self.observer.notify(LifecycleEvent::Moved);
        LifecycleProbe {
            tag: self.tag,
            observer: Rc::clone(&self.observer),
        }
    }
}

impl Clone for LifecycleProbe {
    fn clone(&self) -> Self {
        self.observer.notify(LifecycleEvent::Copied);
        LifecycleProbe {
            tag: self.tag,
            observer: Rc::clone(&self.observer),
        }
    }
}

impl Drop for LifecycleProbe {
    fn drop(&mut self) {
        self.observer.notify(LifecycleEvent::Destroyed);
    }
}

impl fmt::Debug for LifecycleProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleProbe")
            .field("tag", &self.tag)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::List;
    use super::LifecycleEvent::*;

    #[test]
    fn test_construct_and_drop() {
        let log = EventLog::new();
        {
            let probe = LifecycleProbe::new(log.observer());
            assert_eq!(probe.tag(), None);
            let tagged = LifecycleProbe::with_tag(7, log.observer());
            assert_eq!(tagged.tag(), Some(7));
        }
        assert_eq!(
            log.events(),
            vec![DefaultConstructed, Constructed(7), Destroyed, Destroyed]
        );
    }

    #[test]
    fn test_transfer_moves_then_destroys_source() {
        let log = EventLog::new();
        let probe = LifecycleProbe::with_tag(1, log.observer());
        let moved = probe.transfer();
        assert_eq!(moved.tag(), Some(1));
        assert_eq!(log.events(), vec![Constructed(1), Moved, Destroyed]);
    }

    #[test]
    fn test_emplace_constructs_once() {
        let log = EventLog::new();
        let mut list = List::new();
        for i in 0..3 {
            let observer = log.observer();
            list.emplace_back(|| LifecycleProbe::with_tag(i, observer));
        }
        assert_eq!(log.count(Constructed(0)), 1);
        assert_eq!(log.count(Copied), 0);
        assert_eq!(log.count(Destroyed), 0);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_push_copy() {
        let log = EventLog::new();
        let mut list = List::new();
        for i in 0..3 {
            let probe = LifecycleProbe::with_tag(i, log.observer());
            list.push_back(probe.clone());
        }
        assert_eq!(
            log.events(),
            vec![
                Constructed(0),
                Copied,
                Destroyed,
                Constructed(1),
                Copied,
                Destroyed,
                Constructed(2),
                Copied,
                Destroyed,
            ]
        );
        let tags: Vec<_> = list.iter().map(LifecycleProbe::tag).collect();
        assert_eq!(tags, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_list_move_clone_and_drop() {
        let log = EventLog::new();
        let list: List<_> = (0..3)
            .map(|i| LifecycleProbe::with_tag(i, log.observer()))
            .collect();
        log.clear();

        // 移动整个链表不会产生任何事件
        let moved = list;
        assert!(log.events().is_empty());

        let copy = moved.clone();
        assert_eq!(log.events(), vec![Copied, Copied, Copied]);
        log.clear();

        drop(moved);
        assert_eq!(log.count(Destroyed), 3);
        drop(copy);
        assert_eq!(log.count(Destroyed), 6);
    }

    #[test]
    fn test_pop_and_clear_destroy() {
        let log = EventLog::new();
        let mut list = List::new();
        list.push_back(LifecycleProbe::new(log.observer()));
        list.push_back(LifecycleProbe::new(log.observer()));
        log.clear();

        let popped = list.pop_front();
        assert!(popped.is_ok());
        assert!(log.events().is_empty());
        drop(popped);
        assert_eq!(log.events(), vec![Destroyed]);

        list.clear();
        assert_eq!(log.events(), vec![Destroyed, Destroyed]);
    }

    #[test]
    fn test_event_text() {
        assert_eq!(
            Constructed(2).to_string(),
            "Some class constructed with param 2"
        );
        assert_eq!(DefaultConstructed.to_string(), "Some class default constructed!");
        assert_eq!(Destroyed.to_string(), "Some class destroyed");
    }
}
