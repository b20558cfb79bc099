//! 双向链表及其操作演示
//!
//! [`List`] 是用裸指针实现的双向链表，[`Cursor`] 和 [`CursorMut`] 提供位置引用，
//! [`ListDemo`] 按固定脚本演示各项操作并打印结果。

mod algorithms;
pub mod cursor;
pub mod demo;
pub mod error;
pub mod list;
pub mod printer;
pub mod probe;

pub use cursor::{Cursor, CursorMut};
pub use demo::ListDemo;
pub use error::PreconditionViolation;
pub use list::List;
pub use printer::{DEFAULT_ENTRY, print_list};
pub use probe::{EventLog, LifecycleEvent, LifecycleObserver, LifecycleProbe};
