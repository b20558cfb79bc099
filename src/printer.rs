use std::fmt::Display;
use std::io::{self, Write};

use crate::list::List;

/// 等于默认值的元素打印成这个占位符
pub const DEFAULT_ENTRY: &str = "<default entry>";

/// 每个元素打印一行，最后再输出一个空行
///
/// 与 `default_entry` 相等的元素打印为 [`DEFAULT_ENTRY`]。
pub fn print_list<W, T>(out: &mut W, list: &List<T>, default_entry: &T) -> io::Result<()>
where
    W: Write + ?Sized,
    T: PartialEq + Display,
{
    for entry in list {
        if entry == default_entry {
            writeln!(out, "{}", DEFAULT_ENTRY)?;
        } else {
            writeln!(out, "{}", entry)?;
        }
    }
    writeln!(out)
}
