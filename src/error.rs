use std::fmt;

/// 违反链表操作前置条件时返回的错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionViolation {
    /// 在空链表上访问或弹出元素
    EmptyList { operation: &'static str },
    /// 游标前进越过了尾后位置
    AdvancePastEnd { requested: usize, remaining: usize },
    /// 在尾后位置读取或删除元素
    EndPosition { operation: &'static str },
}

impl fmt::Display for PreconditionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PreconditionViolation::EmptyList { operation } => {
                write!(f, "{} called on an empty list", operation)
            }
            PreconditionViolation::AdvancePastEnd {
                requested,
                remaining,
            } => write!(
                f,
                "cannot advance {} steps, only {} left before the end",
                requested, remaining
            ),
            PreconditionViolation::EndPosition { operation } => {
                write!(f, "{} called at the end position", operation)
            }
        }
    }
}

impl std::error::Error for PreconditionViolation {}

pub type Result<T> = std::result::Result<T, PreconditionViolation>;
