//! 领域事件（Domain Event）
//!
//! 事件是创建时打上时间戳的不可变事实，仅由聚合方法产生，
//! 描述“发生了什么”而非“如何发生”。`DomainEvents` 是聚合内的
//! 待发布事件缓冲：插入有序，抽取后清空，永不随聚合状态持久化。
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 领域事件载荷需要满足的通用能力边界
pub trait DomainEvent: Clone + PartialEq + fmt::Debug + Send + Sync {
    /// 事件类型标签（形如 `order.submitted`）
    fn event_type(&self) -> &str;

    /// 事件发生时间（创建事件时捕获）
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// 聚合的待发布事件缓冲。
///
/// 仅通过聚合自身的方法写入；插入顺序即语义顺序（同一次操作中，
/// 后续事件默认建立在前序事件的副作用之上）。该缓冲是暂态的，
/// 聚合序列化时应以 `#[serde(skip)]` 跳过。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvents<E> {
    #[serde(skip)]
    events: Vec<E>,
}

impl<E> Default for DomainEvents<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> DomainEvents<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条事件（仅供聚合方法调用）
    pub fn raise(&mut self, event: E) {
        self.events.push(event);
    }

    /// 取出并清空全部待发布事件（幂等抽取：连续两次调用第二次为空）
    pub fn pull(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    /// 只读视图（按插入顺序）
    pub fn as_slice(&self) -> &[E] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Happened {
        at: DateTime<Utc>,
        label: &'static str,
    }

    impl DomainEvent for Happened {
        fn event_type(&self) -> &str {
            self.label
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    fn happened(label: &'static str) -> Happened {
        Happened {
            at: Utc::now(),
            label,
        }
    }

    #[test]
    fn raise_preserves_insertion_order() {
        let mut buffer = DomainEvents::new();
        buffer.raise(happened("first"));
        buffer.raise(happened("second"));
        buffer.raise(happened("third"));

        let types: Vec<&str> = buffer.as_slice().iter().map(|e| e.event_type()).collect();
        assert_eq!(types, ["first", "second", "third"]);
    }

    #[test]
    fn pull_drains_and_second_pull_is_empty() {
        let mut buffer = DomainEvents::new();
        buffer.raise(happened("only"));

        let drained = buffer.pull();
        assert_eq!(drained.len(), 1);
        assert!(buffer.is_empty());
        assert!(buffer.pull().is_empty());
    }
}
