//! 集成事件处理器（IntegrationEventHandler）
//!
//! 定义消费某类/多类/全部集成事件的处理逻辑与元信息（名称、订阅类型）。
//! 投递语义为至少一次，处理器必须幂等；`message_id` 可用于去重，
//! 去重存储由外部协作方提供。
//!
use crate::integration::IntegrationMessage;
use async_trait::async_trait;

#[derive(Clone, Debug)]
pub enum HandledEventType {
    One(String),
    Many(Vec<String>),
    All,
}

impl HandledEventType {
    /// 判断某事件类型是否在订阅范围内
    pub fn matches(&self, event_type: &str) -> bool {
        match self {
            HandledEventType::One(t) => t == event_type,
            HandledEventType::Many(ts) => ts.iter().any(|t| t == event_type),
            HandledEventType::All => true,
        }
    }
}

/// 集成事件处理器：消费某一类型的集成事件
#[async_trait]
pub trait IntegrationEventHandler: Send + Sync {
    /// 处理器名称（用于失败日志与审计）
    fn handler_name(&self) -> &str;

    /// 返回该处理器订阅的事件类型
    fn handled_event_type(&self) -> HandledEventType;

    /// 处理事件（至少一次投递，必须幂等）
    async fn handle(&self, message: &IntegrationMessage) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handled_event_type_matching() {
        assert!(HandledEventType::One("a".into()).matches("a"));
        assert!(!HandledEventType::One("a".into()).matches("b"));
        assert!(HandledEventType::Many(vec!["a".into(), "b".into()]).matches("b"));
        assert!(HandledEventType::All.matches("anything"));
    }
}
