//! 集成事件（Integration Event）
//!
//! 跨上下文的传输稳定消息：仅携带可移植的原始数据（无内部对象引用）、
//! 唯一消息标识与发生时间。一条集成事件由恰好一条领域事件经翻译得到，
//! 其字段形态属于跨边界契约，变更需要显式版本化。
//!
use crate::aggregate::AggregateRoot;
use crate::error::DomainResult;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// 集成事件的线上形态。
///
/// 任何传输序列化都必须保留这四个字段：
/// `message_id` / `occurred_at` / `event_type` / `payload`。
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct IntegrationMessage {
    /// 消息唯一标识（消费方可用于至少一次投递下的去重）
    #[builder(default = Uuid::new_v4())]
    message_id: Uuid,
    /// 事件类型标签，用于订阅路由
    event_type: String,
    /// 源领域事件的发生时间
    occurred_at: DateTime<Utc>,
    /// 可移植载荷（仅原始数据）
    payload: Value,
}

impl IntegrationMessage {
    /// 以新分配的消息标识构造
    pub fn new(event_type: impl Into<String>, occurred_at: DateTime<Utc>, payload: Value) -> Self {
        Self::builder()
            .event_type(event_type.into())
            .occurred_at(occurred_at)
            .payload(payload)
            .build()
    }

    pub fn message_id(&self) -> Uuid {
        self.message_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

/// 领域事件 → 集成事件的注册翻译。
///
/// 每条被翻译的领域事件产出恰好一条集成消息；仅在上下文内部有意义、
/// 不需要跨边界的事件返回 `None`。翻译必须只放入可移植数据，
/// 不得泄漏聚合内部状态。
pub trait IntegrationTranslator<A>: Send + Sync
where
    A: AggregateRoot,
{
    fn translate(&self, event: &A::Event) -> DomainResult<Option<IntegrationMessage>>;
}
