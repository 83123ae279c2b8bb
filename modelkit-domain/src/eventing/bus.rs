//! 事件总线（EventBus）协议
//!
//! 定义集成事件发布与订阅的统一抽象，支持批量发布与 'static 生命周期
//! 事件流，以便在异步运行时（如 tokio::spawn）中消费。
//!
use crate::{error::DomainResult as Result, integration::IntegrationMessage};
use async_trait::async_trait;
use futures_core::stream::BoxStream;

/// 事件总线：负责分发集成事件与订阅事件流。
///
/// 发布对生产方而言是发后即忘；投递语义（重试、持久化）由传输实现承担。
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, message: &IntegrationMessage) -> Result<()>;

    async fn publish_batch(&self, messages: &[IntegrationMessage]) -> Result<()> {
        for message in messages {
            self.publish(message).await?;
        }
        Ok(())
    }

    /// 返回一个 'static 生命周期的事件流，便于在 tokio::spawn 中使用
    async fn subscribe(&self) -> BoxStream<'static, Result<IntegrationMessage>>;
}
