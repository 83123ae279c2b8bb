//! 内存版事件总线（InMemoryEventBus）
//!
//! 基于 `tokio::sync::broadcast` 实现的轻量事件总线，满足 `EventBus` 协议：
//! - `publish`：克隆并广播消息；
//! - `subscribe`：返回 `'static` 生命周期事件流，便于在 `tokio::spawn` 中使用；
//! - 典型用途：测试环境、示例与本地开发。
//!
//! 注意：无订阅者时发送将被忽略，不视为错误。

use crate::error::{DomainError, DomainResult as Result};
use crate::eventing::EventBus;
use crate::integration::IntegrationMessage;
use async_trait::async_trait;
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

/// 简单的内存事件总线实现
#[derive(Clone)]
pub struct InMemoryEventBus {
    tx: broadcast::Sender<IntegrationMessage>,
}

impl InMemoryEventBus {
    /// 创建一个内存总线，`capacity` 为广播缓冲区容量
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, message: &IntegrationMessage) -> Result<()> {
        // 若当前无订阅者，broadcast 的 send 会返回错误，这里视为非致命并忽略
        let _ = self.tx.send(message.clone());
        Ok(())
    }

    async fn subscribe(&self) -> BoxStream<'static, Result<IntegrationMessage>> {
        let rx = self.tx.subscribe();
        let stream =
            BroadcastStream::new(rx).map(|r| r.map_err(|e| DomainError::event_bus(e.to_string())));
        Box::pin(stream)
    }
}
