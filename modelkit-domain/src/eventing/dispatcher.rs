//! 事件分发器（EventDispatcher）
//!
//! 订阅总线事件流，按处理器订阅类型匹配分发并发执行的长驻任务：
//! - 处理器失败仅记录日志，不中断事件流（补偿投递由传输协作方承担）；
//! - 提供关闭与等待的 `DispatcherHandle`。
//!
use super::handler::{HandledEventType, IntegrationEventHandler};
use super::EventBus;
use futures_util::{StreamExt, stream};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 单条消息可同时分发的处理器并发上限默认值
const DEFAULT_HANDLER_CONCURRENCY: usize = 8;

/// 按事件类型索引处理器的注册表
#[derive(Clone, Default)]
struct HandlerRegistry {
    handlers: Vec<Arc<dyn IntegrationEventHandler>>,
}

impl HandlerRegistry {
    fn new(handlers: Vec<Arc<dyn IntegrationEventHandler>>) -> Self {
        Self { handlers }
    }

    /// 返回订阅了该事件类型的所有处理器
    fn matching(&self, event_type: &str) -> Vec<Arc<dyn IntegrationEventHandler>> {
        self.handlers
            .iter()
            .filter(|h| h.handled_event_type().matches(event_type))
            .cloned()
            .collect()
    }
}

/// EventDispatcher：订阅 Bus 的事件流，分发到匹配的 Handler，并发处理
pub struct EventDispatcher {
    event_bus: Arc<dyn EventBus>,
    registry: HandlerRegistry,
    handler_concurrency: usize,
}

impl EventDispatcher {
    pub fn new(
        event_bus: Arc<dyn EventBus>,
        handlers: Vec<Arc<dyn IntegrationEventHandler>>,
    ) -> Self {
        Self {
            event_bus,
            registry: HandlerRegistry::new(handlers),
            handler_concurrency: DEFAULT_HANDLER_CONCURRENCY,
        }
    }

    pub fn with_handler_concurrency(mut self, concurrency: usize) -> Self {
        self.handler_concurrency = concurrency.max(1);
        self
    }

    /// 启动分发器，返回可用于关闭/等待的句柄
    pub fn start(self: Arc<Self>) -> DispatcherHandle {
        let token = CancellationToken::new();
        let task = tokio::spawn(Self::subscribe_loop(self, token.clone()));
        DispatcherHandle { token, task }
    }

    async fn subscribe_loop(self: Arc<Self>, token: CancellationToken) {
        let mut stream = self.event_bus.subscribe().await;
        let registry = self.registry.clone();
        let concurrency = self.handler_concurrency;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                maybe_message = stream.next() => {
                    match maybe_message {
                        Some(Ok(message)) => {
                            let matched = registry.matching(message.event_type());
                            if matched.is_empty() {
                                continue;
                            }

                            stream::iter(matched)
                                .for_each_concurrent(Some(concurrency), |h| {
                                    let msg = message.clone();
                                    async move {
                                        if let Err(err) = h.handle(&msg).await {
                                            tracing::warn!(
                                                handler = h.handler_name(),
                                                event_type = msg.event_type(),
                                                message_id = %msg.message_id(),
                                                error = %err,
                                                "integration event handler failed"
                                            );
                                        }
                                    }
                                })
                                .await;
                        }
                        None => break,
                        _ => { /* 忽略流错误，继续处理下一条消息 */ }
                    }
                }
            }
        }
    }
}

/// 分发器句柄：触发关闭并等待任务退出
pub struct DispatcherHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl DispatcherHandle {
    /// 请求关闭（幂等）
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// 等待分发任务退出
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}
