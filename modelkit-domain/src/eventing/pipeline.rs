//! 集成管道（IntegrationPipeline）
//!
//! 在单元工作提交之后运行：按序抽取聚合的待发布领域事件，
//! 对每条事件应用注册的翻译得到恰好一条集成事件，并经由抽象总线发布。
//!
//! - 同一单元工作内同一聚合的事件保序；不同聚合之间不保证顺序；
//! - 发布失败在进程内重试一次，仍失败则记录日志并上报错误——
//!   已提交的聚合状态绝不因此回滚（最终一致、至少一次投递）。
//!
use crate::aggregate::AggregateRoot;
use crate::error::{DomainError, DomainResult};
use crate::eventing::EventBus;
use crate::integration::{IntegrationMessage, IntegrationTranslator};
use std::sync::Arc;

/// 集成管道：领域事件抽取 → 翻译 → 发布
pub struct IntegrationPipeline<A>
where
    A: AggregateRoot,
{
    translator: Arc<dyn IntegrationTranslator<A>>,
    event_bus: Arc<dyn EventBus>,
}

impl<A> IntegrationPipeline<A>
where
    A: AggregateRoot,
{
    pub fn new(
        translator: Arc<dyn IntegrationTranslator<A>>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            translator,
            event_bus,
        }
    }

    /// 抽取、翻译并按序发布聚合的全部待发布事件。
    ///
    /// 调用方应在提交聚合状态之后调用（publish-after-commit）。
    /// 崩溃发生在提交与发布之间会丢失集成消息；持久化 Outbox
    /// 是该设计明确的生产级扩展点。
    pub async fn publish_pending(&self, aggregate: &mut A) -> DomainResult<()> {
        let events = aggregate.pull_domain_events();

        for event in &events {
            let Some(message) = self.translator.translate(event)? else {
                // 仅上下文内部有意义的事件不跨边界
                continue;
            };
            self.publish_with_retry(&message).await?;
        }

        Ok(())
    }

    // 进程内重试一次，再失败则上报；durable redelivery 属传输协作方
    async fn publish_with_retry(&self, message: &IntegrationMessage) -> DomainResult<()> {
        match self.event_bus.publish(message).await {
            Ok(()) => Ok(()),
            Err(first) => {
                tracing::warn!(
                    event_type = message.event_type(),
                    message_id = %message.message_id(),
                    error = %first,
                    "publish failed, retrying once"
                );
                self.event_bus.publish(message).await.map_err(|second| {
                    tracing::error!(
                        event_type = message.event_type(),
                        message_id = %message.message_id(),
                        error = %second,
                        "publish failed after retry"
                    );
                    DomainError::Publish {
                        event_type: message.event_type().to_string(),
                        reason: second.to_string(),
                    }
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::{DomainEvent, DomainEvents};
    use crate::entity::Entity;
    use crate::error::DomainResult;
    use crate::eventing::InMemoryEventBus;
    use crate::value_object::Version;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use futures_core::stream::BoxStream;
    use futures_util::StreamExt;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Ticked {
        at: DateTime<Utc>,
        n: i64,
        internal: bool,
    }

    impl DomainEvent for Ticked {
        fn event_type(&self) -> &str {
            "clock.ticked"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    #[derive(Default)]
    struct Clock {
        id: String,
        events: DomainEvents<Ticked>,
    }

    impl Entity for Clock {
        type Id = String;

        fn id(&self) -> &Self::Id {
            &self.id
        }

        fn version(&self) -> Version {
            Version::new()
        }

        fn set_version(&mut self, _version: Version) {}
    }

    impl AggregateRoot for Clock {
        const TYPE: &'static str = "clock";
        type Event = Ticked;

        fn pending_events(&self) -> &DomainEvents<Self::Event> {
            &self.events
        }

        fn pending_events_mut(&mut self) -> &mut DomainEvents<Self::Event> {
            &mut self.events
        }
    }

    struct TickTranslator;

    impl IntegrationTranslator<Clock> for TickTranslator {
        fn translate(&self, event: &Ticked) -> DomainResult<Option<IntegrationMessage>> {
            if event.internal {
                return Ok(None);
            }
            Ok(Some(IntegrationMessage::new(
                "clock.ticked",
                event.occurred_at(),
                json!({ "n": event.n }),
            )))
        }
    }

    fn ticked(n: i64, internal: bool) -> Ticked {
        Ticked {
            at: Utc::now(),
            n,
            internal,
        }
    }

    #[tokio::test]
    async fn publishes_translated_events_in_order_and_drains_the_buffer() {
        let bus = Arc::new(InMemoryEventBus::new(16));
        let pipeline = IntegrationPipeline::new(Arc::new(TickTranslator), bus.clone());
        let mut stream = bus.subscribe().await;

        let mut clock = Clock {
            id: "clk-1".into(),
            ..Default::default()
        };
        clock.raise_domain_event(ticked(1, false));
        clock.raise_domain_event(ticked(2, true)); // 不跨边界
        clock.raise_domain_event(ticked(3, false));

        pipeline.publish_pending(&mut clock).await.unwrap();

        assert!(clock.pending_events().is_empty());
        let first = stream.next().await.unwrap().unwrap();
        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(first.payload()["n"], 1);
        assert_eq!(second.payload()["n"], 3);

        // 再次发布为空操作（幂等抽取）
        pipeline.publish_pending(&mut clock).await.unwrap();
        assert!(clock.pending_events().is_empty());
    }

    struct FlakyBus {
        inner: InMemoryEventBus,
        failures_left: AtomicUsize,
    }

    #[async_trait]
    impl EventBus for FlakyBus {
        async fn publish(&self, message: &IntegrationMessage) -> DomainResult<()> {
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(DomainError::event_bus("transient failure"));
            }
            self.inner.publish(message).await
        }

        async fn subscribe(&self) -> BoxStream<'static, DomainResult<IntegrationMessage>> {
            self.inner.subscribe().await
        }
    }

    #[tokio::test]
    async fn retries_once_then_succeeds() {
        let bus = Arc::new(FlakyBus {
            inner: InMemoryEventBus::new(16),
            failures_left: AtomicUsize::new(1),
        });
        let pipeline = IntegrationPipeline::new(Arc::new(TickTranslator), bus.clone());
        let mut stream = bus.subscribe().await;

        let mut clock = Clock {
            id: "clk-1".into(),
            ..Default::default()
        };
        clock.raise_domain_event(ticked(7, false));

        pipeline.publish_pending(&mut clock).await.unwrap();
        let received = stream.next().await.unwrap().unwrap();
        assert_eq!(received.payload()["n"], 7);
    }

    #[tokio::test]
    async fn escalates_after_second_failure() {
        let bus = Arc::new(FlakyBus {
            inner: InMemoryEventBus::new(16),
            failures_left: AtomicUsize::new(2),
        });
        let pipeline = IntegrationPipeline::new(Arc::new(TickTranslator), bus.clone());

        let mut clock = Clock {
            id: "clk-1".into(),
            ..Default::default()
        };
        clock.raise_domain_event(ticked(9, false));

        let err = pipeline.publish_pending(&mut clock).await.unwrap_err();
        match err {
            DomainError::Publish { event_type, .. } => assert_eq!(event_type, "clock.ticked"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
