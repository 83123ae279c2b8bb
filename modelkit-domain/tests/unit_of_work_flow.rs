//! 端到端：聚合变更 → 单元工作提交 → 集成管道发布 → 分发器消费

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use modelkit_domain::aggregate::AggregateRoot;
use modelkit_domain::domain_event::{DomainEvent, DomainEvents};
use modelkit_domain::entity::Entity;
use modelkit_domain::error::{DomainError, DomainResult};
use modelkit_domain::eventing::{
    EventDispatcher, HandledEventType, InMemoryEventBus, IntegrationEventHandler,
    IntegrationPipeline,
};
use modelkit_domain::integration::{IntegrationMessage, IntegrationTranslator};
use modelkit_domain::repository::{Repository, UnitOfWork};
use modelkit_domain::rule::{BusinessRule, check_rule};
use modelkit_domain::specification::Predicate;
use modelkit_domain::value_object::Version;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum MeterEvent {
    Read { at: DateTime<Utc>, value: i64 },
}

impl DomainEvent for MeterEvent {
    fn event_type(&self) -> &str {
        "meter.read"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            MeterEvent::Read { at, .. } => *at,
        }
    }
}

struct ReadingMustIncrease {
    last: i64,
    next: i64,
}

impl BusinessRule for ReadingMustIncrease {
    fn is_broken(&self) -> bool {
        self.next <= self.last
    }

    fn message(&self) -> String {
        format!("reading must increase, last={}, next={}", self.last, self.next)
    }

    fn code(&self) -> &str {
        "READING_NOT_INCREASING"
    }
}

#[derive(Clone, Default)]
struct Meter {
    id: String,
    version: Version,
    last_reading: i64,
    events: DomainEvents<MeterEvent>,
}

impl Entity for Meter {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

impl AggregateRoot for Meter {
    const TYPE: &'static str = "meter";
    type Event = MeterEvent;

    fn pending_events(&self) -> &DomainEvents<Self::Event> {
        &self.events
    }

    fn pending_events_mut(&mut self) -> &mut DomainEvents<Self::Event> {
        &mut self.events
    }
}

impl Meter {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn record(&mut self, value: i64) -> DomainResult<()> {
        check_rule(&ReadingMustIncrease {
            last: self.last_reading,
            next: value,
        })?;
        self.last_reading = value;
        self.raise_domain_event(MeterEvent::Read {
            at: Utc::now(),
            value,
        });
        Ok(())
    }
}

// 最小内存仓储：版本比对 + 整体替换
#[derive(Clone, Default)]
struct MeterStore {
    items: Arc<Mutex<HashMap<String, Meter>>>,
}

#[async_trait]
impl Repository<Meter> for MeterStore {
    async fn add(&self, aggregate: &mut Meter) -> DomainResult<()> {
        aggregate.version = aggregate.version.next();
        self.items
            .lock()
            .unwrap()
            .insert(aggregate.id.clone(), aggregate.clone());
        Ok(())
    }

    async fn update(&self, aggregate: &mut Meter) -> DomainResult<()> {
        let mut items = self.items.lock().unwrap();
        let stored = items
            .get(&aggregate.id)
            .ok_or_else(|| DomainError::not_found(format!("meter {}", aggregate.id)))?;
        if stored.version != aggregate.version {
            return Err(DomainError::VersionConflict {
                expected: aggregate.version.value(),
                actual: stored.version.value(),
            });
        }
        aggregate.version = aggregate.version.next();
        items.insert(aggregate.id.clone(), aggregate.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &String) -> DomainResult<Option<Meter>> {
        Ok(self.items.lock().unwrap().get(id).cloned())
    }

    async fn find(&self, _predicate: &Predicate) -> DomainResult<Vec<Meter>> {
        Ok(self.items.lock().unwrap().values().cloned().collect())
    }
}

struct MeterTranslator;

impl IntegrationTranslator<Meter> for MeterTranslator {
    fn translate(&self, event: &MeterEvent) -> DomainResult<Option<IntegrationMessage>> {
        let MeterEvent::Read { value, .. } = event;
        Ok(Some(IntegrationMessage::new(
            "meter.read",
            event.occurred_at(),
            json!({ "value": value }),
        )))
    }
}

struct CollectReadings {
    seen: Mutex<Vec<i64>>,
}

#[async_trait]
impl IntegrationEventHandler for CollectReadings {
    fn handler_name(&self) -> &str {
        "collect-readings"
    }

    fn handled_event_type(&self) -> HandledEventType {
        HandledEventType::One("meter.read".into())
    }

    async fn handle(&self, message: &IntegrationMessage) -> anyhow::Result<()> {
        let value = message.payload()["value"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("missing value"))?;
        self.seen.lock().unwrap().push(value);
        Ok(())
    }
}

#[tokio::test]
async fn commit_then_publish_reaches_the_remote_handler() {
    let bus = Arc::new(InMemoryEventBus::new(32));
    let store = MeterStore::default();
    let uow = UnitOfWork::new(
        store.clone(),
        IntegrationPipeline::new(Arc::new(MeterTranslator), bus.clone()),
    );

    let collector = Arc::new(CollectReadings {
        seen: Mutex::new(Vec::new()),
    });
    let dispatcher = Arc::new(EventDispatcher::new(bus.clone(), vec![collector.clone()]));
    let handle = dispatcher.start();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let mut meter = Meter::new("m-1");
    meter.record(10).unwrap();
    meter.record(20).unwrap();
    uow.save_entities(&mut meter).await.unwrap();

    // 同一单元工作内的事件保序到达
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(*collector.seen.lock().unwrap(), vec![10, 20]);

    // 提交后缓冲已清空，状态已入库且版本已推进
    assert!(meter.pending_events().is_empty());
    let stored = store.get_by_id(&"m-1".to_string()).await.unwrap().unwrap();
    assert_eq!(stored.last_reading, 20);
    assert_eq!(stored.version(), Version::from_value(1));

    handle.shutdown();
    handle.wait().await;
}

#[tokio::test]
async fn broken_rule_keeps_aggregate_and_buffer_untouched() {
    let mut meter = Meter::new("m-2");
    meter.record(10).unwrap();

    let err = meter.record(5).unwrap_err();
    assert_eq!(err.violations()[0].code, "READING_NOT_INCREASING");
    assert_eq!(meter.last_reading, 10);
    assert_eq!(meter.pending_events().len(), 1);
}

#[tokio::test]
async fn stale_version_update_is_rejected() {
    let store = MeterStore::default();
    let mut meter = Meter::new("m-3");
    meter.record(1).unwrap();
    store.add(&mut meter).await.unwrap();

    let mut stale = store.get_by_id(&"m-3".to_string()).await.unwrap().unwrap();
    store.update(&mut meter.clone()).await.unwrap();

    let err = store.update(&mut stale).await.unwrap_err();
    assert!(matches!(err, DomainError::VersionConflict { .. }));
}
