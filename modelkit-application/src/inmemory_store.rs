//! 内存聚合存储（InMemoryStore）
//!
//! 以序列化快照保存聚合状态的通用 `Repository` 实现：
//! - 快照经 serde 序列化，聚合的待发布事件缓冲（`#[serde(skip)]`）
//!   天然不随状态持久化；
//! - `update` 做版本比对（乐观锁），冲突时以 `VersionConflict` 失败；
//! - `find` 对快照反序列化后解释执行谓词 AST。
//!
//! 典型用途：测试环境、示例与本地开发。
//!
use async_trait::async_trait;
use dashmap::DashMap;
use modelkit_domain::aggregate::AggregateRoot;
use modelkit_domain::entity::Entity;
use modelkit_domain::error::{DomainError, DomainResult};
use modelkit_domain::repository::Repository;
use modelkit_domain::specification::{Predicate, QueryModel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

struct StoredSnapshot {
    version: usize,
    state: serde_json::Value,
}

/// 基于 DashMap 的快照式聚合存储
pub struct InMemoryStore<A> {
    items: DashMap<String, StoredSnapshot>,
    _marker: PhantomData<fn() -> A>,
}

impl<A> Default for InMemoryStore<A> {
    fn default() -> Self {
        Self {
            items: DashMap::new(),
            _marker: PhantomData,
        }
    }
}

impl<A> InMemoryStore<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl<A> Repository<A> for InMemoryStore<A>
where
    A: AggregateRoot + QueryModel + Serialize + DeserializeOwned,
    A::Id: Send + Sync,
{
    async fn add(&self, aggregate: &mut A) -> DomainResult<()> {
        let key = aggregate.id().to_string();
        if self.items.contains_key(&key) {
            return Err(DomainError::Repository {
                reason: format!("{} {key} already exists", A::TYPE),
            });
        }

        aggregate.set_version(aggregate.version().next());
        let snapshot = StoredSnapshot {
            version: aggregate.version().value(),
            state: serde_json::to_value(&*aggregate)?,
        };
        self.items.insert(key, snapshot);
        Ok(())
    }

    async fn update(&self, aggregate: &mut A) -> DomainResult<()> {
        let key = aggregate.id().to_string();
        let Some(mut stored) = self.items.get_mut(&key) else {
            return Err(DomainError::not_found(format!("{} {key}", A::TYPE)));
        };

        if stored.version != aggregate.version().value() {
            return Err(DomainError::VersionConflict {
                expected: aggregate.version().value(),
                actual: stored.version,
            });
        }

        aggregate.set_version(aggregate.version().next());
        stored.version = aggregate.version().value();
        stored.state = serde_json::to_value(&*aggregate)?;
        Ok(())
    }

    async fn get_by_id(&self, id: &A::Id) -> DomainResult<Option<A>> {
        match self.items.get(&id.to_string()) {
            Some(stored) => Ok(Some(serde_json::from_value(stored.state.clone())?)),
            None => Ok(None),
        }
    }

    async fn find(&self, predicate: &Predicate) -> DomainResult<Vec<A>> {
        let mut matched = Vec::new();
        for entry in self.items.iter() {
            let aggregate: A = serde_json::from_value(entry.state.clone())?;
            if predicate.evaluate(&aggregate) {
                matched.push(aggregate);
            }
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use modelkit_domain::domain_event::{DomainEvent, DomainEvents};
    use modelkit_domain::specification::Scalar;
    use modelkit_domain::value_object::Version;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Renamed {
        at: DateTime<Utc>,
    }

    impl DomainEvent for Renamed {
        fn event_type(&self) -> &str {
            "profile.renamed"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Profile {
        id: String,
        version: Version,
        display_name: String,
        #[serde(skip)]
        events: DomainEvents<Renamed>,
    }

    impl Entity for Profile {
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

    impl AggregateRoot for Profile {
        const TYPE: &'static str = "profile";
        type Event = Renamed;

        fn pending_events(&self) -> &DomainEvents<Self::Event> {
            &self.events
        }

        fn pending_events_mut(&mut self) -> &mut DomainEvents<Self::Event> {
            &mut self.events
        }
    }

    impl QueryModel for Profile {
        fn field(&self, name: &str) -> Option<Scalar> {
            match name {
                "display_name" => Some(self.display_name.as_str().into()),
                _ => None,
            }
        }
    }

    fn profile(id: &str, name: &str) -> Profile {
        Profile {
            id: id.into(),
            display_name: name.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn add_then_get_round_trips_state() {
        let store = InMemoryStore::<Profile>::new();
        let mut p = profile("p-1", "alice");
        store.add(&mut p).await.unwrap();
        assert_eq!(p.version(), Version::from_value(1));

        let loaded = store.get_by_id(&"p-1".to_string()).await.unwrap().unwrap();
        assert_eq!(loaded.display_name, "alice");
        assert_eq!(loaded.version(), Version::from_value(1));
        // 待发布事件缓冲不随快照持久化
        assert!(loaded.pending_events().is_empty());
    }

    #[tokio::test]
    async fn adding_twice_is_rejected() {
        let store = InMemoryStore::<Profile>::new();
        let mut p = profile("p-1", "alice");
        store.add(&mut p).await.unwrap();

        let mut dup = profile("p-1", "imposter");
        let err = store.add(&mut dup).await.unwrap_err();
        assert!(matches!(err, DomainError::Repository { .. }));
    }

    #[tokio::test]
    async fn stale_update_conflicts() {
        let store = InMemoryStore::<Profile>::new();
        let mut p = profile("p-1", "alice");
        store.add(&mut p).await.unwrap();

        let mut stale = store.get_by_id(&"p-1".to_string()).await.unwrap().unwrap();
        p.display_name = "alice2".into();
        store.update(&mut p).await.unwrap();

        stale.display_name = "other".into();
        let err = store.update(&mut stale).await.unwrap_err();
        assert!(matches!(err, DomainError::VersionConflict { .. }));
    }

    #[tokio::test]
    async fn find_interprets_the_predicate() {
        let store = InMemoryStore::<Profile>::new();
        store.add(&mut profile("p-1", "alice")).await.unwrap();
        store.add(&mut profile("p-2", "bob")).await.unwrap();

        let found = store
            .find(&Predicate::eq("display_name", "bob"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p-2");
    }
}
