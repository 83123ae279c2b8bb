//! 仓储与单元工作（Repository / UnitOfWork）协议
//!
//! 该模块聚焦协议与装配逻辑，具体存储后端由上层提供实现并注入。
//! `find` 以谓词 AST 为条件，适配层既可在内存解释执行，
//! 也可编译为原生查询。
//!
use crate::aggregate::AggregateRoot;
use crate::error::DomainResult;
use crate::specification::Predicate;
use async_trait::async_trait;
use std::sync::Arc;

/// 聚合仓储协议。
///
/// `add`/`update` 接收可变引用以便实现层推进聚合版本（乐观锁）；
/// `update` 在版本不匹配时以 `VersionConflict` 失败。
#[async_trait]
pub trait Repository<A>: Send + Sync
where
    A: AggregateRoot,
    A::Id: Send + Sync,
{
    async fn add(&self, aggregate: &mut A) -> DomainResult<()>;

    async fn update(&self, aggregate: &mut A) -> DomainResult<()>;

    async fn get_by_id(&self, id: &A::Id) -> DomainResult<Option<A>>;

    async fn find(&self, predicate: &Predicate) -> DomainResult<Vec<A>>;
}

#[async_trait]
impl<A, T> Repository<A> for Arc<T>
where
    A: AggregateRoot,
    A::Id: Send + Sync,
    T: Repository<A> + ?Sized,
{
    async fn add(&self, aggregate: &mut A) -> DomainResult<()> {
        (**self).add(aggregate).await
    }

    async fn update(&self, aggregate: &mut A) -> DomainResult<()> {
        (**self).update(aggregate).await
    }

    async fn get_by_id(&self, id: &A::Id) -> DomainResult<Option<A>> {
        (**self).get_by_id(id).await
    }

    async fn find(&self, predicate: &Predicate) -> DomainResult<Vec<A>> {
        (**self).find(predicate).await
    }
}

/// 单元工作：提交聚合状态，随后驱动集成管道。
///
/// 提交在前、发布在后：发布失败不回滚已提交的状态。
/// 提交与发布之间的崩溃窗口由持久化 Outbox 扩展消除（此处未实现）。
#[cfg(feature = "eventing")]
pub struct UnitOfWork<A, R>
where
    A: AggregateRoot,
    A::Id: Send + Sync,
    R: Repository<A>,
{
    repository: R,
    pipeline: crate::eventing::IntegrationPipeline<A>,
}

#[cfg(feature = "eventing")]
impl<A, R> UnitOfWork<A, R>
where
    A: AggregateRoot,
    A::Id: Send + Sync,
    R: Repository<A>,
{
    pub fn new(repository: R, pipeline: crate::eventing::IntegrationPipeline<A>) -> Self {
        Self {
            repository,
            pipeline,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// 提交聚合（新建或更新），然后抽取并发布其待发布事件
    pub async fn save_entities(&self, aggregate: &mut A) -> DomainResult<()> {
        if aggregate.version().is_new() {
            self.repository.add(aggregate).await?;
        } else {
            self.repository.update(aggregate).await?;
        }
        self.pipeline.publish_pending(aggregate).await
    }
}
