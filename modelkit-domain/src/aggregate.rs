//! 聚合根（Aggregate Root）抽象
//!
//! 聚合根是一致性边界对外的唯一入口：内部子实体/值对象只能经由
//! 聚合根的方法修改。每个公开的变更方法都必须遵循统一契约：
//!
//! 1. 先通过 `rule::check_rule(s)` 评估该转移涉及的所有业务规则；
//! 2. 全部通过后才修改状态；
//! 3. 最后追加恰好描述本次转移的领域事件。
//!
//! 任何一条规则失败都应使变更整体中止，不留下部分修改。
//! 单个聚合实例的变更不保证线程安全，调用方需按聚合标识串行化访问
//! （通常由存储层乐观并发或按键锁完成）；不同聚合之间无需协调。
//!
use crate::domain_event::{DomainEvent, DomainEvents};
use crate::entity::Entity;

/// 聚合根接口
pub trait AggregateRoot: Entity {
    /// 聚合类型名（用于消息路由与审计）
    const TYPE: &'static str;

    /// 该聚合产生的领域事件类型
    type Event: DomainEvent;

    /// 待发布事件缓冲（只读）
    fn pending_events(&self) -> &DomainEvents<Self::Event>;

    /// 待发布事件缓冲（可变，仅供本 trait 的默认方法与聚合自身使用）
    fn pending_events_mut(&mut self) -> &mut DomainEvents<Self::Event>;

    /// 追加一条领域事件到待发布缓冲
    fn raise_domain_event(&mut self, event: Self::Event) {
        self.pending_events_mut().raise(event);
    }

    /// 取出并清空待发布事件（幂等抽取），由单元工作提交后的
    /// 集成管道调用
    fn pull_domain_events(&mut self) -> Vec<Self::Event> {
        self.pending_events_mut().pull()
    }
}
