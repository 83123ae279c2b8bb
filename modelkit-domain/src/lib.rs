//! 领域建模基础库（modelkit-domain）
//!
//! 提供以领域建模为中心的通用抽象与构件，用于在应用中实现：
//! - 实体（`entity`）与值对象（`value_object`）：标识相等与结构相等
//! - 业务规则（`rule`）：快速失败与汇总校验两种检查模式
//! - 规约（`specification`）：可组合、可翻译为原生查询的业务谓词
//! - 聚合根（`aggregate`）与领域事件（`domain_event`）：规则守护的
//!   变更契约与待发布事件缓冲
//! - 集成事件（`integration`）与事件系统（`eventing`）：翻译管道、
//!   总线与分发器
//! - 仓储与单元工作（`repository`）：提交后驱动集成管道
//!
//! 本 crate 尽量保持与存储与传输实现解耦，仅定义领域层接口与最小必要的
//! 错误类型，以便在不同基础设施（例如 Postgres、消息中间件等）上进行
//! 适配实现。
//!
//! 典型用法：
//! 1. 定义聚合与领域事件，在变更方法内以 `rule::check_rules` 守护每次转移；
//! 2. 为聚合实现 `IntegrationTranslator`，声明哪些事实需要跨边界；
//! 3. 以 `UnitOfWork::save_entities` 作为提交点，提交后由
//!    `IntegrationPipeline` 抽取、翻译并发布集成事件；
//! 4. 远端上下文注册 `IntegrationEventHandler`，经 `EventDispatcher` 消费。
//!
pub mod aggregate;
pub mod domain_event;
pub mod entity;
pub mod error;
#[cfg(feature = "eventing")]
pub mod eventing;
pub mod integration;
pub mod repository;
pub mod rule;
pub mod specification;
pub mod value_object;
