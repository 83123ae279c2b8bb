//! 支付限界上下文（payments）
//!
//! 支付聚合及其规则、领域事件、集成事件翻译与集成处理器。
//! 与订单上下文仅通过异步集成事件协作，互不共享内部模型。
//!
pub mod events;
pub mod handlers;
pub mod integration;
pub mod payment;
pub mod rules;
