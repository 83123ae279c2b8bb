//! 订单限界上下文（ordering）
//!
//! 订单聚合及其规则、规约、领域事件，防腐层翻译，
//! 集成事件翻译与命令/集成处理器。
//! 与支付上下文仅通过异步集成事件协作，互不共享内部模型。
//!
pub mod commands;
pub mod events;
pub mod handlers;
pub mod integration;
pub mod order;
pub mod rules;
pub mod specifications;
pub mod translator;
pub mod value_objects;
