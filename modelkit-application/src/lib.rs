//! 应用层基础库（modelkit-application）
//!
//! 提供命令侧的通用构件：命令与处理器协议、进程内命令总线、
//! 应用上下文与错误类型，以及基于内存快照的聚合存储。
//!
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod context;
pub mod error;
pub mod inmemory_command_bus;
pub mod inmemory_store;

pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_store::InMemoryStore;
