//! 事件子系统（eventing）
//!
//! 提供集成事件发布/订阅与处理的基础抽象与运行时：
//! - `EventBus`：统一发布/订阅接口（含内存实现）；
//! - `IntegrationPipeline`：提交后抽取领域事件、翻译并发布；
//! - `IntegrationEventHandler`：消费跨边界集成事件；
//! - `EventDispatcher`：订阅与调度处理，并发执行、失败记录。
//!
//! 该模块仅定义协议与编排，不绑定具体传输实现，可对接任意消息系统或内存实现。
//!
pub mod bus;
pub mod bus_inmemory;
pub mod dispatcher;
pub mod handler;
pub mod pipeline;

pub use bus::EventBus;
pub use bus_inmemory::InMemoryEventBus;
pub use dispatcher::{DispatcherHandle, EventDispatcher};
pub use handler::{HandledEventType, IntegrationEventHandler};
pub use pipeline::IntegrationPipeline;
