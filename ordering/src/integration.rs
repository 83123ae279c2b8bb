//! 订单上下文的集成事件翻译
//!
//! 仅 `order.submitted` 跨边界：载荷只携带可移植的原始数据
//! （标识、金额分值、币种），不泄漏聚合内部结构。
//! 载荷形态是跨上下文契约，变更需要显式版本化。
//!
use crate::events::OrderDomainEvent;
use crate::order::Order;
use modelkit_domain::error::DomainResult;
use modelkit_domain::integration::{IntegrationMessage, IntegrationTranslator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 跨边界事件类型标签
pub const ORDER_SUBMITTED: &str = "order.submitted";

/// 本上下文消费的外来事件类型（支付上下文发布）
pub const PAYMENT_COLLECTED: &str = "payment.collected";

/// `order.submitted` 的载荷契约
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmittedPayload {
    pub order_id: Uuid,
    pub customer_id: String,
    pub total_cents: i64,
    pub currency: String,
}

/// 订单领域事件 → 集成事件的注册翻译
pub struct OrderIntegrationTranslator;

impl IntegrationTranslator<Order> for OrderIntegrationTranslator {
    fn translate(&self, event: &OrderDomainEvent) -> DomainResult<Option<IntegrationMessage>> {
        match event {
            OrderDomainEvent::Submitted {
                at,
                order_id,
                customer_id,
                total,
            } => {
                let payload = OrderSubmittedPayload {
                    order_id: order_id.as_uuid(),
                    customer_id: customer_id.to_string(),
                    total_cents: total.cents(),
                    currency: "USD".into(),
                };
                Ok(Some(IntegrationMessage::new(
                    ORDER_SUBMITTED,
                    *at,
                    serde_json::to_value(payload)?,
                )))
            }
            // created/paid/shipped/cancelled 仅在本上下文内有意义
            _ => Ok(None),
        }
    }
}
