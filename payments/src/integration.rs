//! 支付上下文的集成事件翻译
//!
//! 仅 `payment.collected` 跨边界；`payment.requested` 为上下文内部事实。
//!
use crate::events::PaymentDomainEvent;
use crate::payment::Payment;
use modelkit_domain::error::DomainResult;
use modelkit_domain::integration::{IntegrationMessage, IntegrationTranslator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 跨边界事件类型标签
pub const PAYMENT_COLLECTED: &str = "payment.collected";

/// 本上下文消费的外来事件类型（订单上下文发布）
pub const ORDER_SUBMITTED: &str = "order.submitted";

/// `payment.collected` 的载荷契约
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCollectedPayload {
    pub payment_id: Uuid,
    pub order_id: Uuid,
    pub amount_cents: i64,
}

/// 支付领域事件 → 集成事件的注册翻译
pub struct PaymentIntegrationTranslator;

impl IntegrationTranslator<Payment> for PaymentIntegrationTranslator {
    fn translate(&self, event: &PaymentDomainEvent) -> DomainResult<Option<IntegrationMessage>> {
        match event {
            PaymentDomainEvent::Collected {
                at,
                payment_id,
                order_id,
                amount_cents,
            } => {
                let payload = PaymentCollectedPayload {
                    payment_id: payment_id.as_uuid(),
                    order_id: *order_id,
                    amount_cents: *amount_cents,
                };
                Ok(Some(IntegrationMessage::new(
                    PAYMENT_COLLECTED,
                    *at,
                    serde_json::to_value(payload)?,
                )))
            }
            PaymentDomainEvent::Requested { .. } => Ok(None),
        }
    }
}
