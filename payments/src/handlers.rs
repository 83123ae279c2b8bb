//! 支付上下文的处理器
//!
//! 消费订单上下文的 `order.submitted`：为订单创建恰好一笔支付并收款。
//! 投递语义为至少一次，以订单标识做去重（支付以订单标识为业务键）。
//!
use crate::integration::ORDER_SUBMITTED;
use crate::payment::Payment;
use async_trait::async_trait;
use modelkit_domain::entity::Entity;
use modelkit_domain::eventing::{HandledEventType, IntegrationEventHandler};
use modelkit_domain::integration::IntegrationMessage;
use modelkit_domain::repository::{Repository, UnitOfWork};
use modelkit_domain::specification::Predicate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

// 订单上下文载荷的本地视图（只取本上下文需要的字段）
#[derive(Debug, Deserialize)]
struct OrderSubmittedView {
    order_id: Uuid,
    total_cents: i64,
}

/// 消费 `order.submitted`，创建并收取对应支付
pub struct OrderSubmittedHandler<R>
where
    R: Repository<Payment>,
{
    uow: Arc<UnitOfWork<Payment, R>>,
}

impl<R> OrderSubmittedHandler<R>
where
    R: Repository<Payment>,
{
    pub fn new(uow: Arc<UnitOfWork<Payment, R>>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<R> IntegrationEventHandler for OrderSubmittedHandler<R>
where
    R: Repository<Payment> + 'static,
{
    fn handler_name(&self) -> &str {
        "payments.order_submitted"
    }

    fn handled_event_type(&self) -> HandledEventType {
        HandledEventType::One(ORDER_SUBMITTED.into())
    }

    async fn handle(&self, message: &IntegrationMessage) -> anyhow::Result<()> {
        let view: OrderSubmittedView = serde_json::from_value(message.payload().clone())?;

        // 去重：该订单已有支付则为重复投递，跳过
        let existing = self
            .uow
            .repository()
            .find(&Predicate::eq("order_id", view.order_id.to_string()))
            .await?;
        if !existing.is_empty() {
            tracing::debug!(
                order_id = %view.order_id,
                message_id = %message.message_id(),
                "payment already exists for order, skipping"
            );
            return Ok(());
        }

        let mut payment = Payment::request(view.order_id, view.total_cents)?;
        payment.collect()?;
        self.uow.save_entities(&mut payment).await?;
        tracing::info!(
            payment_id = %payment.id(),
            order_id = %view.order_id,
            amount_cents = view.total_cents,
            "payment collected for submitted order"
        );
        Ok(())
    }
}
