//! 订单上下文的处理器
//!
//! 命令处理器：装配/翻译输入 → 调用聚合工厂或方法 → 单元工作提交。
//! 规则违反与未找到在此边界回收为结构化错误，绝不静默吞掉。
//! 集成处理器：消费支付上下文的 `payment.collected`，推进订单状态，
//! 在至少一次投递下保持幂等。
//!
use crate::commands::{ImportExternalOrder, PlaceOrder, SubmitOrder};
use crate::integration::PAYMENT_COLLECTED;
use crate::order::{CustomerId, Order, OrderId, OrderStatus, PlaceOrderContract};
use crate::translator;
use async_trait::async_trait;
use modelkit_application::command_handler::CommandHandler;
use modelkit_application::context::AppContext;
use modelkit_application::error::AppError;
use modelkit_domain::entity::Entity;
use modelkit_domain::eventing::{HandledEventType, IntegrationEventHandler};
use modelkit_domain::integration::IntegrationMessage;
use modelkit_domain::repository::{Repository, UnitOfWork};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// 下单：装配创建契约并交给工厂
pub struct PlaceOrderHandler<R>
where
    R: Repository<Order>,
{
    uow: Arc<UnitOfWork<Order, R>>,
}

impl<R> PlaceOrderHandler<R>
where
    R: Repository<Order>,
{
    pub fn new(uow: Arc<UnitOfWork<Order, R>>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<R> CommandHandler<PlaceOrder> for PlaceOrderHandler<R>
where
    R: Repository<Order> + 'static,
{
    async fn handle(&self, _ctx: &AppContext, cmd: PlaceOrder) -> Result<(), AppError> {
        let mut order = Order::place(PlaceOrderContract {
            order_id: cmd.order_id,
            customer_id: CustomerId::new(cmd.customer_id),
            shipping_address: cmd.shipping_address,
            items: cmd.items,
        })?;
        self.uow.save_entities(&mut order).await?;
        tracing::info!(order_id = %order.id(), "order placed");
        Ok(())
    }
}

/// 导入外部订单：防腐层翻译在聚合工厂之前拦截畸形数据
pub struct ImportExternalOrderHandler<R>
where
    R: Repository<Order>,
{
    uow: Arc<UnitOfWork<Order, R>>,
}

impl<R> ImportExternalOrderHandler<R>
where
    R: Repository<Order>,
{
    pub fn new(uow: Arc<UnitOfWork<Order, R>>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<R> CommandHandler<ImportExternalOrder> for ImportExternalOrderHandler<R>
where
    R: Repository<Order> + 'static,
{
    async fn handle(&self, _ctx: &AppContext, cmd: ImportExternalOrder) -> Result<(), AppError> {
        // 翻译失败即边界规则违反：未创建、未持久化任何聚合
        let contract = translator::translate(&cmd.external)?;
        let mut order = Order::place(contract)?;
        self.uow.save_entities(&mut order).await?;
        tracing::info!(
            order_id = %order.id(),
            external_id = %cmd.external.external_id,
            "external order imported"
        );
        Ok(())
    }
}

/// 提交订单
pub struct SubmitOrderHandler<R>
where
    R: Repository<Order>,
{
    uow: Arc<UnitOfWork<Order, R>>,
}

impl<R> SubmitOrderHandler<R>
where
    R: Repository<Order>,
{
    pub fn new(uow: Arc<UnitOfWork<Order, R>>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<R> CommandHandler<SubmitOrder> for SubmitOrderHandler<R>
where
    R: Repository<Order> + 'static,
{
    async fn handle(&self, _ctx: &AppContext, cmd: SubmitOrder) -> Result<(), AppError> {
        let mut order = self
            .uow
            .repository()
            .get_by_id(&cmd.order_id)
            .await?
            .ok_or_else(|| AppError::AggregateNotFound(cmd.order_id.to_string()))?;
        order.submit()?;
        self.uow.save_entities(&mut order).await?;
        tracing::info!(order_id = %cmd.order_id, total = %order.total(), "order submitted");
        Ok(())
    }
}

// 支付上下文载荷的本地视图（只取本上下文需要的字段）
#[derive(Debug, Deserialize)]
struct PaymentCollectedView {
    order_id: Uuid,
}

/// 消费 `payment.collected`：将对应订单推进为已支付。
///
/// 幂等：订单已离开 Submitted 状态时重复投递是空操作。
pub struct PaymentCollectedHandler<R>
where
    R: Repository<Order>,
{
    uow: Arc<UnitOfWork<Order, R>>,
}

impl<R> PaymentCollectedHandler<R>
where
    R: Repository<Order>,
{
    pub fn new(uow: Arc<UnitOfWork<Order, R>>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<R> IntegrationEventHandler for PaymentCollectedHandler<R>
where
    R: Repository<Order> + 'static,
{
    fn handler_name(&self) -> &str {
        "ordering.payment_collected"
    }

    fn handled_event_type(&self) -> HandledEventType {
        HandledEventType::One(PAYMENT_COLLECTED.into())
    }

    async fn handle(&self, message: &IntegrationMessage) -> anyhow::Result<()> {
        let view: PaymentCollectedView = serde_json::from_value(message.payload().clone())?;
        let order_id = OrderId::from_uuid(view.order_id);

        let Some(mut order) = self.uow.repository().get_by_id(&order_id).await? else {
            anyhow::bail!("order {order_id} not found for payment");
        };

        if order.status() != OrderStatus::Submitted {
            // 重复投递：已处理过
            tracing::debug!(
                order_id = %order_id,
                status = %order.status(),
                message_id = %message.message_id(),
                "payment already applied, skipping"
            );
            return Ok(());
        }

        order.mark_paid()?;
        self.uow.save_entities(&mut order).await?;
        tracing::info!(order_id = %order_id, "order marked as paid");
        Ok(())
    }
}
