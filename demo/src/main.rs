//! 端到端示例：订单 → 支付 → 订单已支付
//!
//! 在同一进程内装配两个限界上下文（ordering / payments），
//! 以内存总线与内存存储演示完整闭环：
//! 下本地单 → 导入外部单 → 提交 → 支付上下文收款 → 订单回到已支付。
//!
//! 运行：`RUST_LOG=info cargo run -p demo`

use modelkit_application::command_bus::CommandBus;
use modelkit_application::context::AppContext;
use modelkit_application::{InMemoryCommandBus, InMemoryStore};
use modelkit_domain::entity::Entity;
use modelkit_domain::eventing::{
    EventDispatcher, InMemoryEventBus, IntegrationEventHandler, IntegrationPipeline,
};
use modelkit_domain::repository::{Repository, UnitOfWork};
use modelkit_domain::specification::{Predicate, Specification};
use ordering::commands::{ImportExternalOrder, PlaceOrder, SubmitOrder};
use ordering::handlers::{
    ImportExternalOrderHandler, PaymentCollectedHandler, PlaceOrderHandler, SubmitOrderHandler,
};
use ordering::integration::OrderIntegrationTranslator;
use ordering::order::{Order, OrderId, OrderItemDraft};
use ordering::specifications::ForCustomer;
use ordering::translator::{ExternalOrder, ExternalOrderLine};
use ordering::value_objects::{Address, Money};
use payments::handlers::OrderSubmittedHandler;
use payments::integration::PaymentIntegrationTranslator;
use payments::payment::Payment;
use std::sync::Arc;
use std::time::Duration;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // 共享内存总线：两个上下文之间唯一的耦合点
    let bus = Arc::new(InMemoryEventBus::new(64));

    let order_store = Arc::new(InMemoryStore::<Order>::new());
    let order_uow = Arc::new(UnitOfWork::new(
        order_store.clone(),
        IntegrationPipeline::new(Arc::new(OrderIntegrationTranslator), bus.clone()),
    ));

    let payment_store = Arc::new(InMemoryStore::<Payment>::new());
    let payment_uow = Arc::new(UnitOfWork::new(
        payment_store.clone(),
        IntegrationPipeline::new(Arc::new(PaymentIntegrationTranslator), bus.clone()),
    ));

    let commands = InMemoryCommandBus::new();
    commands.register::<PlaceOrder, _>(Arc::new(PlaceOrderHandler::new(order_uow.clone())))?;
    commands.register::<ImportExternalOrder, _>(Arc::new(ImportExternalOrderHandler::new(
        order_uow.clone(),
    )))?;
    commands.register::<SubmitOrder, _>(Arc::new(SubmitOrderHandler::new(order_uow.clone())))?;

    // 跨上下文事件回路：order.submitted → payments；payment.collected → ordering
    let dispatcher = Arc::new(EventDispatcher::new(
        bus.clone(),
        vec![
            Arc::new(OrderSubmittedHandler::new(payment_uow)) as Arc<dyn IntegrationEventHandler>,
            Arc::new(PaymentCollectedHandler::new(order_uow)),
        ],
    ));
    let handle = dispatcher.start();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let ctx = AppContext::with_correlation_id("demo-run");

    // 1) 本地下单并提交
    let order_id = OrderId::new();
    commands
        .dispatch(&ctx, PlaceOrder {
            order_id,
            customer_id: "cust-42".into(),
            shipping_address: Address {
                line1: "1 Main St".into(),
                city: "Springfield".into(),
                postal_code: "12345".into(),
                country: "US".into(),
            },
            items: vec![
                OrderItemDraft {
                    sku: "sku-1".into(),
                    description: "widget".into(),
                    quantity: 2,
                    unit_price: Money::from_cents(2500),
                },
                OrderItemDraft {
                    sku: "sku-2".into(),
                    description: "gadget".into(),
                    quantity: 1,
                    unit_price: Money::from_cents(9900),
                },
            ],
        })
        .await?;
    commands.dispatch(&ctx, SubmitOrder { order_id }).await?;

    // 2) 经防腐层导入的外部订单，同样提交
    let external = ExternalOrder {
        external_id: "legacy-77".into(),
        customer_ref: "cust-7".into(),
        ship_to_line1: "9 Side Ave".into(),
        ship_to_city: "Shelbyville".into(),
        ship_to_postal_code: "54321".into(),
        ship_to_country: "US".into(),
        lines: vec![ExternalOrderLine {
            sku: "sku-3".into(),
            description: "doohickey".into(),
            quantity: 3,
            unit_price_cents: 1200,
        }],
    };
    commands
        .dispatch(&ctx, ImportExternalOrder { external })
        .await?;
    let imported_id = *order_store
        .find(&ForCustomer("cust-7".into()).to_predicate())
        .await?
        .first()
        .map(Order::id)
        .ok_or_else(|| anyhow::anyhow!("imported order not found"))?;
    commands
        .dispatch(&ctx, SubmitOrder {
            order_id: imported_id,
        })
        .await?;

    // 等待事件回路收敛：提交 → 收款 → 已支付
    tokio::time::sleep(Duration::from_millis(300)).await;

    for order in order_store.find(&Predicate::True).await? {
        tracing::info!(
            order_id = %order.id(),
            status = %order.status(),
            total = %order.total(),
            "order settled"
        );
    }
    for payment in payment_store.find(&Predicate::True).await? {
        tracing::info!(
            payment_id = %payment.id(),
            order_id = %payment.order_id(),
            amount_cents = payment.amount_cents(),
            "payment settled"
        );
    }

    handle.shutdown();
    handle.wait().await;
    Ok(())
}
