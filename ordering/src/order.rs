//! 订单聚合（Order）
//!
//! 一致性边界对外的唯一入口：订单项只能经由订单自身的方法修改。
//! 状态机 `Draft -> Submitted -> Paid -> Shipped`，`Cancelled`
//! 仅可从 `Draft`/`Submitted` 到达；终态拒绝一切后续变更。
//! 每个变更方法遵循“先查规则、再改状态、最后记事件”的契约。
//!
use crate::events::OrderDomainEvent;
use crate::rules::{ItemPricePositive, ItemQuantityInRange, OrderMustBeInState, OrderMustHaveItems};
use crate::value_objects::{Address, Money};
use chrono::{DateTime, Utc};
use modelkit_domain::aggregate::AggregateRoot;
use modelkit_domain::domain_event::DomainEvents;
use modelkit_domain::entity::Entity;
use modelkit_domain::error::DomainResult;
use modelkit_domain::rule::check_rules;
use modelkit_domain::specification::{QueryModel, Scalar};
use modelkit_domain::value_object::{ValueObject, Version};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 订单标识（默认值为 nil UUID，表示尚未赋值）
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 客户标识（来自外部上下文的不透明引用）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 订单状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Submitted,
    Paid,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Submitted => "submitted",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 订单项（聚合内部子实体，仅由 `Order` 的方法修改）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    sku: String,
    description: String,
    quantity: u32,
    unit_price: Money,
}

impl OrderItem {
    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// 行小计
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// 订单项的录入形态（聚合外部可自由构造，入聚合前经规则检查）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemDraft {
    pub sku: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// 订单创建契约：由防腐层或本地命令装配，仅供 `Order::place` 消费
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrderContract {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub shipping_address: Address,
    pub items: Vec<OrderItemDraft>,
}

/// 订单聚合根
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    version: Version,
    customer_id: CustomerId,
    shipping_address: Address,
    status: OrderStatus,
    items: Vec<OrderItem>,
    placed_at: DateTime<Utc>,
    #[serde(skip)]
    events: DomainEvents<OrderDomainEvent>,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

impl AggregateRoot for Order {
    const TYPE: &'static str = "order";
    type Event = OrderDomainEvent;

    fn pending_events(&self) -> &DomainEvents<Self::Event> {
        &self.events
    }

    fn pending_events_mut(&mut self) -> &mut DomainEvents<Self::Event> {
        &mut self.events
    }
}

impl Order {
    /// 工厂：原子地建立订单的全部必备不变式。
    ///
    /// 聚合从不以不满足不变式的状态被观察到：地址与订单项
    /// 在构造前检查，任何失败都不会产出半成品订单。
    pub fn place(contract: PlaceOrderContract) -> DomainResult<Self> {
        contract.shipping_address.validate()?;
        for draft in &contract.items {
            check_rules(&[
                &ItemQuantityInRange {
                    sku: &draft.sku,
                    quantity: draft.quantity as i64,
                },
                &ItemPricePositive {
                    sku: &draft.sku,
                    unit_price_cents: draft.unit_price.cents(),
                },
            ])?;
        }

        let mut order = Self {
            id: contract.order_id,
            version: Version::new(),
            customer_id: contract.customer_id.clone(),
            shipping_address: contract.shipping_address,
            status: OrderStatus::Draft,
            items: contract
                .items
                .into_iter()
                .map(|d| OrderItem {
                    sku: d.sku,
                    description: d.description,
                    quantity: d.quantity,
                    unit_price: d.unit_price,
                })
                .collect(),
            placed_at: Utc::now(),
            events: DomainEvents::new(),
        };
        order.raise_domain_event(OrderDomainEvent::Created {
            at: order.placed_at,
            order_id: order.id,
            customer_id: contract.customer_id,
        });
        Ok(order)
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// 订单总额（各行小计之和）
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total())
    }

    /// 草稿期追加订单项（不产生领域事件）
    pub fn add_item(&mut self, draft: OrderItemDraft) -> DomainResult<()> {
        check_rules(&[
            &OrderMustBeInState {
                current: self.status,
                allowed: &[OrderStatus::Draft],
                action: "add an item to",
            },
            &ItemQuantityInRange {
                sku: &draft.sku,
                quantity: draft.quantity as i64,
            },
            &ItemPricePositive {
                sku: &draft.sku,
                unit_price_cents: draft.unit_price.cents(),
            },
        ])?;

        self.items.push(OrderItem {
            sku: draft.sku,
            description: draft.description,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
        });
        Ok(())
    }

    /// 提交订单：Draft -> Submitted
    pub fn submit(&mut self) -> DomainResult<()> {
        check_rules(&[
            &OrderMustBeInState {
                current: self.status,
                allowed: &[OrderStatus::Draft],
                action: "submit",
            },
            &OrderMustHaveItems {
                item_count: self.items.len(),
            },
        ])?;

        self.status = OrderStatus::Submitted;
        self.raise_domain_event(OrderDomainEvent::Submitted {
            at: Utc::now(),
            order_id: self.id,
            customer_id: self.customer_id.clone(),
            total: self.total(),
        });
        Ok(())
    }

    /// 标记已支付：Submitted -> Paid
    pub fn mark_paid(&mut self) -> DomainResult<()> {
        check_rules(&[&OrderMustBeInState {
            current: self.status,
            allowed: &[OrderStatus::Submitted],
            action: "mark as paid",
        }])?;

        self.status = OrderStatus::Paid;
        self.raise_domain_event(OrderDomainEvent::Paid {
            at: Utc::now(),
            order_id: self.id,
        });
        Ok(())
    }

    /// 发货：Paid -> Shipped（终态）
    pub fn ship(&mut self) -> DomainResult<()> {
        check_rules(&[&OrderMustBeInState {
            current: self.status,
            allowed: &[OrderStatus::Paid],
            action: "ship",
        }])?;

        self.status = OrderStatus::Shipped;
        self.raise_domain_event(OrderDomainEvent::Shipped {
            at: Utc::now(),
            order_id: self.id,
        });
        Ok(())
    }

    /// 取消：仅可从 Draft / Submitted 到达（终态）
    pub fn cancel(&mut self) -> DomainResult<()> {
        check_rules(&[&OrderMustBeInState {
            current: self.status,
            allowed: &[OrderStatus::Draft, OrderStatus::Submitted],
            action: "cancel",
        }])?;

        self.status = OrderStatus::Cancelled;
        self.raise_domain_event(OrderDomainEvent::Cancelled {
            at: Utc::now(),
            order_id: self.id,
        });
        Ok(())
    }
}

// 查询投影：规约翻译与内存求值共用的命名字段
impl QueryModel for Order {
    fn field(&self, name: &str) -> Option<Scalar> {
        match name {
            "status" => Some(self.status.as_str().into()),
            "total_cents" => Some(self.total().cents().into()),
            "placed_at" => Some(self.placed_at.into()),
            "customer_id" => Some(self.customer_id.as_str().into()),
            _ => None,
        }
    }
}
