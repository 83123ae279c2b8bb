//! 订单领域事件
//!
//! 创建时打上时间戳的不可变事实，仅由 `Order` 的方法产生。
//!
use crate::order::{CustomerId, OrderId};
use crate::value_objects::Money;
use chrono::{DateTime, Utc};
use modelkit_domain::domain_event::DomainEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderDomainEvent {
    Created {
        at: DateTime<Utc>,
        order_id: OrderId,
        customer_id: CustomerId,
    },
    Submitted {
        at: DateTime<Utc>,
        order_id: OrderId,
        customer_id: CustomerId,
        total: Money,
    },
    Paid {
        at: DateTime<Utc>,
        order_id: OrderId,
    },
    Shipped {
        at: DateTime<Utc>,
        order_id: OrderId,
    },
    Cancelled {
        at: DateTime<Utc>,
        order_id: OrderId,
    },
}

impl DomainEvent for OrderDomainEvent {
    fn event_type(&self) -> &str {
        match self {
            OrderDomainEvent::Created { .. } => "order.created",
            OrderDomainEvent::Submitted { .. } => "order.submitted",
            OrderDomainEvent::Paid { .. } => "order.paid",
            OrderDomainEvent::Shipped { .. } => "order.shipped",
            OrderDomainEvent::Cancelled { .. } => "order.cancelled",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderDomainEvent::Created { at, .. }
            | OrderDomainEvent::Submitted { at, .. }
            | OrderDomainEvent::Paid { at, .. }
            | OrderDomainEvent::Shipped { at, .. }
            | OrderDomainEvent::Cancelled { at, .. } => *at,
        }
    }
}
