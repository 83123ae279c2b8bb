//! 支付领域事件
//!
use crate::payment::PaymentId;
use chrono::{DateTime, Utc};
use modelkit_domain::domain_event::DomainEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaymentDomainEvent {
    Requested {
        at: DateTime<Utc>,
        payment_id: PaymentId,
        order_id: Uuid,
        amount_cents: i64,
    },
    Collected {
        at: DateTime<Utc>,
        payment_id: PaymentId,
        order_id: Uuid,
        amount_cents: i64,
    },
}

impl DomainEvent for PaymentDomainEvent {
    fn event_type(&self) -> &str {
        match self {
            PaymentDomainEvent::Requested { .. } => "payment.requested",
            PaymentDomainEvent::Collected { .. } => "payment.collected",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PaymentDomainEvent::Requested { at, .. }
            | PaymentDomainEvent::Collected { at, .. } => *at,
        }
    }
}
