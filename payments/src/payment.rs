//! 支付聚合（Payment）
//!
//! 以订单标识为业务键：一个订单至多对应一笔支付。
//! 订单标识以可移植的 UUID 形式携带，不引用订单上下文的内部模型。
//!
use crate::events::PaymentDomainEvent;
use crate::rules::{PaymentAmountPositive, PaymentMustBePending};
use chrono::{DateTime, Utc};
use modelkit_domain::aggregate::AggregateRoot;
use modelkit_domain::domain_event::DomainEvents;
use modelkit_domain::entity::Entity;
use modelkit_domain::error::DomainResult;
use modelkit_domain::rule::{check_rule, check_rules};
use modelkit_domain::specification::{QueryModel, Scalar};
use modelkit_domain::value_object::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 支付标识（默认值为 nil UUID，表示尚未赋值）
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Collected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Collected => "collected",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 支付聚合根
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    version: Version,
    order_id: Uuid,
    amount_cents: i64,
    status: PaymentStatus,
    requested_at: DateTime<Utc>,
    #[serde(skip)]
    events: DomainEvents<PaymentDomainEvent>,
}

impl Entity for Payment {
    type Id = PaymentId;

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

impl AggregateRoot for Payment {
    const TYPE: &'static str = "payment";
    type Event = PaymentDomainEvent;

    fn pending_events(&self) -> &DomainEvents<Self::Event> {
        &self.events
    }

    fn pending_events_mut(&mut self) -> &mut DomainEvents<Self::Event> {
        &mut self.events
    }
}

impl Payment {
    /// 工厂：为订单登记一笔待收款的支付
    pub fn request(order_id: Uuid, amount_cents: i64) -> DomainResult<Self> {
        check_rule(&PaymentAmountPositive { amount_cents })?;

        let requested_at = Utc::now();
        let mut payment = Self {
            id: PaymentId::new(),
            version: Version::new(),
            order_id,
            amount_cents,
            status: PaymentStatus::Pending,
            requested_at,
            events: DomainEvents::new(),
        };
        payment.raise_domain_event(PaymentDomainEvent::Requested {
            at: requested_at,
            payment_id: payment.id,
            order_id,
            amount_cents,
        });
        Ok(payment)
    }

    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    /// 收款：Pending -> Collected
    pub fn collect(&mut self) -> DomainResult<()> {
        check_rules(&[&PaymentMustBePending {
            current: self.status,
        }])?;

        self.status = PaymentStatus::Collected;
        self.raise_domain_event(PaymentDomainEvent::Collected {
            at: Utc::now(),
            payment_id: self.id,
            order_id: self.order_id,
            amount_cents: self.amount_cents,
        });
        Ok(())
    }
}

impl QueryModel for Payment {
    fn field(&self, name: &str) -> Option<Scalar> {
        match name {
            "order_id" => Some(self.order_id.to_string().into()),
            "status" => Some(self.status.as_str().into()),
            "amount_cents" => Some(self.amount_cents.into()),
            _ => None,
        }
    }
}
