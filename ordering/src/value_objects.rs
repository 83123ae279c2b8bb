//! 订单上下文的值对象
//!
use modelkit_domain::error::{DomainError, DomainResult};
use modelkit_domain::value_object::ValueObject;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// 金额（最小货币单位，分）
///
/// 以整数分表示，避免浮点误差；构造后不可变。
/// 算术为饱和语义：超出 `i64` 表示范围时停在边界，不会 panic。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// 按数量放大（行小计），饱和于 `i64` 边界
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }
}

impl ValueObject for Money {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        if self.0 < 0 {
            return Err(DomainError::InvalidValue {
                reason: format!("money must not be negative, got {}", self.0),
            });
        }
        Ok(())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, (self.0 % 100).abs())
    }
}

/// 收货地址
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    pub fn is_complete(&self) -> bool {
        !self.line1.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.postal_code.trim().is_empty()
            && !self.country.trim().is_empty()
    }
}

impl ValueObject for Address {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        if !self.is_complete() {
            return Err(DomainError::InvalidValue {
                reason: "shipping address is incomplete".into(),
            });
        }
        Ok(())
    }
}
