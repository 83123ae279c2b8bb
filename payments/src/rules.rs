//! 支付上下文的业务规则
//!
use crate::payment::PaymentStatus;
use modelkit_domain::rule::BusinessRule;

/// 支付金额必须为正
pub struct PaymentAmountPositive {
    pub amount_cents: i64,
}

impl BusinessRule for PaymentAmountPositive {
    fn is_broken(&self) -> bool {
        self.amount_cents <= 0
    }

    fn message(&self) -> String {
        format!("payment amount must be positive, got {}", self.amount_cents)
    }

    fn code(&self) -> &str {
        "INVALID_PAYMENT_AMOUNT"
    }
}

/// 仅待收款状态的支付可以被收款
pub struct PaymentMustBePending {
    pub current: PaymentStatus,
}

impl BusinessRule for PaymentMustBePending {
    fn is_broken(&self) -> bool {
        self.current != PaymentStatus::Pending
    }

    fn message(&self) -> String {
        format!("payment must be pending, got {}", self.current)
    }

    fn code(&self) -> &str {
        "PAYMENT_NOT_PENDING"
    }
}
