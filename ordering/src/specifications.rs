//! 订单规约
//!
//! 可组合、可翻译的查询谓词；具体规约持有自己的参数，
//! 据此产出引用命名字段的谓词 AST。
//!
use crate::order::Order;
use crate::value_objects::Money;
use chrono::{Duration, Utc};
use modelkit_domain::specification::{Predicate, Specification};

/// 待处理订单：已提交、等待支付
pub struct ReadyForProcessing;

impl Specification<Order> for ReadyForProcessing {
    fn to_predicate(&self) -> Predicate {
        Predicate::eq("status", "submitted")
    }
}

/// 逾期订单：提交后超过 `hours` 小时仍未支付
pub struct OverdueBy {
    pub hours: i64,
}

impl Specification<Order> for OverdueBy {
    fn to_predicate(&self) -> Predicate {
        let cutoff = Utc::now() - Duration::hours(self.hours);
        Predicate::eq("status", "submitted").and(Predicate::le("placed_at", cutoff))
    }
}

/// 总额不低于给定金额的订单
pub struct MinimumTotal(pub Money);

impl Specification<Order> for MinimumTotal {
    fn to_predicate(&self) -> Predicate {
        Predicate::ge("total_cents", self.0.cents())
    }
}

/// 指定客户的订单
pub struct ForCustomer(pub String);

impl Specification<Order> for ForCustomer {
    fn to_predicate(&self) -> Predicate {
        Predicate::eq("customer_id", self.0.clone())
    }
}
