//! 订单上下文的业务规则
//!
//! 每条规则绑定被检查的具体值，暴露 code 与人类可读消息。
//! 聚合变更方法用 `check_rules` 快速失败；防腐层用 `validate_all`
//! 一次性汇总边界校验问题。
//!
use crate::order::OrderStatus;
use modelkit_domain::rule::BusinessRule;

/// 提交订单前必须至少有一个订单项
pub struct OrderMustHaveItems {
    pub item_count: usize,
}

impl BusinessRule for OrderMustHaveItems {
    fn is_broken(&self) -> bool {
        self.item_count == 0
    }

    fn message(&self) -> String {
        "order must contain at least one item".into()
    }

    fn code(&self) -> &str {
        "ORDER_EMPTY"
    }
}

/// 状态机前置条件：当前状态必须属于允许的前序状态集合。
///
/// 终态（shipped / cancelled）不在任何允许集合内，因而天然拒绝后续变更。
pub struct OrderMustBeInState {
    pub current: OrderStatus,
    pub allowed: &'static [OrderStatus],
    pub action: &'static str,
}

impl BusinessRule for OrderMustBeInState {
    fn is_broken(&self) -> bool {
        !self.allowed.contains(&self.current)
    }

    fn message(&self) -> String {
        let allowed = self
            .allowed
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "cannot {} an order in status {}, requires {}",
            self.action,
            self.current.as_str(),
            allowed
        )
    }

    fn code(&self) -> &str {
        "ORDER_INVALID_STATE"
    }
}

// --- 防腐层边界规则 ---

/// 外部订单必须携带外部标识
pub struct ExternalIdRequired<'a> {
    pub external_id: &'a str,
}

impl BusinessRule for ExternalIdRequired<'_> {
    fn is_broken(&self) -> bool {
        self.external_id.trim().is_empty()
    }

    fn message(&self) -> String {
        "external order id is required".into()
    }

    fn code(&self) -> &str {
        "EXTERNAL_ID_REQUIRED"
    }
}

/// 收货地址必须完整
pub struct ShippingAddressComplete {
    pub complete: bool,
}

impl BusinessRule for ShippingAddressComplete {
    fn is_broken(&self) -> bool {
        !self.complete
    }

    fn message(&self) -> String {
        "shipping address is incomplete".into()
    }

    fn code(&self) -> &str {
        "ADDRESS_INCOMPLETE"
    }
}

/// 订单项数量的合法上限
pub const MAX_ITEM_QUANTITY: i64 = u32::MAX as i64;

/// 导入/录入的数量必须为正且不超过上限。
///
/// 上限即订单项数量的表示范围：越界的外部数据在边界被拒绝，
/// 绝不截断后继续。
pub struct ItemQuantityInRange<'a> {
    pub sku: &'a str,
    pub quantity: i64,
}

impl BusinessRule for ItemQuantityInRange<'_> {
    fn is_broken(&self) -> bool {
        self.quantity <= 0 || self.quantity > MAX_ITEM_QUANTITY
    }

    fn message(&self) -> String {
        format!(
            "item {} quantity must be between 1 and {}, got {}",
            self.sku, MAX_ITEM_QUANTITY, self.quantity
        )
    }

    fn code(&self) -> &str {
        "INVALID_ITEM_QUANTITY"
    }
}

/// 导入/录入的单价必须为正
pub struct ItemPricePositive<'a> {
    pub sku: &'a str,
    pub unit_price_cents: i64,
}

impl BusinessRule for ItemPricePositive<'_> {
    fn is_broken(&self) -> bool {
        self.unit_price_cents <= 0
    }

    fn message(&self) -> String {
        format!(
            "item {} unit price must be positive, got {}",
            self.sku, self.unit_price_cents
        )
    }

    fn code(&self) -> &str {
        "INVALID_ITEM_PRICE"
    }
}
