//! 防腐层（Anti-Corruption Translator）
//!
//! 将外部上下文的订单形态校验并重塑为本上下文的创建契约。
//! 纯函数、无副作用：只做形态与校验，从不构造聚合本身——
//! 畸形的外部数据在此被拦截，不会到达领域工厂。
//!
use crate::order::{CustomerId, OrderId, OrderItemDraft, PlaceOrderContract};
use crate::rules::{
    ExternalIdRequired, ItemPricePositive, ItemQuantityInRange, ShippingAddressComplete,
};
use crate::value_objects::{Address, Money};
use modelkit_domain::error::{DomainError, DomainResult};
use modelkit_domain::rule::{BusinessRule, validate_all};
use serde::{Deserialize, Serialize};

/// 外部订单形态（另一上下文/系统的数据，不得泄漏进本上下文的模型）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalOrder {
    pub external_id: String,
    pub customer_ref: String,
    pub ship_to_line1: String,
    pub ship_to_city: String,
    pub ship_to_postal_code: String,
    pub ship_to_country: String,
    pub lines: Vec<ExternalOrderLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalOrderLine {
    pub sku: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

/// 校验并重塑外部订单为创建契约。
///
/// 边界校验使用 `validate_all`：一次性汇总上报所有问题
/// （如缺失外部标识、地址不完整、数量/单价非正），
/// 而不是逐条暴露。成功时返回仅供 `Order::place` 消费的契约。
pub fn translate(external: &ExternalOrder) -> DomainResult<PlaceOrderContract> {
    let address = Address {
        line1: external.ship_to_line1.clone(),
        city: external.ship_to_city.clone(),
        postal_code: external.ship_to_postal_code.clone(),
        country: external.ship_to_country.clone(),
    };

    let mut rules: Vec<Box<dyn BusinessRule + '_>> = vec![
        Box::new(ExternalIdRequired {
            external_id: &external.external_id,
        }),
        Box::new(ShippingAddressComplete {
            complete: address.is_complete(),
        }),
    ];
    for line in &external.lines {
        rules.push(Box::new(ItemQuantityInRange {
            sku: &line.sku,
            quantity: line.quantity,
        }));
        rules.push(Box::new(ItemPricePositive {
            sku: &line.sku,
            unit_price_cents: line.unit_price_cents,
        }));
    }
    let refs: Vec<&dyn BusinessRule> = rules.iter().map(|r| r.as_ref()).collect();
    validate_all(&refs)?;

    // 数量规则已保证范围；转换仍显式检查，绝不截断
    let mut items = Vec::with_capacity(external.lines.len());
    for line in &external.lines {
        let quantity = u32::try_from(line.quantity).map_err(|_| DomainError::InvalidValue {
            reason: format!("item {} quantity {} out of range", line.sku, line.quantity),
        })?;
        items.push(OrderItemDraft {
            sku: line.sku.clone(),
            description: line.description.clone(),
            quantity,
            unit_price: Money::from_cents(line.unit_price_cents),
        });
    }

    Ok(PlaceOrderContract {
        order_id: OrderId::new(),
        customer_id: CustomerId::new(external.customer_ref.clone()),
        shipping_address: address,
        items,
    })
}
