//! 订单上下文的应用层命令
//!
use crate::order::{OrderId, OrderItemDraft};
use crate::translator::ExternalOrder;
use crate::value_objects::Address;
use modelkit_application::command::Command;

/// 本地下单
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub order_id: OrderId,
    pub customer_id: String,
    pub shipping_address: Address,
    pub items: Vec<OrderItemDraft>,
}

impl Command for PlaceOrder {
    const NAME: &'static str = "ordering.place_order";
}

/// 从外部系统导入订单（经防腐层校验与重塑）
#[derive(Debug, Clone)]
pub struct ImportExternalOrder {
    pub external: ExternalOrder,
}

impl Command for ImportExternalOrder {
    const NAME: &'static str = "ordering.import_external_order";
}

/// 提交订单
#[derive(Debug, Clone)]
pub struct SubmitOrder {
    pub order_id: OrderId,
}

impl Command for SubmitOrder {
    const NAME: &'static str = "ordering.submit_order";
}
