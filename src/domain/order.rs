use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::cart::CartItem;

/// The single external payment provider orders are settled through.
pub const PAYMENT_METHOD: &str = "klarna";

/// Currency code attached to purchase analytics events.
pub const CURRENCY: &str = "GBP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "paid" => Some(OrderStatus::Paid),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// Immutable checkout record: the cart snapshot plus the verified total.
/// `created_at` is assigned by the store, not the client clock.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub account_id: Uuid,
    pub contact_email: String,
    pub items: Vec<CartItem>,
    pub total_amount: BigDecimal,
    pub status: OrderStatus,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

/// One page of an account's order history.
#[derive(Debug, Clone)]
pub struct OrderPage {
    pub items: Vec<OrderView>,
    pub total: i64,
}
