use bigdecimal::BigDecimal;
use serde_json::json;
use uuid::Uuid;

use crate::domain::account::Identity;
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderPage, OrderView, CURRENCY};
use crate::domain::ports::{AnalyticsSink, OrderRepository};

/// Turns an accumulated cart into an immutable order. The order write and
/// the cart clear are one atomic unit inside the repository; this layer owns
/// the auth gate and the purchase event.
pub struct CheckoutService<O, A> {
    orders: O,
    analytics: A,
}

impl<O: OrderRepository, A: AnalyticsSink> CheckoutService<O, A> {
    pub fn new(orders: O, analytics: A) -> Self {
        Self { orders, analytics }
    }

    /// Create a pending order from the caller's cart. `client_total` is the
    /// figure the caller displayed at checkout; it is verified against the
    /// recomputed cart total and a mismatch rejects the order.
    pub fn create_order(
        &self,
        identity: Option<&Identity>,
        client_total: BigDecimal,
    ) -> Result<OrderView, DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;

        let order =
            self.orders
                .create_from_cart(identity.account_id, &identity.email, &client_total)?;

        self.analytics.log_event(
            "purchase",
            json!({
                "transaction_id": order.id,
                "value": order.total_amount.to_string(),
                "currency": CURRENCY,
            }),
        );

        Ok(order)
    }

    /// An order is only visible to its owner; anyone else sees `NotFound`.
    pub fn order(&self, identity: Option<&Identity>, id: Uuid) -> Result<OrderView, DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;
        self.orders
            .find_by_id(id)?
            .filter(|o| o.account_id == identity.account_id)
            .ok_or(DomainError::NotFound)
    }

    pub fn list_orders(
        &self,
        identity: Option<&Identity>,
        page: i64,
        limit: i64,
    ) -> Result<OrderPage, DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        self.orders
            .list_for_account(identity.account_id, page, limit)
    }
}
