use serde_json::json;

use crate::domain::account::Identity;
use crate::domain::cart::{Cart, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::{AnalyticsSink, CartRepository};

/// Image shown for items added without one.
const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/100";

/// Merges add-item requests into the stored cart. Every operation requires a
/// signed-in identity; there is no guest cart to fall back to.
pub struct CartService<R, A> {
    carts: R,
    analytics: A,
}

impl<R: CartRepository, A: AnalyticsSink> CartService<R, A> {
    pub fn new(carts: R, analytics: A) -> Self {
        Self { carts, analytics }
    }

    /// Add one unit of `item` to the caller's cart and return the updated
    /// cart. Repeated adds of the same name accumulate quantity; the first
    /// add fixes price, image and description.
    pub fn add_item(
        &self,
        identity: Option<&Identity>,
        mut item: NewCartItem,
    ) -> Result<Cart, DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;
        if item.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "item name must not be empty".to_string(),
            ));
        }
        if item.image_url.is_empty() {
            item.image_url = PLACEHOLDER_IMAGE_URL.to_string();
        }

        let cart = self.carts.upsert_item(identity.account_id, &item)?;

        self.analytics.log_event(
            "add_to_cart",
            json!({
                "item_name": item.name,
                "price": item.unit_price.to_string(),
            }),
        );

        Ok(cart)
    }

    pub fn cart(&self, identity: Option<&Identity>) -> Result<Cart, DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;
        self.carts.load(identity.account_id)
    }

    /// Total quantity across the cart, for the badge in the UI.
    pub fn item_count(&self, identity: Option<&Identity>) -> Result<i64, DomainError> {
        Ok(self.cart(identity)?.total_item_count())
    }
}
