use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::account::{Account, Identity};
use super::cart::{Cart, NewCartItem};
use super::errors::DomainError;
use super::order::{OrderPage, OrderView};
use super::payment::{PaymentMethod, PaymentMethodDraft};
use super::product::{NewProduct, Product, ProductUpdate};
use super::subscription::Subscription;

pub trait CartRepository: Send + Sync + 'static {
    /// The account's cart, ordered by `added_at`. Empty when the account has
    /// no items (or no rows at all).
    fn load(&self, account_id: Uuid) -> Result<Cart, DomainError>;

    /// Merge one unit of `item` into the stored cart: increment the matching
    /// line or append a fresh one with quantity 1. Must be atomic at the line
    /// level so concurrent adds from two sessions both land. First write wins
    /// on price, image and description. Returns the updated cart.
    fn upsert_item(&self, account_id: Uuid, item: &NewCartItem) -> Result<Cart, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Snapshot the account's cart into a new pending order and clear the
    /// cart, as one atomic unit: on any failure neither the order exists nor
    /// has the cart changed. `expected_total` must equal the recomputed sum
    /// of the snapshot or the whole operation is rejected.
    fn create_from_cart(
        &self,
        account_id: Uuid,
        contact_email: &str,
        expected_total: &BigDecimal,
    ) -> Result<OrderView, DomainError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;

    /// The account's orders, newest first.
    fn list_for_account(
        &self,
        account_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<OrderPage, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn insert(&self, new: &NewProduct) -> Result<Product, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn list(&self) -> Result<Vec<Product>, DomainError>;
    fn featured(&self, limit: i64) -> Result<Vec<Product>, DomainError>;
    fn by_category(&self, category: &str) -> Result<Vec<Product>, DomainError>;
    fn search(&self, term: &str) -> Result<Vec<Product>, DomainError>;
    fn update(&self, id: Uuid, changes: &ProductUpdate) -> Result<Product, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;

    /// Apply `delta` to the stock level inside one transaction; a negative
    /// resulting stock must be rejected without changing the row.
    fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Product, DomainError>;
}

pub trait PaymentMethodRepository: Send + Sync + 'static {
    fn insert(
        &self,
        account_id: Uuid,
        draft: &PaymentMethodDraft,
    ) -> Result<PaymentMethod, DomainError>;

    /// The account's methods, newest first.
    fn list_for_account(&self, account_id: Uuid) -> Result<Vec<PaymentMethod>, DomainError>;

    fn delete(&self, account_id: Uuid, id: Uuid) -> Result<(), DomainError>;

    /// Clear the default flag on every method of the account, then set it on
    /// `id`, as one batched write.
    fn set_default(&self, account_id: Uuid, id: Uuid) -> Result<(), DomainError>;
}

pub trait AccountRepository: Send + Sync + 'static {
    /// Create the profile row for an identity, or refresh its contact fields
    /// if it already exists.
    fn upsert_profile(
        &self,
        identity: &Identity,
        display_name: &str,
    ) -> Result<Account, DomainError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;
}

pub trait SubscriptionRepository: Send + Sync + 'static {
    fn insert(&self, email: &str) -> Result<Subscription, DomainError>;
}

/// Fire-and-forget event recording. Implementations must swallow their own
/// failures; emitting an event may never fail or block the calling
/// operation.
pub trait AnalyticsSink: Send + Sync + 'static {
    fn log_event(&self, name: &str, properties: serde_json::Value);
}
