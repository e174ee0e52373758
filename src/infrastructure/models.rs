use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::account::Account;
use crate::domain::cart::CartItem;
use crate::domain::payment::{CardBrand, PaymentMethod};
use crate::domain::product::Product;
use crate::domain::subscription::Subscription;
use crate::schema::{
    accounts, analytics_outbox, cart_items, email_subscriptions, order_items, orders,
    payment_methods, products,
};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccountRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartItemRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub image_url: String,
    pub description: String,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_items)]
pub struct NewCartItemRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub image_url: String,
    pub description: String,
    pub quantity: i32,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        CartItem {
            name: row.name,
            unit_price: row.unit_price,
            image_url: row.image_url,
            description: row.description,
            quantity: row.quantity,
            added_at: row.added_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub contact_email: String,
    pub total_amount: BigDecimal,
    pub status: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub contact_email: String,
    pub total_amount: BigDecimal,
    pub status: String,
    pub payment_method: String,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub image_url: String,
    pub description: String,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub image_url: String,
    pub description: String,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

impl From<OrderItemRow> for CartItem {
    fn from(row: OrderItemRow) -> Self {
        CartItem {
            name: row.name,
            unit_price: row.unit_price,
            image_url: row.image_url,
            description: row.description,
            quantity: row.quantity,
            added_at: row.added_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub original_price: BigDecimal,
    pub discount: i32,
    pub image_url: String,
    pub category: String,
    pub stock: i32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub original_price: BigDecimal,
    pub discount: i32,
    pub image_url: String,
    pub category: String,
    pub stock: i32,
    pub featured: bool,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub original_price: Option<BigDecimal>,
    pub discount: Option<i32>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i32>,
    pub featured: Option<bool>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            original_price: row.original_price,
            discount: row.discount,
            image_url: row.image_url,
            category: row.category,
            stock: row.stock,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = payment_methods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentMethodRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub cardholder_name: String,
    pub card_last4: String,
    pub card_brand: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = payment_methods)]
pub struct NewPaymentMethodRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub cardholder_name: String,
    pub card_last4: String,
    pub card_brand: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub is_default: bool,
}

impl From<PaymentMethodRow> for PaymentMethod {
    fn from(row: PaymentMethodRow) -> Self {
        PaymentMethod {
            id: row.id,
            cardholder_name: row.cardholder_name,
            card_last4: row.card_last4,
            card_brand: CardBrand::parse(&row.card_brand),
            expiry_month: row.expiry_month,
            expiry_year: row.expiry_year,
            is_default: row.is_default,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = email_subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubscriptionRow {
    pub id: Uuid,
    pub email: String,
    pub active: bool,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = email_subscriptions)]
pub struct NewSubscriptionRow {
    pub id: Uuid,
    pub email: String,
    pub active: bool,
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Subscription {
            id: row.id,
            email: row.email,
            active: row.active,
            subscribed_at: row.subscribed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = analytics_outbox)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnalyticsEventRow {
    pub id: Uuid,
    pub event_type: String,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = analytics_outbox)]
pub struct NewAnalyticsEventRow {
    pub id: Uuid,
    pub event_type: String,
    pub payload: Value,
}
