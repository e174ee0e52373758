use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Product {
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

/// Catalog entry as submitted; optional fields are resolved to their
/// defaults before the row is written.
#[derive(Debug, Clone)]
pub struct NewProduct {
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

/// Field-level catalog update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
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
