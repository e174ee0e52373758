use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product, ProductUpdate};

const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300";
const DEFAULT_CATEGORY: &str = "general";
const FEATURED_LIMIT: i64 = 6;

/// Catalog entry as submitted over the API, before defaults are resolved.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub original_price: Option<BigDecimal>,
    pub discount: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: i32,
    pub featured: bool,
}

pub struct CatalogService<P> {
    products: P,
}

impl<P: ProductRepository> CatalogService<P> {
    pub fn new(products: P) -> Self {
        Self { products }
    }

    pub fn add_product(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "product name must not be empty".to_string(),
            ));
        }
        if draft.price < BigDecimal::zero() {
            return Err(DomainError::Validation(
                "price must not be negative".to_string(),
            ));
        }
        if draft.stock < 0 {
            return Err(DomainError::Validation(
                "stock must not be negative".to_string(),
            ));
        }

        let new = NewProduct {
            original_price: draft.original_price.unwrap_or_else(|| draft.price.clone()),
            image_url: draft
                .image_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            category: draft
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            discount: draft.discount,
            stock: draft.stock,
            featured: draft.featured,
        };
        self.products.insert(&new)
    }

    pub fn product(&self, id: Uuid) -> Result<Product, DomainError> {
        self.products.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.products.list()
    }

    pub fn featured_products(&self) -> Result<Vec<Product>, DomainError> {
        self.products.featured(FEATURED_LIMIT)
    }

    pub fn products_by_category(&self, category: &str) -> Result<Vec<Product>, DomainError> {
        self.products.by_category(category)
    }

    pub fn search_products(&self, term: &str) -> Result<Vec<Product>, DomainError> {
        self.products.search(term)
    }

    pub fn update_product(
        &self,
        id: Uuid,
        changes: ProductUpdate,
    ) -> Result<Product, DomainError> {
        if let Some(price) = &changes.price {
            if *price < BigDecimal::zero() {
                return Err(DomainError::Validation(
                    "price must not be negative".to_string(),
                ));
            }
        }
        if matches!(changes.stock, Some(stock) if stock < 0) {
            return Err(DomainError::Validation(
                "stock must not be negative".to_string(),
            ));
        }
        self.products.update(id, &changes)
    }

    pub fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        self.products.delete(id)
    }

    /// Restock with a positive delta, sell with a negative one. The store
    /// rejects a resulting negative level.
    pub fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Product, DomainError> {
        self.products.adjust_stock(id, delta)
    }
}
