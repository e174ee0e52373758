use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::catalog_service::ProductDraft;
use crate::domain::product::{Product, ProductUpdate};
use crate::errors::AppError;
use crate::AppCatalogService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price as a string, e.g. "19.99"
    pub price: String,
    pub original_price: Option<String>,
    #[serde(default)]
    pub discount: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub original_price: Option<String>,
    pub discount: Option<i32>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i32>,
    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustStockRequest {
    /// Positive to restock, negative to sell.
    pub delta: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: String,
    pub original_price: String,
    pub discount: i32,
    pub image_url: String,
    pub category: String,
    pub stock: i32,
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price.to_string(),
            original_price: p.original_price.to_string(),
            discount: p.discount,
            image_url: p.image_url,
            category: p.category,
            stock: p.stock,
            featured: p.featured,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

fn parse_price(field: &str, value: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(value)
        .map_err(|e| AppError::Validation(format!("invalid {field} '{value}': {e}")))
}

fn to_responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(Into::into).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn create_product(
    service: web::Data<AppCatalogService>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let draft = ProductDraft {
        price: parse_price("price", &body.price)?,
        original_price: body
            .original_price
            .as_deref()
            .map(|v| parse_price("original_price", v))
            .transpose()?,
        name: body.name,
        description: body.description,
        discount: body.discount,
        image_url: body.image_url,
        category: body.category,
        stock: body.stock,
        featured: body.featured,
    };

    let product = web::block(move || service.add_product(draft))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products, newest first", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(
    service: web::Data<AppCatalogService>,
) -> Result<HttpResponse, AppError> {
    let products = web::block(move || service.list_products())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(products)))
}

/// GET /products/featured
#[utoipa::path(
    get,
    path = "/products/featured",
    responses(
        (status = 200, description = "Featured products", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn featured_products(
    service: web::Data<AppCatalogService>,
) -> Result<HttpResponse, AppError> {
    let products = web::block(move || service.featured_products())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(products)))
}

/// GET /products/search?q=term
#[utoipa::path(
    get,
    path = "/products/search",
    params(
        ("q" = String, Query, description = "Case-insensitive term matched against name, description and category"),
    ),
    responses(
        (status = 200, description = "Matching products", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn search_products(
    service: web::Data<AppCatalogService>,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
    let term = query.into_inner().q;

    let products = web::block(move || service.search_products(&term))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(products)))
}

/// GET /products/category/{category}
#[utoipa::path(
    get,
    path = "/products/category/{category}",
    params(
        ("category" = String, Path, description = "Category name"),
    ),
    responses(
        (status = 200, description = "Products in the category", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn products_by_category(
    service: web::Data<AppCatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let category = path.into_inner();

    let products = web::block(move || service.products_by_category(&category))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(products)))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn get_product(
    service: web::Data<AppCatalogService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let product = web::block(move || service.product(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// PATCH /products/{id}
#[utoipa::path(
    patch,
    path = "/products/{id}",
    request_body = UpdateProductRequest,
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid update"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn update_product(
    service: web::Data<AppCatalogService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let changes = ProductUpdate {
        price: body
            .price
            .as_deref()
            .map(|v| parse_price("price", v))
            .transpose()?,
        original_price: body
            .original_price
            .as_deref()
            .map(|v| parse_price("original_price", v))
            .transpose()?,
        name: body.name,
        description: body.description,
        discount: body.discount,
        image_url: body.image_url,
        category: body.category,
        stock: body.stock,
        featured: body.featured,
    };

    let product = web::block(move || service.update_product(id, changes))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    service: web::Data<AppCatalogService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || service.delete_product(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /products/{id}/stock
#[utoipa::path(
    post,
    path = "/products/{id}/stock",
    request_body = AdjustStockRequest,
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Insufficient stock"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn adjust_stock(
    service: web::Data<AppCatalogService>,
    path: web::Path<Uuid>,
    body: web::Json<AdjustStockRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let delta = body.into_inner().delta;

    let product = web::block(move || service.adjust_stock(id, delta))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}
