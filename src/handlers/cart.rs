use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::domain::cart::{Cart, CartItem, NewCartItem};
use crate::errors::AppError;
use crate::handlers::auth::AuthenticatedUser;
use crate::AppCartService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub unit_price: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub name: String,
    pub unit_price: String,
    pub image_url: String,
    pub description: String,
    pub quantity: i32,
    pub added_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub total_items: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartCountResponse {
    pub total_items: i64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            name: item.name,
            unit_price: item.unit_price.to_string(),
            image_url: item.image_url,
            description: item.description,
            quantity: item.quantity,
            added_at: item.added_at.to_rfc3339(),
        }
    }
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let total_items = cart.total_item_count();
        CartResponse {
            items: cart.items.into_iter().map(Into::into).collect(),
            total_items,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /cart/items
///
/// Adds one unit of the named item to the caller's cart. Adding a name that
/// is already in the cart bumps its quantity instead of creating a second
/// line.
#[utoipa::path(
    post,
    path = "/cart/items",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid item"),
        (status = 401, description = "Sign-in required"),
        (status = 404, description = "Account not registered"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn add_cart_item(
    service: web::Data<AppCartService>,
    user: Option<AuthenticatedUser>,
    body: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let identity = user.map(AuthenticatedUser::into_identity);

    let unit_price = BigDecimal::from_str(&body.unit_price)
        .map_err(|e| AppError::Validation(format!("invalid unit_price '{}': {}", body.unit_price, e)))?;
    let item = NewCartItem {
        name: body.name,
        unit_price,
        image_url: body.image_url,
        description: body.description,
    };

    let cart = web::block(move || service.add_item(identity.as_ref(), item))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

/// GET /cart
#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "The caller's cart", body = CartResponse),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    service: web::Data<AppCartService>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse, AppError> {
    let identity = user.map(AuthenticatedUser::into_identity);

    let cart = web::block(move || service.cart(identity.as_ref()))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

/// GET /cart/count
///
/// Total quantity across the cart, for the badge in the UI.
#[utoipa::path(
    get,
    path = "/cart/count",
    responses(
        (status = 200, description = "Item count", body = CartCountResponse),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn get_cart_count(
    service: web::Data<AppCartService>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse, AppError> {
    let identity = user.map(AuthenticatedUser::into_identity);

    let total_items = web::block(move || service.item_count(identity.as_ref()))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartCountResponse { total_items }))
}
