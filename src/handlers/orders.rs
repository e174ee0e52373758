use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::OrderView;
use crate::errors::AppError;
use crate::handlers::auth::AuthenticatedUser;
use crate::handlers::cart::CartItemResponse;
use crate::AppCheckoutService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Decimal total as displayed at checkout, e.g. "25.00". Verified
    /// against the cart before the order is accepted.
    pub total_amount: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub contact_email: String,
    pub items: Vec<CartItemResponse>,
    pub total_amount: String,
    pub status: String,
    pub payment_method: String,
    pub created_at: String,
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        OrderResponse {
            id: order.id,
            contact_email: order.contact_email,
            items: order.items.into_iter().map(Into::into).collect(),
            total_amount: order.total_amount.to_string(),
            status: order.status.as_str().to_string(),
            payment_method: order.payment_method,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Converts the caller's cart into a pending order and empties the cart, as
/// one atomic step: if anything fails the cart is left exactly as it was and
/// no order exists.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Empty cart or total mismatch"),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<AppCheckoutService>,
    user: Option<AuthenticatedUser>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let identity = user.map(AuthenticatedUser::into_identity);

    let total = BigDecimal::from_str(&body.total_amount).map_err(|e| {
        AppError::Validation(format!("invalid total_amount '{}': {}", body.total_amount, e))
    })?;

    let order = web::block(move || service.create_order(identity.as_ref(), total))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Sign-in required"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppCheckoutService>,
    user: Option<AuthenticatedUser>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let identity = user.map(AuthenticatedUser::into_identity);

    let order = web::block(move || service.order(identity.as_ref(), order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// The caller's order history, newest first.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<AppCheckoutService>,
    user: Option<AuthenticatedUser>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let identity = user.map(AuthenticatedUser::into_identity);
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);

    let result = web::block(move || service.list_orders(identity.as_ref(), page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page,
        limit,
    }))
}
