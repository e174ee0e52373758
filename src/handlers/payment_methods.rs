use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::payment::{NewPaymentMethod, PaymentMethod};
use crate::errors::AppError;
use crate::handlers::auth::AuthenticatedUser;
use crate::AppPaymentService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddPaymentMethodRequest {
    pub cardholder_name: String,
    /// Full card number; only the last four digits are stored.
    pub card_number: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodResponse {
    pub id: Uuid,
    pub cardholder_name: String,
    pub card_last4: String,
    pub card_brand: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub is_default: bool,
    pub created_at: String,
}

impl From<PaymentMethod> for PaymentMethodResponse {
    fn from(m: PaymentMethod) -> Self {
        PaymentMethodResponse {
            id: m.id,
            cardholder_name: m.cardholder_name,
            card_last4: m.card_last4,
            card_brand: m.card_brand.as_str().to_string(),
            expiry_month: m.expiry_month,
            expiry_year: m.expiry_year,
            is_default: m.is_default,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /payment-methods
#[utoipa::path(
    post,
    path = "/payment-methods",
    request_body = AddPaymentMethodRequest,
    responses(
        (status = 201, description = "Payment method stored", body = PaymentMethodResponse),
        (status = 400, description = "Invalid card details"),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "payment-methods"
)]
pub async fn add_payment_method(
    service: web::Data<AppPaymentService>,
    user: Option<AuthenticatedUser>,
    body: web::Json<AddPaymentMethodRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let identity = user.map(AuthenticatedUser::into_identity);

    let new = NewPaymentMethod {
        cardholder_name: body.cardholder_name,
        card_number: body.card_number,
        expiry_month: body.expiry_month,
        expiry_year: body.expiry_year,
        is_default: body.is_default,
    };

    let method = web::block(move || service.add_payment_method(identity.as_ref(), new))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(PaymentMethodResponse::from(method)))
}

/// GET /payment-methods
#[utoipa::path(
    get,
    path = "/payment-methods",
    responses(
        (status = 200, description = "The caller's payment methods, newest first", body = [PaymentMethodResponse]),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "payment-methods"
)]
pub async fn list_payment_methods(
    service: web::Data<AppPaymentService>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse, AppError> {
    let identity = user.map(AuthenticatedUser::into_identity);

    let methods = web::block(move || service.payment_methods(identity.as_ref()))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let responses: Vec<PaymentMethodResponse> = methods.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// DELETE /payment-methods/{id}
#[utoipa::path(
    delete,
    path = "/payment-methods/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment method UUID"),
    ),
    responses(
        (status = 204, description = "Payment method deleted"),
        (status = 401, description = "Sign-in required"),
        (status = 404, description = "Payment method not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "payment-methods"
)]
pub async fn delete_payment_method(
    service: web::Data<AppPaymentService>,
    user: Option<AuthenticatedUser>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let identity = user.map(AuthenticatedUser::into_identity);

    web::block(move || service.delete_payment_method(identity.as_ref(), id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /payment-methods/{id}/default
#[utoipa::path(
    post,
    path = "/payment-methods/{id}/default",
    params(
        ("id" = Uuid, Path, description = "Payment method UUID"),
    ),
    responses(
        (status = 204, description = "Default payment method updated"),
        (status = 401, description = "Sign-in required"),
        (status = 404, description = "Payment method not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "payment-methods"
)]
pub async fn set_default_payment_method(
    service: web::Data<AppPaymentService>,
    user: Option<AuthenticatedUser>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let identity = user.map(AuthenticatedUser::into_identity);

    web::block(move || service.set_default_payment_method(identity.as_ref(), id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
