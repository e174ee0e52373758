use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::account::Account;
use crate::errors::AppError;
use crate::handlers::auth::AuthenticatedUser;
use crate::AppAccountService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterAccountRequest {
    pub display_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub created_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        AccountResponse {
            id: account.id,
            email: account.email,
            display_name: account.display_name,
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /accounts
///
/// Registers the profile for the signed-in identity. The cart starts empty;
/// calling again refreshes the profile fields.
#[utoipa::path(
    post,
    path = "/accounts",
    request_body = RegisterAccountRequest,
    responses(
        (status = 201, description = "Profile registered", body = AccountResponse),
        (status = 400, description = "Invalid profile"),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "accounts"
)]
pub async fn register_account(
    service: web::Data<AppAccountService>,
    user: Option<AuthenticatedUser>,
    body: web::Json<RegisterAccountRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let identity = user.map(AuthenticatedUser::into_identity);

    let account = web::block(move || service.register(identity.as_ref(), &body.display_name))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// GET /accounts/me
#[utoipa::path(
    get,
    path = "/accounts/me",
    responses(
        (status = 200, description = "The caller's profile", body = AccountResponse),
        (status = 401, description = "Sign-in required"),
        (status = 404, description = "Profile not registered"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "accounts"
)]
pub async fn get_account(
    service: web::Data<AppAccountService>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse, AppError> {
    let identity = user.map(AuthenticatedUser::into_identity);

    let account = web::block(move || service.account(identity.as_ref()))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}
