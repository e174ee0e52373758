use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;
use crate::AppAccountService;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub email: String,
    pub active: bool,
    pub subscribed_at: String,
}

/// POST /subscriptions
///
/// Newsletter signup; open to signed-out visitors.
#[utoipa::path(
    post,
    path = "/subscriptions",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionResponse),
        (status = 400, description = "Malformed e-mail address"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "subscriptions"
)]
pub async fn subscribe(
    service: web::Data<AppAccountService>,
    body: web::Json<SubscribeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let subscription = web::block(move || service.subscribe(&body.email))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(SubscriptionResponse {
        id: subscription.id,
        email: subscription.email,
        active: subscription.active,
        subscribed_at: subscription.subscribed_at.to_rfc3339(),
    }))
}
