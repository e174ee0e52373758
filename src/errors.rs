use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Sign-in required")]
    Unauthenticated,

    #[error("Not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Unauthenticated => AppError::Unauthenticated,
            DomainError::NotFound => AppError::NotFound,
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Store(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Validation(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Internal(detail) => {
                log::error!("request failed: {}", detail);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn unauthenticated_returns_401() {
        assert_eq!(
            AppError::Unauthenticated.error_response().status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound.error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_returns_400() {
        let err = AppError::Validation("bad value".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_display() {
        assert_eq!(
            AppError::Validation("msg".to_string()).to_string(),
            "Invalid request: msg"
        );
    }

    #[test]
    fn domain_unauthenticated_maps_to_app_unauthenticated() {
        let app_err: AppError = DomainError::Unauthenticated.into();
        assert!(matches!(app_err, AppError::Unauthenticated));
    }

    #[test]
    fn domain_not_found_maps_to_app_not_found() {
        let app_err: AppError = DomainError::NotFound.into();
        assert!(matches!(app_err, AppError::NotFound));
    }

    #[test]
    fn domain_store_maps_to_app_internal() {
        let app_err: AppError = DomainError::Store("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[test]
    fn domain_validation_maps_to_app_validation() {
        let app_err: AppError = DomainError::Validation("bad value".to_string()).into();
        assert!(matches!(app_err, AppError::Validation(_)));
    }
}
