use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::domain::account::Identity;
use crate::errors::AppError;

/// Identity headers set by the authenticating gateway in front of this
/// service. The gateway owns token verification; by the time a request gets
/// here the values are trusted.
const ACCOUNT_ID_HEADER: &str = "X-Account-Id";
const ACCOUNT_EMAIL_HEADER: &str = "X-Account-Email";

/// Extractor for the signed-in caller. Handlers that allow anonymous access
/// take `Option<AuthenticatedUser>` and pass the inner identity (or `None`)
/// down to the service layer, which owns the sign-in policy.
#[derive(Debug)]
pub struct AuthenticatedUser(pub Identity);

impl AuthenticatedUser {
    pub fn into_identity(self) -> Identity {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let account_id = req
            .headers()
            .get(ACCOUNT_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok());
        let email = req
            .headers()
            .get(ACCOUNT_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        match (account_id, email) {
            (Some(account_id), Some(email)) if !email.is_empty() => {
                ready(Ok(AuthenticatedUser(Identity { account_id, email })))
            }
            _ => ready(Err(AppError::Unauthenticated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::FromRequest;
    use uuid::Uuid;

    use super::AuthenticatedUser;

    #[actix_web::test]
    async fn extracts_identity_from_headers() {
        let account_id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header(("X-Account-Id", account_id.to_string()))
            .insert_header(("X-Account-Email", "shopper@example.com"))
            .to_http_request();

        let user = AuthenticatedUser::extract(&req).await.expect("extract");

        assert_eq!(user.0.account_id, account_id);
        assert_eq!(user.0.email, "shopper@example.com");
    }

    #[actix_web::test]
    async fn missing_or_malformed_headers_are_rejected() {
        let bare = TestRequest::default().to_http_request();
        assert!(AuthenticatedUser::extract(&bare).await.is_err());

        let bad_id = TestRequest::default()
            .insert_header(("X-Account-Id", "not-a-uuid"))
            .insert_header(("X-Account-Email", "shopper@example.com"))
            .to_http_request();
        assert!(AuthenticatedUser::extract(&bad_id).await.is_err());
    }
}
