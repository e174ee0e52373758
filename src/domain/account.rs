use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Verified identity of the caller, as asserted by the external
/// authentication provider in front of this service. The service never
/// authenticates credentials itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: Uuid,
    pub email: String,
}

/// Profile record owned by an identity. The cart starts empty when the
/// profile is created; cart items and orders reference it.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
