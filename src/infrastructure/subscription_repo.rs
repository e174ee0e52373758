use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::SubscriptionRepository;
use crate::domain::subscription::Subscription;
use crate::schema::email_subscriptions;

use super::models::{NewSubscriptionRow, SubscriptionRow};

pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl SubscriptionRepository for DieselSubscriptionRepository {
    fn insert(&self, email: &str) -> Result<Subscription, DomainError> {
        let mut conn = self.pool.get()?;

        let row: SubscriptionRow = diesel::insert_into(email_subscriptions::table)
            .values(&NewSubscriptionRow {
                id: Uuid::new_v4(),
                email: email.to_string(),
                active: true,
            })
            .returning(SubscriptionRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }
}
