use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::account::{Account, Identity};
use crate::domain::errors::DomainError;
use crate::domain::ports::AccountRepository;
use crate::schema::accounts;

use super::models::{AccountRow, NewAccountRow};

pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for DieselAccountRepository {
    fn upsert_profile(
        &self,
        identity: &Identity,
        display_name: &str,
    ) -> Result<Account, DomainError> {
        let mut conn = self.pool.get()?;

        let row: AccountRow = diesel::insert_into(accounts::table)
            .values(&NewAccountRow {
                id: identity.account_id,
                email: identity.email.clone(),
                display_name: display_name.to_string(),
            })
            .on_conflict(accounts::id)
            .do_update()
            .set((
                accounts::email.eq(identity.email.clone()),
                accounts::display_name.eq(display_name.to_string()),
                accounts::updated_at.eq(diesel::dsl::now),
            ))
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = accounts::table
            .find(id)
            .select(AccountRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::DieselAccountRepository;
    use crate::domain::account::Identity;
    use crate::domain::ports::AccountRepository;
    use crate::infrastructure::test_support::setup_db;

    #[tokio::test]
    async fn registering_twice_refreshes_the_profile() {
        let (_container, pool) = setup_db().await;
        let repo = DieselAccountRepository::new(pool);
        let identity = Identity {
            account_id: Uuid::new_v4(),
            email: "shopper@example.com".to_string(),
        };

        let created = repo.upsert_profile(&identity, "Shopper").expect("create");
        let updated = repo.upsert_profile(&identity, "Renamed").expect("update");

        assert_eq!(created.id, updated.id);
        assert_eq!(updated.display_name, "Renamed");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn unknown_account_reads_as_none() {
        let (_container, pool) = setup_db().await;
        let repo = DieselAccountRepository::new(pool);

        assert!(repo.find_by_id(Uuid::new_v4()).expect("find").is_none());
    }
}
