use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::payment::{PaymentMethod, PaymentMethodDraft};
use crate::domain::ports::PaymentMethodRepository;
use crate::schema::payment_methods;

use super::models::{NewPaymentMethodRow, PaymentMethodRow};

pub struct DieselPaymentMethodRepository {
    pool: DbPool,
}

impl DieselPaymentMethodRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PaymentMethodRepository for DieselPaymentMethodRepository {
    fn insert(
        &self,
        account_id: Uuid,
        draft: &PaymentMethodDraft,
    ) -> Result<PaymentMethod, DomainError> {
        let mut conn = self.pool.get()?;

        let row: PaymentMethodRow = diesel::insert_into(payment_methods::table)
            .values(&NewPaymentMethodRow {
                id: Uuid::new_v4(),
                account_id,
                cardholder_name: draft.cardholder_name.clone(),
                card_last4: draft.card_last4.clone(),
                card_brand: draft.card_brand.as_str().to_string(),
                expiry_month: draft.expiry_month,
                expiry_year: draft.expiry_year,
                is_default: draft.is_default,
            })
            .returning(PaymentMethodRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn list_for_account(&self, account_id: Uuid) -> Result<Vec<PaymentMethod>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = payment_methods::table
            .filter(payment_methods::account_id.eq(account_id))
            .order(payment_methods::created_at.desc())
            .select(PaymentMethodRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn delete(&self, account_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(
            payment_methods::table
                .find(id)
                .filter(payment_methods::account_id.eq(account_id)),
        )
        .execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    fn set_default(&self, account_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // Clear-then-set, batched into one transaction so no reader ever
            // sees two defaults (or none, once one existed).
            diesel::update(
                payment_methods::table.filter(payment_methods::account_id.eq(account_id)),
            )
            .set(payment_methods::is_default.eq(false))
            .execute(conn)?;

            let updated = diesel::update(
                payment_methods::table
                    .find(id)
                    .filter(payment_methods::account_id.eq(account_id)),
            )
            .set(payment_methods::is_default.eq(true))
            .execute(conn)?;

            if updated == 0 {
                return Err(DomainError::NotFound);
            }
            Ok(())
        })
    }
}
