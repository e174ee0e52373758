use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{Cart, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::cart_items;

use super::models::{CartItemRow, NewCartItemRow};

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn load_cart(conn: &mut PgConnection, account_id: Uuid) -> Result<Cart, DomainError> {
    let rows = cart_items::table
        .filter(cart_items::account_id.eq(account_id))
        .order(cart_items::added_at.asc())
        .select(CartItemRow::as_select())
        .load(conn)?;
    Ok(Cart {
        items: rows.into_iter().map(Into::into).collect(),
    })
}

impl CartRepository for DieselCartRepository {
    fn load(&self, account_id: Uuid) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;
        load_cart(&mut conn, account_id)
    }

    fn upsert_item(&self, account_id: Uuid, item: &NewCartItem) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // One row per (account, name): a second add of the same name only
            // bumps the quantity, leaving price/image/description at their
            // first-write values. Being a single statement, concurrent adds
            // from two sessions both land.
            diesel::insert_into(cart_items::table)
                .values(&NewCartItemRow {
                    id: Uuid::new_v4(),
                    account_id,
                    name: item.name.clone(),
                    unit_price: item.unit_price.clone(),
                    image_url: item.image_url.clone(),
                    description: item.description.clone(),
                    quantity: 1,
                })
                .on_conflict((cart_items::account_id, cart_items::name))
                .do_update()
                .set(cart_items::quantity.eq(cart_items::quantity + 1))
                .execute(conn)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(
                        DatabaseErrorKind::ForeignKeyViolation,
                        _,
                    ) => DomainError::NotFound,
                    other => other.into(),
                })?;

            load_cart(conn, account_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::DieselCartRepository;
    use crate::domain::cart::NewCartItem;
    use crate::domain::errors::DomainError;
    use crate::domain::ports::CartRepository;
    use crate::infrastructure::test_support::{register_account, setup_db};

    fn new_item(name: &str, price: &str) -> NewCartItem {
        NewCartItem {
            name: name.to_string(),
            unit_price: BigDecimal::from_str(price).expect("valid decimal"),
            image_url: format!("https://img.example/{name}.jpg"),
            description: format!("{name} description"),
        }
    }

    #[tokio::test]
    async fn upsert_appends_then_increments() {
        let (_container, pool) = setup_db().await;
        let identity = register_account(&pool);
        let repo = DieselCartRepository::new(pool);

        repo.upsert_item(identity.account_id, &new_item("Widget", "10.00"))
            .expect("first add");
        repo.upsert_item(identity.account_id, &new_item("Widget", "10.00"))
            .expect("second add");
        let cart = repo
            .upsert_item(identity.account_id, &new_item("Gadget", "5.00"))
            .expect("third add");

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].name, "Widget");
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[1].name, "Gadget");
        assert_eq!(cart.items[1].quantity, 1);
        assert_eq!(cart.total_item_count(), 3);
    }

    #[tokio::test]
    async fn first_write_wins_on_item_fields() {
        let (_container, pool) = setup_db().await;
        let identity = register_account(&pool);
        let repo = DieselCartRepository::new(pool);

        repo.upsert_item(identity.account_id, &new_item("Widget", "10.00"))
            .expect("first add");
        let mut changed = new_item("Widget", "12.50");
        changed.description = "different".to_string();
        let cart = repo
            .upsert_item(identity.account_id, &changed)
            .expect("second add");

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(
            cart.items[0].unit_price,
            BigDecimal::from_str("10.00").unwrap()
        );
        assert_eq!(cart.items[0].description, "Widget description");
    }

    #[tokio::test]
    async fn load_returns_empty_cart_for_unknown_account() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCartRepository::new(pool);

        let cart = repo.load(Uuid::new_v4()).expect("load");

        assert!(cart.items.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[tokio::test]
    async fn upsert_without_account_row_is_not_found() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCartRepository::new(pool);

        let result = repo.upsert_item(Uuid::new_v4(), &new_item("Widget", "10.00"));

        assert!(matches!(result, Err(DomainError::NotFound)));
    }
}
