use bigdecimal::BigDecimal;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::Cart;
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderPage, OrderStatus, OrderView, PAYMENT_METHOD};
use crate::domain::ports::OrderRepository;
use crate::schema::{cart_items, order_items, orders};

use super::models::{CartItemRow, NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn order_view(conn: &mut PgConnection, order: OrderRow) -> Result<OrderView, DomainError> {
    let items = order_items::table
        .filter(order_items::order_id.eq(order.id))
        .order(order_items::added_at.asc())
        .select(OrderItemRow::as_select())
        .load(conn)?;

    let status = OrderStatus::parse(&order.status)
        .ok_or_else(|| DomainError::Store(format!("unknown order status '{}'", order.status)))?;

    Ok(OrderView {
        id: order.id,
        account_id: order.account_id,
        contact_email: order.contact_email,
        items: items.into_iter().map(Into::into).collect(),
        total_amount: order.total_amount,
        status,
        payment_method: order.payment_method,
        created_at: order.created_at,
    })
}

impl OrderRepository for DieselOrderRepository {
    fn create_from_cart(
        &self,
        account_id: Uuid,
        contact_email: &str,
        expected_total: &BigDecimal,
    ) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Snapshot the cart. Row locks keep a concurrent add from
            //    slipping between the snapshot and the delete below.
            let cart_rows: Vec<CartItemRow> = cart_items::table
                .filter(cart_items::account_id.eq(account_id))
                .order(cart_items::added_at.asc())
                .select(CartItemRow::as_select())
                .for_update()
                .load(conn)?;

            if cart_rows.is_empty() {
                return Err(DomainError::Validation("cart is empty".to_string()));
            }

            let snapshot = Cart {
                items: cart_rows.iter().cloned().map(Into::into).collect(),
            };
            let computed = snapshot.total_amount();
            if computed != *expected_total {
                return Err(DomainError::Validation(format!(
                    "order total mismatch: cart sums to {computed}, caller sent {expected_total}"
                )));
            }

            // 2. Insert the order.
            let order_id = Uuid::new_v4();
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    account_id,
                    contact_email: contact_email.to_string(),
                    total_amount: computed,
                    status: OrderStatus::Pending.as_str().to_string(),
                    payment_method: PAYMENT_METHOD.to_string(),
                })
                .execute(conn)?;

            // 3. Copy the snapshot into order_items.
            let item_rows: Vec<NewOrderItemRow> = cart_rows
                .iter()
                .map(|row| NewOrderItemRow {
                    id: Uuid::new_v4(),
                    order_id,
                    name: row.name.clone(),
                    unit_price: row.unit_price.clone(),
                    image_url: row.image_url.clone(),
                    description: row.description.clone(),
                    quantity: row.quantity,
                    added_at: row.added_at,
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&item_rows)
                .execute(conn)?;

            // 4. Clear the cart. Rolls back with everything else on failure,
            //    so the order exists if and only if the cart was emptied.
            diesel::delete(cart_items::table.filter(cart_items::account_id.eq(account_id)))
                .execute(conn)?;

            // Re-read for the server-assigned created_at.
            let order = orders::table
                .find(order_id)
                .select(OrderRow::as_select())
                .first(conn)?;
            order_view(conn, order)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        Ok(Some(order_view(&mut conn, order)?))
    }

    fn list_for_account(
        &self,
        account_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<OrderPage, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = (page - 1) * limit;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table
                .filter(orders::account_id.eq(account_id))
                .count()
                .get_result(conn)?;

            let rows = orders::table
                .filter(orders::account_id.eq(account_id))
                .order(orders::created_at.desc())
                .limit(limit)
                .offset(offset)
                .select(OrderRow::as_select())
                .load(conn)?;

            let mut items = Vec::with_capacity(rows.len());
            for row in rows {
                items.push(order_view(conn, row)?);
            }

            Ok(OrderPage { items, total })
        })
    }
}
