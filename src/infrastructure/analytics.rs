use uuid::Uuid;

use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::ports::AnalyticsSink;
use crate::schema::analytics_outbox;

use super::models::NewAnalyticsEventRow;

/// Records analytics events as rows in `analytics_outbox`; an external relay
/// drains the table into the analytics pipeline. Each event is its own short
/// transaction and any failure is logged and swallowed, so emitting an event
/// can never fail the operation that produced it.
pub struct OutboxAnalyticsSink {
    pool: DbPool,
}

impl OutboxAnalyticsSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn try_log(&self, name: &str, properties: serde_json::Value) -> Result<(), String> {
        let mut conn = self.pool.get().map_err(|e| e.to_string())?;
        diesel::insert_into(analytics_outbox::table)
            .values(&NewAnalyticsEventRow {
                id: Uuid::new_v4(),
                event_type: name.to_string(),
                payload: properties,
            })
            .execute(&mut conn)
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl AnalyticsSink for OutboxAnalyticsSink {
    fn log_event(&self, name: &str, properties: serde_json::Value) {
        if let Err(e) = self.try_log(name, properties) {
            log::warn!("dropping analytics event '{}': {}", name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use diesel::prelude::*;
    use serde_json::json;

    use super::OutboxAnalyticsSink;
    use crate::domain::ports::AnalyticsSink;
    use crate::infrastructure::models::AnalyticsEventRow;
    use crate::infrastructure::test_support::setup_db;
    use crate::schema::analytics_outbox;

    #[tokio::test]
    async fn events_land_in_the_outbox_table() {
        let (_container, pool) = setup_db().await;
        let sink = OutboxAnalyticsSink::new(pool.clone());

        sink.log_event("add_to_cart", json!({"item_name": "Widget", "price": "10"}));

        let mut conn = pool.get().expect("conn");
        let rows: Vec<AnalyticsEventRow> = analytics_outbox::table
            .select(AnalyticsEventRow::as_select())
            .load(&mut conn)
            .expect("load");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event_type, "add_to_cart");
        assert_eq!(rows[0].payload["item_name"], "Widget");
    }
}
