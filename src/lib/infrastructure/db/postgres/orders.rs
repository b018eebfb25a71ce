//! Postgres implementation of the OrderRepository trait

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query_as, FromRow};
use tracing::warn;

use crate::{
    domain::{
        communication::email_addresses::EmailAddress,
        orders::{errors::GetOrdersError, Order, OrderId, OrderItem, OrderRepository},
    },
    infrastructure::db::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct OrderRecord {
    id: i64,
    order_no: String,
    customer_name: String,
    email: Option<String>,
    ordered_at: DateTime<Utc>,
    payment_total: i64,
}

#[derive(FromRow)]
struct OrderItemRecord {
    order_id: i64,
    product_name: String,
    quantity: i32,
    price: i64,
}

impl From<OrderItemRecord> for OrderItem {
    fn from(record: OrderItemRecord) -> Self {
        OrderItem {
            product_name: record.product_name,
            quantity: record.quantity,
            price: record.price,
        }
    }
}

impl OrderRecord {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        let email = self.email.as_deref().and_then(|raw| {
            EmailAddress::new(raw)
                .map_err(|err| warn!(order_id = self.id, "ignoring customer email: {err}"))
                .ok()
        });

        Order {
            id: OrderId::new(self.id),
            order_no: self.order_no,
            customer_name: self.customer_name,
            email,
            ordered_at: self.ordered_at,
            items,
            payment_total: self.payment_total,
        }
    }
}

#[async_trait]
impl OrderRepository for PostgresDatabase {
    #[mutants::skip]
    async fn get_orders_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, GetOrdersError> {
        let raw_ids: Vec<i64> = ids.iter().map(OrderId::as_i64).collect();

        let records = query_as::<_, OrderRecord>(
            r#"
            SELECT id, order_no, customer_name, email, ordered_at, payment_total
            FROM orders
            WHERE id = ANY($1)
            "#,
        )
        .bind(raw_ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let found: HashSet<i64> = records.iter().map(|record| record.id).collect();
        let missing: Vec<OrderId> = ids
            .iter()
            .filter(|id| !found.contains(&id.as_i64()))
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(GetOrdersError::OrdersNotFound(missing));
        }

        let item_records = query_as::<_, OrderItemRecord>(
            r#"
            SELECT order_id, product_name, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(raw_ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let mut items: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for record in item_records {
            items.entry(record.order_id).or_default().push(record.into());
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let order_items = items.remove(&record.id).unwrap_or_default();
                record.into_order(order_items)
            })
            .collect())
    }
}
