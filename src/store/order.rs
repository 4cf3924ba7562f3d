use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::store::OrderStore;
use crate::types::order::{NewOrder, Order};

#[derive(Clone, Debug)]
pub(crate) struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl OrderStore for PgOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<Order, Error> {
        match sqlx::query(
            "INSERT INTO orders (contract_id, email) VALUES ($1, $2) RETURNING
                id,
                contract_id,
                email,
                created_at;",
        )
        .bind(order.contract_id)
        .bind(&order.email)
        .map(map_order)
        .fetch_one(&self.pool)
        .await
        {
            Ok(order) => Ok(order),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(Error::NotFound)
            }
            Err(e) => Err(Error::Sql(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, Error> {
        let orders = sqlx::query(
            "SELECT
                id,
                contract_id,
                email,
                created_at
            FROM orders
            WHERE email = $1
            ORDER BY id ASC;",
        )
        .bind(email)
        .map(map_order)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}

fn map_order(row: PgRow) -> Order {
    Order {
        id: row.get("id"),
        contract_id: row.get("contract_id"),
        email: row.get("email"),
        created_at: row.get("created_at"),
    }
}
