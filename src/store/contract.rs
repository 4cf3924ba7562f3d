use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::store::ContractStore;
use crate::types::contract::{Contract, NewContract};
use crate::utils::filters::QueryDescriptor;

#[derive(Clone, Debug)]
pub(crate) struct PgContractStore {
    pool: PgPool,
}

impl PgContractStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ContractStore for PgContractStore {
    async fn create(&self, contract: NewContract) -> Result<Contract, Error> {
        let contract = sqlx::query(
            "INSERT INTO contracts (title, description) VALUES ($1, $2) RETURNING
                id,
                created_at,
                title,
                description,
                version;",
        )
        .bind(&contract.title)
        .bind(&contract.description)
        .map(map_contract)
        .fetch_one(&self.pool)
        .await?;

        Ok(contract)
    }

    async fn get_by_id(&self, id: i64) -> Result<Contract, Error> {
        if id < 1 {
            return Err(Error::NotFound);
        }

        match sqlx::query(
            "SELECT
                id,
                created_at,
                title,
                description,
                version
            FROM contracts
            WHERE id = $1;",
        )
        .bind(id)
        .map(map_contract)
        .fetch_one(&self.pool)
        .await
        {
            Ok(contract) => Ok(contract),
            Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    async fn query(&self, title: &str, descriptor: &QueryDescriptor) -> Result<Vec<Contract>, Error> {
        // The ORDER BY body comes from the sort safelist table, never from input.
        let statement = format!(
            "SELECT
                id,
                created_at,
                title,
                description,
                version
            FROM contracts
            WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '')
            ORDER BY {}
            LIMIT $2 OFFSET $3;",
            descriptor.order_by_clause()
        );

        let contracts = sqlx::query(&statement)
            .bind(title)
            .bind(descriptor.limit)
            .bind(descriptor.offset)
            .map(map_contract)
            .fetch_all(&self.pool)
            .await?;

        Ok(contracts)
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        if id < 1 {
            return Err(Error::NotFound);
        }

        let result = sqlx::query("DELETE FROM contracts WHERE id = $1;")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

fn map_contract(row: PgRow) -> Contract {
    Contract {
        id: row.get("id"),
        created_at: row.get("created_at"),
        title: row.get("title"),
        description: row.get("description"),
        version: row.get("version"),
    }
}
