use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::store::UserStore;
use crate::types::user::{NewUser, User};

#[derive(Clone, Debug)]
pub(crate) struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, Error> {
        match sqlx::query(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING
                id,
                name,
                email,
                password_hash,
                created_at;",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::Duplicate)
            }
            Err(e) => Err(Error::Sql(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<User, Error> {
        match sqlx::query(
            "SELECT
                id,
                name,
                email,
                password_hash,
                created_at
            FROM users
            WHERE email = $1;",
        )
        .bind(email)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(user),
            Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
            Err(e) => Err(Error::Sql(e)),
        }
    }
}

fn map_user(row: PgRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}
