//! Persistence collaborators. Each trait is the narrow contract a controller
//! needs; the Postgres implementations live next to it and the in-memory ones
//! back the unit tests.

pub(crate) mod contract;
#[cfg(test)]
pub(crate) mod memory;
pub(crate) mod order;
pub(crate) mod user;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::core::error::{ConfigError, Error};
use crate::types::contract::{Contract, NewContract};
use crate::types::order::{NewOrder, Order};
use crate::types::user::{NewUser, User};
use crate::utils::filters::QueryDescriptor;

pub(crate) trait UserStore: Clone + Send + Sync + 'static {
    /// Fails with [`Error::Duplicate`] when the email is already registered.
    fn insert(&self, user: NewUser) -> impl Future<Output = Result<User, Error>> + Send;

    /// Fails with [`Error::NotFound`] when no user has this email.
    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<User, Error>> + Send;
}

pub(crate) trait ContractStore: Clone + Send + Sync + 'static {
    fn create(
        &self,
        contract: NewContract,
    ) -> impl Future<Output = Result<Contract, Error>> + Send;

    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<Contract, Error>> + Send;

    /// Contracts matching `title` (empty matches all), ordered by the
    /// descriptor with `id ASC` as tie-break.
    fn query(
        &self,
        title: &str,
        descriptor: &QueryDescriptor,
    ) -> impl Future<Output = Result<Vec<Contract>, Error>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), Error>> + Send;
}

pub(crate) trait OrderStore: Clone + Send + Sync + 'static {
    fn insert(&self, order: NewOrder) -> impl Future<Output = Result<Order, Error>> + Send;

    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<Vec<Order>, Error>> + Send;
}

pub(crate) async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, ConfigError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "database connection pool established");

    Ok(pool)
}
