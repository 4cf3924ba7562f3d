use chrono::Duration;
use sqlx::postgres::PgPool;

use crate::controllers::contract::ContractController;
use crate::controllers::order::OrderController;
use crate::controllers::user::UserController;
use crate::core::error::ConfigError;
use crate::store::contract::PgContractStore;
use crate::store::order::PgOrderStore;
use crate::store::user::PgUserStore;
use crate::utils::auth::JwtIssuer;
use crate::utils::hash::BcryptHasher;

pub(crate) type Users = UserController<PgUserStore, BcryptHasher, JwtIssuer>;
pub(crate) type Contracts = ContractController<PgContractStore>;
pub(crate) type Orders = OrderController<PgOrderStore>;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) token_issuer: JwtIssuer,
    pub(crate) user_controller: Users,
    pub(crate) contract_controller: Contracts,
    pub(crate) order_controller: Orders,
}

impl AppState {
    pub(crate) fn new(
        pool: PgPool,
        secret: &str,
        hash_cost: u32,
        session_ttl: Duration,
    ) -> Result<Self, ConfigError> {
        let token_issuer = JwtIssuer::new(secret)?;
        let hasher = BcryptHasher::new(hash_cost)?;

        Ok(AppState {
            user_controller: UserController::new(
                PgUserStore::new(pool.clone()),
                hasher,
                token_issuer.clone(),
                session_ttl,
            )?,
            contract_controller: ContractController::new(PgContractStore::new(pool.clone())),
            order_controller: OrderController::new(PgOrderStore::new(pool))?,
            token_issuer,
        })
    }
}
