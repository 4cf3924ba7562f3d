use serde::Serialize;

use crate::types::contract::Contract;
use crate::types::order::Order;
use crate::types::user::User;

#[derive(Serialize)]
pub(crate) struct SignedUp {
    pub(crate) user: User,
}

#[derive(Serialize)]
pub(crate) struct Token {
    pub(crate) token: String,
}

#[derive(Serialize)]
pub(crate) struct ContractEnvelope {
    pub(crate) contract: Contract,
}

#[derive(Serialize)]
pub(crate) struct Contracts {
    pub(crate) contracts: Vec<Contract>,
}

#[derive(Serialize)]
pub(crate) struct OrderEnvelope {
    pub(crate) order: Order,
}

#[derive(Serialize)]
pub(crate) struct Orders {
    pub(crate) orders: Vec<Order>,
}
