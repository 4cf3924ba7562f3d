use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::core::error::Error;
use crate::store::{ContractStore, OrderStore, UserStore};
use crate::types::contract::{Contract, NewContract};
use crate::types::order::{NewOrder, Order};
use crate::types::user::{NewUser, User};
use crate::utils::filters::{QueryDescriptor, SortDirection};

#[derive(Clone, Default)]
pub(crate) struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserStore {
    pub(crate) async fn len(&self) -> usize {
        self.users.lock().await.len()
    }
}

impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, Error> {
        let mut users = self.users.lock().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::Duplicate);
        }

        let user = User {
            id: users.len() as i64 + 1,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, Error> {
        self.users
            .lock()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(Error::NotFound)
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryContractStore {
    contracts: Arc<Mutex<Vec<Contract>>>,
}

/// Word-level match standing in for `plainto_tsquery('simple', ...)`.
fn title_matches(title: &str, search: &str) -> bool {
    let words: Vec<String> = title
        .split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .collect();

    search
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .all(|w| words.contains(&w.to_lowercase()))
}

fn compare(a: &Contract, b: &Contract, descriptor: &QueryDescriptor) -> Ordering {
    let primary = match descriptor.order_by_column {
        "title" => a.title.cmp(&b.title),
        _ => a.id.cmp(&b.id),
    };
    let primary = match descriptor.order_by_direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };

    primary.then(a.id.cmp(&b.id))
}

impl ContractStore for MemoryContractStore {
    async fn create(&self, contract: NewContract) -> Result<Contract, Error> {
        let mut contracts = self.contracts.lock().await;
        let id = contracts.iter().map(|c| c.id).max().unwrap_or(0) + 1;

        let contract = Contract {
            id,
            created_at: Utc::now(),
            title: contract.title,
            description: contract.description,
            version: 1,
        };
        contracts.push(contract.clone());

        Ok(contract)
    }

    async fn get_by_id(&self, id: i64) -> Result<Contract, Error> {
        self.contracts
            .lock()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn query(&self, title: &str, descriptor: &QueryDescriptor) -> Result<Vec<Contract>, Error> {
        let mut matched: Vec<Contract> = self
            .contracts
            .lock()
            .await
            .iter()
            .filter(|c| title.is_empty() || title_matches(&c.title, title))
            .cloned()
            .collect();

        matched.sort_by(|a, b| compare(a, b, descriptor));

        Ok(matched
            .into_iter()
            .skip(descriptor.offset as usize)
            .take(descriptor.limit as usize)
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        let mut contracts = self.contracts.lock().await;
        let before = contracts.len();
        contracts.retain(|c| c.id != id);

        if contracts.len() == before {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryOrderStore {
    orders: Arc<Mutex<Vec<Order>>>,
}

impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<Order, Error> {
        let mut orders = self.orders.lock().await;

        let order = Order {
            id: orders.len() as i64 + 1,
            contract_id: order.contract_id,
            email: order.email,
            created_at: Utc::now(),
        };
        orders.push(order.clone());

        Ok(order)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, Error> {
        Ok(self
            .orders
            .lock()
            .await
            .iter()
            .filter(|o| o.email == email)
            .cloned()
            .collect())
    }
}
