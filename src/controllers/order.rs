use regex::Regex;

use crate::core::error::{ConfigError, Error};
use crate::store::OrderStore;
use crate::types::order::{NewOrder, Order};
use crate::types::request::NewOrderData;
use crate::utils::validator::{EMAIL_PATTERN, validate_email};

#[derive(Clone)]
pub(crate) struct OrderController<S> {
    store: S,
    email_pattern: Regex,
}

impl<S> std::fmt::Debug for OrderController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderController")
            .field("email_pattern", &self.email_pattern.as_str())
            .finish()
    }
}

impl<S: OrderStore> OrderController<S> {
    pub(crate) fn new(store: S) -> Result<Self, ConfigError> {
        Ok(Self {
            store,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
        })
    }

    pub(crate) async fn create(&self, input: NewOrderData) -> Result<Order, Error> {
        validate_email(&self.email_pattern, &input.email)
            .check(input.contract_id > 0, "contract_id", "must be a positive integer")
            .into_result(())?;

        self.store
            .insert(NewOrder {
                contract_id: input.contract_id,
                email: input.email,
            })
            .await
    }

    pub(crate) async fn list_by_email(&self, email: &str) -> Result<Vec<Order>, Error> {
        validate_email(&self.email_pattern, email).into_result(())?;

        self.store.find_by_email(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryOrderStore;

    fn controller() -> OrderController<MemoryOrderStore> {
        OrderController::new(MemoryOrderStore::default()).unwrap()
    }

    fn data(contract_id: i64, email: &str) -> NewOrderData {
        NewOrderData {
            contract_id,
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn create_and_list_by_email() {
        let controller = controller();

        controller.create(data(1, "ann@x.com")).await.unwrap();
        controller.create(data(2, "ann@x.com")).await.unwrap();
        controller.create(data(1, "bob@x.com")).await.unwrap();

        let orders = controller.list_by_email("ann@x.com").await.unwrap();
        let contract_ids: Vec<i64> = orders.iter().map(|o| o.contract_id).collect();
        assert_eq!(contract_ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn create_rejects_bad_email_and_contract() {
        let err = controller().create(data(0, "nope")).await.unwrap_err();

        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.fields(), vec!["email", "contract_id"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listing_requires_a_valid_email() {
        let err = controller().list_by_email("").await.unwrap_err();

        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.message("email"), Some("must be provided"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
