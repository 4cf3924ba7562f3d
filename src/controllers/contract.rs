use crate::core::error::Error;
use crate::store::ContractStore;
use crate::types::contract::{Contract, NewContract};
use crate::types::request::NewContractData;
use crate::utils::filters::Filters;
use crate::utils::validator::ValidationErrors;

pub(crate) const MAX_TITLE_BYTES: usize = 500;
pub(crate) const MAX_DESCRIPTION_BYTES: usize = 1500;

#[derive(Clone, Debug)]
pub(crate) struct ContractController<S> {
    store: S,
}

impl<S: ContractStore> ContractController<S> {
    pub(crate) fn new(store: S) -> Self {
        Self { store }
    }

    pub(crate) async fn create(&self, input: NewContractData) -> Result<Contract, Error> {
        validate_contract(&input).into_result(())?;

        self.store
            .create(NewContract {
                title: input.title,
                description: input.description,
            })
            .await
    }

    pub(crate) async fn get(&self, id: i64) -> Result<Contract, Error> {
        if id < 1 {
            return Err(Error::NotFound);
        }

        self.store.get_by_id(id).await
    }

    /// `title` is bound as a parameter and never touches the ORDER BY clause.
    pub(crate) async fn list(&self, title: &str, filters: &Filters) -> Result<Vec<Contract>, Error> {
        let descriptor = filters.to_query_descriptor();

        tracing::debug!(
            page = filters.page(),
            page_size = filters.page_size(),
            sort = filters.sort(),
            "listing contracts"
        );

        self.store.query(title, &descriptor).await
    }

    pub(crate) async fn delete(&self, id: i64) -> Result<(), Error> {
        if id < 1 {
            return Err(Error::NotFound);
        }

        self.store.delete(id).await
    }
}

fn validate_contract(input: &NewContractData) -> ValidationErrors {
    ValidationErrors::new()
        .check(!input.title.is_empty(), "title", "must be provided")
        .check(
            input.title.len() <= MAX_TITLE_BYTES,
            "title",
            "must not be more than 500 bytes long",
        )
        .check(!input.description.is_empty(), "description", "must be provided")
        .check(
            input.description.len() <= MAX_DESCRIPTION_BYTES,
            "description",
            "must not be more than 1500 bytes long",
        )
}
