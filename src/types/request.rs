use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct SignUpData {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Deserialize)]
pub(crate) struct SignInData {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewContractData {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
}

/// Raw listing query; numbers stay strings until `filters::normalize`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListContractsParams {
    #[serde(default)]
    pub(crate) title: String,
    pub(crate) page: Option<String>,
    pub(crate) page_size: Option<String>,
    pub(crate) sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewOrderData {
    pub(crate) contract_id: i64,
    pub(crate) email: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrdersByEmailParams {
    #[serde(default)]
    pub(crate) email: String,
}
