use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Contract {
    pub(crate) id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) description: String,
    pub(crate) version: i64,
}

#[derive(Clone, Debug)]
pub(crate) struct NewContract {
    pub(crate) title: String,
    pub(crate) description: String,
}
