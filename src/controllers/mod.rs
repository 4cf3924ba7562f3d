pub(crate) mod contract;
pub(crate) mod order;
pub(crate) mod user;
