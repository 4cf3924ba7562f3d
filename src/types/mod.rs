pub(crate) mod contract;
pub(crate) mod order;
pub(crate) mod request;
pub(crate) mod response;
pub(crate) mod user;
