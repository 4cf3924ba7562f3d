pub(crate) mod auth;
pub(crate) mod filters;
pub(crate) mod hash;
pub(crate) mod validator;
