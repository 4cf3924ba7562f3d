pub(crate) mod contracts;
pub(crate) mod orders;
pub(crate) mod router;
pub(crate) mod users;
