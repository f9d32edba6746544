pub(crate) mod auth;
pub(crate) mod credentials;
pub(crate) mod errors;
pub(crate) mod events;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod pagination;
pub(crate) mod router;
pub(crate) mod stats;
pub(crate) mod validation;
