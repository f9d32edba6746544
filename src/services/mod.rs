pub(crate) mod access_stats;
pub(crate) mod credential_store;
pub(crate) mod credentials;
pub(crate) mod csv;
pub(crate) mod event_filter;
