pub(crate) mod access_logs;
pub(crate) mod events;
