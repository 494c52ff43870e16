#[cfg(not(tarpaulin_include))]
pub(crate) mod errors;
pub(crate) mod help_msg;
pub(crate) mod key_events;
#[cfg(not(tarpaulin_include))]
pub(crate) mod logging;
