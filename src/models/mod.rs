//! Database models backing the advocate repository.

pub mod advocate;
#[cfg(feature = "server")]
pub mod config;
