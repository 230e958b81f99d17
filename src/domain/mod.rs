//! Domain aggregates exposed by the directory service layer.

pub mod advocate;
pub mod types;
