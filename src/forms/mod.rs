//! Query-string forms accepted by the directory routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod api;
pub mod main;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("limit must be between {min} and {max}")]
    InvalidLimit { min: usize, max: usize },

    #[error("invalid advocate id")]
    InvalidAdvocateId,
}
