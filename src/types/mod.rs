use thiserror::Error;

mod colors;
mod domain_types;
mod ids;

pub use colors::*;
pub use domain_types::*;
pub use ids::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid block ID format: {0}")]
    InvalidId(String),

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid API token format: {reason}")]
    InvalidApiToken { reason: String },

    #[error("Invalid output directory: {path} - {reason}")]
    InvalidOutputDir { path: String, reason: String },
}
