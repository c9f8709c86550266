use citeparse_core::EntityType;
use thiserror::Error;

/// A candidate group whose entities could not be turned into a citation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("{field} {text:?} is not a number")]
    InvalidNumber { field: EntityType, text: String },

    #[error("pin cite {0:?} is not a page or page range")]
    InvalidPinCite(String),
}
