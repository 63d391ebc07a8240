//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
