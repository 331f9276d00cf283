//! Error types for galena-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown physical constant: {0}")]
    UnknownConstant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
