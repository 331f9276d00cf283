//! Error types for galena-devices.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A model parameter was rejected at construction time.
    #[error("invalid model parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A quantity is mathematically undefined for the given parameters.
    #[error("quantity undefined for {name} = {value}")]
    OutOfDomain { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
