use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must start with the rill_ prefix: {0}")]
    BadPrefix(String),

    #[error("address is empty after the prefix")]
    Empty,
}
