//! Error types for the demo utilities.
//!
//! Display strings are part of the contract: suites assert on them verbatim.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Cannot divide by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Name and email are required")]
    MissingFields,

    #[error("User not found")]
    NotFound(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to fetch data")]
    Failed,

    #[error("User ID is required")]
    MissingUserId,
}
