//! Domain error types.
//!
//! Command plumbing uses `anyhow`; these enums cover the places where callers
//! need to tell failure kinds apart.

/// Failure while fetching a random employee.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no results")]
    EmptyResult,
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

/// A wizard action was attempted without its preconditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("your name is required before continuing")]
    MissingUserName,

    #[error("company and role are required before generating")]
    MissingTarget,

    #[error("an employee lookup is already in progress")]
    FetchInFlight,

    #[error("lookup result does not belong to an outstanding lookup")]
    UnexpectedFetch,

    #[error("action not available in step {0}")]
    WrongStep(&'static str),
}
