use derive_more::{Display, Error};

/// Failures talking to the attendance store.
#[derive(Debug, Display, Error)]
pub enum StoreError {
    /// Transport-level failure; the store never answered.
    #[display(fmt = "store unreachable: {}", _0)]
    Unreachable(#[error(not(source))] String),
    /// The store answered with a non-success status.
    #[display(fmt = "store rejected request: {}", _0)]
    Rejected(#[error(not(source))] String),
    /// The store answered but the body did not decode.
    #[display(fmt = "malformed store payload: {}", _0)]
    Payload(#[error(not(source))] String),
}

#[derive(Debug, Display, Error)]
pub enum EngineError {
    #[display(fmt = "unknown employee id {}", _0)]
    UnknownEmployee(#[error(not(source))] u64),
    #[display(fmt = "{} unmarked employees remain", _0)]
    UnmarkedEmployees(#[error(not(source))] usize),
    #[display(fmt = "{}", _0)]
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::Store(err)
    }
}
