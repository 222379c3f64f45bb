use thiserror::Error;

/// Why a single weather query produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The city name was empty after trimming; nothing was sent.
    #[error("Enter City Name")]
    EmptyCityName,

    /// The API reported an error, the transport failed, or the body was unusable.
    #[error("{0}")]
    QueryFailed(String),
}

impl QueryError {
    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self::QueryFailed(message.into())
    }
}
