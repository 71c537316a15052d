use thiserror::Error;

pub type TaskResult<T> = Result<T, ErrandError>;

#[derive(Error, Debug)]
pub enum ErrandError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("remote request failed: {0}")]
    Http(String),

    #[error("failed to decode payload: {0}")]
    Decode(String),

    #[error("lock poisoned: {0}")]
    Lock(String),

    #[error("event callbacks must be processed on their registration thread")]
    ThreadAffinity,

    #[error("no event callbacks registered")]
    NoCallbacksRegistered,
}

impl From<serde_json::Error> for ErrandError {
    fn from(err: serde_json::Error) -> Self {
        ErrandError::Decode(err.to_string())
    }
}

impl From<sqlx::Error> for ErrandError {
    fn from(err: sqlx::Error) -> Self {
        ErrandError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for ErrandError {
    fn from(err: reqwest::Error) -> Self {
        ErrandError::Http(err.to_string())
    }
}
