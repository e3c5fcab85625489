use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("snake body is empty")]
    EmptyBody,
    #[error("no free cell left to place food")]
    NoAvailableCell,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
