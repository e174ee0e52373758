use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Sign-in required")]
    Unauthenticated,
    #[error("Not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Store failure: {0}")]
    Store(String),
}
