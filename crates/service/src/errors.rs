use thiserror::Error;

/// Domain errors raised by the service layer.
///
/// `NotFound` and `IntegrityViolation` carry the message shown to API
/// callers; `Db` wraps driver failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    IntegrityViolation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{} {} not found", entity, id))
    }
}
