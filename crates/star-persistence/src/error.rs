//! Errores de persistencia.
//! Mapea errores de IO / serde a variantes semánticas y luego a `CoreError`
//! en la frontera del trait `ArtifactStore`.

use star_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io: {0}")]
    Io(String),
    #[error("serialization: {0}")]
    Serialization(String),
    #[error("invalid artifact name: {0}")]
    InvalidName(String),
    #[error("invalid upload id: {0}")]
    InvalidUploadId(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<PersistenceError> for CoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(name) => CoreError::NotFound(name),
            other => CoreError::Storage(other.to_string()),
        }
    }
}
