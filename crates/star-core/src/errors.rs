//! Errores específicos del core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreError {
    #[error("artifact not found: {0}")] NotFound(String),
    #[error("artifact already exists: {0}")] DuplicateArtifact(String),
    #[error("artifact codec: {0}")] Codec(String),
    #[error("storage: {0}")] Storage(String),
    #[error("internal: {0}")] Internal(String),
}

impl From<crate::model::ArtifactDecodeError> for CoreError {
    fn from(e: crate::model::ArtifactDecodeError) -> Self {
        CoreError::Codec(e.to_string())
    }
}
