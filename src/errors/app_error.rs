use star_core::CoreError;
use star_domain::DomainError;
use star_lineage::LineageError;
use star_persistence::PersistenceError;
use thiserror::Error;

/// Errores de la capa de aplicación.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Entrada inválida: {0}")]
    Parse(String),
    #[error("Síntesis abortada: {0}")]
    Lineage(#[from] LineageError),
    #[error("Error de almacenamiento: {0}")]
    Store(String),
}

impl AppError {
    /// Código de salida del CLI asociado al error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Parse(_) => 3,
            AppError::Lineage(LineageError::PreconditionViolation { .. }) => 4,
            AppError::Lineage(LineageError::InvalidRun(_)) => 3,
            _ => 5,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Parse(e.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError::Store(e.to_string())
    }
}

impl From<PersistenceError> for AppError {
    fn from(e: PersistenceError) -> Self {
        AppError::Store(e.to_string())
    }
}
