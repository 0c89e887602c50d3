//! Errores y advertencias de la síntesis.

use serde::{Deserialize, Serialize};
use star_core::{ArtifactDecodeError, ArtifactRef, CoreError};
use star_domain::DomainError;
use thiserror::Error;

/// Errores que abortan la síntesis de una corrida.
#[derive(Debug, Error)]
pub enum LineageError {
    /// Un step que crea película no tiene fuente o su material no se puede
    /// derivar. Nunca se persiste una película con material indefinido.
    #[error("precondition violated at step {step_index}: {reason}")]
    PreconditionViolation { step_index: usize, reason: String },
    #[error("invalid run: {0}")]
    InvalidRun(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] CoreError),
    #[error("encoding: {0}")]
    Encoding(String),
}

impl From<ArtifactDecodeError> for LineageError {
    fn from(e: ArtifactDecodeError) -> Self {
        LineageError::Encoding(e.to_string())
    }
}

impl LineageError {
    pub fn precondition(step_index: usize, reason: impl Into<String>) -> Self {
        LineageError::PreconditionViolation { step_index,
                                              reason: reason.into() }
    }

    /// Índice del step que abortó la corrida, si aplica.
    pub fn step_index(&self) -> Option<usize> {
        match self {
            LineageError::PreconditionViolation { step_index, .. } => Some(*step_index),
            _ => None,
        }
    }
}

/// Condiciones que no abortan la corrida pero quedan reportadas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LineageWarning {
    /// Un registro de sample parameters apunta a un stack fuera del sample
    /// set. El registro se conserva marcado.
    InconsistentSampleReference { step_index: usize, stack: ArtifactRef },
    /// Una película compartida recibió huellas distintas de dos stacks.
    GeometryConflict { film: ArtifactRef, stack: ArtifactRef },
    /// Una capa previa de un stack cargado no tiene la huella de su sustrato.
    LayerFootprintMismatch { stack: ArtifactRef, film: ArtifactRef },
    /// Corrida de calibración sin espesor o duración para calcular la tasa.
    MissingCalibrationInput { step_index: usize, reason: String },
    /// Una fuente referencia un target que el store no pudo resolver.
    UnresolvedTarget { reference: ArtifactRef },
}
