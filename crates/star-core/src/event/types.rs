//! Tipos de evento de linaje y estructura `LineageEvent`.
//!
//! Cada síntesis emite eventos a un `EventStore` append-only. Permiten
//! auditar qué artifacts creó o reutilizó una corrida sin releer el store.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ArtifactKind, ArtifactRef};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LineageEventKind {
    /// Primer evento de una síntesis.
    RunStarted { step_count: usize, calibration: bool },
    /// Un step quedó normalizado (nombre canónico asignado).
    StepNormalized { step_index: usize, step_name: String },
    /// Se persistió un artifact nuevo.
    ArtifactCreated {
        step_index: usize,
        kind: ArtifactKind,
        reference: ArtifactRef,
    },
    /// El artifact ya existía en el store; se reutiliza su referencia.
    ArtifactReused {
        step_index: usize,
        kind: ArtifactKind,
        reference: ArtifactRef,
    },
    /// Una película quedó enlazada a un stack del sample set.
    SampleLinked {
        step_index: usize,
        stack: ArtifactRef,
        film: ArtifactRef,
    },
    /// La síntesis abortó en un step (violación de precondición).
    SynthesisFailed { step_index: usize, error: String },
    /// Cierre con fingerprint agregado de todas las referencias tocadas.
    RunCompleted {
        created: usize,
        reused: usize,
        run_fingerprint: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub run: String,
    pub kind: LineageEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en fingerprint)
}
