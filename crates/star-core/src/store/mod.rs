//! Contrato del Artifact Store y backend en memoria.

mod memory;

use uuid::Uuid;

use crate::errors::CoreError;
use crate::model::{Artifact, ArtifactRef};

pub use memory::InMemoryArtifactStore;

/// Almacenamiento append-mostly de artifacts nombrados.
///
/// Contrato:
/// - `exists` se consulta antes de cada `create`; `create` sobre un nombre
///   existente devuelve `CoreError::DuplicateArtifact`.
/// - `create` asigna el hash canónico del payload y devuelve una referencia
///   resoluble.
/// - El par `exists` + `create` no es atómico: no sintetizar la misma corrida
///   en paralelo.
pub trait ArtifactStore {
    /// Identificador del upload al que pertenecen las referencias.
    fn upload_id(&self) -> Uuid;

    fn exists(&self, name: &str) -> bool;

    fn create(&mut self, name: &str, artifact: Artifact) -> Result<ArtifactRef, CoreError>;

    fn resolve(&self, reference: &ArtifactRef) -> Result<Artifact, CoreError>;

    /// Referencia estable para `name`, exista o no el artifact.
    fn reference_for(&self, name: &str) -> ArtifactRef {
        ArtifactRef::for_entry(self.upload_id(), name)
    }
}
