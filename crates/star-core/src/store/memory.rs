use std::collections::HashMap;

use log::debug;
use uuid::Uuid;

use super::ArtifactStore;
use crate::errors::CoreError;
use crate::model::{Artifact, ArtifactRef};

/// Store en memoria indexado por nombre, con índice secundario por entry id.
pub struct InMemoryArtifactStore {
    upload_id: Uuid,
    pub inner: HashMap<String, Artifact>,
    entries: HashMap<String, String>,
    created: usize,
}

impl InMemoryArtifactStore {
    pub fn new(upload_id: Uuid) -> Self {
        Self { upload_id,
               inner: HashMap::new(),
               entries: HashMap::new(),
               created: 0 }
    }

    /// Cantidad de llamadas a `create` que persistieron un artifact.
    pub fn creation_count(&self) -> usize {
        self.created
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for InMemoryArtifactStore {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn upload_id(&self) -> Uuid {
        self.upload_id
    }

    fn exists(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    fn create(&mut self, name: &str, mut artifact: Artifact) -> Result<ArtifactRef, CoreError> {
        if self.exists(name) {
            return Err(CoreError::DuplicateArtifact(name.to_string()));
        }
        artifact.seal();
        let reference = self.reference_for(name);
        debug!("memory store: create {} ({:?})", name, artifact.kind);
        self.entries.insert(reference.entry_id.clone(), name.to_string());
        self.inner.insert(name.to_string(), artifact);
        self.created += 1;
        Ok(reference)
    }

    fn resolve(&self, reference: &ArtifactRef) -> Result<Artifact, CoreError> {
        if reference.upload_id != self.upload_id {
            return Err(CoreError::NotFound(reference.to_string()));
        }
        self.entries
            .get(&reference.entry_id)
            .and_then(|name| self.inner.get(name))
            .cloned()
            .ok_or_else(|| CoreError::NotFound(reference.to_string()))
    }
}
