//! `ArtifactStore` sobre un directorio.
//!
//! Cada artifact vive en `<root>/<name>` como documento JSON con su nombre,
//! su referencia y el artifact sellado. Las escrituras pasan por un archivo
//! temporal y `rename`. No hay locking entre procesos.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde::{Deserialize, Serialize};
use star_core::constants::ARCHIVE_SUFFIX;
use star_core::{Artifact, ArtifactRef, ArtifactStore, CoreError};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::PersistenceError;

const UPLOAD_ID_FILE: &str = ".upload_id";

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    name: String,
    reference: ArtifactRef,
    artifact: Artifact,
}

#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
    upload_id: Uuid,
}

impl FsArtifactStore {
    /// Abre (o inicializa) el store en `root`.
    ///
    /// Sin `upload_id` explícito se lee `.upload_id`; si no existe se genera
    /// uno nuevo y se escribe.
    pub fn open(root: impl Into<PathBuf>, upload_id: Option<Uuid>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let id_path = root.join(UPLOAD_ID_FILE);
        let upload_id = match upload_id {
            Some(id) => id,
            None if id_path.is_file() => {
                let raw = fs::read_to_string(&id_path)?;
                Uuid::parse_str(raw.trim()).map_err(|e| PersistenceError::InvalidUploadId(format!("{}: {e}", id_path.display())))?
            }
            None => {
                let id = Uuid::new_v4();
                fs::write(&id_path, id.to_string())?;
                id
            }
        };
        debug!("open:done root={} upload_id={upload_id}", root.display());
        Ok(Self { root, upload_id })
    }

    pub fn from_config(cfg: &StoreConfig) -> Result<Self, PersistenceError> {
        Self::open(&cfg.dir, cfg.upload_id)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ruta del documento de `name`; rechaza nombres que escapen del root.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, PersistenceError> {
        let invalid = name.is_empty()
                      || name.starts_with('.')
                      || name.contains('/')
                      || name.contains('\\')
                      || name.contains("..");
        if invalid {
            return Err(PersistenceError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    /// Nombres de todos los archives guardados, ordenados.
    pub fn names(&self) -> Result<Vec<String>, PersistenceError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.ends_with(ARCHIVE_SUFFIX) && !name.starts_with('.') {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn write_entry(&self, path: &Path, entry: &StoredEntry) -> Result<(), PersistenceError> {
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entry)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn read_entry(&self, name: &str) -> Result<StoredEntry, PersistenceError> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(PersistenceError::NotFound(name.to_string()));
        }
        Ok(serde_json::from_slice(&fs::read(&path)?)?)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn upload_id(&self) -> Uuid {
        self.upload_id
    }

    fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }

    fn create(&mut self, name: &str, mut artifact: Artifact) -> Result<ArtifactRef, CoreError> {
        let path = self.path_for(name)?;
        if path.is_file() {
            return Err(CoreError::DuplicateArtifact(name.to_string()));
        }
        artifact.seal();
        let reference = self.reference_for(name);
        let entry = StoredEntry { name: name.to_string(),
                                  reference: reference.clone(),
                                  artifact };
        self.write_entry(&path, &entry).map_err(|e| {
                                            error!("create:error name={name} err={e}");
                                            e
                                        })?;
        debug!("create:done name={name} entry={}", reference.entry_id);
        Ok(reference)
    }

    fn resolve(&self, reference: &ArtifactRef) -> Result<Artifact, CoreError> {
        if reference.upload_id != self.upload_id {
            return Err(CoreError::NotFound(reference.to_string()));
        }
        let entry = self.read_entry(&reference.name)?;
        if entry.reference.entry_id != reference.entry_id {
            return Err(CoreError::NotFound(reference.to_string()));
        }
        Ok(entry.artifact)
    }
}
