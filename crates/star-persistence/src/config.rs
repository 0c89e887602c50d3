//! Carga de configuración del store desde variables de entorno.
//! Convención `STAR_STORE_DIR` y `STAR_UPLOAD_ID` (opcional).

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::error::PersistenceError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_STORE_DIR: &str = "./archive";

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub dir: PathBuf,
    pub upload_id: Option<Uuid>,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, PersistenceError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_values(env::var("STAR_STORE_DIR").ok(), env::var("STAR_UPLOAD_ID").ok())
    }

    /// Construye la configuración desde valores crudos (vacío = ausente).
    pub fn from_values(dir: Option<String>, upload_id: Option<String>) -> Result<Self, PersistenceError> {
        let dir = dir.filter(|d| !d.trim().is_empty())
                     .unwrap_or_else(|| DEFAULT_STORE_DIR.to_string());
        let upload_id = match upload_id.filter(|u| !u.trim().is_empty()) {
            Some(raw) => Some(Uuid::parse_str(raw.trim()).map_err(|e| PersistenceError::InvalidUploadId(format!("{raw}: {e}")))?),
            None => None,
        };
        Ok(Self { dir: PathBuf::from(dir),
                  upload_id })
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
