//! star-persistence
//!
//! Backend de archivos para el `ArtifactStore` del core: un documento JSON
//! `<name>` por artifact dentro de un directorio de upload, más el archivo
//! `.upload_id` con el UUID del upload.
//!
//! Módulos:
//! - `fs`: `FsArtifactStore`.
//! - `config`: carga de configuración desde .env / entorno.
//! - `error`: `PersistenceError` y su mapeo a `CoreError`.

pub mod config;
pub mod error;
pub mod fs;

pub use config::{init_dotenv, StoreConfig};
pub use error::PersistenceError;
pub use fs::FsArtifactStore;
