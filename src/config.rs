//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una vez y se inyecta explícitamente en
//! el sintetizador; los crates de librería no leen el entorno.
use std::env;
use std::path::PathBuf;

use star_domain::TargetIdentity;
use star_persistence::{init_dotenv, StoreConfig};

use crate::errors::AppError;

/// Configuración de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directorio del store y upload id.
    pub store: StoreConfig,
    /// Institución y dueño para identificadores de targets.
    pub identity: TargetIdentity,
}

impl AppConfig {
    /// Lee `STAR_STORE_DIR`, `STAR_UPLOAD_ID`, `STAR_INSTITUTE` y `STAR_OWNER`.
    pub fn from_env() -> Result<Self, AppError> {
        init_dotenv();
        let store = StoreConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;
        let identity = identity_from(env::var("STAR_INSTITUTE").ok(), env::var("STAR_OWNER").ok());
        Ok(Self { store, identity })
    }

    /// Configuración con el store en `dir` (sin upload id fijo).
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { store: StoreConfig { dir: dir.into(),
                                    upload_id: None },
               identity: TargetIdentity::default() }
    }

    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store.dir = dir.into();
        self
    }
}

fn identity_from(institute: Option<String>, owner: Option<String>) -> TargetIdentity {
    let default = TargetIdentity::default();
    let pick = |v: Option<String>, d: String| v.filter(|s| !s.trim().is_empty()).unwrap_or(d);
    TargetIdentity::new(pick(institute, default.institute), pick(owner, default.owner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_falls_back_per_field() {
        let id = identity_from(Some("ACME".into()), Some("".into()));
        assert_eq!(id, TargetIdentity::new("ACME", "LaNaSC"));
        assert_eq!(identity_from(None, None), TargetIdentity::default());
    }

    #[test]
    fn store_dir_override() {
        let cfg = AppConfig::in_dir("/tmp/a").with_store_dir("/tmp/b");
        assert_eq!(cfg.store.dir, PathBuf::from("/tmp/b"));
        assert_eq!(cfg.identity, TargetIdentity::default());
    }
}
