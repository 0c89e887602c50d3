//! Artifact neutral del sintetizador.
//!
//! Un `Artifact` es la unidad persistida en el `ArtifactStore`:
//! - `payload` es JSON genérico; el core no interpreta su semántica.
//! - `hash` lo asigna el store sobre el JSON canonicalizado (ver
//!   `hashing::to_canonical_json`) y sirve para trazabilidad.
//! - `metadata` anota información auxiliar que no entra al hash.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::ARCHIVE_SUFFIX;

/// Clases de artifact que el sintetizador puede persistir.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    ThinFilm,
    Substrate,
    Stack,
    CalibrationData,
    SputteringTarget,
}

impl ArtifactKind {
    /// Segmento usado en el nombre de archivo del archive.
    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::ThinFilm => "thinFilm",
            ArtifactKind::Substrate => "substrate",
            ArtifactKind::Stack => "ThinFilmStack",
            ArtifactKind::CalibrationData => "calibration",
            ArtifactKind::SputteringTarget => "target",
        }
    }
}

/// Prefijo de archive a partir de un nombre libre: espacios y separadores
/// de ruta pasan a `_`, `..` se colapsa y un `.` en los extremos se
/// reemplaza, de modo que el nombre resultante es válido en cualquier store.
pub fn archive_stem(name: &str) -> String {
    let mut stem: String = name.trim()
                               .chars()
                               .map(|c| match c {
                                   ' ' | '/' | '\\' => '_',
                                   c => c,
                               })
                               .collect();
    while stem.contains("..") {
        stem = stem.replace("..", "_.");
    }
    if stem.starts_with('.') {
        stem.replace_range(..1, "_");
    }
    if stem.ends_with('.') {
        stem.pop();
        stem.push('_');
    }
    stem
}

/// Nombre determinista de un archive: `<stem>.<kind>.archive.json`.
pub fn archive_name(stem: &str, kind: ArtifactKind) -> String {
    format!("{stem}.{}.{ARCHIVE_SUFFIX}", kind.suffix())
}

/// Artifact neutral persistido por el store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub hash: String,            // hash canónico del payload (asignado por el store)
    pub payload: Value,          // contenido neutro JSON
    pub metadata: Option<Value>, // información auxiliar (no entra al hash)
}

impl Artifact {
    /// Constructor interno; preferir `ArtifactSpec::into_artifact`.
    pub(crate) fn new_unhashed(kind: ArtifactKind, payload: Value, metadata: Option<Value>) -> Self {
        Self { kind,
               hash: String::new(),
               payload,
               metadata }
    }

    /// Asigna el hash canónico del payload.
    pub fn seal(&mut self) -> &str {
        self.hash = crate::hashing::hash_value(&self.payload);
        &self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_name_is_deterministic() {
        assert_eq!(archive_name("Run_1_Mo1", ArtifactKind::ThinFilm), "Run_1_Mo1.thinFilm.archive.json");
        assert_eq!(archive_name("Run_1_sample", ArtifactKind::Stack), "Run_1_sample.ThinFilmStack.archive.json");
    }

    #[test]
    fn stem_drops_path_separators() {
        assert_eq!(archive_stem(" Run 2024/05/01 "), "Run_2024_05_01");
        assert_eq!(archive_stem("a\\b"), "a_b");
        assert_eq!(archive_stem(".hidden..run"), "_hidden_.run");
        assert_eq!(archive_stem("cal."), "cal_");
        assert_eq!(archive_stem("Run_1"), "Run_1");
    }
}
