//! Constantes del núcleo.
//!
//! `LINEAGE_VERSION` participa en el fingerprint de cada corrida: cambiarla
//! invalida los fingerprints previos aunque los artifacts no cambien.

/// Versión lógica del sintetizador incluida en el fingerprint de corrida.
pub const LINEAGE_VERSION: &str = "L1.0";

/// Sufijo común de los archivos de archive generados.
pub const ARCHIVE_SUFFIX: &str = "archive.json";
