//! Starflow
//!
//! Librería de aplicación del sintetizador de linaje:
//! - Re-exporta los crates del workspace (`star_core`, `star_domain`,
//!   `star_adapters`, `star_lineage`, `star_persistence`).
//! - Expone `config` (configuración desde .env / entorno) y `errors`.
//! - `app` arma el sintetizador sobre el store de archivos y produce los
//!   reportes que consume `star-cli`.

pub mod app;
pub mod config;
pub mod errors;

pub use app::{calibrate, load_json, load_run, synthesize_run, CalibrationReport, RunReport, StackEntry};
pub use config::AppConfig;
pub use errors::AppError;

pub use star_adapters;
pub use star_core;
pub use star_domain;
pub use star_lineage;
pub use star_persistence;
