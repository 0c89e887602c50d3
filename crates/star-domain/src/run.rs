// run.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use star_core::model::archive_stem;
use star_core::ArtifactRef;

use crate::{DomainError, SputteringSource, Step};

/// Una corrida de deposición registrada: steps ordenados, fuentes y el
/// sample set (referencias a stacks) con el que arranca.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SputteringRun {
    pub name: String,
    #[serde(default)]
    pub lab_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Presión base de cámara (Pa).
    #[serde(default)]
    pub base_pressure: Option<f64>,
    #[serde(default)]
    pub is_a_calibration_experiment: bool,
    #[serde(default)]
    pub samples: Vec<ArtifactRef>,
    #[serde(default)]
    pub sources: Vec<SputteringSource>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl SputteringRun {
    pub fn new(name: impl Into<String>) -> Self {
        SputteringRun { name: name.into(),
                        lab_id: None,
                        start_time: None,
                        base_pressure: None,
                        is_a_calibration_experiment: false,
                        samples: Vec::new(),
                        sources: Vec::new(),
                        steps: Vec::new() }
    }

    /// Prefijo de nombres de artifact derivado del nombre de la corrida.
    pub fn data_file(&self) -> String {
        archive_stem(&self.name)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::ValidationError("El nombre de la corrida no puede estar vacío".to_string()));
        }
        Ok(())
    }

    /// Carga una corrida desde JSON.
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        let run: SputteringRun = serde_json::from_str(text)?;
        run.validate()?;
        Ok(run)
    }
}
