// step.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChamberEnvironment, SampleParameters, SputteringSource};

/// Fase del proceso de sputtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepPhase {
    Presputtering,
    Stabilization,
    Sputtering,
    PostSputtering,
}

impl StepPhase {
    /// Etiqueta usada en el nombre canónico del step.
    pub fn label(self) -> &'static str {
        match self {
            StepPhase::Presputtering => "Presputtering",
            StepPhase::Stabilization => "Stabilization",
            StepPhase::Sputtering => "Sputtering",
            StepPhase::PostSputtering => "Postsputtering",
        }
    }

    /// Duración por defecto (s) cuando el registro no la declara.
    pub fn default_duration(self) -> Option<f64> {
        match self {
            StepPhase::Presputtering => Some(3.0 * 60.0),
            StepPhase::Stabilization => Some(2.0 * 60.0),
            StepPhase::Sputtering => None,
            StepPhase::PostSputtering => Some(5.0 * 60.0),
        }
    }
}

/// Modo de alimentación de la fuente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerMode {
    #[serde(rename = "RF")]
    Rf,
    #[serde(rename = "DC")]
    Dc,
}

/// Variante etiquetada de un step: fase × modo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepKind {
    pub phase: StepPhase,
    pub mode: PowerMode,
}

impl StepKind {
    pub fn new(phase: StepPhase, mode: PowerMode) -> Self {
        StepKind { phase, mode }
    }
}

/// Un step de la corrida. Magnitudes en SI (s, Pa, W, V, A, m).
///
/// `current`, `set_current` y `set_voltage` sólo tienen sentido en steps DC;
/// `ct_value` y `cl_value` sólo en RF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub creates_new_thin_film: Option<bool>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub chamber_pressure: Option<f64>,
    #[serde(default)]
    pub voltage: Option<f64>,
    #[serde(default)]
    pub power: Option<f64>,
    #[serde(default)]
    pub set_power: Option<f64>,
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub set_current: Option<f64>,
    #[serde(default)]
    pub set_voltage: Option<f64>,
    #[serde(default)]
    pub ct_value: Option<f64>,
    #[serde(default)]
    pub cl_value: Option<f64>,
    /// Espesor medido de la película depositada en este step (m).
    #[serde(default)]
    pub film_thickness: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub environment: Option<ChamberEnvironment>,
    #[serde(default)]
    pub sources: Vec<SputteringSource>,
    #[serde(default)]
    pub sample_parameters: Vec<SampleParameters>,
}

impl Step {
    /// Step vacío de la variante indicada.
    pub fn new(phase: StepPhase, mode: PowerMode) -> Self {
        Step { kind: StepKind::new(phase, mode),
               name: None,
               creates_new_thin_film: None,
               start_time: None,
               duration: None,
               chamber_pressure: None,
               voltage: None,
               power: None,
               set_power: None,
               current: None,
               set_current: None,
               set_voltage: None,
               ct_value: None,
               cl_value: None,
               film_thickness: None,
               comment: None,
               environment: None,
               sources: Vec::new(),
               sample_parameters: Vec::new() }
    }

    pub fn creates_film(&self) -> bool {
        self.creates_new_thin_film.unwrap_or(false)
    }
}
