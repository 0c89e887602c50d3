// calibration.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use star_core::ArtifactRef;

use crate::RectangleCuboid;

/// Medición histórica de tasa de deposición de un target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub calibration_date: Option<DateTime<Utc>>,
    /// Tasa de deposición (m/s).
    #[serde(default)]
    pub deposition_rate: Option<f64>,
    /// Muestra de la corrida de calibración de la que sale la tasa.
    #[serde(default)]
    pub calibration_experiment: Option<ArtifactRef>,
}

/// Institución y dueño usados al construir identificadores de targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIdentity {
    pub institute: String,
    pub owner: String,
}

impl TargetIdentity {
    pub fn new(institute: impl Into<String>, owner: impl Into<String>) -> Self {
        TargetIdentity { institute: institute.into(),
                         owner: owner.into() }
    }
}

impl Default for TargetIdentity {
    fn default() -> Self {
        TargetIdentity::new("INL", "LaNaSC")
    }
}

/// Identificadores legibles de un target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetIdentifiers {
    #[serde(default)]
    pub institute: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub lab_id: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
}

/// Material montado en el magnetrón, con su historia de calibraciones.
///
/// `calibration_data` es la calibración vigente; `old_calibration_data` la
/// historia ordenada de las reemplazadas, sin duplicados.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SputteringTarget {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lab_id: Option<String>,
    #[serde(default)]
    pub target_id: Option<TargetIdentifiers>,
    #[serde(default)]
    pub geometry: Option<RectangleCuboid>,
    #[serde(default)]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub installation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_calibration_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub calibration_data: Option<ArtifactRef>,
    #[serde(default)]
    pub old_calibration_data: Vec<ArtifactRef>,
}

impl SputteringTarget {
    /// Construye `target_id` a partir del lab id cuando aún no existe.
    pub fn normalize(&mut self, identity: &TargetIdentity) {
        if self.target_id.is_some() {
            return;
        }
        let Some(lab_id) = self.lab_id.clone() else { return };
        self.target_id = Some(TargetIdentifiers { institute: Some(identity.institute.clone()),
                                                  owner: Some(identity.owner.clone()),
                                                  lab_id: Some(lab_id),
                                                  short_name: self.name.clone(),
                                                  datetime: self.delivery_date });
    }
}
