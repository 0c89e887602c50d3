// sample.rs
use serde::{Deserialize, Serialize};
use star_core::ArtifactRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthMeasurement {
    MechanicalProfilometer,
    Reflectance,
    Rheed,
    Other,
}

/// Tasa de crecimiento (m/s).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthRate {
    #[serde(default)]
    pub value: Vec<f64>,
    #[serde(default)]
    pub measurement_type: Option<GrowthMeasurement>,
}

/// Variante del registro: estándar o de calibración (con espesor medido).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum SampleRecordKind {
    #[default]
    Standard,
    Calibration { film_thickness: Option<f64> },
}

/// Registro por step y por muestra: qué película (`layer`) recibió qué
/// stack (`substrate`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleParameters {
    #[serde(default)]
    pub record: SampleRecordKind,
    #[serde(default)]
    pub substrate: Option<ArtifactRef>,
    #[serde(default)]
    pub layer: Option<ArtifactRef>,
    /// Nombres visibles del stack y de la película referenciados.
    #[serde(default)]
    pub substrate_name: Option<String>,
    #[serde(default)]
    pub layer_name: Option<String>,
    /// Tasa de deposición (m/s).
    #[serde(default)]
    pub deposition_rate: Option<f64>,
    #[serde(default)]
    pub growth_rate: Option<GrowthRate>,
    /// Marcado cuando `substrate` no pertenece al sample set activo.
    #[serde(default)]
    pub inconsistent_sample: bool,
}

impl SampleParameters {
    pub fn linking(substrate: ArtifactRef, layer: ArtifactRef) -> Self {
        SampleParameters { substrate: Some(substrate),
                           layer: Some(layer),
                           ..Default::default() }
    }

    pub fn calibration(substrate: ArtifactRef, layer: ArtifactRef, film_thickness: Option<f64>) -> Self {
        SampleParameters { record: SampleRecordKind::Calibration { film_thickness },
                           ..Self::linking(substrate, layer) }
    }

    pub fn is_calibration(&self) -> bool {
        matches!(self.record, SampleRecordKind::Calibration { .. })
    }

    pub fn film_thickness(&self) -> Option<f64> {
        match self.record {
            SampleRecordKind::Calibration { film_thickness } => film_thickness,
            SampleRecordKind::Standard => None,
        }
    }

    /// Refleja `deposition_rate` en la serie `growth_rate.value`.
    pub fn normalize(&mut self) {
        if let Some(rate) = self.deposition_rate {
            self.growth_rate.get_or_insert_with(GrowthRate::default).value = vec![rate];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_rate_mirrors_deposition_rate() {
        let mut sp = SampleParameters { deposition_rate: Some(1e-10),
                                        growth_rate: Some(GrowthRate { value: vec![3.0, 4.0],
                                                                       measurement_type: Some(GrowthMeasurement::Reflectance) }),
                                        ..Default::default() };
        sp.normalize();
        let gr = sp.growth_rate.unwrap();
        assert_eq!(gr.value, vec![1e-10]);
        assert_eq!(gr.measurement_type, Some(GrowthMeasurement::Reflectance));
    }

    #[test]
    fn standard_record_has_no_thickness() {
        assert_eq!(SampleParameters::default().film_thickness(), None);
        assert!(!SampleParameters::default().is_calibration());
    }
}
