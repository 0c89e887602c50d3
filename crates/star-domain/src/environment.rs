// environment.rs
use serde::{Deserialize, Serialize};

use crate::PureSubstance;

/// m³/s → cm³/min (sccm).
const M3_PER_S_TO_SCCM: f64 = 6.0e7;

/// Serie de presión de cámara (Pa).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pressure {
    #[serde(default)]
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowMeasurement {
    #[default]
    MassFlowController,
    FlowMeter,
    Other,
}

/// Caudal volumétrico (m³/s).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumetricFlowRate {
    #[serde(default)]
    pub set_value: Vec<f64>,
    #[serde(default)]
    pub measurement_type: FlowMeasurement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GasFlow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gas: Option<PureSubstance>,
    #[serde(default)]
    pub flow_rate: Option<VolumetricFlowRate>,
}

/// Condiciones de cámara de un step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChamberEnvironment {
    #[serde(default)]
    pub step_name: Option<String>,
    #[serde(default)]
    pub pressure: Option<Pressure>,
    #[serde(default)]
    pub chamber_pressure: Option<f64>,
    /// Resumen legible `"<gas> (<flujo> sccm)"`, derivado de `gas_flow`.
    #[serde(default)]
    pub gasses: Vec<String>,
    #[serde(default)]
    pub gas_flow: Vec<GasFlow>,
}

impl ChamberEnvironment {
    /// Deriva `chamber_pressure` desde la serie de presión y recalcula el
    /// resumen de gases. Idempotente.
    pub fn normalize(&mut self) {
        if let Some(first) = self.pressure.as_ref().and_then(|p| p.value.first()) {
            self.chamber_pressure = Some(*first);
        }

        let mut gasses = Vec::new();
        for flow in self.gas_flow.iter_mut() {
            if let Some(gas) = &flow.gas {
                flow.name = Some(gas.name.clone());
            }
            let rate = flow.flow_rate.as_ref().and_then(|r| r.set_value.first());
            if let (Some(rate), Some(name)) = (rate, flow.name.as_deref()) {
                let sccm = (rate * M3_PER_S_TO_SCCM * 10.0).round() / 10.0;
                gasses.push(format!("{name} ({sccm:.1} sccm)"));
            }
        }
        self.gasses = gasses;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_summarizes_gas_flows_in_sccm() {
        let mut env = ChamberEnvironment { pressure: Some(Pressure { value: vec![0.4, 0.5] }),
                                           gas_flow: vec![GasFlow { gas: Some(PureSubstance::new("Ar")),
                                                                    flow_rate: Some(VolumetricFlowRate { set_value: vec![20.0 / M3_PER_S_TO_SCCM],
                                                                                                         ..Default::default() }),
                                                                    ..Default::default() },
                                                          GasFlow { name: Some("N2".into()),
                                                                    ..Default::default() }],
                                           ..Default::default() };
        env.normalize();
        assert_eq!(env.chamber_pressure, Some(0.4));
        assert_eq!(env.gasses, vec!["Ar (20.0 sccm)".to_string()]);
        assert_eq!(env.gas_flow[0].name.as_deref(), Some("Ar"));

        let once = env.clone();
        env.normalize();
        assert_eq!(env, once);
    }
}
