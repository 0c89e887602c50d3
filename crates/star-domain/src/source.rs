// source.rs
use serde::{Deserialize, Serialize};
use star_core::ArtifactRef;

use crate::SputteringTarget;

/// Sustancia pura (elemento o compuesto) por nombre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PureSubstance {
    pub name: String,
    #[serde(default)]
    pub mass_fraction: Option<f64>,
}

impl PureSubstance {
    pub fn new(name: impl Into<String>) -> Self {
        PureSubstance { name: name.into(),
                        mass_fraction: None }
    }
}

/// Componente de una fuente: el target montado y su composición ordenada.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceComponent {
    #[serde(default)]
    pub name: Option<String>,
    /// Lab id del target (se copia desde `system` al normalizar).
    #[serde(default)]
    pub lab_id: Option<String>,
    /// Target referenciado.
    #[serde(default)]
    pub system: Option<ArtifactRef>,
    #[serde(default)]
    pub composition: Vec<PureSubstance>,
}

impl SourceComponent {
    pub fn of(composition: Vec<PureSubstance>) -> Self {
        SourceComponent { composition,
                          ..Default::default() }
    }

    /// Copia el lab id desde el target resuelto, si éste tiene identificadores.
    pub fn sync_from_target(&mut self, target: &SputteringTarget) {
        if let Some(ids) = &target.target_id {
            self.lab_id = ids.lab_id.clone();
        }
    }
}

/// Serie temporal de potencia de la fuente (W).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePower {
    #[serde(default)]
    pub value: Vec<f64>,
    #[serde(default)]
    pub time: Vec<f64>,
}

/// Dispositivo magnetrón.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Magnetron {
    #[serde(default)]
    pub power: Option<SourcePower>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fuente de sputtering: magnetrón(es) + material del target montado.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SputteringSource {
    #[serde(default)]
    pub material: Vec<SourceComponent>,
    #[serde(default)]
    pub vapor_source: Vec<Magnetron>,
}

impl SputteringSource {
    /// Composición depositada: la del primer componente de material.
    /// `None` si la fuente no declara material o la composición está vacía.
    pub fn deposited_system(&self) -> Option<&[PureSubstance]> {
        self.material
            .first()
            .map(|c| c.composition.as_slice())
            .filter(|c| !c.is_empty())
    }

    /// Copia de la fuente para un step: conserva el material y, si el step
    /// declara potencia, agrega un magnetrón con la serie `[power]`.
    pub fn clone_for_step(&self, step_power: Option<f64>) -> Self {
        let power = step_power.map(|p| SourcePower { value: vec![p],
                                                     time: Vec::new() });
        SputteringSource { material: self.material.clone(),
                           vapor_source: vec![Magnetron { power,
                                                          description: None }] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposited_system_requires_a_component() {
        let empty = SputteringSource::default();
        assert!(empty.deposited_system().is_none());

        let no_composition = SputteringSource { material: vec![SourceComponent::default()],
                                                ..Default::default() };
        assert!(no_composition.deposited_system().is_none());

        let mo = SputteringSource { material: vec![SourceComponent::of(vec![PureSubstance::new("Mo")])],
                                    ..Default::default() };
        assert_eq!(mo.deposited_system().map(|s| s[0].name.as_str()), Some("Mo"));
    }

    #[test]
    fn clone_for_step_carries_single_point_power() {
        let src = SputteringSource { material: vec![SourceComponent::of(vec![PureSubstance::new("Cu")])],
                                     vapor_source: vec![Magnetron::default(), Magnetron::default()] };
        let cloned = src.clone_for_step(Some(150.0));
        assert_eq!(cloned.material, src.material);
        assert_eq!(cloned.vapor_source.len(), 1);
        assert_eq!(cloned.vapor_source[0].power.as_ref().map(|p| p.value.clone()), Some(vec![150.0]));
        assert!(src.clone_for_step(None).vapor_source[0].power.is_none());
    }
}
