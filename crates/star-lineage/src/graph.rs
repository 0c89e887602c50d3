//! Arena en memoria de los artifacts tocados por una corrida.
//!
//! Las entidades se indexan por su `ArtifactRef`; las referencias entre
//! ellas son claves, nunca punteros compartidos. El orden de inserción de
//! `stacks` es el orden del sample set.

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use star_adapters::DomainArtifactEncoder;
use star_core::{ArtifactRef, ArtifactStore};
use star_domain::{RectangleCuboid, Stack, Step, Substrate, ThinFilm};

use crate::errors::{LineageError, LineageWarning};

#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    substrates: IndexMap<ArtifactRef, Substrate>,
    films: IndexMap<ArtifactRef, ThinFilm>,
    stacks: IndexMap<ArtifactRef, Stack>,
    /// Capas leídas de stacks existentes y no depositadas en esta corrida.
    loaded_layers: IndexSet<ArtifactRef>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carga un stack existente (con su sustrato y sus capas) al sample set.
    pub fn load_stack<S, D>(&mut self, store: &S, encoder: &D, reference: &ArtifactRef) -> Result<(), LineageError>
        where S: ArtifactStore,
              D: DomainArtifactEncoder
    {
        if self.stacks.contains_key(reference) {
            return Ok(());
        }
        let stack = encoder.decode_stack(&store.resolve(reference)?)?;
        if let Some(sub_ref) = &stack.substrate {
            if !self.substrates.contains_key(sub_ref) {
                let substrate = encoder.decode_substrate(&store.resolve(sub_ref)?)?;
                self.substrates.insert(sub_ref.clone(), substrate);
            }
        }
        for layer in &stack.layers {
            if self.films.contains_key(layer) {
                continue;
            }
            let film = encoder.decode_thin_film(&store.resolve(layer)?)?;
            self.films.insert(layer.clone(), film);
            self.loaded_layers.insert(layer.clone());
        }
        debug!("graph: loaded stack {}", reference.name);
        self.insert_stack(reference.clone(), stack);
        Ok(())
    }

    pub fn insert_substrate(&mut self, reference: ArtifactRef, substrate: Substrate) {
        self.substrates.insert(reference, substrate);
    }

    pub fn insert_film(&mut self, reference: ArtifactRef, film: ThinFilm) {
        self.loaded_layers.shift_remove(&reference);
        self.films.insert(reference, film);
    }

    /// Agrega un stack al sample set (con `components` recalculado).
    pub fn insert_stack(&mut self, reference: ArtifactRef, mut stack: Stack) {
        stack.recompute_components();
        self.stacks.insert(reference, stack);
    }

    pub fn sample_set(&self) -> Vec<ArtifactRef> {
        self.stacks.keys().cloned().collect()
    }

    pub fn is_sample(&self, reference: &ArtifactRef) -> bool {
        self.stacks.contains_key(reference)
    }

    pub fn stack(&self, reference: &ArtifactRef) -> Option<&Stack> {
        self.stacks.get(reference)
    }

    pub fn film(&self, reference: &ArtifactRef) -> Option<&ThinFilm> {
        self.films.get(reference)
    }

    pub fn substrate(&self, reference: &ArtifactRef) -> Option<&Substrate> {
        self.substrates.get(reference)
    }

    pub fn stacks(&self) -> impl Iterator<Item = (&ArtifactRef, &Stack)> {
        self.stacks.iter()
    }

    pub fn films(&self) -> impl Iterator<Item = (&ArtifactRef, &ThinFilm)> {
        self.films.iter()
    }

    /// Huella (ancho y largo) del sustrato de un stack.
    pub fn footprint_of(&self, stack: &ArtifactRef) -> Option<RectangleCuboid> {
        self.stacks
            .get(stack)
            .and_then(|s| s.substrate.as_ref())
            .and_then(|sub| self.substrates.get(sub))
            .and_then(|sub| sub.geometry)
    }

    /// Alinea ancho y largo de `film` con el sustrato de cada stack.
    ///
    /// Si dos stacks imponen huellas distintas a la misma película queda la
    /// del último y se reporta `GeometryConflict`.
    pub fn align_film_footprint(&self,
                                film: &mut ThinFilm,
                                film_ref: &ArtifactRef,
                                stacks: &[ArtifactRef])
                                -> Vec<LineageWarning> {
        let mut warnings = Vec::new();
        let mut adopted = false;
        for stack in stacks {
            let Some(footprint) = self.footprint_of(stack) else { continue };
            let geometry = film.geometry.get_or_insert_with(RectangleCuboid::default);
            if geometry.adopt_footprint(&footprint) && adopted {
                warn!("film {} gets a different footprint from stack {}", film_ref.name, stack.name);
                warnings.push(LineageWarning::GeometryConflict { film: film_ref.clone(),
                                                                 stack: stack.clone() });
            }
            adopted = true;
        }
        warnings
    }

    /// Agrega `film` como capa superior de `stack` si aún no la tiene.
    /// Devuelve `true` si la capa se agregó.
    pub fn link_layer(&mut self, stack: &ArtifactRef, film: &ArtifactRef) -> bool {
        let Some(entry) = self.stacks.get_mut(stack) else { return false };
        if entry.layers.contains(film) {
            return false;
        }
        entry.push_layer(film.clone());
        true
    }

    /// Pasada final sobre el grafo y los registros de la corrida:
    /// - recalcula `components` de cada stack y copia el nombre de su
    ///   sustrato;
    /// - reporta capas cargadas cuya huella difiere de la del sustrato;
    /// - copia nombres de stack y película en los sample parameters y marca
    ///   los que apuntan fuera del sample set.
    pub fn consistency_pass(&mut self, steps: &mut [Step]) -> Vec<LineageWarning> {
        let mut warnings = Vec::new();
        for (reference, stack) in self.stacks.iter_mut() {
            stack.recompute_components();
            let substrate = stack.substrate.as_ref().and_then(|s| self.substrates.get(s));
            if let Some(substrate) = substrate {
                stack.substrate_name = display_name(&substrate.name, &substrate.lab_id);
            }
            let Some(footprint) = substrate.and_then(|s| s.geometry) else { continue };
            for layer in stack.layers.iter().filter(|l| self.loaded_layers.contains(*l)) {
                let Some(geometry) = self.films.get(layer).and_then(|f| f.geometry) else { continue };
                if geometry.width != footprint.width || geometry.length != footprint.length {
                    warn!("layer {} of stack {} does not match its substrate footprint", layer.name, reference.name);
                    warnings.push(LineageWarning::LayerFootprintMismatch { stack: reference.clone(),
                                                                           film: layer.clone() });
                }
            }
        }
        for (step_index, step) in steps.iter_mut().enumerate() {
            for record in step.sample_parameters.iter_mut() {
                if let Some(film) = record.layer.as_ref().and_then(|l| self.films.get(l)) {
                    record.layer_name = display_name(&film.name, &film.lab_id);
                }
                let Some(stack_ref) = &record.substrate else { continue };
                if let Some(stack) = self.stacks.get(stack_ref) {
                    record.substrate_name = display_name(&stack.name, &stack.lab_id);
                    continue;
                }
                warn!("step {step_index}: sample parameters point to {} outside the sample set", stack_ref.name);
                record.inconsistent_sample = true;
                warnings.push(LineageWarning::InconsistentSampleReference { step_index,
                                                                            stack: stack_ref.clone() });
            }
        }
        warnings
    }
}

/// Nombre visible de un registro: su nombre o, en su defecto, el lab id.
fn display_name(name: &Option<String>, lab_id: &Option<String>) -> Option<String> {
    name.clone().or_else(|| lab_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_domain::{PowerMode, SampleParameters, StepPhase};

    fn r(name: &str) -> ArtifactRef {
        ArtifactRef::for_entry(Default::default(), name)
    }

    fn sample(graph: &mut ReferenceGraph, stack: &str, sub: &str, width: f64) {
        graph.insert_substrate(r(sub),
                               Substrate { geometry: Some(RectangleCuboid { height: Some(1e-3),
                                                                            width: Some(width),
                                                                            length: Some(width) }),
                                           ..Default::default() });
        graph.insert_stack(r(stack), Stack::on(r(sub)));
    }

    #[test]
    fn link_layer_never_duplicates() {
        let mut graph = ReferenceGraph::new();
        sample(&mut graph, "s1", "sub1", 0.05);
        assert!(graph.link_layer(&r("s1"), &r("Mo1")));
        assert!(!graph.link_layer(&r("s1"), &r("Mo1")));
        assert!(!graph.link_layer(&r("unknown"), &r("Mo1")));
        assert_eq!(graph.stack(&r("s1")).unwrap().components, vec![r("sub1"), r("Mo1")]);
    }

    #[test]
    fn footprint_conflict_is_reported_and_last_wins() {
        let mut graph = ReferenceGraph::new();
        sample(&mut graph, "s1", "sub1", 0.05);
        sample(&mut graph, "s2", "sub2", 0.02);
        let mut film = ThinFilm::default();
        let warnings = graph.align_film_footprint(&mut film, &r("Mo1"), &[r("s1"), r("s2")]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(film.geometry.and_then(|g| g.width), Some(0.02));

        let mut same = ThinFilm::default();
        assert!(graph.align_film_footprint(&mut same, &r("Mo1"), &[r("s1"), r("s1")]).is_empty());
    }

    #[test]
    fn consistency_pass_flags_foreign_stacks() {
        let mut graph = ReferenceGraph::new();
        sample(&mut graph, "s1", "sub1", 0.05);
        let mut step = Step::new(StepPhase::Sputtering, PowerMode::Rf);
        step.sample_parameters = vec![SampleParameters::linking(r("s1"), r("Mo1")),
                                      SampleParameters::linking(r("elsewhere"), r("Mo1"))];
        let mut steps = vec![step];
        let warnings = graph.consistency_pass(&mut steps);
        assert_eq!(warnings,
                   vec![LineageWarning::InconsistentSampleReference { step_index: 0,
                                                                      stack: r("elsewhere") }]);
        assert!(!steps[0].sample_parameters[0].inconsistent_sample);
        assert!(steps[0].sample_parameters[1].inconsistent_sample);
        assert_eq!(steps[0].sample_parameters.len(), 2);
    }
}
