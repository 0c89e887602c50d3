//! Orquestador de la síntesis de linaje de una corrida.

use log::{debug, info, warn};
use serde_json::json;
use star_adapters::{DomainArtifactEncoder, SimpleDomainEncoder};
use star_core::constants::LINEAGE_VERSION;
use star_core::hashing::hash_value;
use star_core::model::archive_name;
use star_core::{Artifact, ArtifactDecodeError, ArtifactKind, ArtifactRef, ArtifactStore, EventStore, LineageEventKind};
use star_domain::{PureSubstance, SampleParameters, SputteringRun, SputteringSource, Stack, Step, Substrate, TargetIdentity, ThinFilm};

use crate::errors::{LineageError, LineageWarning};
use crate::graph::ReferenceGraph;
use crate::normalizer::StepNormalizer;

/// Resultado de sintetizar una corrida.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Sample set final (posiblemente extendido).
    pub samples: Vec<ArtifactRef>,
    /// Artifacts creados por esta síntesis.
    pub created: Vec<ArtifactRef>,
    /// Artifacts que ya existían y se reutilizaron.
    pub reused: Vec<ArtifactRef>,
    pub warnings: Vec<LineageWarning>,
    /// blake3 de todas las referencias tocadas; estable entre re-síntesis.
    pub run_fingerprint: String,
    pub graph: ReferenceGraph,
}

/// Estado acumulado a lo largo de los steps de una corrida.
struct RunCursor {
    run: String,
    data_file: String,
    calibration: bool,
    film_index: usize,
    graph: ReferenceGraph,
    created: Vec<ArtifactRef>,
    reused: Vec<ArtifactRef>,
    warnings: Vec<LineageWarning>,
}

/// Sintetizador de linaje.
///
/// Cada creación va precedida de `exists`; si el nombre ya existe se
/// resuelve y reutiliza el artifact guardado. El par no es atómico: no
/// sintetizar la misma corrida en paralelo contra el mismo store.
pub struct LineageSynthesizer<S, E, D = SimpleDomainEncoder>
    where S: ArtifactStore,
          E: EventStore,
          D: DomainArtifactEncoder
{
    store: S,
    events: E,
    encoder: D,
    normalizer: StepNormalizer,
    identity: TargetIdentity,
}

impl<S, E> LineageSynthesizer<S, E>
    where S: ArtifactStore,
          E: EventStore
{
    pub fn new(store: S, events: E) -> Self {
        Self { store,
               events,
               encoder: SimpleDomainEncoder,
               normalizer: StepNormalizer::default(),
               identity: TargetIdentity::default() }
    }
}

impl<S, E, D> LineageSynthesizer<S, E, D>
    where S: ArtifactStore,
          E: EventStore,
          D: DomainArtifactEncoder
{
    /// Reemplaza el encoder de artifacts.
    pub fn with_encoder<D2: DomainArtifactEncoder>(self, encoder: D2) -> LineageSynthesizer<S, E, D2> {
        LineageSynthesizer { store: self.store,
                             events: self.events,
                             encoder,
                             normalizer: self.normalizer,
                             identity: self.identity }
    }

    pub fn with_normalizer(mut self, normalizer: StepNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Institución y dueño para los identificadores de targets.
    pub fn with_identity(mut self, identity: TargetIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn encoder(&self) -> &D {
        &self.encoder
    }

    pub fn into_parts(self) -> (S, E) {
        (self.store, self.events)
    }

    /// Sintetiza el linaje de `run`, modificándolo en sitio (steps
    /// normalizados, fuentes heredadas, sample parameters y sample set).
    pub fn synthesize(&mut self, run: &mut SputteringRun) -> Result<RunOutcome, LineageError> {
        run.validate()?;
        let mut cursor = RunCursor { run: run.name.clone(),
                                     data_file: run.data_file(),
                                     calibration: run.is_a_calibration_experiment,
                                     film_index: 0,
                                     graph: ReferenceGraph::new(),
                                     created: Vec::new(),
                                     reused: Vec::new(),
                                     warnings: Vec::new() };
        self.events.append_kind(&cursor.run,
                                LineageEventKind::RunStarted { step_count: run.steps.len(),
                                                               calibration: cursor.calibration });
        info!("synthesizing run '{}' ({} steps)", cursor.run, run.steps.len());

        for reference in &run.samples {
            cursor.graph.load_stack(&self.store, &self.encoder, reference)?;
        }
        self.attach_target_ids(&mut run.sources, &mut cursor);

        for (index, step) in run.steps.iter_mut().enumerate() {
            self.normalizer.normalize(index, step);
            self.events.append_kind(&cursor.run,
                                    LineageEventKind::StepNormalized { step_index: index,
                                                                       step_name: step.name.clone().unwrap_or_default() });
            inherit_sources(&run.sources, step);
            if !step.creates_film() {
                continue;
            }
            if let Err(e) = self.deposit(&mut cursor, index, step, &run.sources) {
                warn!("run '{}' aborted at step {index}: {e}", cursor.run);
                self.events.append_kind(&cursor.run,
                                        LineageEventKind::SynthesisFailed { step_index: index,
                                                                            error: e.to_string() });
                return Err(e);
            }
        }

        let pass = cursor.graph.consistency_pass(&mut run.steps);
        cursor.warnings.extend(pass);
        run.samples = cursor.graph.sample_set();

        let run_fingerprint = fingerprint(&cursor, &run.samples);
        self.events.append_kind(&cursor.run,
                                LineageEventKind::RunCompleted { created: cursor.created.len(),
                                                                 reused: cursor.reused.len(),
                                                                 run_fingerprint: run_fingerprint.clone() });
        info!("run '{}': {} created, {} reused, {} warnings",
              cursor.run,
              cursor.created.len(),
              cursor.reused.len(),
              cursor.warnings.len());

        Ok(RunOutcome { samples: run.samples.clone(),
                        created: cursor.created,
                        reused: cursor.reused,
                        warnings: cursor.warnings,
                        run_fingerprint,
                        graph: cursor.graph })
    }

    /// Materializa la película de un step y la enlaza en el sample set.
    fn deposit(&mut self,
               cursor: &mut RunCursor,
               index: usize,
               step: &mut Step,
               run_sources: &[SputteringSource])
               -> Result<(), LineageError> {
        let source = run_sources.first()
                                .or_else(|| step.sources.first())
                                .ok_or_else(|| LineageError::precondition(index, "film-creating step without source"))?;
        let system: Vec<PureSubstance> =
            source.deposited_system()
                  .ok_or_else(|| LineageError::precondition(index, "source has no material component"))?
                  .to_vec();
        let material = system.first()
                             .map(|s| s.name.trim().to_string())
                             .filter(|name| !name.is_empty())
                             .ok_or_else(|| LineageError::precondition(index, "source material has no name"))?;

        cursor.film_index += 1;
        let film_stem = format!("{}_{}{}", cursor.data_file, material, cursor.film_index);
        let film_ref = self.store.reference_for(&archive_name(&film_stem, ArtifactKind::ThinFilm));
        let mut film = ThinFilm { name: Some(film_stem.clone()),
                                  material: Some(material),
                                  components: system,
                                  thickness: step.film_thickness,
                                  ..Default::default() };
        film.normalize();

        let stacks = cursor.graph.sample_set();
        let mut records = Vec::new();
        if stacks.is_empty() {
            let record = self.new_sample(cursor, index, step, film_stem, film)?;
            records.push(record);
        } else {
            let conflicts = cursor.graph.align_film_footprint(&mut film, &film_ref, &stacks);
            cursor.warnings.extend(conflicts);
            let (film_ref, film) = self.materialize(cursor, index, ArtifactKind::ThinFilm, &film_stem, film, D::encode_thin_film, D::decode_thin_film)?;
            for stack in stacks {
                cursor.graph.link_layer(&stack, &film_ref);
                self.events.append_kind(&cursor.run,
                                        LineageEventKind::SampleLinked { step_index: index,
                                                                         stack: stack.clone(),
                                                                         film: film_ref.clone() });
                records.push(SampleParameters::linking(stack, film_ref.clone()));
            }
            cursor.graph.insert_film(film_ref, film);
        }

        for record in records.iter_mut() {
            record.normalize();
        }
        if step.sample_parameters.is_empty() {
            step.sample_parameters = records;
        } else {
            debug!("step {index}: keeping {} declared sample parameters", step.sample_parameters.len());
        }
        Ok(())
    }

    /// Primer depósito de una corrida sin muestras: sustrato + stack nuevos.
    fn new_sample(&mut self,
                  cursor: &mut RunCursor,
                  index: usize,
                  step: &Step,
                  film_stem: String,
                  mut film: ThinFilm)
                  -> Result<SampleParameters, LineageError> {
        let sub_stem = format!("{}_sub", cursor.data_file);
        let mut substrate = Substrate { name: Some(sub_stem.clone()),
                                        ..Default::default() };
        substrate.normalize();
        let (sub_ref, substrate) = self.materialize(cursor, index, ArtifactKind::Substrate, &sub_stem, substrate, D::encode_substrate, D::decode_substrate)?;

        if let Some(footprint) = substrate.geometry {
            film.geometry.get_or_insert_with(Default::default).adopt_footprint(&footprint);
        }
        let (film_ref, film) = self.materialize(cursor, index, ArtifactKind::ThinFilm, &film_stem, film, D::encode_thin_film, D::decode_thin_film)?;

        let stack_stem = format!("{}_sample", cursor.data_file);
        let mut stack = Stack::on(sub_ref.clone());
        stack.name = Some(stack_stem.clone());
        stack.substrate_name = substrate.name.clone();
        stack.push_layer(film_ref.clone());
        let (stack_ref, stack) = self.materialize(cursor, index, ArtifactKind::Stack, &stack_stem, stack, D::encode_stack, D::decode_stack)?;

        cursor.graph.insert_substrate(sub_ref, substrate);
        cursor.graph.insert_film(film_ref.clone(), film);
        cursor.graph.insert_stack(stack_ref.clone(), stack);
        cursor.graph.link_layer(&stack_ref, &film_ref);
        self.events.append_kind(&cursor.run,
                                LineageEventKind::SampleLinked { step_index: index,
                                                                 stack: stack_ref.clone(),
                                                                 film: film_ref.clone() });

        if !cursor.calibration {
            return Ok(SampleParameters::linking(stack_ref, film_ref));
        }
        let mut record = SampleParameters::calibration(stack_ref, film_ref, step.film_thickness);
        match (step.film_thickness, step.duration) {
            (Some(thickness), Some(duration)) if duration > 0.0 => {
                record.deposition_rate = Some(thickness / duration);
            }
            (thickness, duration) => {
                let reason = format!("cannot derive deposition rate (film_thickness={thickness:?}, duration={duration:?})");
                warn!("run '{}' step {index}: {reason}", cursor.run);
                cursor.warnings.push(LineageWarning::MissingCalibrationInput { step_index: index, reason });
            }
        }
        Ok(record)
    }

    /// Reutiliza el artifact `stem` si existe; si no, lo crea desde `record`.
    #[allow(clippy::too_many_arguments)]
    fn materialize<T>(&mut self,
                      cursor: &mut RunCursor,
                      step_index: usize,
                      kind: ArtifactKind,
                      stem: &str,
                      record: T,
                      encode: impl Fn(&D, &T) -> Result<Artifact, ArtifactDecodeError>,
                      decode: impl Fn(&D, &Artifact) -> Result<T, ArtifactDecodeError>)
                      -> Result<(ArtifactRef, T), LineageError> {
        let name = archive_name(stem, kind);
        if self.store.exists(&name) {
            let reference = self.store.reference_for(&name);
            let stored = decode(&self.encoder, &self.store.resolve(&reference)?)?;
            debug!("reusing {name}");
            self.events.append_kind(&cursor.run,
                                    LineageEventKind::ArtifactReused { step_index,
                                                                       kind,
                                                                       reference: reference.clone() });
            cursor.reused.push(reference.clone());
            return Ok((reference, stored));
        }
        let artifact = encode(&self.encoder, &record)?;
        let reference = self.store.create(&name, artifact)?;
        debug!("created {name}");
        self.events.append_kind(&cursor.run,
                                LineageEventKind::ArtifactCreated { step_index,
                                                                    kind,
                                                                    reference: reference.clone() });
        cursor.created.push(reference.clone());
        Ok((reference, record))
    }

    /// Completa identificadores de los targets montados y copia su lab id
    /// a los componentes de las fuentes.
    fn attach_target_ids(&self, sources: &mut [SputteringSource], cursor: &mut RunCursor) {
        for component in sources.iter_mut().flat_map(|s| s.material.iter_mut()) {
            let Some(reference) = component.system.clone() else { continue };
            let target = self.store
                             .resolve(&reference)
                             .map_err(LineageError::from)
                             .and_then(|raw| self.encoder.decode_target(&raw).map_err(LineageError::from));
            match target {
                Ok(mut target) => {
                    target.normalize(&self.identity);
                    component.sync_from_target(&target);
                    if component.name.is_none() {
                        component.name = target.name.clone();
                    }
                }
                Err(e) => {
                    warn!("run '{}': target {} not resolved: {e}", cursor.run, reference.name);
                    cursor.warnings.push(LineageWarning::UnresolvedTarget { reference });
                }
            }
        }
    }
}

/// Un step cuya cantidad de fuentes no coincide con la de la corrida pasa a
/// usar copias de las fuentes de la corrida.
fn inherit_sources(run_sources: &[SputteringSource], step: &mut Step) {
    if run_sources.is_empty() || run_sources.len() == step.sources.len() {
        return;
    }
    let power = step.power;
    step.sources = run_sources.iter().map(|s| s.clone_for_step(power)).collect();
}

fn fingerprint(cursor: &RunCursor, samples: &[ArtifactRef]) -> String {
    let mut touched: Vec<&ArtifactRef> = cursor.created.iter().chain(cursor.reused.iter()).collect();
    touched.sort();
    hash_value(&json!({
        "version": LINEAGE_VERSION,
        "run": cursor.run,
        "touched": touched,
        "samples": samples,
    }))
}
