//! Casos de uso de la aplicación: sintetizar una corrida y calibrar un
//! target, ambos contra el store de archivos configurado.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use star_adapters::SimpleDomainEncoder;
use star_core::model::archive_stem;
use star_core::{ArtifactRef, EventStore, InMemoryEventStore, LineageEvent};
use star_domain::{CalibrationData, SputteringRun, SputteringTarget, Stack};
use star_lineage::{install_calibration, record_calibration, resolve_calibration, LineageSynthesizer, LineageWarning};
use star_persistence::FsArtifactStore;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Stack del sample set con sus capas al cierre de la corrida.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackEntry {
    pub reference: ArtifactRef,
    pub stack: Stack,
}

/// Resultado serializable de `synthesize_run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Corrida normalizada (steps, fuentes, sample parameters, sample set).
    pub run: SputteringRun,
    pub samples: Vec<ArtifactRef>,
    pub created: Vec<ArtifactRef>,
    pub reused: Vec<ArtifactRef>,
    pub warnings: Vec<LineageWarning>,
    pub run_fingerprint: String,
    pub stacks: Vec<StackEntry>,
    pub events: Vec<LineageEvent>,
}

/// Resultado serializable de `calibrate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub calibration: CalibrationData,
    pub reference: ArtifactRef,
    pub deposition_rate: Option<f64>,
    pub target: Option<SputteringTarget>,
    /// Advertencias de la síntesis de la corrida y de la resolución.
    pub warnings: Vec<LineageWarning>,
}

/// Lee y deserializa un documento JSON.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Documento de corrida aceptado por la CLI: la corrida tal cual o el
/// `RunReport` que escribe `synthesize --out`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RunDocument {
    Report(Box<RunReport>),
    Run(SputteringRun),
}

/// Lee una corrida desde un archivo con la corrida o con un `RunReport`.
pub fn load_run(path: &Path) -> Result<SputteringRun, AppError> {
    Ok(match load_json::<RunDocument>(path)? {
        RunDocument::Report(report) => report.run,
        RunDocument::Run(run) => run,
    })
}

pub fn synthesize_run(cfg: &AppConfig, mut run: SputteringRun) -> Result<RunReport, AppError> {
    let store = FsArtifactStore::from_config(&cfg.store)?;
    let mut synth = LineageSynthesizer::new(store, InMemoryEventStore::default()).with_identity(cfg.identity.clone());
    let outcome = synth.synthesize(&mut run)?;
    let events = synth.events().list(&run.name);
    let stacks = outcome.graph
                        .stacks()
                        .map(|(reference, stack)| StackEntry { reference: reference.clone(),
                                                               stack: stack.clone() })
                        .collect();
    info!("run '{}' synthesized into {}", run.name, cfg.store.dir.display());
    Ok(RunReport { run,
                   samples: outcome.samples,
                   created: outcome.created,
                   reused: outcome.reused,
                   warnings: outcome.warnings,
                   run_fingerprint: outcome.run_fingerprint,
                   stacks,
                   events })
}

/// Sintetiza `run` (sin crear nada si ya fue sintetizada), completa
/// `calibration` con su tasa, la persiste y, si hay target, la instala como
/// vigente.
pub fn calibrate(cfg: &AppConfig,
                 mut calibration: CalibrationData,
                 run: SputteringRun,
                 target: Option<SputteringTarget>)
                 -> Result<CalibrationReport, AppError> {
    let synthesized = synthesize_run(cfg, run)?;
    let run = synthesized.run;
    let mut warnings = synthesized.warnings;
    let deposition_rate = resolve_calibration(&mut calibration, &run);
    if deposition_rate.is_none() {
        let step_index = run.steps.iter().position(|s| s.creates_film()).unwrap_or(0);
        let reason = format!("run '{}' yields no deposition rate", run.name);
        warn!("{reason}");
        if !warnings.iter().any(|w| matches!(w, LineageWarning::MissingCalibrationInput { .. })) {
            warnings.push(LineageWarning::MissingCalibrationInput { step_index, reason });
        }
    }
    let stem = calibration.name
                          .as_deref()
                          .map(archive_stem)
                          .filter(|n| !n.is_empty())
                          .unwrap_or_else(|| run.data_file());
    let mut store = FsArtifactStore::from_config(&cfg.store)?;
    let reference = record_calibration(&mut store, &SimpleDomainEncoder, &stem, &calibration)?;
    let target = target.map(|mut t| {
                           t.normalize(&cfg.identity);
                           install_calibration(&mut t, reference.clone(), &calibration);
                           t
                       });
    Ok(CalibrationReport { calibration,
                           reference,
                           deposition_rate,
                           target,
                           warnings })
}
