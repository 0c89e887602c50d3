//! star-lineage: síntesis del linaje de una corrida de deposición.
//!
//! Flujo de una corrida:
//! 1. `StepNormalizer` normaliza cada step (nombre, duración, entorno,
//!    potencia DC). Sin estado entre steps.
//! 2. `LineageSynthesizer` recorre los steps en orden, materializa
//!    películas, sustratos y stacks contra el `ArtifactStore` (siempre
//!    `exists` antes de `create`) y enlaza cada película nueva en todos los
//!    stacks del sample set.
//! 3. `ReferenceGraph::consistency_pass` recalcula `components` y marca los
//!    registros cuyo stack no pertenece al sample set.
//! 4. `calibration` corre aparte: tasa de deposición desde una corrida de
//!    calibración e instalación de calibraciones en targets.

pub mod calibration;
pub mod errors;
pub mod graph;
pub mod normalizer;
pub mod synthesizer;

pub use calibration::{install_calibration, record_calibration, resolve_calibration};
pub use errors::{LineageError, LineageWarning};
pub use graph::ReferenceGraph;
pub use normalizer::{normalize_step, StepNormalizer};
pub use synthesizer::{LineageSynthesizer, RunOutcome};
