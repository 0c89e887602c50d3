//! Encoder Dominio → Artifact neutral (y vuelta).
//!
//! Reglas clave:
//! - El payload es el registro ya normalizado; su forma JSON es estable para
//!   que el hash calculado por el store sea reproducible.
//! - El encoder NO calcula `hash` (lo hace el store al crear).

use star_core::{Artifact, ArtifactDecodeError, ArtifactSpec};
use star_domain::{CalibrationData, Stack, Substrate, SputteringTarget, ThinFilm};

use crate::artifacts::{CalibrationArtifact, StackArtifact, SubstrateArtifact, TargetArtifact, ThinFilmArtifact};

/// Contrato de empaquetado dominio ↔ artifact neutral.
pub trait DomainArtifactEncoder {
    fn encode_thin_film(&self, film: &ThinFilm) -> Result<Artifact, ArtifactDecodeError>;
    fn encode_substrate(&self, substrate: &Substrate) -> Result<Artifact, ArtifactDecodeError>;
    fn encode_stack(&self, stack: &Stack) -> Result<Artifact, ArtifactDecodeError>;
    fn encode_calibration(&self, calibration: &CalibrationData) -> Result<Artifact, ArtifactDecodeError>;
    fn encode_target(&self, target: &SputteringTarget) -> Result<Artifact, ArtifactDecodeError>;

    fn decode_thin_film(&self, raw: &Artifact) -> Result<ThinFilm, ArtifactDecodeError>;
    fn decode_substrate(&self, raw: &Artifact) -> Result<Substrate, ArtifactDecodeError>;
    fn decode_stack(&self, raw: &Artifact) -> Result<Stack, ArtifactDecodeError>;
    fn decode_calibration(&self, raw: &Artifact) -> Result<CalibrationData, ArtifactDecodeError>;
    fn decode_target(&self, raw: &Artifact) -> Result<SputteringTarget, ArtifactDecodeError>;
}

/// Implementación directa: un artifact tipado por registro, versión 1.
#[derive(Clone, Copy, Default)]
pub struct SimpleDomainEncoder;

impl DomainArtifactEncoder for SimpleDomainEncoder {
    fn encode_thin_film(&self, film: &ThinFilm) -> Result<Artifact, ArtifactDecodeError> {
        ThinFilmArtifact { film: film.clone(),
                           schema_version: 1 }.into_artifact()
    }

    fn encode_substrate(&self, substrate: &Substrate) -> Result<Artifact, ArtifactDecodeError> {
        SubstrateArtifact { substrate: substrate.clone(),
                            schema_version: 1 }.into_artifact()
    }

    fn encode_stack(&self, stack: &Stack) -> Result<Artifact, ArtifactDecodeError> {
        let mut stack = stack.clone();
        stack.recompute_components();
        StackArtifact { stack,
                        schema_version: 1 }.into_artifact()
    }

    fn encode_calibration(&self, calibration: &CalibrationData) -> Result<Artifact, ArtifactDecodeError> {
        CalibrationArtifact { calibration: calibration.clone(),
                              schema_version: 1 }.into_artifact()
    }

    fn encode_target(&self, target: &SputteringTarget) -> Result<Artifact, ArtifactDecodeError> {
        TargetArtifact { target: target.clone(),
                         schema_version: 1 }.into_artifact()
    }

    fn decode_thin_film(&self, raw: &Artifact) -> Result<ThinFilm, ArtifactDecodeError> {
        ThinFilmArtifact::from_artifact(raw).map(|a| a.film)
    }

    fn decode_substrate(&self, raw: &Artifact) -> Result<Substrate, ArtifactDecodeError> {
        SubstrateArtifact::from_artifact(raw).map(|a| a.substrate)
    }

    fn decode_stack(&self, raw: &Artifact) -> Result<Stack, ArtifactDecodeError> {
        StackArtifact::from_artifact(raw).map(|a| a.stack)
    }

    fn decode_calibration(&self, raw: &Artifact) -> Result<CalibrationData, ArtifactDecodeError> {
        CalibrationArtifact::from_artifact(raw).map(|a| a.calibration)
    }

    fn decode_target(&self, raw: &Artifact) -> Result<SputteringTarget, ArtifactDecodeError> {
        TargetArtifact::from_artifact(raw).map(|a| a.target)
    }
}
