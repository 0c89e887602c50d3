//! Artifacts tipados de los registros persistidos por el sintetizador.
//!
//! Cada artifact envuelve el registro de dominio normalizado bajo un único
//! campo y el macro agrega `schema_version`. El hash lo asigna el store a
//! partir del payload canónico.

use star_core::{typed_artifact, ArtifactKind};
use star_domain::{CalibrationData, Stack, Substrate, SputteringTarget, ThinFilm};

typed_artifact!(ThinFilmArtifact { film: ThinFilm } kind: ArtifactKind::ThinFilm);

typed_artifact!(SubstrateArtifact { substrate: Substrate } kind: ArtifactKind::Substrate);

// Stack persistido: sus `components` ya vienen recalculados.
typed_artifact!(StackArtifact { stack: Stack } kind: ArtifactKind::Stack);

typed_artifact!(CalibrationArtifact { calibration: CalibrationData } kind: ArtifactKind::CalibrationData);

typed_artifact!(TargetArtifact { target: SputteringTarget } kind: ArtifactKind::SputteringTarget);
