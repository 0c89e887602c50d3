//! Modelos neutrales (Artifact, ArtifactRef, artifacts tipados).

pub mod artifact;
pub mod reference;
pub mod typed_artifact;

pub use artifact::{archive_name, archive_stem, Artifact, ArtifactKind};
pub use reference::ArtifactRef;
pub use typed_artifact::{ArtifactDecodeError, ArtifactSpec};
