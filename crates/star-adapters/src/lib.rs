//! star-adapters: capa de adaptación Dominio ↔ Core.
//!
//! Este crate provee:
//! - Artifacts tipados por cada registro persistible (película, sustrato,
//!   stack, calibración, target).
//! - El trait `DomainArtifactEncoder` para empaquetar registros de dominio en
//!   `Artifact` neutrales y decodificarlos de vuelta.
//!
//! Nota: el core sólo conoce `Artifact { kind, hash, payload, metadata }`;
//! el shape del payload lo fija cada artifact tipado de este crate.

pub mod artifacts;
pub mod encoder;

pub use encoder::{DomainArtifactEncoder, SimpleDomainEncoder};
