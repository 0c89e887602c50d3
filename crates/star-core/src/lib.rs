//! star-core: núcleo neutral del sintetizador de linaje.
//!
//! El core no conoce películas, sustratos ni stacks. Sólo expone:
//! - `Artifact` neutral (payload JSON + hash canónico) y `ArtifactRef`
//!   (referencia estable `upload_id` + nombre).
//! - El contrato `ArtifactStore` (`exists`/`create`/`resolve`/`reference_for`)
//!   y un backend en memoria.
//! - Un `EventStore` append-only con los eventos de linaje de cada corrida.
//! - Hashing canónico (blake3 sobre JSON canonicalizado).
pub mod constants;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod macros;
pub mod model;
pub mod store;

pub use errors::CoreError;
pub use event::{EventStore, InMemoryEventStore, LineageEvent, LineageEventKind};
pub use model::{Artifact, ArtifactDecodeError, ArtifactKind, ArtifactRef, ArtifactSpec};
pub use store::{ArtifactStore, InMemoryArtifactStore};

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	typed_artifact!(NoteSpec { text: String } kind: ArtifactKind::Substrate);

	#[test]
	fn typed_artifact_roundtrip_through_memory_store() {
		let mut store = InMemoryArtifactStore::default();
		let note = NoteSpec { text: "SLG".into(), schema_version: 1 };
		let art = note.into_artifact().expect("encode");
		let name = crate::model::archive_name("run_sub", ArtifactKind::Substrate);

		let reference = store.create(&name, art).expect("create");
		assert!(store.exists(&name));
		assert_eq!(reference, store.reference_for(&name));

		let raw = store.resolve(&reference).expect("resolve");
		assert_eq!(raw.kind, ArtifactKind::Substrate);
		assert_eq!(raw.hash, crate::hashing::hash_value(&raw.payload));
		let decoded = NoteSpec::from_artifact(&raw).expect("decode");
		assert_eq!(decoded.text, "SLG");
		assert_eq!(raw.payload, json!({"text": "SLG", "schema_version": 1}));
	}

	#[test]
	fn decode_rejects_other_kind() {
		let note = NoteSpec { text: "x".into(), schema_version: 1 };
		let mut art = note.into_artifact().expect("encode");
		art.kind = ArtifactKind::Stack;
		let err = NoteSpec::from_artifact(&art).err().expect("kind mismatch");
		assert!(matches!(err, ArtifactDecodeError::KindMismatch { .. }));
	}
}
