//! Referencias estables a artifacts.
//!
//! Una referencia se deriva sólo de `(upload_id, name)`: dos corridas que
//! piden el mismo nombre dentro del mismo upload obtienen la misma
//! referencia, con o sin creación previa del artifact.
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hashing::hash_str;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub upload_id: Uuid,
    pub entry_id: String,
    pub name: String,
}

impl ArtifactRef {
    /// Referencia para `name` dentro del upload `upload_id`.
    pub fn for_entry(upload_id: Uuid, name: &str) -> Self {
        let entry_id = hash_str(&format!("{upload_id}/{name}"));
        Self { upload_id,
               entry_id,
               name: name.to_string() }
    }

    /// Forma resoluble `../uploads/<upload>/archive/<entry>#data`.
    pub fn path(&self) -> String {
        format!("../uploads/{}/archive/{}#data", self.upload_id, self.entry_id)
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_upload_and_name_give_same_reference() {
        let upload = Uuid::new_v4();
        let a = ArtifactRef::for_entry(upload, "run_Mo1.thinFilm.archive.json");
        let b = ArtifactRef::for_entry(upload, "run_Mo1.thinFilm.archive.json");
        assert_eq!(a, b);
        assert_ne!(a, ArtifactRef::for_entry(Uuid::new_v4(), "run_Mo1.thinFilm.archive.json"));
        assert!(a.path().ends_with("#data"));
    }
}
