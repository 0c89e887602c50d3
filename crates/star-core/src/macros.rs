//! Macro utilitaria para declarar artifacts tipados sin boilerplate.
//!
//! Exportada en la raíz del crate: `use star_core::typed_artifact;`

/// Declara un artifact tipado con derives y `ArtifactSpec`.
///
/// - `typed_artifact!(Name { field: Ty } kind: ArtifactKind::ThinFilm);`
///
/// El struct generado lleva además `schema_version: u32`.
#[macro_export]
macro_rules! typed_artifact {
    ($name:ident { $($fname:ident : $fty:ty),+ $(,)? } kind: $kind:expr) => {
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        pub struct $name { $(pub $fname: $fty,)+ pub schema_version: u32 }
        impl $crate::model::ArtifactSpec for $name {
            const KIND: $crate::model::ArtifactKind = $kind;
        }
    };
}
