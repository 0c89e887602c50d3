// stack.rs
use serde::{Deserialize, Serialize};
use star_core::ArtifactRef;

/// Una muestra física: capas ordenadas sobre un sustrato.
///
/// `components` es siempre `[substrate] + layers` y sólo se obtiene vía
/// `recompute_components`; nunca se edita a mano.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lab_id: Option<String>,
    #[serde(default)]
    pub substrate: Option<ArtifactRef>,
    /// Nombre visible del sustrato referenciado.
    #[serde(default)]
    pub substrate_name: Option<String>,
    #[serde(default)]
    pub layers: Vec<ArtifactRef>,
    #[serde(default)]
    pub components: Vec<ArtifactRef>,
}

impl Stack {
    pub fn on(substrate: ArtifactRef) -> Self {
        let mut stack = Stack { substrate: Some(substrate),
                                ..Default::default() };
        stack.recompute_components();
        stack
    }

    /// Agrega una capa al tope y recalcula `components`.
    pub fn push_layer(&mut self, layer: ArtifactRef) {
        self.layers.push(layer);
        self.recompute_components();
    }

    /// Recalcula `components` desde cero. Idempotente.
    pub fn recompute_components(&mut self) {
        self.components = self.substrate.iter().chain(self.layers.iter()).cloned().collect();
    }

    pub fn components_consistent(&self) -> bool {
        self.components.len() == self.substrate.iter().count() + self.layers.len()
        && self.substrate.iter().chain(self.layers.iter()).eq(self.components.iter())
    }
}
