// film.rs
use serde::{Deserialize, Serialize};

use crate::{PureSubstance, RectangleCuboid};

/// Material por defecto de un sustrato (soda-lime glass).
pub const DEFAULT_SUBSTRATE_MATERIAL: &str = "SLG";

/// Capa depositada.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThinFilm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lab_id: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub components: Vec<PureSubstance>,
    /// Espesor (m); se refleja en `geometry.height`.
    #[serde(default)]
    pub thickness: Option<f64>,
    #[serde(default)]
    pub geometry: Option<RectangleCuboid>,
}

impl ThinFilm {
    /// Geometría por defecto, altura = espesor y material desde el primer
    /// componente si no está declarado.
    pub fn normalize(&mut self) {
        let geometry = self.geometry.get_or_insert_with(RectangleCuboid::default);
        if let Some(thickness) = self.thickness {
            geometry.height = Some(thickness);
        }
        if self.material.is_none() {
            self.material = self.components.first().map(|c| c.name.clone());
        }
    }
}

/// Portador sobre el que crecen las películas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substrate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lab_id: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub geometry: Option<RectangleCuboid>,
}

impl Default for Substrate {
    fn default() -> Self {
        Substrate { name: None,
                    lab_id: None,
                    material: Some(DEFAULT_SUBSTRATE_MATERIAL.to_string()),
                    geometry: None }
    }
}

impl Substrate {
    pub fn normalize(&mut self) {
        if self.geometry.is_none() {
            self.geometry = Some(RectangleCuboid::default_substrate());
        }
        if self.material.is_none() {
            self.material = Some(DEFAULT_SUBSTRATE_MATERIAL.to_string());
        }
    }
}
