// geometry.rs
use serde::{Deserialize, Serialize};

/// Altura por defecto de un sustrato (1 mm).
pub const DEFAULT_SUBSTRATE_HEIGHT: f64 = 1.0e-3;
/// Ancho y largo por defecto de un sustrato (2.5 cm).
pub const DEFAULT_SUBSTRATE_SIDE: f64 = 2.5e-2;

/// Prisma rectangular. Todas las medidas en metros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectangleCuboid {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,
}

impl RectangleCuboid {
    /// Geometría por defecto de un sustrato sin medidas declaradas.
    pub fn default_substrate() -> Self {
        RectangleCuboid { height: Some(DEFAULT_SUBSTRATE_HEIGHT),
                          width: Some(DEFAULT_SUBSTRATE_SIDE),
                          length: Some(DEFAULT_SUBSTRATE_SIDE) }
    }

    /// Copia ancho y largo (la huella) desde `other`. Devuelve `true` si
    /// alguno de los dos cambió.
    pub fn adopt_footprint(&mut self, other: &RectangleCuboid) -> bool {
        let changed = self.width != other.width || self.length != other.length;
        self.width = other.width;
        self.length = other.length;
        changed
    }
}
