use serde::{Deserialize, Serialize};

/// External representation of the core input configuration.
/// Each base piece is expanded into `num_pieces` instances on import.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtConfig {
    pub fabric_width: f64,
    pub fabric_height: f64,
    /// Number of copies each base piece is expanded into
    pub num_pieces: usize,
    pub pieces: Vec<ExtPiece>,
}

/// External representation of a base piece: an outline as parallel
/// coordinate arrays.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPiece {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
}

fn default_allow_rotation() -> bool {
    true
}

/// Garment schema accepted from the pattern-design side.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtGarment {
    pub fabric: ExtFabric,
    pub pieces: Vec<ExtGarmentPiece>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtFabric {
    pub width: f64,
    pub height: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtGarmentPiece {
    pub piece_id: String,
    #[serde(default = "default_qty")]
    pub qty: usize,
    pub outline: ExtOutline,
}

fn default_qty() -> usize {
    1
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtOutline {
    pub points: Vec<(f64, f64)>,
}

/// One placed piece as serialized by the exporter.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedPiece {
    pub piece_id: usize,
    /// Open vertex ring of the placed outline
    pub coordinates: Vec<ExtVertex>,
    pub centroid: ExtVertex,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ExtVertex {
    pub x: f64,
    pub y: f64,
}
