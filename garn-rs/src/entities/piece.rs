use crate::entities::Placement;
use crate::geometry::primitives::SPolygon;

/// A garment pattern piece: an outline in local coordinates together with
/// the set of rotations every placement strategy may apply to it.
#[derive(Clone, Debug)]
pub struct Piece {
    /// Index of the piece in the expanded piece list
    pub id: usize,
    /// Unique name after expansion, e.g. `FRONT_copy2`
    pub name: String,
    pub shape: SPolygon,
    /// Allowed rotation angles in degrees
    pub rotations: Vec<f64>,
}

impl Piece {
    pub fn new(id: usize, name: String, shape: SPolygon, rotations: Vec<f64>) -> Self {
        assert!(
            !rotations.is_empty(),
            "piece {name} has an empty rotation set"
        );
        Piece {
            id,
            name,
            shape,
            rotations,
        }
    }

    /// Shape of the piece with `placement` applied.
    pub fn place(&self, placement: &Placement) -> SPolygon {
        placement.apply(&self.shape)
    }

    pub fn allows_rotation(&self, degrees: f64) -> bool {
        self.rotations.iter().any(|r| *r == degrees)
    }
}
