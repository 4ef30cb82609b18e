use crate::entities::{Fabric, Piece};
use crate::geometry::geo_traits::Shape;

/// An expanded piece list together with the fabric to nest it on.
#[derive(Clone, Debug)]
pub struct Instance {
    pub pieces: Vec<Piece>,
    pub fabric: Fabric,
}

impl Instance {
    pub fn total_piece_area(&self) -> f64 {
        self.pieces.iter().map(|p| p.shape.area()).sum()
    }
}
