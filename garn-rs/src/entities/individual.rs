use crate::entities::{Piece, Placement};
use crate::geometry::primitives::SPolygon;

/// One candidate layout: an optional placement per piece, index-aligned with
/// the expanded piece list. Repair unsets genes instead of shortening the
/// sequence, so crossover between any two individuals of the same instance
/// stays well-defined.
#[derive(Clone, Debug, PartialEq)]
pub struct Individual {
    pub genes: Vec<Option<Placement>>,
}

impl Individual {
    /// An individual with every gene unset.
    pub fn unplaced(n_pieces: usize) -> Self {
        Individual {
            genes: vec![None; n_pieces],
        }
    }

    pub fn placed_count(&self) -> usize {
        self.genes.iter().filter(|g| g.is_some()).count()
    }

    /// Transformed polygons of all set genes, paired with their piece ids.
    pub fn placed_polygons(&self, pieces: &[Piece]) -> Vec<(usize, SPolygon)> {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(id, gene)| gene.map(|p| (id, pieces[id].place(&p))))
            .collect()
    }
}
