use garn_rs::entities::{Fabric, Individual, Piece};
use garn_rs::geometry::boolean::overlaps;
use garn_rs::geometry::geo_traits::CollidesWith;
use garn_rs::geometry::primitives::{Rect, SPolygon};
use log::debug;

/// Repairs an individual in piece order: out-of-bounds placements are
/// translated by the minimal amount that fits them into the fabric (rotation
/// is preserved), then each candidate is tested against the polygons already
/// accepted in this pass and its gene is unset on collision.
///
/// Returns the number of genes that were unset.
pub fn repair(individual: &mut Individual, pieces: &[Piece], fabric: &Fabric) -> usize {
    let mut accepted: Vec<SPolygon> = Vec::new();
    let mut dropped = 0;

    for (id, gene) in individual.genes.iter_mut().enumerate() {
        let Some(placement) = gene.as_mut() else {
            continue;
        };

        let mut poly = pieces[id].place(placement);
        if !fabric.contains(&poly.bbox) {
            let (dx, dy) = clamp_shift(&poly.bbox, fabric);
            if dx != 0.0 || dy != 0.0 {
                placement.x += dx;
                placement.y += dy;
                poly = pieces[id].place(placement);
            }
        }

        let collides = accepted
            .iter()
            .any(|other| other.bbox.collides_with(&poly.bbox) && overlaps(other, &poly));
        match collides {
            true => {
                *gene = None;
                dropped += 1;
            }
            false => accepted.push(poly),
        }
    }

    if dropped > 0 {
        debug!("[REPAIR] dropped {dropped} unresolvable piece(s)");
    }
    dropped
}

/// Minimal translation that brings `bbox` inside the fabric. A box larger
/// than the fabric in a dimension is pinned to the low edge, which keeps
/// repeated repair a no-op.
fn clamp_shift(bbox: &Rect, fabric: &Fabric) -> (f64, f64) {
    let dx = if bbox.width() > fabric.width || bbox.x_min < 0.0 {
        -bbox.x_min
    } else if bbox.x_max > fabric.width {
        fabric.width - bbox.x_max
    } else {
        0.0
    };
    let dy = if bbox.height() > fabric.height || bbox.y_min < 0.0 {
        -bbox.y_min
    } else if bbox.y_max > fabric.height {
        fabric.height - bbox.y_max
    } else {
        0.0
    };
    (dx, dy)
}
