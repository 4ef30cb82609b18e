use garn_rs::entities::Fabric;
use garn_rs::geometry::geo_traits::Shape;
use garn_rs::geometry::primitives::{Rect, SPolygon};

/// Candidate translations for an oriented piece: a coarse grid over the
/// fabric with a step of half the piece's larger bounding-box dimension,
/// plus positions snapping each corner of the piece's bounding box onto the
/// vertices of already-placed pieces.
pub(super) fn candidate_offsets(
    bbox: &Rect,
    fabric: &Fabric,
    committed: &[(usize, SPolygon)],
) -> Vec<(f64, f64)> {
    let (width, height) = (bbox.width(), bbox.height());
    let step = f64::max(width, height) / 2.0;

    let mut offsets = Vec::new();

    let mut y = 0.0;
    while y <= fabric.height {
        let mut x = 0.0;
        while x <= fabric.width {
            offsets.push((x - bbox.x_min, y - bbox.y_min));
            x += step;
        }
        y += step;
    }

    for (_, poly) in committed {
        for vertex in &poly.points {
            let (v_x, v_y) = (vertex.x(), vertex.y());
            offsets.push((v_x - bbox.x_min, v_y - bbox.y_min));
            offsets.push((v_x - width - bbox.x_min, v_y - bbox.y_min));
            offsets.push((v_x - bbox.x_min, v_y - height - bbox.y_min));
            offsets.push((v_x - width - bbox.x_min, v_y - height - bbox.y_min));
        }
    }

    offsets
}

/// Scores a valid candidate: an inverse-distance bonus towards the four
/// fabric corners biases pieces outwards, the bounding-box area of all
/// committed polygons together with the candidate penalizes layouts that
/// grow the occupied region.
pub(super) fn score(candidate: &SPolygon, fabric: &Fabric, committed: &[(usize, SPolygon)]) -> f64 {
    let centroid = candidate.centroid();
    let corner_bonus: f64 = fabric
        .rect()
        .corners()
        .iter()
        .map(|corner| 1.0 / (1.0 + corner.distance(&centroid)))
        .sum();

    let combined = committed
        .iter()
        .fold(candidate.bbox, |acc, (_, poly)| {
            Rect::bounding_rect(acc, poly.bbox)
        });

    corner_bonus - combined.area()
}
