//! Exact-area boolean operations on simple polygons, backed by the `geo`
//! crate. Overlap is defined as an intersection with positive area: shapes
//! that merely share an edge or a vertex do not overlap.

use geo::{Area, BooleanOps};
use geo_types::{LineString, MultiPolygon, Polygon};

use crate::geometry::GEOM_TOL;
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::SPolygon;

/// Converts a polygon into its `geo` representation.
pub fn to_geo(sp: &SPolygon) -> Polygon {
    let exterior: Vec<(f64, f64)> = sp.points.iter().map(|p| (p.x(), p.y())).collect();
    Polygon::new(LineString::from(exterior), vec![])
}

/// Area of the intersection of two polygons.
pub fn intersection_area(a: &SPolygon, b: &SPolygon) -> f64 {
    if !a.bbox.collides_with(&b.bbox) {
        return 0.0;
    }
    to_geo(a).intersection(&to_geo(b)).unsigned_area()
}

/// Positive-area overlap test.
pub fn overlaps(a: &SPolygon, b: &SPolygon) -> bool {
    intersection_area(a, b) > GEOM_TOL
}

/// Area of the union of a set of polygons.
pub fn union_area(polys: &[SPolygon]) -> f64 {
    let mut iter = polys.iter();
    let Some(first) = iter.next() else {
        return 0.0;
    };
    let mut acc = MultiPolygon::new(vec![to_geo(first)]);
    for p in iter {
        acc = acc.union(&MultiPolygon::new(vec![to_geo(p)]));
    }
    acc.unsigned_area()
}
