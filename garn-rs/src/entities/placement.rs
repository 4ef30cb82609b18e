use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Shape, Transformable};
use crate::geometry::primitives::{Point, SPolygon};

/// Position and orientation of a piece on the fabric: a rotation about the
/// shape's own centroid followed by a translation.
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    /// The rotation in degrees
    pub rotation: f64,
}

impl Placement {
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Placement { x, y, rotation }
    }

    /// Composes the transformation for a shape with the given centroid.
    pub fn compose(&self, centroid: Point) -> Transformation {
        Transformation::from_translation((-centroid.x(), -centroid.y()))
            .rotate(self.rotation.to_radians())
            .translate((centroid.x() + self.x, centroid.y() + self.y))
    }

    /// Shape with this placement applied.
    pub fn apply(&self, shape: &SPolygon) -> SPolygon {
        shape.transform_clone(&self.compose(shape.centroid()))
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r: {:.1}°, t: ({:.3}, {:.3})",
            self.rotation, self.x, self.y
        )
    }
}
