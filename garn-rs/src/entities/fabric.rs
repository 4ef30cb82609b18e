use anyhow::Result;
use anyhow::ensure;

use crate::geometry::GEOM_TOL;
use crate::geometry::primitives::Rect;

/// The rectangular sheet pieces are placed on, with its bottom-left corner at
/// the origin.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Fabric {
    pub width: f64,
    pub height: f64,
}

impl Fabric {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        ensure!(
            width > 0.0 && height > 0.0,
            "fabric dimensions must be positive, got {width} x {height}"
        );
        Ok(Fabric { width, height })
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns true if the bounding box lies fully within the fabric.
    pub fn contains(&self, bbox: &Rect) -> bool {
        bbox.x_min >= -GEOM_TOL
            && bbox.y_min >= -GEOM_TOL
            && bbox.x_max <= self.width + GEOM_TOL
            && bbox.y_max <= self.height + GEOM_TOL
    }
}
