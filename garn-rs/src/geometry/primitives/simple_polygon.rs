use anyhow::Result;
use anyhow::ensure;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Shape, Transformable, TransformableFrom};
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;

/// Geometric primitive representing a simple polygon: <https://en.wikipedia.org/wiki/Simple_polygon>
#[derive(Clone, Debug)]
pub struct SPolygon {
    /// Set of bounds describing the polygon, in counterclockwise order
    pub points: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    pub area: f64,
}

impl SPolygon {
    /// Creates a new simple polygon from an open vertex ring. The vertex
    /// order is normalized to counterclockwise.
    pub fn new(mut points: Vec<Point>) -> Result<Self> {
        ensure!(
            points.len() >= 3,
            "simple polygon must have at least 3 points: {points:?}"
        );

        let area = match SPolygon::calculate_area(&points) {
            area if area == 0.0 => anyhow::bail!("simple polygon has no area: {points:?}"),
            area if area < 0.0 => {
                points.reverse();
                -area
            }
            area => area,
        };

        let bbox = SPolygon::generate_bounding_box(&points);

        Ok(SPolygon { points, bbox, area })
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn generate_bounding_box(points: &[Point]) -> Rect {
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);

        for point in points.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let (x_i, y_i) = points[i].into();
            let (x_j, y_j) = points[j].into();

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon

        let area = self.area;
        let mut c_x = 0.0;
        let mut c_y = 0.0;

        for i in 0..self.vertex_count() {
            let j = (i + 1) % self.vertex_count();
            let Point(x_i, y_i) = self.points[i];
            let Point(x_j, y_j) = self.points[j];
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        c_x /= 6.0 * area;
        c_y /= 6.0 * area;

        (c_x, c_y).into()
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let SPolygon {
            points,
            bbox,
            area: _, //rigid transformations leave the area unchanged
        } = self;

        points.iter_mut().for_each(|p| {
            p.transform(t);
        });

        //regenerate bounding box
        *bbox = SPolygon::generate_bounding_box(points);

        self
    }
}

impl TransformableFrom for SPolygon {
    fn transform_from(&mut self, reference: &Self, t: &Transformation) -> &mut Self {
        let SPolygon {
            points,
            bbox,
            area: _,
        } = self;

        for (p, ref_p) in points.iter_mut().zip(&reference.points) {
            p.transform_from(ref_p, t);
        }

        *bbox = SPolygon::generate_bounding_box(points);

        self
    }
}
