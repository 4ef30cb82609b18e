//! Deterministic sweep placers used to seed the genetic optimizer.
//!
//! Both variants lay pieces into lanes: the vertical packer fills columns
//! along the fabric width, the horizontal packer fills rows along the fabric
//! height. The vertical variant pre-rotates every piece by 90° where its
//! rotation set allows it, the horizontal variant never rotates; the two
//! seeds therefore start from different orientations on purpose.

use garn_rs::entities::{Fabric, Individual, Piece, Placement};
use garn_rs::geometry::GEOM_TOL;
use garn_rs::geometry::boolean::union_area;
use garn_rs::geometry::primitives::{Rect, SPolygon};
use ordered_float::NotNan;
use std::cmp::Reverse;

/// Sweep axis of a seed packer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SweepAxis {
    Vertical,
    Horizontal,
}

/// Packs pieces into columns, sweeping along the fabric width.
/// Returns `None` if the sweep overflows: heuristic infeasibility, not a
/// proof that no layout exists.
pub fn pack_vertical(pieces: &[Piece], fabric: &Fabric, margin: f64) -> Option<Individual> {
    sweep_pack(pieces, fabric, margin, SweepAxis::Vertical)
}

/// Packs pieces into rows, sweeping along the fabric height.
pub fn pack_horizontal(pieces: &[Piece], fabric: &Fabric, margin: f64) -> Option<Individual> {
    sweep_pack(pieces, fabric, margin, SweepAxis::Horizontal)
}

fn sweep_pack(
    pieces: &[Piece],
    fabric: &Fabric,
    margin: f64,
    axis: SweepAxis,
) -> Option<Individual> {
    //pre-rotate canonically and cache the rotated bounding boxes
    let oriented: Vec<(Rect, f64)> = pieces
        .iter()
        .map(|piece| {
            let rotation = match axis {
                SweepAxis::Vertical if piece.allows_rotation(90.0) => 90.0,
                _ => 0.0,
            };
            let bbox = Placement::new(0.0, 0.0, rotation).apply(&piece.shape).bbox;
            (bbox, rotation)
        })
        .collect();

    //largest pieces along the stacking direction go first
    let mut order: Vec<usize> = (0..pieces.len()).collect();
    order.sort_by_key(|&i| {
        let bbox = &oriented[i].0;
        let depth = match axis {
            SweepAxis::Vertical => bbox.height(),
            SweepAxis::Horizontal => bbox.width(),
        };
        Reverse(NotNan::new(depth).expect("piece dimension is NaN"))
    });

    let (main_limit, cross_limit) = match axis {
        SweepAxis::Vertical => (fabric.width, fabric.height),
        SweepAxis::Horizontal => (fabric.height, fabric.width),
    };

    let mut main_cursor = 0.0;
    let mut cross_cursor = 0.0;
    let mut lane_depth = 0.0_f64;
    let mut genes = vec![None; pieces.len()];

    for &i in &order {
        let (bbox, rotation) = &oriented[i];
        let (main_dim, cross_dim) = match axis {
            SweepAxis::Vertical => (bbox.width(), bbox.height()),
            SweepAxis::Horizontal => (bbox.height(), bbox.width()),
        };

        //a piece deeper than the cross axis can never fit a lane
        if cross_dim > cross_limit + GEOM_TOL {
            return None;
        }
        if cross_cursor + cross_dim > cross_limit + GEOM_TOL {
            main_cursor += lane_depth + margin;
            cross_cursor = 0.0;
            lane_depth = 0.0;
        }
        if main_cursor + main_dim > main_limit + GEOM_TOL {
            return None;
        }

        let (x, y) = match axis {
            SweepAxis::Vertical => (main_cursor - bbox.x_min, cross_cursor - bbox.y_min),
            SweepAxis::Horizontal => (cross_cursor - bbox.x_min, main_cursor - bbox.y_min),
        };
        genes[i] = Some(Placement::new(x, y, *rotation));

        cross_cursor += cross_dim + margin;
        lane_depth = lane_depth.max(main_dim);
    }

    Some(Individual { genes })
}

/// Runs both sweep packers and keeps the one covering the larger true union
/// area of placed polygons. Ties favor the vertical packer.
pub fn best_axis_pack(pieces: &[Piece], fabric: &Fabric, margin: f64) -> Option<Individual> {
    let vertical = pack_vertical(pieces, fabric, margin);
    let horizontal = pack_horizontal(pieces, fabric, margin);

    let placed_area = |individual: &Individual| {
        let polys: Vec<SPolygon> = individual
            .placed_polygons(pieces)
            .into_iter()
            .map(|(_, poly)| poly)
            .collect();
        union_area(&polys)
    };

    match (vertical, horizontal) {
        //areas within tolerance count as a tie, and ties go to the vertical packer
        (Some(v), Some(h)) => match placed_area(&v) >= placed_area(&h) - GEOM_TOL {
            true => Some(v),
            false => Some(h),
        },
        (v @ Some(_), None) => v,
        (None, h) => h,
    }
}
