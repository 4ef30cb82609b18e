//! Deterministic multi-strategy compaction of a placed polygon set.
//!
//! Every combination of piece ordering and sweep direction runs a scanline
//! placer; the strategy yielding the smallest bounding box over its placed
//! pieces wins. Pieces that overflow a strategy's sweep are dropped from
//! that strategy only (a partial result, not a failure).

use garn_rs::entities::Fabric;
use garn_rs::geometry::Transformation;
use garn_rs::geometry::geo_traits::Transformable;
use garn_rs::geometry::primitives::{Rect, SPolygon};
use itertools::Itertools;
use log::info;
use ordered_float::NotNan;
use std::cmp::Reverse;

/// Sweep direction of the scanline placer: `Horizontal` fills rows along the
/// fabric width, `Vertical` fills columns along the fabric height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ordering {
    Original,
    AreaDesc,
    WidthDesc,
    HeightDesc,
}

impl Ordering {
    fn label(&self) -> &'static str {
        match self {
            Ordering::Original => "original",
            Ordering::AreaDesc => "area_desc",
            Ordering::WidthDesc => "width_desc",
            Ordering::HeightDesc => "height_desc",
        }
    }
}

const ORDERINGS: [Ordering; 4] = [
    Ordering::Original,
    Ordering::AreaDesc,
    Ordering::WidthDesc,
    Ordering::HeightDesc,
];
const DIRECTIONS: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

/// Outcome of the multi-strategy compaction pass.
#[derive(Clone, Debug)]
pub struct CompactionResult {
    /// Polygons re-placed by the winning strategy
    pub polygons: Vec<SPolygon>,
    /// Label of the winning strategy, e.g. `area_desc-horizontal`
    pub strategy: String,
    /// Bounding-box area over the winning strategy's placed pieces
    pub bbox_area: f64,
    /// Pieces the winning strategy could not fit
    pub dropped: usize,
    /// (label, bounding-box area) of every evaluated strategy
    pub evaluated: Vec<(String, f64)>,
}

/// Runs all ordering × direction strategies and keeps the smallest bounding
/// box. Ties resolve to the first strategy in enumeration order.
pub fn multi_strategy_compact(polys: &[SPolygon], fabric: &Fabric, margin: f64) -> CompactionResult {
    let mut evaluated = Vec::with_capacity(ORDERINGS.len() * DIRECTIONS.len());
    let mut best: Option<(Vec<SPolygon>, String, f64)> = None;

    for ordering in ORDERINGS {
        let ordered = order_polys(polys, ordering);
        for direction in DIRECTIONS {
            let packed = scanline_pack(&ordered, fabric, margin, direction);
            let area = layout_bbox_area(&packed);
            let label = format!(
                "{}-{}",
                ordering.label(),
                match direction {
                    Direction::Horizontal => "horizontal",
                    Direction::Vertical => "vertical",
                }
            );
            evaluated.push((label.clone(), area));
            if best.as_ref().is_none_or(|(_, _, best_area)| area < *best_area) {
                best = Some((packed, label, area));
            }
        }
    }

    let (polygons, strategy, bbox_area) = best.expect("at least one strategy was evaluated");
    let dropped = polys.len() - polygons.len();
    info!(
        "[COMPACT] winner {} with bbox area {:.1}, {} piece(s) dropped",
        strategy, bbox_area, dropped
    );

    CompactionResult {
        polygons,
        strategy,
        bbox_area,
        dropped,
        evaluated,
    }
}

fn order_polys(polys: &[SPolygon], ordering: Ordering) -> Vec<&SPolygon> {
    let key = |p: &&SPolygon| -> f64 {
        match ordering {
            Ordering::Original => 0.0,
            Ordering::AreaDesc => p.area,
            Ordering::WidthDesc => p.bbox.width(),
            Ordering::HeightDesc => p.bbox.height(),
        }
    };
    match ordering {
        Ordering::Original => polys.iter().collect(),
        _ => polys
            .iter()
            .sorted_by_key(|p| Reverse(NotNan::new(key(p)).expect("polygon dimension is NaN")))
            .collect(),
    }
}

/// Scanline placer: pieces advance along the secondary axis, wrapping to a
/// new row/column (advancing the primary axis by the max extent seen plus
/// the margin) when the secondary axis would overflow. Primary-axis overflow
/// drops all remaining pieces.
fn scanline_pack(
    polys: &[&SPolygon],
    fabric: &Fabric,
    margin: f64,
    direction: Direction,
) -> Vec<SPolygon> {
    let (main_limit, cross_limit) = match direction {
        Direction::Horizontal => (fabric.height, fabric.width),
        Direction::Vertical => (fabric.width, fabric.height),
    };

    let mut packed = Vec::with_capacity(polys.len());
    let mut main_cursor = margin;
    let mut cross_cursor = margin;
    let mut lane_depth = 0.0_f64;

    for poly in polys {
        let bbox = poly.bbox;
        let (main_dim, cross_dim) = match direction {
            Direction::Horizontal => (bbox.height(), bbox.width()),
            Direction::Vertical => (bbox.width(), bbox.height()),
        };

        if cross_cursor + cross_dim + margin > cross_limit {
            cross_cursor = margin;
            main_cursor += lane_depth + margin;
            lane_depth = 0.0;
        }
        if main_cursor + main_dim + margin > main_limit {
            break;
        }

        let (x, y) = match direction {
            Direction::Horizontal => (cross_cursor, main_cursor),
            Direction::Vertical => (main_cursor, cross_cursor),
        };
        let translation =
            Transformation::from_translation((x - bbox.x_min, y - bbox.y_min));
        packed.push(poly.transform_clone(&translation));

        cross_cursor += cross_dim + margin;
        lane_depth = lane_depth.max(main_dim);
    }

    packed
}

fn layout_bbox_area(polys: &[SPolygon]) -> f64 {
    let mut iter = polys.iter();
    let Some(first) = iter.next() else {
        return f64::INFINITY;
    };
    iter.fold(first.bbox, |acc, p| Rect::bounding_rect(acc, p.bbox))
        .area()
}
