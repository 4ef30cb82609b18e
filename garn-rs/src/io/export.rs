//! Serialization of final placed polygons to CSV and JSON, guarded by a
//! numeric round-trip check: polygons reconstructed from the serialized form
//! must match the in-memory ones in area and centroid before the export is
//! declared successful.

use std::fmt::Write as _;
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, ensure};
use log::info;

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Point, SPolygon};
use crate::io::ext_repr::{ExtPlacedPiece, ExtVertex};

/// Maximum tolerated deviation in area and centroid between an in-memory
/// polygon and its reconstruction from the serialized form.
pub const ROUND_TRIP_TOL: f64 = 1e-6;

/// Builds the external form of a set of placed polygons.
pub fn to_ext_placed(polys: &[SPolygon]) -> Vec<ExtPlacedPiece> {
    polys
        .iter()
        .enumerate()
        .map(|(piece_id, poly)| {
            let Point(c_x, c_y) = poly.centroid();
            ExtPlacedPiece {
                piece_id,
                coordinates: poly
                    .points
                    .iter()
                    .map(|p| ExtVertex { x: p.x(), y: p.y() })
                    .collect(),
                centroid: ExtVertex { x: c_x, y: c_y },
            }
        })
        .collect()
}

/// Verifies that polygons reconstructed from their serialized form match the
/// originals within [`ROUND_TRIP_TOL`].
pub fn round_trip_check(polys: &[SPolygon], exported: &[ExtPlacedPiece]) -> Result<()> {
    ensure!(
        polys.len() == exported.len(),
        "export holds {} pieces, expected {}",
        exported.len(),
        polys.len()
    );
    for (poly, ext) in polys.iter().zip(exported) {
        let points = ext.coordinates.iter().map(|v| Point(v.x, v.y)).collect();
        let rebuilt = SPolygon::new(points)
            .with_context(|| format!("exported piece {} is degenerate", ext.piece_id))?;
        let area_diff = (poly.area() - rebuilt.area()).abs();
        let centroid_diff = poly.centroid().distance(&rebuilt.centroid());
        ensure!(
            area_diff <= ROUND_TRIP_TOL && centroid_diff <= ROUND_TRIP_TOL,
            "export consistency check failed for piece {}: area diff {:.3e}, centroid diff {:.3e}",
            ext.piece_id,
            area_diff,
            centroid_diff
        );
    }
    Ok(())
}

/// Writes the CSV and JSON exports and verifies the JSON by re-reading it
/// from disk. A failed check aborts the export; the in-memory polygons are
/// left untouched.
pub fn export_pieces(
    polys: &[SPolygon],
    csv_path: &Path,
    json_path: &Path,
) -> Result<Vec<ExtPlacedPiece>> {
    let exported = to_ext_placed(polys);

    let mut csv = String::from("piece_id,x,y\n");
    for piece in &exported {
        for vertex in &piece.coordinates {
            writeln!(csv, "{},{},{}", piece.piece_id, vertex.x, vertex.y)
                .expect("writing to a string cannot fail");
        }
    }
    fs::write(csv_path, csv)
        .with_context(|| format!("could not write csv export: {}", csv_path.display()))?;

    let file = File::create(json_path)
        .with_context(|| format!("could not create json export: {}", json_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &exported)
        .with_context(|| format!("could not write json export: {}", json_path.display()))?;

    let file = File::open(json_path)
        .with_context(|| format!("could not re-open json export: {}", json_path.display()))?;
    let reread: Vec<ExtPlacedPiece> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("could not re-parse json export: {}", json_path.display()))?;
    round_trip_check(polys, &reread)?;

    info!(
        "[EXPORT] {} piece(s) written to {} and {}",
        exported.len(),
        csv_path.display(),
        json_path.display()
    );
    Ok(exported)
}
