use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::info;

use crate::entities::{Fabric, Instance, Piece};
use crate::geometry::primitives::{Point, SPolygon};
use crate::io::ext_repr::{ExtConfig, ExtGarment, ExtPiece};

/// Rotation set assigned to pieces that allow rotation.
pub const FULL_ROTATION_SET: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// Validates an external configuration and expands it into an [`Instance`].
///
/// Fails fast on malformed input (mismatched coordinate arrays, degenerate
/// outlines, invalid fabric dimensions) before any optimization starts.
/// Each base piece is replicated `num_pieces` times, suffix-named
/// `<name>_copy<k>`, preserving insertion order.
pub fn import(ext: &ExtConfig) -> Result<Instance> {
    let fabric = Fabric::new(ext.fabric_width, ext.fabric_height)?;
    ensure!(
        ext.num_pieces >= 1,
        "num_pieces must be at least 1, got {}",
        ext.num_pieces
    );
    ensure!(!ext.pieces.is_empty(), "configuration contains no pieces");
    for ext_piece in &ext.pieces {
        ensure!(
            ext_piece.x.len() == ext_piece.y.len(),
            "x/y length mismatch in piece {}: {} vs {}",
            ext_piece.name,
            ext_piece.x.len(),
            ext_piece.y.len()
        );
        ensure!(
            ext_piece.x.len() >= 3,
            "piece {} needs at least 3 outline vertices, got {}",
            ext_piece.name,
            ext_piece.x.len()
        );
    }

    let mut pieces = Vec::with_capacity(ext.pieces.len() * ext.num_pieces);
    for ext_piece in &ext.pieces {
        let points = ext_piece
            .x
            .iter()
            .zip(&ext_piece.y)
            .map(|(&x, &y)| Point(x, y))
            .collect_vec();
        let shape = SPolygon::new(points)
            .with_context(|| format!("invalid outline for piece {}", ext_piece.name))?;
        let rotations = match ext_piece.allow_rotation {
            true => FULL_ROTATION_SET.to_vec(),
            false => vec![0.0],
        };
        for k in 1..=ext.num_pieces {
            let id = pieces.len();
            let name = format!("{}_copy{}", ext_piece.name, k);
            pieces.push(Piece::new(id, name, shape.clone(), rotations.clone()));
        }
    }
    info!(
        "[IMPORT] expanded {} base piece(s) into {} instance(s)",
        ext.pieces.len(),
        pieces.len()
    );

    Ok(Instance { pieces, fabric })
}

/// Converts the garment schema into the core configuration schema.
///
/// Quantities are expanded here, so `num_pieces` in the result is fixed to 1.
/// Pieces with `qty > 1` are suffix-named `<piece_id>_<k>`.
pub fn garment_to_config(garment: &ExtGarment) -> Result<ExtConfig> {
    let mut pieces = Vec::new();
    for piece in &garment.pieces {
        ensure!(
            !piece.outline.points.is_empty(),
            "missing outline points for piece {}",
            piece.piece_id
        );
        ensure!(
            piece.qty >= 1,
            "piece {} has qty {}, expected at least 1",
            piece.piece_id,
            piece.qty
        );
        let (x, y): (Vec<f64>, Vec<f64>) = piece.outline.points.iter().copied().unzip();
        for k in 1..=piece.qty {
            let name = match piece.qty {
                1 => piece.piece_id.clone(),
                _ => format!("{}_{}", piece.piece_id, k),
            };
            pieces.push(ExtPiece {
                name,
                x: x.clone(),
                y: y.clone(),
                allow_rotation: true,
            });
        }
    }
    Ok(ExtConfig {
        fabric_width: garment.fabric.width,
        fabric_height: garment.fabric.height,
        num_pieces: 1,
        pieces,
    })
}

pub fn read_config(path: &Path) -> Result<ExtConfig> {
    let file = File::open(path)
        .with_context(|| format!("could not open configuration file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("could not parse configuration file: {}", path.display()))
}

pub fn read_garment(path: &Path) -> Result<ExtGarment> {
    let file = File::open(path)
        .with_context(|| format!("could not open garment file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("could not parse garment file: {}", path.display()))
}

/// Persists a configuration so the core can pick it up as its input artifact.
pub fn write_config(config: &ExtConfig, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create configuration file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), config)
        .with_context(|| format!("could not write configuration file: {}", path.display()))?;
    info!("[IMPORT] configuration written to {}", path.display());
    Ok(())
}
