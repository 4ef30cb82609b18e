use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use gapack::config::{GAConfig, NestConfig};
use gapack::io::cli::{Algorithm, Cli, InputSchema};
use gapack::io::{self, GAOutput, NestOutput, layout_to_svg};
use gapack::nest::HeuristicNester;
use gapack::opt::compact::multi_strategy_compact;
use gapack::opt::evolve::Evolver;
use garn_rs::entities::Instance;
use garn_rs::geometry::primitives::SPolygon;
use garn_rs::io::{export, import};
use log::{info, warn};
use rand::SeedableRng;
use rand::prelude::SmallRng;
use serde::de::DeserializeOwned;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }
    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context("input file has no usable name")?
        .to_owned();

    let ext_config = match args.input_schema {
        InputSchema::Config => import::read_config(&args.input_file)?,
        InputSchema::Garment => {
            let garment = import::read_garment(&args.input_file)?;
            let converted = import::garment_to_config(&garment)?;
            //persist the converted schema as the configuration artifact of this run
            let artifact = args.solution_folder.join(format!("config_{input_stem}.json"));
            import::write_config(&converted, &artifact)?;
            converted
        }
    };
    let instance = import::import(&ext_config)?;
    info!(
        "[MAIN] {} piece(s) on a {:.1} x {:.1} fabric",
        instance.pieces.len(),
        instance.fabric.width,
        instance.fabric.height
    );

    match args.algorithm {
        Algorithm::Genetic => main_genetic(
            instance,
            args.config_file.as_deref(),
            &input_stem,
            args.solution_folder,
        ),
        Algorithm::Heuristic => main_heuristic(
            instance,
            args.config_file.as_deref(),
            &input_stem,
            args.solution_folder,
        ),
    }
}

fn main_genetic(
    instance: Instance,
    config_file: Option<&Path>,
    input_stem: &str,
    output_folder: PathBuf,
) -> Result<()> {
    let config: GAConfig = read_config_or_default(config_file)?;
    info!("[MAIN] running genetic pipeline with {config:?}");

    let rng = match config.prng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut evolver = Evolver::new(instance.clone(), config, rng);
    let report = evolver.solve();
    if !report.succeeded() {
        warn!("[MAIN] optimization failed: no piece could be placed");
    }

    let polys: Vec<SPolygon> = report
        .best
        .placed_polygons(&instance.pieces)
        .into_iter()
        .map(|(_, poly)| poly)
        .collect();
    let compacted = multi_strategy_compact(&polys, &instance.fabric, config.compact_margin);
    info!(
        "[MAIN] utilization {:.1}% of fabric area",
        report.best_fitness.used_area / instance.fabric.area() * 100.0
    );

    let csv_path = output_folder.join(format!("pieces_{input_stem}.csv"));
    let json_path = output_folder.join(format!("pieces_{input_stem}.json"));
    let pieces = export::export_pieces(&compacted.polygons, &csv_path, &json_path)?;

    let output = GAOutput {
        config,
        placements: report.best.genes.clone(),
        piece_names: instance.pieces.iter().map(|p| p.name.clone()).collect(),
        fitness: report.best_fitness.score,
        used_area: report.best_fitness.used_area,
        placed: report.best.placed_count(),
        expected: instance.pieces.len(),
        history: report.history,
        compaction_strategy: compacted.strategy.clone(),
        compacted_bbox_area: compacted.bbox_area,
        pieces,
    };
    io::write_json(&output, &output_folder.join(format!("sol_{input_stem}.json")))?;

    let svg = layout_to_svg(&compacted.polygons, &instance.fabric);
    io::write_svg(&svg, &output_folder.join(format!("sol_{input_stem}.svg")))?;

    Ok(())
}

fn main_heuristic(
    instance: Instance,
    config_file: Option<&Path>,
    input_stem: &str,
    output_folder: PathBuf,
) -> Result<()> {
    let config: NestConfig = read_config_or_default(config_file)?;
    info!("[MAIN] running heuristic nester with {config:?}");

    let mut nester = HeuristicNester::new(&instance.pieces, instance.fabric, config);
    let result = nester.solve();
    if result.placed.is_empty() {
        warn!("[MAIN] nesting failed: no piece could be placed");
    }

    let polys: Vec<SPolygon> = result.placed.iter().map(|(_, poly)| poly.clone()).collect();

    let csv_path = output_folder.join(format!("pieces_{input_stem}.csv"));
    let json_path = output_folder.join(format!("pieces_{input_stem}.json"));
    let pieces = export::export_pieces(&polys, &csv_path, &json_path)?;

    let output = NestOutput {
        config,
        placements: result.individual.genes.clone(),
        piece_names: instance.pieces.iter().map(|p| p.name.clone()).collect(),
        placed: result.placed.len(),
        expected: instance.pieces.len(),
        failed: result.failed,
        pieces,
    };
    io::write_json(&output, &output_folder.join(format!("sol_{input_stem}.json")))?;

    let svg = layout_to_svg(&polys, &instance.fabric);
    io::write_svg(&svg, &output_folder.join(format!("sol_{input_stem}.svg")))?;

    Ok(())
}

fn read_config_or_default<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        None => {
            warn!("[MAIN] no config file provided, use --config-file to provide a custom config");
            Ok(T::default())
        }
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("could not open config file: {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file)).context("incorrect config file format")
        }
    }
}
