use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    #[arg(short, long, value_name = "FOLDER")]
    pub solution_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "genetic")]
    pub algorithm: Algorithm,
    #[arg(long, value_enum, default_value = "config")]
    pub input_schema: InputSchema,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Algorithm {
    /// Genetic optimizer followed by scanline compaction
    Genetic,
    /// NFP-lite heuristic nester
    Heuristic,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum InputSchema {
    /// Core configuration schema (fabric dimensions, num_pieces, x/y arrays)
    Config,
    /// Garment schema (fabric + pieces with qty and outline points)
    Garment,
}
