use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use log::{LevelFilter, info};
use serde::Serialize;
use svg::Document;

use crate::EPOCH;

pub mod cli;
mod layout_svg;
mod output;

pub use layout_svg::layout_to_svg;
pub use output::{GAOutput, NestOutput};

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()
        .context("could not initialize logger")?;
    info!("epoch: {}", jiff::Zoned::now());
    Ok(())
}

pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create output file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("could not write output file: {}", path.display()))?;
    info!("solution written to {}", path.display());
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)
        .with_context(|| format!("could not write svg file: {}", path.display()))?;
    info!("svg written to {}", path.display());
    Ok(())
}
