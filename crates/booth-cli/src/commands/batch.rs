//! Batch filtering command

use crate::BatchArgs;
use anyhow::{bail, Context, Result};
use booth_lut::ColorCube;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: BatchArgs, verbose: u8) -> Result<()> {
    trace!(pattern = %args.input, lut = %args.lut.display(), "batch::run");

    // Find matching files
    let files: Vec<PathBuf> = glob::glob(&args.input)
        .with_context(|| format!("Invalid pattern: {}", args.input))?
        .filter_map(|r| r.ok())
        .collect();

    if files.is_empty() {
        bail!("No files match pattern: {}", args.input);
    }

    let cube = booth_lut::read_cube(&args.lut)
        .with_context(|| format!("Failed to load filter: {}", args.lut.display()))?;
    cube.ensure_usable()
        .with_context(|| format!("Cannot use filter: {}", args.lut.display()))?;

    info!(files = files.len(), pattern = %args.input, "Starting batch processing");
    if verbose > 0 {
        println!("Found {} files matching '{}'", files.len(), args.input);
    }

    std::fs::create_dir_all(&args.output_dir)?;

    // Process files in parallel
    let results: Vec<Result<()>> = files
        .par_iter()
        .map(|input| process_file(input, &args.output_dir, &cube, args.format.as_deref(), verbose))
        .collect();

    let mut success = 0;
    let mut failed = 0;
    for (input, r) in files.iter().zip(results) {
        match r {
            Ok(()) => success += 1,
            Err(e) => {
                failed += 1;
                eprintln!("Error: {}: {:#}", input.display(), e);
            }
        }
    }

    info!(success, failed, "Batch processing complete");
    println!("Processed: {} success, {} failed", success, failed);

    if failed > 0 {
        bail!("{} files failed", failed);
    }
    Ok(())
}

/// Output path inside `output_dir`, keeping the stem and swapping the
/// extension when `format` is given.
fn output_path(input: &Path, output_dir: &Path, format: Option<&str>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let ext = format.unwrap_or_else(|| input.extension().and_then(|s| s.to_str()).unwrap_or("png"));
    output_dir.join(format!("{}.{}", stem, ext.trim_start_matches('.')))
}

fn process_file(input: &Path, output_dir: &Path, cube: &ColorCube, format: Option<&str>, verbose: u8) -> Result<()> {
    let output = output_path(input, output_dir, format);
    if verbose > 0 {
        println!("Processing {} -> {}", input.display(), output.display());
    }

    let mut image = super::load_image(input)?;
    // Files already run in parallel; keep each one on its worker
    booth_lut::apply_in_place_sequential(&mut image, cube)?;
    super::save_image(&output, &image)
}
