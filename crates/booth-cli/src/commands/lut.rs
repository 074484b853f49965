//! Filter application command

use crate::LutArgs;
use anyhow::{Context, Result};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: LutArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), lut = %args.lut.display(), "lut::run");
    let mut image = super::load_image(&args.input)?;
    let cube = booth_lut::read_cube(&args.lut)
        .with_context(|| format!("Failed to load filter: {}", args.lut.display()))?;

    if verbose > 0 {
        println!("Applying {} to {}", args.lut.display(), args.input.display());
    }

    booth_lut::apply_in_place(&mut image, &cube)
        .with_context(|| format!("Cannot apply {}", args.lut.display()))?;
    super::save_image(&args.output, &image)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
