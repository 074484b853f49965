//! Identity cube command

use crate::IdentityArgs;
use anyhow::{bail, Context, Result};
use booth_lut::{cube::MAX_SIZE, ColorCube};

pub fn run(args: IdentityArgs) -> Result<()> {
    if !(2..=MAX_SIZE).contains(&args.size) {
        bail!("Size must be between 2 and {}, got {}", MAX_SIZE, args.size);
    }
    let cube = ColorCube::identity(args.size).with_title(format!("Identity {}", args.size));
    booth_lut::write_cube(&args.output, &cube)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;
    println!("Wrote {} ({} entries)", args.output.display(), cube.entries().len());
    Ok(())
}
