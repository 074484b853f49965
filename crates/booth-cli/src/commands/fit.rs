//! Cover-fit geometry command

use crate::FitArgs;
use anyhow::{Context, Result};

pub fn run(args: FitArgs) -> Result<()> {
    let r = booth_ops::fit(
        args.image_width,
        args.image_height,
        args.frame_width,
        args.frame_height,
        args.pan_x,
        args.pan_y,
    )
    .context("Cannot fit")?;

    println!("draw:   {:.3} x {:.3}", r.draw_width, r.draw_height);
    println!("offset: {:.3}, {:.3}", r.draw_offset_x, r.draw_offset_y);
    println!("clip:   {:.3} x {:.3}", r.clip_width, r.clip_height);
    println!("scale:  {:.6}", r.draw_width / args.image_width as f64);
    Ok(())
}
