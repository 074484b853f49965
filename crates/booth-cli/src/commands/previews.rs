//! Filter thumbnail command

use crate::PreviewsArgs;
use anyhow::{bail, Context, Result};
use booth_core::RasterImage;
use booth_ops::{flatten, previews, DrawLayer, LayerKind};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: PreviewsArgs, verbose: u8) -> Result<()> {
    if args.size == 0 {
        bail!("--size must be positive");
    }
    let file = booth_io::SessionFile::read(&args.session)
        .with_context(|| format!("Failed to load session: {}", args.session.display()))?;
    let base_dir = args.session.parent().map(|p| p.to_path_buf()).unwrap_or_default();
    let catalog = file.catalog(&base_dir);

    let sample = thumbnail(&super::load_image(&args.sample)?, args.size);
    std::fs::create_dir_all(&args.output_dir)?;

    for preview in previews(&sample, &catalog, booth_io::load_cube) {
        let out = args.output_dir.join(format!("{}.png", preview.id));
        super::save_image(&out, &preview.image)?;
        if verbose > 0 {
            println!("{:<16} {}", preview.name, out.display());
        }
    }
    info!(filters = catalog.len(), dir = %args.output_dir.display(), "previews written");
    Ok(())
}

/// Nearest-neighbour downscale so the longest side is at most `max_side`.
fn thumbnail(image: &RasterImage, max_side: u32) -> RasterImage {
    let (w, h) = image.dimensions();
    let longest = w.max(h);
    if longest <= max_side || longest == 0 {
        return image.clone();
    }
    let factor = max_side as f64 / longest as f64;
    let tw = ((w as f64 * factor).round() as u32).max(1);
    let th = ((h as f64 * factor).round() as u32).max(1);
    let layer = DrawLayer {
        kind: LayerKind::Background,
        image: image.clone(),
        x: 0.0,
        y: 0.0,
        width: tw as f64,
        height: th as f64,
        offset_x: 0.0,
        offset_y: 0.0,
        clip_width: tw as f64,
        clip_height: th as f64,
    };
    flatten(&[layer], tw, th, [0, 0, 0, 0])
}
