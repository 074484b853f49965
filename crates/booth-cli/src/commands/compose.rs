//! Print export command

use crate::ComposeArgs;
use anyhow::Result;
use booth_ops::{build_layers, flatten};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: ComposeArgs, verbose: u8) -> Result<()> {
    let paper = super::parse_color(&args.paper)?;
    let job = super::open_session(&args.session)?;
    if let Some(c) = &job.filter.condition {
        super::report(c);
    }

    let composite = build_layers(
        &job.loaded.template,
        &job.loaded.photos,
        job.filter.cube.as_deref(),
        job.session,
    );
    for c in &composite.conditions {
        super::report(c);
    }

    let (width, height) = job.session.canvas;
    let print = flatten(&composite.layers, width, height, paper);
    super::save_image(&args.output, &print)?;

    info!(
        output = %args.output.display(),
        photos = composite.photo_count(),
        conditions = composite.conditions.len(),
        "print written"
    );
    if verbose > 0 {
        println!(
            "Wrote {} ({}x{}, {} photos, filter {})",
            args.output.display(),
            width,
            height,
            composite.photo_count(),
            job.filter_id
        );
    }
    Ok(())
}
