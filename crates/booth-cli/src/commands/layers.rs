//! Layer listing command

use crate::LayersArgs;
use anyhow::Result;
use booth_ops::{build_layers, DrawLayer, LayerKind};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: LayersArgs, verbose: u8) -> Result<()> {
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

    if verbose > 0 {
        println!(
            "Session: {}  filter: {}  scale: {}  canvas: {}x{}",
            args.session.session.display(),
            job.filter_id,
            job.session.scale,
            job.session.canvas.0,
            job.session.canvas.1
        );
    }
    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "layer", "x", "y", "width", "height", "offset_x", "offset_y", "clip_w", "clip_h"
    );
    for layer in &composite.layers {
        println!("{}", format_layer(layer));
    }
    Ok(())
}

fn format_layer(layer: &DrawLayer) -> String {
    let name = match &layer.kind {
        LayerKind::Photo { frame_id } => frame_id.as_str(),
        LayerKind::Background => "<template>",
    };
    format!(
        "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
        name,
        layer.x,
        layer.y,
        layer.width,
        layer.height,
        layer.offset_x,
        layer.offset_y,
        layer.clip_width,
        layer.clip_height
    )
}
