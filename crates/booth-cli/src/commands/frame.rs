//! Frame editing command

use crate::FrameArgs;
use anyhow::{bail, Context, Result};
use booth_io::SessionFile;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: FrameArgs, verbose: u8) -> Result<()> {
    let mut file = SessionFile::read(&args.session)
        .with_context(|| format!("Failed to load session: {}", args.session.display()))?;

    let Some(frame) = file.template.frames.iter_mut().find(|f| f.id == args.frame) else {
        bail!("No frame {:?} in {}", args.frame, args.session.display());
    };

    if args.clear {
        frame.unassign();
    }
    if let Some(photo) = &args.photo {
        frame.assign(photo.as_str());
    }
    if let Some(pan) = &args.pan {
        let (x, y) = parse_pan(pan)?;
        if frame.photo.is_none() {
            bail!("Frame {:?} has no photo to pan", args.frame);
        }
        frame.pan(x, y);
    }

    if verbose > 0 {
        println!(
            "{}: photo {:?}, pan {}, {}",
            frame.id,
            frame.photo.as_deref().unwrap_or("-"),
            frame.pan_x,
            frame.pan_y
        );
    }
    debug!(frame = %args.frame, "frame updated");

    file.write(&args.session)
        .with_context(|| format!("Failed to write session: {}", args.session.display()))
}

/// Parses `X,Y`.
fn parse_pan(s: &str) -> Result<(f64, f64)> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("Invalid pan {:?}, expected X,Y", s);
    };
    let x: f64 = x.trim().parse().with_context(|| format!("Invalid pan X in {:?}", s))?;
    let y: f64 = y.trim().parse().with_context(|| format!("Invalid pan Y in {:?}", s))?;
    if !(x.is_finite() && y.is_finite()) {
        bail!("Pan must be finite, got {:?}", s);
    }
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pan() {
        assert_eq!(parse_pan("10,-2.5").unwrap(), (10.0, -2.5));
        assert_eq!(parse_pan(" 0 , 3 ").unwrap(), (0.0, 3.0));
        assert!(parse_pan("10").is_err());
        assert!(parse_pan("a,b").is_err());
        assert!(parse_pan("inf,0").is_err());
    }
}
