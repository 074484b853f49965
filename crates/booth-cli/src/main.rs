//! booth - print composer for photo booth templates
//!
//! Grades photos with `.cube` filters, fits them into template frames and
//! exports finished prints.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "booth")]
#[command(author, version, about = "Print composer for photo booth templates")]
#[command(long_about = "
Grades photos with .cube filters, fits them into template frames and
exports finished prints.

Examples:
  booth lut photo.jpg -l pink.cube -o graded.png
  booth batch -i 'shots/*.jpg' -l pink.cube -o graded/
  booth fit 4000 3000 1100 800
  booth layers job.yaml
  booth compose job.yaml -o print.png --filter pink
  booth previews job.yaml shots/0001.jpg -o thumbs/
  booth frame job.yaml top --photo shots/0002.jpg
  booth identity 33 -o identity.cube
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a .cube filter to one image
    Lut(LutArgs),

    /// Apply a .cube filter to every image matching a glob
    Batch(BatchArgs),

    /// Show cover-fit geometry for an image and a frame
    Fit(FitArgs),

    /// List the draw layers a session produces
    #[command(visible_alias = "l")]
    Layers(LayersArgs),

    /// Render a session to a print file
    #[command(visible_alias = "c")]
    Compose(ComposeArgs),

    /// Render a sample image through every filter in a session
    Previews(PreviewsArgs),

    /// Assign, clear or pan a frame's photo in a session file
    Frame(FrameArgs),

    /// Write an identity .cube file
    Identity(IdentityArgs),
}

#[derive(Args)]
struct LutArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Filter file (.cube)
    #[arg(short, long)]
    lut: PathBuf,
}

#[derive(Args)]
struct BatchArgs {
    /// Input pattern (glob)
    #[arg(short, long)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Filter file (.cube)
    #[arg(short, long)]
    lut: PathBuf,

    /// Output format extension
    #[arg(short, long)]
    format: Option<String>,
}

#[derive(Args)]
struct FitArgs {
    /// Image width in pixels
    image_width: u32,

    /// Image height in pixels
    image_height: u32,

    /// Frame width
    frame_width: f64,

    /// Frame height
    frame_height: f64,

    /// Horizontal pan (0 = auto-center)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pan_x: f64,

    /// Vertical pan (0 = auto-center)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pan_y: f64,
}

/// Overrides shared by commands that read a session.
#[derive(Args)]
struct SessionOpts {
    /// Session file (YAML)
    session: PathBuf,

    /// Filter id, overrides the session
    #[arg(long)]
    filter: Option<String>,

    /// Display scale, overrides the session
    #[arg(long)]
    scale: Option<f64>,
}

#[derive(Args)]
struct LayersArgs {
    #[command(flatten)]
    session: SessionOpts,
}

#[derive(Args)]
struct ComposeArgs {
    #[command(flatten)]
    session: SessionOpts,

    /// Output image (.png or .jpg)
    #[arg(short, long)]
    output: PathBuf,

    /// Paper color under the photos, as hex RRGGBB or RRGGBBAA
    #[arg(long, default_value = "ffffffff")]
    paper: String,
}

#[derive(Args)]
struct PreviewsArgs {
    /// Session file (YAML) holding the filter catalog
    session: PathBuf,

    /// Sample image
    sample: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Longest side of the thumbnails in pixels
    #[arg(long, default_value = "256")]
    size: u32,
}

#[derive(Args)]
struct FrameArgs {
    /// Session file (YAML), rewritten in place
    session: PathBuf,

    /// Frame id
    frame: String,

    /// Photo to assign (resets pan)
    #[arg(long, conflicts_with = "clear")]
    photo: Option<String>,

    /// Remove the frame's photo
    #[arg(long)]
    clear: bool,

    /// Pan offset as X,Y
    #[arg(long, allow_hyphen_values = true)]
    pan: Option<String>,
}

#[derive(Args)]
struct IdentityArgs {
    /// Grid size
    #[arg(default_value = "33")]
    size: usize,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Lut(args) => commands::lut::run(args, cli.verbose),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose),
        Commands::Fit(args) => commands::fit::run(args),
        Commands::Layers(args) => commands::layers::run(args, cli.verbose),
        Commands::Compose(args) => commands::compose::run(args, cli.verbose),
        Commands::Previews(args) => commands::previews::run(args, cli.verbose),
        Commands::Frame(args) => commands::frame::run(args, cli.verbose),
        Commands::Identity(args) => commands::identity::run(args),
    }
}
