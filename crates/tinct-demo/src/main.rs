//! tinct - HSI hue/saturation/intensity adjustment from the command line.
//!
//! Plays the session-owner role around `tinct-core`: decode an image, load
//! it into a session once, resolve the slider values, adjust and save.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tinct_core::{AdjustmentParams, GradingSession, NamedPreset, Parameter, Preset, load_presets_json};
use tracing_subscriber::EnvFilter;

mod image_loader;

#[derive(Parser)]
#[command(name = "tinct")]
#[command(author, version, about = "Adjust hue, saturation and intensity in HSI space")]
#[command(long_about = "
Converts an image to Hue-Saturation-Intensity planes once, applies a hue
rotation and saturation/intensity scaling, and writes the result.

Examples:
  tinct photo.jpg -o warm.png --preset warm
  tinct photo.jpg -o out.png --hue 200 --saturation 130
  tinct photo.jpg -o out.png --presets looks.json --preset dusk
  tinct --list-presets
")]
struct Cli {
    /// Input image
    #[arg(required_unless_present = "list_presets")]
    input: Option<PathBuf>,

    /// Output image
    #[arg(short, long, required_unless_present = "list_presets")]
    output: Option<PathBuf>,

    /// Hue slider, 0-360 (180 = no shift)
    #[arg(long, allow_negative_numbers = true)]
    hue: Option<i32>,

    /// Saturation percent, 0-300 (100 = unchanged)
    #[arg(short, long, allow_negative_numbers = true)]
    saturation: Option<i32>,

    /// Intensity percent, 0-300 (100 = unchanged)
    #[arg(short, long, allow_negative_numbers = true)]
    intensity: Option<i32>,

    /// Preset to start from (built-in or from --presets)
    #[arg(short, long)]
    preset: Option<String>,

    /// JSON file with additional named presets
    #[arg(long)]
    presets: Option<PathBuf>,

    /// List available presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let custom = match &cli.presets {
        Some(path) => read_presets(path)?,
        None => Vec::new(),
    };

    if cli.list_presets {
        print_presets(&custom);
        return Ok(());
    }

    let params = resolve_params(&cli, &custom)?;
    let (Some(input), Some(output)) = (cli.input.as_deref(), cli.output.as_deref()) else {
        bail!("input and output paths are required");
    };

    let source = image_loader::load_image(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let session = GradingSession::new();
    session.load(source);
    let adjusted = session.adjust(&params).context("Adjustment failed")?;

    image_loader::save_image(&adjusted, output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_presets(path: &Path) -> Result<Vec<NamedPreset>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read presets from {}", path.display()))?;
    let presets = load_presets_json(&json)
        .with_context(|| format!("Invalid presets file {}", path.display()))?;
    tracing::debug!("loaded {} presets from {}", presets.len(), path.display());
    Ok(presets)
}

/// Defaults, then the preset, then explicit slider flags. Every value goes
/// through the parameter clamp.
fn resolve_params(cli: &Cli, custom: &[NamedPreset]) -> Result<AdjustmentParams> {
    let mut params = AdjustmentParams::default();

    if let Some(name) = cli.preset.as_deref() {
        if let Some(named) = custom.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim())) {
            params = named.params;
        } else if let Some(preset) = Preset::from_name(name) {
            params.apply_preset(preset);
        } else {
            bail!("unknown preset '{name}' (try --list-presets)");
        }
    }

    for (parameter, value) in [
        (Parameter::Hue, cli.hue),
        (Parameter::Saturation, cli.saturation),
        (Parameter::Intensity, cli.intensity),
    ] {
        if let Some(value) = value {
            let stored = params.set(parameter, value);
            if stored != value {
                tracing::warn!("{parameter} {value} is out of range, using {stored}");
            }
        }
    }

    tracing::info!(
        "hue={} saturation={} intensity={}",
        params.hue,
        params.saturation,
        params.intensity
    );
    Ok(params)
}

fn print_presets(custom: &[NamedPreset]) {
    let builtin = Preset::ALL.iter().map(|p| (p.label(), p.params()));
    let user = custom.iter().map(|p| (p.name.as_str(), p.params));
    for (name, p) in builtin.chain(user) {
        println!(
            "{name:<12} hue={:<3} saturation={:<3} intensity={:<3}",
            p.hue, p.saturation, p.intensity
        );
    }
}
