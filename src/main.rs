use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bouncing_circles::Settings;
use bouncing_circles::engine;
use bouncing_circles::settings::WindowSize;

#[derive(Parser, Debug)]
#[command(version, about = "Labelled circles bouncing off the window and each other")]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of circles
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, requires = "height")]
    width: Option<u32>,

    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Run this many frames without a window, then exit
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(count) = args.count {
        settings.count = count;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let (Some(width), Some(height)) = (args.width, args.height) {
        settings.window = Some(WindowSize { width, height });
    }

    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = load_settings(&args)?;

    if let Some(frames) = args.headless {
        let stats = engine::run_headless(&settings, frames);
        println!(
            "{} frames, {} bodies, {} collisions",
            stats.frames, stats.bodies, stats.collisions
        );
        return Ok(());
    }

    run_window(&settings)
}

#[cfg(feature = "window")]
fn run_window(settings: &Settings) -> Result<()> {
    engine::run(settings)?;
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(_settings: &Settings) -> Result<()> {
    anyhow::bail!("built without the `window` feature; use --headless <FRAMES>")
}
