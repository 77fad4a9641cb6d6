mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use region_damage::prelude::*;
use region_damage::{PngRenderer, sample};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::DemoConfig;

/// Damage three regions of an image, restore them and write the four panels
/// (original, mask, damaged, restored) as PNG files.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Image to damage. A synthetic 512x512 test card is used when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory the panels are written to.
    #[arg(long, default_value = "output")]
    output: PathBuf,
    /// TOML file with `rects`, `iterations` and `tolerance`.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    iterations: Option<usize>,
    #[arg(long)]
    tolerance: Option<f32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Args::parse())
}

/// TOML config (or the defaults) with command line overrides applied.
fn load_config(args: &Args) -> Result<DemoConfig> {
    let mut config = match &args.config {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::default(),
    };
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let original = match &args.input {
        Some(path) => sample::open(path).with_context(|| format!("failed to load {}", path.display()))?,
        None => sample::synthetic(512, 512),
    };
    let rects = config.rects()?;

    let damage = simulate_damage(&original, &rects)?;
    info!(
        "damaged {} pixel(s) in {} region(s)",
        damaged_pixel_count(&damage.mask),
        rects.len()
    );

    let start_time = Instant::now();
    let restored = config
        .restorer()
        .restore(&damage.damaged, &damage.mask, ChannelMode::Multichannel)?;
    info!("restoration finished in {:.2?}", start_time.elapsed());

    let panels = Panels::new(original, damage.mask, damage.damaged, restored)?;
    PngRenderer::new(&args.output).render(&panels)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("plot-damage-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("plot_damage").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_run_writes_four_panels() {
        let dir = scratch_dir("default");
        let output = dir.join("output");
        run(parse(&["--output", output.to_str().unwrap()])).unwrap();

        let mut written: Vec<_> = fs::read_dir(&output)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        written.sort();
        assert_eq!(
            written,
            ["defected_image.png", "inpainted_image.png", "mask.png", "original_image.png"]
        );

        let mask = image::open(output.join("mask.png")).unwrap().to_luma8();
        assert_eq!((mask.width(), mask.height()), (512, 512));
        assert_eq!(mask.pixels().filter(|pixel| pixel.0[0] == 255).count(), 4300);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_inverted_rect_in_config_fails() {
        let dir = scratch_dir("inverted");
        let config = dir.join("damage.toml");
        fs::write(&config, "rects = [[60, 20, 0, 20]]").unwrap();
        let output = dir.join("output");

        let result = run(parse(&[
            "--config",
            config.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("inverted"));
        assert!(!output.exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_command_line_overrides_config_file() {
        let dir = scratch_dir("overrides");
        let config = dir.join("damage.toml");
        fs::write(&config, "iterations = 5\ntolerance = 0.5\nrects = [[0, 4, 0, 4]]").unwrap();

        let args = parse(&["--config", config.to_str().unwrap(), "--iterations", "7"]);
        let loaded = load_config(&args).unwrap();
        assert_eq!(loaded.iterations, 7);
        assert_eq!(loaded.tolerance, 0.5);
        assert_eq!(loaded.rects, vec![[0, 4, 0, 4]]);

        let args = parse(&["--config", config.to_str().unwrap(), "--tolerance", "0.01"]);
        let loaded = load_config(&args).unwrap();
        assert_eq!(loaded.iterations, 5);
        assert_eq!(loaded.tolerance, 0.01);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_config_file_fails() {
        let args = parse(&["--config", "/nonexistent/plot-damage.toml"]);
        assert!(load_config(&args).is_err());
    }
}
