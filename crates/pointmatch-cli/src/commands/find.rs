use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use console::Style;
use pointmatch_core::io::{load_processed_image, save_surface_png};
use pointmatch_core::matching::{compute_surface, spawn_point_match, MatchRequest, PointMatchConfig};
use pointmatch_core::point::PixelPoint;
use tracing::info;

use crate::reporter::SpinnerReporter;

#[derive(Args)]
pub struct FindArgs {
    /// Processed image to search (any format the image crate reads)
    pub image: PathBuf,

    /// Sample template pixel as X,Y (repeat for every pixel)
    #[arg(long = "sample", required = true, allow_hyphen_values = true)]
    pub samples: Vec<PixelPoint>,

    /// Already-marked point as X,Y (repeat as needed)
    #[arg(long = "existing", allow_hyphen_values = true)]
    pub existing: Vec<PixelPoint>,

    /// TOML config file (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the point separation (pixels)
    #[arg(long)]
    pub separation: Option<u32>,

    /// Override the minimum normalized score
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Keep at most N matches
    #[arg(long)]
    pub max_matches: Option<usize>,

    /// Also write the correlation surface as a PNG
    #[arg(long)]
    pub surface: Option<PathBuf>,
}

fn build_config(args: &FindArgs) -> Result<PointMatchConfig> {
    let mut config: PointMatchConfig = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid point-match config")?
    } else {
        PointMatchConfig::default()
    };

    if let Some(separation) = args.separation {
        config.point_separation = separation;
    }
    if let Some(min_score) = args.min_score {
        config.min_score = min_score;
    }
    if args.max_matches.is_some() {
        config.max_matches = args.max_matches;
    }
    config.validate().context("Invalid point-match config")?;
    Ok(config)
}

pub fn run(args: &FindArgs) -> Result<()> {
    let config = build_config(args)?;
    let image = load_processed_image(&args.image)
        .with_context(|| format!("Failed to load image {}", args.image.display()))?;

    let label = Style::new().dim();
    let value = Style::new().bold();
    println!(
        "  {:<12}{}x{} ({} foreground px)",
        label.apply_to("Image"),
        image.width(),
        image.height(),
        image.count_on(config.on_threshold)
    );
    println!(
        "  {:<12}{} px",
        label.apply_to("Sample"),
        value.apply_to(args.samples.len())
    );
    println!(
        "  {:<12}{} px",
        label.apply_to("Separation"),
        value.apply_to(config.point_separation)
    );

    if let Some(ref surface_path) = args.surface {
        match compute_surface(&args.samples, &image, &config, &args.existing)? {
            Some(surface) => {
                save_surface_png(&surface, surface_path).with_context(|| {
                    format!("Failed to write surface {}", surface_path.display())
                })?;
                info!(path = %surface_path.display(), "Correlation surface saved");
            }
            None => println!("  No correlation surface (nothing can match)"),
        }
    }

    let reporter = Arc::new(SpinnerReporter::new()?);
    let request = MatchRequest {
        sample_point_pixels: args.samples.clone(),
        image_processed: image,
        config,
        points_existing: args.existing.clone(),
    };
    let job = spawn_point_match(request, reporter.clone())?;
    let matches = job.join();
    reporter.finish();
    let matches = matches?;

    if matches.is_empty() {
        println!("\nNo matches found.");
        return Ok(());
    }

    println!("\n{} matches:", matches.len());
    println!("{:>5}  {:>7}  {:>7}  {:>8}", "Rank", "X", "Y", "Score");
    println!("{}", "-".repeat(33));
    for m in &matches {
        let p: PixelPoint = m.point();
        println!(
            "{:>5}  {:>7}  {:>7}  {:>8.4}",
            m.rank() + 1,
            p.x,
            p.y,
            m.score()
        );
    }

    Ok(())
}
