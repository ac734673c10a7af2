//! Build the scene JSON consumed by the D3 trajectory viewer.
//!
//! Usage:
//! ```text
//! orbit-scene data --output d3/data/scene.json --max-time-points 2000 \
//!     --subsample-category asteroids --subsample-fraction 0.1
//! ```
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use orbit_scene::{
    constants::{DEFAULT_COLOR, DEFAULT_UNITS},
    params::SceneParams,
    positions::position_reader::PositionFormat,
    ScenePipeline, SceneError,
};
use tracing::{error, info, Level};

/// Command line arguments for the scene builder
#[derive(Parser, Debug)]
#[command(
    name = "orbit-scene",
    about = "Resample small-body ephemeris tables onto a common time grid",
    long_about = None
)]
struct Args {
    /// Data directory holding one subdirectory of position tables per category
    #[arg(default_value = "data")]
    data_dir: Utf8PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "d3/data/scene.json")]
    output: Utf8PathBuf,

    /// Attribute (diameter / albedo / density) table, defaults to its place under the data directory
    #[arg(long)]
    attribute_table: Option<Utf8PathBuf>,

    /// Category color table, defaults to its place under the data directory
    #[arg(long)]
    color_table: Option<Utf8PathBuf>,

    /// Maximum length of the unified time grid
    #[arg(long)]
    max_time_points: Option<usize>,

    /// Objects with fewer valid resampled samples are dropped
    #[arg(long, default_value_t = 2)]
    min_valid_samples: usize,

    /// Category to subsample (repeatable)
    #[arg(long = "subsample-category")]
    subsample_categories: Vec<String>,

    /// Keep-fraction for the matching category (repeatable, last one reused)
    #[arg(long = "subsample-fraction")]
    subsample_fractions: Vec<f64>,

    /// Seed of the subsampling generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Position table schema: `heuristic` or `columns:T,X,Y,Z`
    #[arg(long, default_value_t = PositionFormat::FirstAndLastThree)]
    position_format: PositionFormat,

    /// Length unit recorded in the metadata
    #[arg(long, default_value = DEFAULT_UNITS)]
    units: String,

    /// Color of categories missing from the color table
    #[arg(long, default_value = DEFAULT_COLOR)]
    default_color: String,

    /// Data subdirectory that holds no position tables (repeatable, replaces the built-in list)
    #[arg(long = "skip-dir")]
    skip_dirs: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn scene_params(args: &Args) -> Result<SceneParams, SceneError> {
    let mut builder = SceneParams::builder()
        .min_valid_samples(args.min_valid_samples)
        .subsample_lists(
            args.subsample_categories.clone(),
            args.subsample_fractions.clone(),
        )
        .seed(args.seed)
        .position_format(args.position_format)
        .units(args.units.clone())
        .default_color(args.default_color.clone());
    if let Some(max) = args.max_time_points {
        builder = builder.max_time_points(max);
    }
    if !args.skip_dirs.is_empty() {
        builder = builder.skip_dirs(args.skip_dirs.clone());
    }
    builder.build()
}

fn run(args: Args) -> Result<(), SceneError> {
    let params = scene_params(&args)?;
    info!("{params:#}");

    let mut pipeline = ScenePipeline::from_data_dir(&args.data_dir, params);
    if let Some(path) = &args.attribute_table {
        pipeline = pipeline.with_attribute_table(path);
    }
    if let Some(path) = &args.color_table {
        pipeline = pipeline.with_color_table(path);
    }

    let scene = pipeline.run()?;

    info!(
        "Writing {} objects over {} epochs to {}",
        scene.objects.len(),
        scene.times_jd.len(),
        args.output
    );
    scene.write_json(&args.output)?;
    info!("Done. Output file: {}", args.output);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(SceneError::NoObjectsParsed) => {
            error!("No objects parsed. Exiting.");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["orbit-scene"]).unwrap();
        let params = scene_params(&args).unwrap();
        assert_eq!(params, SceneParams::new());
    }

    #[test]
    fn test_default_color_and_skip_dirs() {
        let args = Args::try_parse_from([
            "orbit-scene",
            "data",
            "--default-color",
            "#000000",
            "--skip-dir",
            "diameters",
            "--skip-dir",
            "scratch",
        ])
        .unwrap();
        let params = scene_params(&args).unwrap();
        assert_eq!(params.default_color, "#000000");
        assert_eq!(params.skip_dirs, vec!["diameters", "scratch"]);
    }
}
