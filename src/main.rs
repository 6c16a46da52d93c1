use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use fieldpath::config::{DirectionFlags, DirectionMode, FileConfig, defaults, layered_direction};
use fieldpath::coverage::PlannerConfig;
use fieldpath::export::write_geojson;
use fieldpath::geometry::PlanarProjection;
use fieldpath::input::{DEFAULT_FIELD, field_from_geodetic, parse_coordinates};
use fieldpath::marking::FieldDimensions;
use fieldpath::marking::dimensions::FIFA_TOLERANCE;
use fieldpath::task::{TaskKind, TaskOutput, TaskParams, run_task};

/// Plan mowing paths and pitch markings for a field boundary
///
/// Examples:
///   # Grass cutting on the built-in sample field
///   fieldpath
///
///   # Read a boundary, 1.5m cutting width, 3 headland passes
///   fieldpath --coords field.txt -w 1.5 --headland-passes 3 -o field.geojson
///
///   # Sweep perpendicular to the longest edge
///   fieldpath --coords field.txt --direction perpendicular
///
///   # Sweep along the diagonal between vertices 0 and 2
///   fieldpath --coords field.txt --vertices 0 2 --diagonal
///
///   # Mark a regulation pitch and check the field size first
///   fieldpath --coords field.txt --task pitch-marking --validate
#[derive(Parser, Debug)]
#[command(name = "fieldpath")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches fieldpath.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Boundary file with one "lat, lon" pair per line (defaults to the sample field)
    #[arg(long)]
    coords: Option<PathBuf>,

    /// Task to plan
    #[arg(short = 't', long, value_enum)]
    task: Option<TaskKind>,

    /// Cutting width in meters (headland ring spacing and track spacing)
    #[arg(short = 'w', long)]
    width: Option<f64>,

    /// Number of headland passes around the boundary
    #[arg(long)]
    headland_passes: Option<usize>,

    /// Sweep relative to the longest edge: parallel or perpendicular
    #[arg(long, value_enum)]
    direction: Option<DirectionMode>,

    /// Explicit sweep angle in degrees (overrides --direction and --vertices)
    #[arg(long, allow_hyphen_values = true)]
    angle: Option<f64>,

    /// Sweep along the segment between two boundary vertices
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    vertices: Option<Vec<usize>>,

    /// Treat --vertices as a field diagonal
    #[arg(long, requires = "vertices")]
    diagonal: bool,

    /// Drive every track in the same direction instead of alternating
    #[arg(long)]
    no_boustrophedon: bool,

    /// Pitch length in meters for pitch marking
    #[arg(long)]
    field_length: Option<f64>,

    /// Pitch width in meters for pitch marking
    #[arg(long)]
    field_width: Option<f64>,

    /// Check the field against FIFA dimensions (105 x 68m, +/- 5m)
    #[arg(long)]
    validate: bool,

    /// Output GeoJSON file path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let (file_config, config_source, skipped) =
        if let Some(ref config_path) = args.config {
            if config_path.exists() {
                let contents = std::fs::read_to_string(config_path)
                    .context(format!("Failed to read config file: {:?}", config_path))?;
                let config: FileConfig =
                    toml::from_str(&contents).context("Failed to parse config file")?;
                (config, Some(config_path.clone()), Vec::new())
            } else {
                bail!("Config file not found: {:?}", config_path);
            }
        } else {
            let found = FileConfig::load();
            (found.config.unwrap_or_default(), found.path, found.skipped)
        };

    let verbose = args.verbose || file_config.verbose;
    init_logging(verbose);
    for (path, error) in &skipped {
        tracing::warn!("Skipped malformed config file {:?}: {}", path, error);
    }

    let task = args.task.or(file_config.task).unwrap_or_default();
    let width = args.width.unwrap_or(file_config.width);
    let headland_passes = args.headland_passes.unwrap_or(file_config.headland_passes);
    let cli_vertex_pair = match args.vertices.as_deref() {
        Some(&[a, b]) => Some([a, b]),
        Some(other) => bail!("--vertices takes exactly two indices, got {}", other.len()),
        None => None,
    };
    let cli_direction = DirectionFlags {
        mode: args.direction,
        angle: args.angle,
        vertex_pair: cli_vertex_pair,
        diagonal: args.diagonal,
    };
    let direction = layered_direction(&[cli_direction, file_config.direction_flags()]);
    let boustrophedon = !args.no_boustrophedon && file_config.boustrophedon;
    let field_length = args.field_length.unwrap_or(file_config.field_length);
    let field_width = args.field_width.unwrap_or(file_config.field_width);
    let validate = args.validate || file_config.validate_fifa;
    let coords_path = args.coords.clone().or_else(|| file_config.coords.clone());
    let sampling = file_config.sampling.unwrap_or_default();
    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| PathBuf::from("plan.geojson"));

    println!("fieldpath - Field Coverage Planner");
    println!("==================================");
    println!();

    if verbose {
        println!("Configuration:");
        if let Some(ref path) = config_source {
            println!("  Config file: {}", path.display());
        }
        println!("  Task: {}", task.label());
        println!("  Width: {}m", width);
        println!("  Headland passes: {}", headland_passes);
        println!("  Direction: {:?}", direction);
        println!(
            "  Boustrophedon: {}",
            if boustrophedon { "enabled" } else { "disabled" }
        );
        if task == TaskKind::PitchMarking {
            println!("  Pitch: {}m x {}m", field_length, field_width);
        }
        println!("  Output: {}", output_path.display());
        println!();
    }

    let coords = match coords_path {
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read coordinate file: {}", path.display()))?;
            parse_coordinates(&text)
                .with_context(|| format!("Invalid coordinate file: {}", path.display()))?
        }
        None => {
            println!("No coordinates given, using the built-in sample field");
            DEFAULT_FIELD.to_vec()
        }
    };

    let spinner = create_spinner("Projecting field boundary...");
    let (field, projector) = field_from_geodetic(&coords)?;
    let (center_lat, center_lon) = projector.to_geodetic(field.centroid());
    spinner.finish_with_message(format!(
        "Field: {} vertices, {:.0} m² around ({:.5}, {:.5})",
        field.len(),
        field.area(),
        center_lat,
        center_lon
    ));

    if validate {
        let dims = FieldDimensions::measure(&field);
        println!(
            "Field dimensions: {:.1}m x {:.1}m ({})",
            dims.length,
            dims.width,
            if dims.is_fifa_standard() {
                "FIFA compliant".to_string()
            } else {
                format!(
                    "outside {}m x {}m +/- {}m",
                    defaults::FIELD_LENGTH,
                    defaults::FIELD_WIDTH,
                    FIFA_TOLERANCE
                )
            }
        );
    }

    let params = TaskParams {
        planner: PlannerConfig::default()
            .with_width(width)
            .with_headland_passes(headland_passes)
            .with_direction(direction)
            .with_boustrophedon(boustrophedon),
        pitch_length: field_length,
        pitch_width: field_width,
        sampling,
    };

    let spinner = create_spinner(&format!("Planning {}...", task.label().to_lowercase()));
    let start = Instant::now();
    let output = run_task(task, &field, &params)
        .with_context(|| format!("Failed to plan {}", task.label().to_lowercase()))?;
    spinner.finish_with_message(format!(
        "{} [{:.1}s]",
        summarize(&output),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Writing GeoJSON file...");
    let start = Instant::now();
    let records = output.to_records();
    write_geojson(&output_path, &records, &projector).context("Failed to write GeoJSON file")?;
    spinner.finish_with_message(format!(
        "Wrote {} features [{:.1}s]",
        records.len(),
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());

    Ok(())
}

fn summarize(output: &TaskOutput) -> String {
    match output {
        TaskOutput::Coverage(plan) => format!(
            "Planned {} headland rings and {} tracks at {:.1}°, {:.0}m total",
            plan.headland_rings().len(),
            plan.sweep_tracks().len(),
            plan.direction_deg(),
            plan.total_length()
        ),
        TaskOutput::Markings(set) => format!(
            "Generated {} markings for a {}m x {}m pitch",
            set.len(),
            set.length,
            set.width
        ),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
