//! Command-line interface implementation

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::animation::AnimationType;
use crate::bounds;
use crate::composite::Stage;
use crate::config::{self, ScutConfig};
use crate::export::{write_bundle, AnimationConfig};
use crate::extract::extract;
use crate::frame::Warning;
use crate::output::{frame_output_path, save_png, scale_image, sheet_output_path};
use crate::partition::{PartitionDescriptor, Region};
use crate::pipeline;
use crate::source::load_raster;
use crate::spritesheet::assemble;

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Spritecut - slice character sheets into sprite sheets and animation configs
#[derive(Parser)]
#[command(name = "scut")]
#[command(about = "Spritecut - slice character sheets into sprite sheets and animation configs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Slice a source image into individual frame PNGs
    Slice {
        /// Input image (PNG or any format the decoder understands)
        input: PathBuf,

        /// Uniform grid as COLUMNSxROWS (e.g. 6x8)
        #[arg(long, conflicts_with_all = ["dividers_x", "dividers_y", "regions"])]
        grid: Option<String>,

        /// Vertical divider percentages, comma separated (e.g. 25,50,75)
        #[arg(long)]
        dividers_x: Option<String>,

        /// Horizontal divider percentages, comma separated
        #[arg(long)]
        dividers_y: Option<String>,

        /// JSON file with free-form regions
        #[arg(long, conflicts_with_all = ["dividers_x", "dividers_y"])]
        regions: Option<PathBuf>,

        /// Output directory (default: {input stem}_frames/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Run the full pipeline: slice, composite, assemble, emit config
    Export {
        /// Input image
        input: PathBuf,

        /// Animation type (walk, idle, attack1-3, dash, hurt, death, special)
        #[arg(short, long)]
        animation: String,

        /// Uniform grid as COLUMNSxROWS (e.g. 6x8)
        #[arg(long, conflicts_with_all = ["dividers_x", "dividers_y", "regions"])]
        grid: Option<String>,

        /// Vertical divider percentages, comma separated
        #[arg(long)]
        dividers_x: Option<String>,

        /// Horizontal divider percentages, comma separated
        #[arg(long)]
        dividers_y: Option<String>,

        /// JSON file with free-form regions
        #[arg(long, conflicts_with_all = ["dividers_x", "dividers_y"])]
        regions: Option<PathBuf>,

        /// Output directory (default: from scut.toml, else build/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Settings file (default: nearest scut.toml)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Also write a ZIP bundle with the sheets and config
        #[arg(long)]
        bundle: bool,

        /// Scale output by integer factor (1-16, default: from config)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: Option<u8>,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Print raster dimensions and content bounds
    Probe {
        /// Input image
        input: PathBuf,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Slice {
            input,
            grid,
            dividers_x,
            dividers_y,
            regions,
            output,
            strict,
        } => run_slice(
            &input,
            build_descriptor(grid.as_deref(), dividers_x.as_deref(), dividers_y.as_deref(), regions.as_deref()),
            output.as_deref(),
            strict,
        ),
        Commands::Export {
            input,
            animation,
            grid,
            dividers_x,
            dividers_y,
            regions,
            output,
            settings,
            bundle,
            scale,
            strict,
        } => run_export(
            &input,
            &animation,
            build_descriptor(grid.as_deref(), dividers_x.as_deref(), dividers_y.as_deref(), regions.as_deref()),
            output.as_deref(),
            settings.as_deref(),
            bundle,
            scale,
            strict,
        ),
        Commands::Probe { input } => run_probe(&input),
    }
}

/// Build a partition descriptor from the CLI slicing flags.
fn build_descriptor(
    grid: Option<&str>,
    dividers_x: Option<&str>,
    dividers_y: Option<&str>,
    regions: Option<&Path>,
) -> Result<PartitionDescriptor, String> {
    if let Some(shape) = grid {
        let (columns, rows) = parse_grid(shape)?;
        return Ok(PartitionDescriptor::UniformGrid { columns, rows });
    }
    if dividers_x.is_some() || dividers_y.is_some() {
        return Ok(PartitionDescriptor::DividedGrid {
            vertical_dividers: parse_dividers(dividers_x.unwrap_or(""))?,
            horizontal_dividers: parse_dividers(dividers_y.unwrap_or(""))?,
        });
    }
    if let Some(path) = regions {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read regions file '{}': {}", path.display(), e))?;
        let regions: Vec<Region> = serde_json::from_str(&content)
            .map_err(|e| format!("invalid regions file '{}': {}", path.display(), e))?;
        return Ok(PartitionDescriptor::FreeRegions { regions });
    }
    Err("no partition given: use --grid, --dividers-x/--dividers-y or --regions".to_string())
}

/// Parse a COLUMNSxROWS grid shape like "6x8".
fn parse_grid(shape: &str) -> Result<(u32, u32), String> {
    let (cols, rows) = shape
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid grid '{}', expected COLUMNSxROWS", shape))?;
    let columns: u32 = cols
        .trim()
        .parse()
        .map_err(|_| format!("invalid column count '{}'", cols))?;
    let rows: u32 = rows
        .trim()
        .parse()
        .map_err(|_| format!("invalid row count '{}'", rows))?;
    Ok((columns, rows))
}

/// Parse comma-separated divider percentages like "25,50,75".
fn parse_dividers(list: &str) -> Result<Vec<f64>, String> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid divider percentage '{}'", part))
        })
        .collect()
}

/// Print warnings; in strict mode they are fatal.
fn report_warnings(warnings: &[Warning], strict: bool) -> bool {
    for warning in warnings {
        eprintln!("Warning: {}", warning.message);
    }
    strict && !warnings.is_empty()
}

fn run_slice(
    input: &Path,
    descriptor: Result<PartitionDescriptor, String>,
    output: Option<&Path>,
    strict: bool,
) -> ExitCode {
    let descriptor = match descriptor {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let raster = match load_raster(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frames");
    let out_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("{}_frames", stem)));

    let result = extract(&raster, descriptor);
    if report_warnings(&result.warnings, strict) {
        eprintln!("Error: warnings treated as errors (--strict)");
        return ExitCode::from(EXIT_ERROR);
    }

    for (i, frame) in result.frames.iter().enumerate() {
        let path = frame_output_path(&out_dir, stem, i);
        if let Err(e) = save_png(&frame.pixels, &path) {
            eprintln!("Error: cannot write '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    println!(
        "Sliced {} frames from {} into {}",
        result.frames.len(),
        input.display(),
        out_dir.display()
    );
    ExitCode::from(EXIT_SUCCESS)
}

fn run_export(
    input: &Path,
    animation_name: &str,
    descriptor: Result<PartitionDescriptor, String>,
    output: Option<&Path>,
    settings_path: Option<&Path>,
    bundle_flag: bool,
    scale_flag: Option<u8>,
    strict: bool,
) -> ExitCode {
    let descriptor = match descriptor {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let animation = match AnimationType::parse(animation_name) {
        Some(a) => a,
        None => {
            eprintln!("Error: unknown animation type '{}'", animation_name);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let config = match load_settings(settings_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let scale = scale_flag.unwrap_or(config.export.scale);
    let bundle = bundle_flag || config.export.bundle;
    let out_dir = output.unwrap_or(config.project.out.as_path());

    let raster = match load_raster(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Pipeline with a progress bar per compositing stage
    let bar = ProgressBar::new(descriptor.frame_count() as u64);
    bar.set_style(
        ProgressStyle::with_template("{msg:12} [{bar:30}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let mut progress = |stage: Stage, done: usize, total: usize| {
        bar.set_message(stage.display_name());
        bar.set_length(total as u64);
        bar.set_position(done as u64);
    };
    let batch = pipeline::process(&raster, descriptor, &config.settings, &mut progress);
    bar.finish_and_clear();

    let mut warnings = batch.warnings.clone();
    warnings.extend(crate::animation::validate_layout(animation, &batch.extraction));
    if report_warnings(&warnings, strict) {
        eprintln!("Error: warnings treated as errors (--strict)");
        return ExitCode::from(EXIT_ERROR);
    }

    // Keep the grid's column count so direction rows survive assembly
    let columns = batch.extraction.columns().max(1) as u32;
    let frames: Vec<_> = if scale > 1 {
        batch
            .extraction
            .frames
            .iter()
            .map(|f| f.with_pixels(scale_image(f.pixels.clone(), scale)))
            .collect()
    } else {
        batch.extraction.frames.clone()
    };
    let sheet = assemble(&frames, Some(columns));

    let sheet_file = sheet_output_path(out_dir, animation.key());
    if let Err(e) = save_png(&sheet.image, &sheet_file) {
        eprintln!("Error: cannot write '{}': {}", sheet_file.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    let mut animation_config = AnimationConfig::new();
    animation_config.add_sheet(
        animation.key(),
        &format!("{}.png", animation.key()),
        &sheet,
    );
    let emit_warnings = animation_config.add_animation(
        animation,
        animation.key(),
        &sheet,
        batch.extraction.layout,
    );
    if report_warnings(&emit_warnings, strict) {
        eprintln!("Error: warnings treated as errors (--strict)");
        return ExitCode::from(EXIT_ERROR);
    }

    let config_path = out_dir.join("config.json");
    if let Err(e) = animation_config.write(&config_path, config.export.pretty) {
        eprintln!("Error: cannot write '{}': {}", config_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    if bundle {
        let bundle_path = out_dir.join(format!("{}.zip", config.project.name));
        let entries = vec![(animation.key().to_string(), &sheet.image)];
        if let Err(e) = write_bundle(&entries, &animation_config, &bundle_path) {
            eprintln!("Error: cannot write '{}': {}", bundle_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    println!(
        "Exported {} ({} frames, {}x{} grid) to {}",
        animation.key(),
        sheet.placements.len(),
        sheet.columns,
        sheet.rows,
        out_dir.display()
    );
    ExitCode::from(EXIT_SUCCESS)
}

fn run_probe(input: &Path) -> ExitCode {
    let raster = match load_raster(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (width, height) = raster.dimensions();
    println!("{}: {}x{}", input.display(), width, height);
    match bounds::try_content_bounds(&raster) {
        Some(b) => println!(
            "content bounds: {},{} {}x{}",
            b.x, b.y, b.width, b.height
        ),
        None => println!("content bounds: none (fully transparent)"),
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Load settings from an explicit path or the nearest `scut.toml`.
fn load_settings(path: Option<&Path>) -> Result<ScutConfig, config::ConfigError> {
    match path {
        Some(p) => config::load_config(p),
        None => config::loader::load_or_default(),
    }
}
