use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use facewarp_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use facewarp_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use facewarp_core::landmarks::domain::feature_group::{FeatureKind, ScaleGroup};
use facewarp_core::landmarks::infrastructure::json_landmark_detector::JsonLandmarkDetector;
use facewarp_core::pipeline::feature_scales::FeatureScales;
use facewarp_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use facewarp_core::pipeline::warp_compositor::{WarpCompositor, WarpStep};
use facewarp_core::pipeline::warp_photo_use_case::WarpPhotoUseCase;
use facewarp_core::shared::constants::{CONFIG_DIR_NAME, IMAGE_EXTENSIONS, SCALES_FILE_NAME};
use facewarp_core::warping::infrastructure::cpu_bump_warper::CpuBumpWarper;

/// Landmark-driven local bump warps for photos.
#[derive(Parser)]
#[command(name = "facewarp")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Output image file (required unless --plan is used).
    output: Option<PathBuf>,

    /// Detected landmarks for the input, as JSON.
    #[arg(long)]
    landmarks: PathBuf,

    /// Scale config (JSON). Defaults to the user config file if present.
    #[arg(long)]
    scales: Option<PathBuf>,

    /// Eye scale (usual range 0.0-1.0).
    #[arg(long, allow_hyphen_values = true)]
    eyes: Option<f64>,

    /// Eyebrow scale (usual range 0.0-1.5).
    #[arg(long, allow_hyphen_values = true)]
    brows: Option<f64>,

    /// Nose scale (usual range 0.0-1.5).
    #[arg(long, allow_hyphen_values = true)]
    nose: Option<f64>,

    /// Lip scale (usual range 0.0-1.0).
    #[arg(long, allow_hyphen_values = true)]
    lips: Option<f64>,

    /// Face contour scale (usual range 0.0-0.5).
    #[arg(long, allow_hyphen_values = true)]
    face: Option<f64>,

    /// Skip the eyebrow groups entirely.
    #[arg(long)]
    without_brows: bool,

    /// Print the warp steps to stdout instead of writing output.
    #[arg(long)]
    plan: bool,

    /// Resize the output to WxH (e.g. 640x480).
    #[arg(long, value_parser = parse_resize)]
    resize: Option<(u32, u32)>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let scales = resolve_scales(&cli, default_scales_path().as_deref())?;
    scales.warn_out_of_range();

    let groups = if cli.without_brows {
        FeatureKind::WITHOUT_BROWS
    } else {
        FeatureKind::ALL
    };
    let compositor = WarpCompositor::with_groups(Box::new(CpuBumpWarper::new()), groups);
    let detector = JsonLandmarkDetector::from_file(&cli.landmarks)?;

    let mut use_case = WarpPhotoUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        Box::new(detector),
        compositor,
        Box::new(StdoutPipelineLogger::new()),
        cli.resize,
    );

    match (&cli.output, cli.plan) {
        (_, true) => {
            let steps = use_case.plan(&cli.input, &scales)?;
            print!("{}", format_plan(&steps));
        }
        (Some(output), false) => use_case.execute(&cli.input, output, &scales)?,
        (None, false) => return Err("Output file is required unless --plan is used".into()),
    }

    Ok(())
}

/// One header line, then one line per step in execution order.
fn format_plan(steps: &[WarpStep]) -> String {
    let mut out = format!("{} warp steps\n", steps.len());
    for step in steps {
        let target = step.spec.target;
        out.push_str(&format!(
            "  face {} {:<14} center=({:.1}, {:.1}) radius={:.1} strength={}\n",
            step.face_index,
            step.group,
            target.center.x,
            target.center.y,
            target.radius,
            step.spec.strength
        ));
    }
    out
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!("Unsupported image type: {}", cli.input.display()).into());
    }
    if !cli.landmarks.exists() {
        return Err(format!("Landmark file not found: {}", cli.landmarks.display()).into());
    }
    if !cli.plan && cli.output.is_none() {
        return Err("Output file is required unless --plan is used".into());
    }
    for (flag, value) in [
        ("--eyes", cli.eyes),
        ("--brows", cli.brows),
        ("--nose", cli.nose),
        ("--lips", cli.lips),
        ("--face", cli.face),
    ] {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(format!("{flag} must be a finite number").into());
        }
    }
    Ok(())
}

/// Defaults, then the config file, then per-group flags.
fn resolve_scales(
    cli: &Cli,
    default_path: Option<&Path>,
) -> Result<FeatureScales, Box<dyn std::error::Error>> {
    let mut scales = match (&cli.scales, default_path) {
        (Some(path), _) => FeatureScales::from_json_file(path)?,
        (None, Some(path)) if path.exists() => {
            log::info!("Using scales from {}", path.display());
            FeatureScales::from_json_file(path)?
        }
        _ => FeatureScales::default(),
    };

    for (group, value) in [
        (ScaleGroup::Eyes, cli.eyes),
        (ScaleGroup::Brows, cli.brows),
        (ScaleGroup::Nose, cli.nose),
        (ScaleGroup::Lips, cli.lips),
        (ScaleGroup::FaceContour, cli.face),
    ] {
        if let Some(v) = value {
            scales.set(group, v);
        }
    }
    Ok(scales)
}

fn default_scales_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SCALES_FILE_NAME))
}

fn parse_resize(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{value}'"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    if w == 0 || h == 0 {
        return Err(format!("resize dimensions must be positive, got {w}x{h}"));
    }
    Ok((w, h))
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
