//! # MarbleFusion CLI
//!
//! Command-line interface for rendering marble beads.
//!
//! ## Usage
//!
//! ```bash
//! # Render the default recipe to bead.png
//! marblefusion render
//!
//! # Pick a style and palette
//! marblefusion render --style agate --color '#0f172a:80' --color '#f59e0b:20' --out agate.png
//!
//! # Render a saved recipe on a small canvas with a fresh seed
//! marblefusion render --recipe ocean.json --canvas thumbnail --random-seed
//!
//! # List styles, print the default recipe
//! marblefusion styles
//! marblefusion recipe > cosmic.json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use marblefusion::{
    BeadRecipe, CanvasConfig, ColorStop, FusionError, FusionParams, MarbleStyle, Palette,
    pattern::STYLES, render,
};

/// MarbleFusion - procedural marble bead renderer
#[derive(Parser, Debug)]
#[command(name = "marblefusion")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log render details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a bead to a PNG file
    Render(RenderArgs),

    /// List available marble styles
    Styles,

    /// Print a recipe as JSON
    Recipe {
        /// Randomize every parameter
        #[arg(long)]
        random: bool,
    },
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Start from a recipe JSON file instead of the default recipe
    #[arg(long, value_name = "FILE")]
    recipe: Option<PathBuf>,

    /// Color stop as HEX or HEX:WEIGHT, in gradient order (repeat, at least 2)
    #[arg(long = "color", value_name = "HEX[:WEIGHT]")]
    colors: Vec<String>,

    /// Marble style (classic, nebula, agate, fracture)
    #[arg(long)]
    style: Option<String>,

    /// Color mixing strength (0-100)
    #[arg(long)]
    turbulence: Option<f64>,

    /// Pattern zoom (5-100)
    #[arg(long)]
    scale: Option<f64>,

    /// Swirl intensity (0-100)
    #[arg(long)]
    distortion: Option<f64>,

    /// Grain and highlight dullness (0-100)
    #[arg(long)]
    roughness: Option<f64>,

    /// Noise seed
    #[arg(long, conflicts_with = "random_seed")]
    seed: Option<f64>,

    /// Draw a fresh seed in [0, 1000)
    #[arg(long)]
    random_seed: bool,

    /// Canvas preset (studio, preview, thumbnail)
    #[arg(long, default_value = "studio")]
    canvas: String,

    /// Canvas width in pixels (overrides the preset)
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the preset)
    #[arg(long)]
    height: Option<u32>,

    /// Worker threads (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Output PNG path
    #[arg(long, short, default_value = "bead.png")]
    out: PathBuf,

    /// Also write the final recipe as JSON
    #[arg(long, value_name = "FILE")]
    save_recipe: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), FusionError> {
    match cli.command {
        Commands::Render(args) => render_command(args),
        Commands::Styles => {
            println!("Available styles:");
            for name in STYLES {
                println!("  {}", name);
            }
            Ok(())
        }
        Commands::Recipe { random } => {
            let mut recipe = BeadRecipe::cosmic_drift();
            if random {
                recipe.name = "Random Fusion".to_string();
                recipe.params = FusionParams::random();
            }
            println!("{}", recipe.to_json_pretty()?);
            Ok(())
        }
    }
}

fn render_command(args: RenderArgs) -> Result<(), FusionError> {
    let recipe = build_recipe(&args)?;
    let canvas = build_canvas(&args)?;

    println!(
        "Rendering \"{}\" ({}x{})...",
        recipe.name, canvas.width, canvas.height
    );
    println!("  {}", recipe.params);

    let pool = render::build_thread_pool(args.threads)?;
    let result = pool.install(|| recipe.render(&canvas))?;

    result.pixels.save_png(&args.out)?;
    println!(
        "Saved to {} in {:.1}ms",
        args.out.display(),
        result.elapsed_ms()
    );

    if let Some(path) = &args.save_recipe {
        recipe.save(path)?;
        println!("Recipe written to {}", path.display());
    }
    Ok(())
}

/// Start from the recipe file (or default) and apply command-line overrides.
fn build_recipe(args: &RenderArgs) -> Result<BeadRecipe, FusionError> {
    let mut recipe = match &args.recipe {
        Some(path) => BeadRecipe::load(path)?,
        None => BeadRecipe::cosmic_drift(),
    };

    if !args.colors.is_empty() {
        let stops = args
            .colors
            .iter()
            .map(|c| ColorStop::parse(c))
            .collect::<Result<Vec<_>, _>>()?;
        recipe.colors = Palette::new(stops)?;
        recipe.name = "Custom Fusion".to_string();
    }

    let params = &mut recipe.params;
    if let Some(name) = &args.style {
        params.style = MarbleStyle::from_name(name).ok_or_else(|| {
            FusionError::invalid_parameter(format!(
                "Unknown style '{}'. Available: {}",
                name,
                STYLES.join(", ")
            ))
        })?;
    }
    if let Some(v) = args.turbulence {
        params.turbulence = v;
    }
    if let Some(v) = args.scale {
        params.scale = v;
    }
    if let Some(v) = args.distortion {
        params.distortion = v;
    }
    if let Some(v) = args.roughness {
        params.roughness = v;
    }
    if let Some(v) = args.seed {
        params.seed = v;
    }
    if args.random_seed {
        params.randomize_seed();
    }
    recipe.params = recipe.params.clamped();

    Ok(recipe)
}

fn build_canvas(args: &RenderArgs) -> Result<CanvasConfig, FusionError> {
    let mut canvas = CanvasConfig::by_name(&args.canvas).ok_or_else(|| {
        FusionError::invalid_parameter(format!(
            "Unknown canvas '{}'. Available: studio, preview, thumbnail",
            args.canvas
        ))
    })?;
    if let Some(width) = args.width {
        canvas.width = width;
    }
    if let Some(height) = args.height {
        canvas.height = height;
    }
    Ok(canvas)
}
