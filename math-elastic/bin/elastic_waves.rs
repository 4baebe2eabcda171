use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use math_audio_elastic::{
    ElasticConfig, Material, PolarPlot2D, SphericalPlot3D, SymmetryClass, material,
};
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "elastic-waves",
    about = "Phase velocities, group velocities and symmetry classes of anisotropic solids"
)]
struct Cli {
    /// Catalog material name (use --list to see available materials)
    #[arg(long)]
    material: Option<String>,

    /// JSON file with {"matrix": [[...6 values...] x 6], "density": ...}
    #[arg(long, conflicts_with = "material")]
    input: Option<PathBuf>,

    /// Project the matrix onto this symmetry class first (name or index 0-6)
    #[arg(long)]
    symmetry: Option<String>,

    /// Quantity to compute
    #[arg(long, value_enum, default_value_t = Mode::Curves)]
    mode: Mode,

    /// JSON configuration file for plot sampling and scales
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the JSON result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// List catalog materials grouped by symmetry class and exit
    #[arg(long)]
    list: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// Detected symmetry class and the (projected) matrix
    Symmetry,
    /// Catalog name of the material, empty if unknown
    Classify,
    /// Polar curves in the XY, XZ and YZ planes
    Curves,
    /// Triangulated surfaces over the sphere
    Surfaces,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        for (class, names) in material::by_symmetry() {
            println!("{class}:");
            for name in names {
                println!("  {name}");
            }
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ElasticConfig::from_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => ElasticConfig::default(),
    };

    let mut solid = load_material(&cli, &config)?;
    if let Some(symmetry) = &cli.symmetry {
        let class: SymmetryClass = symmetry.parse()?;
        log::info!("projecting onto {class}");
        solid = solid.with_symmetry(class);
    }

    let start = Instant::now();
    let result = run(cli.mode, &solid, &config)?;
    log::info!("{:?} computed in {:.1?}", cli.mode, start.elapsed());

    let text = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    match &cli.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            log::info!("result written to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn load_material(cli: &Cli, config: &ElasticConfig) -> anyhow::Result<Material> {
    if let Some(path) = &cli.input {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let solid: Material = serde_json::from_str(&contents)
            .with_context(|| format!("parsing material from {}", path.display()))?;
        log::info!("loaded material from {}", path.display());
        return Ok(solid);
    }

    let Some(name) = cli.material.as_ref().or(config.default_material.as_ref()) else {
        bail!("no material given: use --material, --input or --list");
    };
    let entry = material::find(name)?;
    log::info!("using catalog material {}", entry.name);
    Ok(entry.material)
}

fn run(mode: Mode, solid: &Material, config: &ElasticConfig) -> anyhow::Result<Value> {
    let stiffness = solid.stiffness();
    let density = solid.density();
    let value = match mode {
        Mode::Symmetry => {
            let class = stiffness.detect();
            json!({
                "symmetry": class.name(),
                "index": class.index(),
                "matrix": stiffness.rows(),
                "positive_definite": stiffness.is_positive_definite(),
            })
        }
        Mode::Classify => {
            let name = material::classify(stiffness, density)
                .map(|entry| entry.name)
                .unwrap_or_default();
            json!({ "material": name })
        }
        Mode::Curves => {
            let curves = PolarPlot2D::new(&config.plot).evaluate(stiffness, density)?;
            serde_json::to_value(curves)?
        }
        Mode::Surfaces => {
            let mesh = SphericalPlot3D::new(&config.plot).evaluate(stiffness, density)?;
            serde_json::to_value(mesh)?
        }
    };
    Ok(value)
}
