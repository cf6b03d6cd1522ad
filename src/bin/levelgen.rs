use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use levelgen::config::SceneConfig;
use levelgen::random::{resolve_seed, RngRegistry};
use levelgen::scene::{default_scene, Level, Rngg, TerrainSheet};
use levelgen::tiles::TilePlacement;
use levelgen::{Error, Result, TileType};

#[derive(Parser)]
#[command(name = "levelgen")]
#[command(about = "Generate deterministic tile maps and inspect their random streams")]
struct Cli {
    /// Scene configuration file
    #[arg(long, global = true, default_value = "assets/level.json")]
    config: PathBuf,
    /// Master seed, overriding the configured one
    #[arg(long, global = true)]
    seed: Option<i64>,
    /// URL-style query string; its `seed` wins over everything else
    #[arg(long, global = true)]
    query: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the level map and print it with its checksum
    Generate {
        #[arg(long, value_enum, default_value = "ascii")]
        format: Format,
        /// Also run startup systems and report spawned entities
        #[arg(long)]
        spawn: bool,
    },
    /// Match terrain sheet rules against the generated map
    Tiles {
        /// Print every placement as JSON
        #[arg(long)]
        placements: bool,
    },
    /// Print draws from a named random stream
    Roll {
        #[arg(long, default_value = "mobRng")]
        name: String,
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Print raw 32-bit values instead of floats
        #[arg(long)]
        bits: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(cli: &Cli) -> Result<SceneConfig> {
    let mut config = SceneConfig::load(&cli.config)?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn generate(cli: &Cli, format: Format, spawn: bool) -> Result<()> {
    let config = load_config(cli)?;
    let mut scene = default_scene(&config, cli.query.as_deref());
    if spawn {
        scene.start()?;
    } else {
        scene.resources_mut().init_all()?;
    }
    let seed = scene.resource::<Rngg>()?.registry()?.seed();
    let map = scene.resource::<Level>()?.map()?;
    match format {
        Format::Ascii => {
            print!("{}", map.render_ascii());
            println!("seed: {}", seed);
            println!("checksum: {:08x}", map.checksum());
            if map.unclassified() > 0 {
                println!("unclassified: {}", map.unclassified());
            }
        }
        Format::Json => {
            let out = json!({
                "seed": seed,
                "gridWidth": map.grid_width(),
                "gridHeight": map.grid_height(),
                "checksum": format!("{:08x}", map.checksum()),
                "unclassified": map.unclassified(),
                "rows": map.rows(),
            });
            println!("{}", serde_json::to_string_pretty(&out).map_err(|source| Error::Json {
                path: PathBuf::from("<stdout>"),
                source,
            })?);
        }
    }
    if spawn {
        println!("entities: {}", scene.world().len());
    }
    Ok(())
}

fn tiles(cli: &Cli, placements: bool) -> Result<()> {
    let config = load_config(cli)?;
    let mut scene = default_scene(&config, cli.query.as_deref());
    scene.resources_mut().init_all()?;
    let map = scene.resource::<Level>()?.map()?;
    let matcher = scene.resource::<TerrainSheet>()?.matcher()?;
    let matches = matcher.match_map(map);

    let drawable = map.cells().filter(|(_, _, c)| c.cell_type != TileType::None).count();
    let tied = matches.iter().filter(|m| m.alternatives > 1).count();
    println!("rules: {}", matcher.rules().len());
    println!("drawable cells: {}", drawable);
    println!("matched: {}", matches.len());
    println!("unmatched: {}", drawable - matches.len());
    println!("with alternatives: {}", tied);

    if placements {
        let all: Vec<TilePlacement> = matches.iter().map(|m| TilePlacement::from_match(map, m)).collect();
        let text = serde_json::to_string_pretty(&all).map_err(|source| Error::Json {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
        println!("{}", text);
    }
    Ok(())
}

fn roll(cli: &Cli, name: &str, count: usize, bits: bool) -> Result<()> {
    // The config is optional here; a missing file just means no configured seed
    let config_seed = match SceneConfig::load(&cli.config) {
        Ok(config) => config.seed,
        Err(e) => {
            tracing::debug!(error = %e, "no usable config, seeding without it");
            None
        }
    };
    let source = resolve_seed(cli.query.as_deref(), cli.seed.or(config_seed));
    let mut rngg = RngRegistry::from_source(source);
    let rng = rngg.named_rng(name);
    for _ in 0..count {
        if bits {
            println!("{}", rng.roll_bits());
        } else {
            println!("{:.9}", rng.roll());
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Generate { format, spawn } => generate(cli, *format, *spawn),
        Commands::Tiles { placements } => tiles(cli, *placements),
        Commands::Roll { name, count, bits } => roll(cli, name, *count, *bits),
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "levelgen failed");
            ExitCode::FAILURE
        }
    }
}
