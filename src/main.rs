//! Tile Symmetry Tool
//!
//! Prints the cube rotation group and the face transform group, and expands
//! the built-in tilesets into their distinct placements and adjacencies.

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use tilesym::{
    presets, report, CompatibilityIndex, TileResult, TileVariants, Tileset, Transform3D,
    TransformSet, Transformation2D,
};

/// Inspects cube tile symmetries for tiled 3D wave function collapse.
#[derive(Parser)]
#[command(name = "tilesym")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the 24 cube rotations with their face images and Euler angles.
    Rotations,
    /// Print the composition table of the 8 face transforms.
    Faces,
    /// List the distinct placements of every tile in a tileset.
    Variants {
        #[arg(long, value_enum, default_value_t = Preset::Pipes)]
        preset: Preset,
    },
    /// Count the compatible placement pairs across each side.
    Adjacency {
        #[arg(long, value_enum, default_value_t = Preset::Pipes)]
        preset: Preset,
    },
    /// Validate a tileset and the group tables.
    Check {
        #[arg(long, value_enum, default_value_t = Preset::Pipes)]
        preset: Preset,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// One fully symmetric cube.
    Cube,
    /// Empty, straight and elbow pipe pieces.
    Pipes,
}

impl Preset {
    fn build(self) -> TileResult<Tileset> {
        match self {
            Preset::Cube => presets::uniform_cube(),
            Preset::Pipes => presets::pipes(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let result = match cli.command.unwrap_or(Command::Rotations) {
        Command::Rotations => {
            print!("{}", report::format_rotation_table());
            Ok(())
        }
        Command::Faces => {
            print!("{}", report::format_cayley_table());
            Ok(())
        }
        Command::Variants { preset } => run_variants(preset),
        Command::Adjacency { preset } => run_adjacency(preset),
        Command::Check { preset } => run_check(preset),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Prints every distinct placement of the preset's tiles.
fn run_variants(preset: Preset) -> TileResult<()> {
    let tileset = preset.build()?;
    let variants = TileVariants::build(&tileset)?;
    print!("{}", report::format_variants(&tileset, &variants));
    println!("{} variants of {} tiles", variants.len(), tileset.tiles.len());
    Ok(())
}

/// Prints the per-side pair counts of the preset's placements.
fn run_adjacency(preset: Preset) -> TileResult<()> {
    let tileset = preset.build()?;
    let variants = TileVariants::build(&tileset)?;
    let index = CompatibilityIndex::build(&tileset, &variants)?;
    print!("{}", report::format_adjacency(&index));
    Ok(())
}

/// Validates the preset and re-checks the group laws the tables rely on.
fn run_check(preset: Preset) -> TileResult<()> {
    let tileset = preset.build()?;
    tileset.validate()?;

    let mut problems = 0;
    for (index, tile) in tileset.tiles.iter().enumerate() {
        if !tile.symmetries().is_group() {
            warn!(
                "tile {index} '{}' has symmetries that are not closed under composition",
                tile.prototype
            );
            problems += 1;
        }
    }

    if !TransformSet::ALL.is_group() {
        warn!("the 48 cube transforms are not closed under composition");
        problems += 1;
    }
    for transform in Transform3D::ALL {
        if !transform.then(transform.inverse()).is_identity() {
            warn!("{transform} does not compose with its inverse to the identity");
            problems += 1;
        }
    }
    for face in Transformation2D::ALL {
        if face.then(face.inverse()) != Transformation2D::Identity {
            warn!("{face} does not compose with its inverse to the identity");
            problems += 1;
        }
    }

    info!("checked {} tiles and {} blueprints", tileset.tiles.len(), tileset.faces.len());
    if problems == 0 {
        println!("OK: {} tiles, {} blueprints", tileset.tiles.len(), tileset.faces.len());
    } else {
        println!("{} problems found", problems);
    }
    Ok(())
}
