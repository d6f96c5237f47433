#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver that assembles, validates, and exports the arena
//! roster.
//!
//! The rule table and tile catalog are parsed and checked before any grid
//! work begins, so configuration defects fail the run immediately.
//! Validation failures do not: artifacts are still written so a defective
//! map can be inspected, and every failure across the run is enumerated
//! before the process exits non-zero.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use arena_forge_core::{
    catalog::TileCatalog,
    rules::{AutoTileRule, RuleTable},
    TILE_EMPTY,
};
use arena_forge_export::{tiled_document, to_json_pretty};
use arena_forge_system_validation::{
    check_connectivity, check_perimeter, check_spawn, MapReport, ValidationReport,
};
use arena_forge_world::{assemble, builtin_roster};
use clap::{Parser, Subcommand};

const DEFAULT_RULES: &str = include_str!("../data/autotile_rules.json");

/// Arena Forge: tile-arena map generation and validation.
#[derive(Parser)]
#[command(name = "arena-forge")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble every roster arena, validate it, and write Tiled JSON
    /// artifacts.
    Generate {
        /// Directory the map artifacts are written into.
        #[arg(long, default_value = "maps")]
        out: PathBuf,
        /// Auto-tile rule table overriding the built-in one.
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Clearance buffer radius used by the spawn validator.
        #[arg(long, default_value_t = 1)]
        buffer: u32,
    },
    /// Run the full pipeline and validators without writing artifacts.
    Validate {
        /// Auto-tile rule table overriding the built-in one.
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Clearance buffer radius used by the spawn validator.
        #[arg(long, default_value_t = 1)]
        buffer: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate { out, rules, buffer } => {
            run(Some(out.as_path()), rules.as_deref(), buffer)
        }
        Command::Validate { rules, buffer } => run(None, rules.as_deref(), buffer),
    }
}

/// Parses and checks the rule table before any grid is touched.
fn load_rules(path: Option<&Path>, catalog: &TileCatalog) -> anyhow::Result<RuleTable> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read rule table {}", path.display()))?,
        None => DEFAULT_RULES.to_owned(),
    };
    let rules: Vec<AutoTileRule> =
        serde_json::from_str(&text).context("malformed auto-tile rule table")?;
    RuleTable::new(rules, catalog.tiles_per_theme()).context("invalid auto-tile rule table")
}

fn run(out: Option<&Path>, rules_path: Option<&Path>, buffer: u32) -> anyhow::Result<()> {
    let catalog = TileCatalog::standard();
    let rules = load_rules(rules_path, &catalog)?;

    if let Some(out) = out {
        fs::create_dir_all(out)
            .with_context(|| format!("failed to create output directory {}", out.display()))?;
    }

    let mut report = ValidationReport::new();

    for spec in builtin_roster() {
        let map = assemble(&spec, &catalog, &rules)?;

        let walls = map.walls().cells();
        let wall_count = walls
            .iter()
            .filter(|&&value| catalog.is_wall_canopy(value))
            .count();
        let obstacle_count = walls
            .iter()
            .filter(|&&value| catalog.is_obstacle(value))
            .count();
        let open_count = walls.iter().filter(|&&value| value == TILE_EMPTY).count();

        let spawns = map
            .spawns()
            .iter()
            .map(|spawn| check_spawn(map.walls(), &catalog, spawn, buffer))
            .collect();
        let map_report = MapReport::new(
            map.slug(),
            check_connectivity(map.walls()),
            check_perimeter(map.walls()),
            spawns,
        );

        println!(
            "{} ({}x{}): walls={wall_count}, obstacles={obstacle_count}, open={open_count} [{}]",
            map.slug(),
            map.dims().columns(),
            map.dims().rows(),
            if map_report.passed() { "ok" } else { "FAILED" },
        );

        if let Some(out) = out {
            let artifact = out.join(format!("{}.json", map.slug()));
            let document = tiled_document(&map, &catalog);
            fs::write(&artifact, to_json_pretty(&document)?)
                .with_context(|| format!("failed to write {}", artifact.display()))?;
            println!("  wrote {}", artifact.display());
        }

        report.push(map_report);
    }

    if !report.passed() {
        eprintln!("{report}");
        bail!("map validation failed");
    }

    println!("{report}");
    Ok(())
}
