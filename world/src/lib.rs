#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Map assembly pipeline and the built-in arena roster.
//!
//! [`assemble`] sequences the pure stages in their producer/consumer
//! order (layout author, auto-tile resolver, front-face deriver, ground
//! synthesizer, ground patch) and packages the finished layers into an
//! [`ArenaMap`]. Every input that shapes the output (seeds, obstacle
//! variants, spawn configuration) is pinned by the roster so repeated runs
//! produce byte-identical artifacts.

use arena_forge_core::{
    catalog::{ConfigError, ObstaclePalette, TileCatalog},
    rules::RuleTable,
    CellCoord, GridDims, PixelPoint, SpawnSpec, TileGrid, TileRect, TILE_EMPTY,
};
use arena_forge_system_layout::ArenaKind;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Grid width shared by every built-in arena.
pub const ARENA_COLUMNS: u32 = 50;
/// Grid height shared by every built-in arena.
pub const ARENA_ROWS: u32 = 38;

const IVY_GROUND_SEED: u64 = 100;
const STONE_GROUND_SEED: u64 = 200;
const TIMBER_GROUND_SEED: u64 = 300;

const IVY_OBSTACLE_SEED: u64 = 0x6b8f_02e1_559c_ad10;
const STONE_OBSTACLE_SEED: u64 = 0x1d34_77ab_90fe_2264;
const TIMBER_OBSTACLE_SEED: u64 = 0xc05a_1e92_3b48_f7d3;

/// Everything needed to assemble one arena deterministically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaSpec {
    kind: ArenaKind,
    dims: GridDims,
    ground_seed: u64,
    obstacle_seed: u64,
    spawns: Vec<SpawnSpec>,
}

impl ArenaSpec {
    /// Creates a new arena specification.
    #[must_use]
    pub fn new(
        kind: ArenaKind,
        dims: GridDims,
        ground_seed: u64,
        obstacle_seed: u64,
        spawns: Vec<SpawnSpec>,
    ) -> Self {
        Self {
            kind,
            dims,
            ground_seed,
            obstacle_seed,
            spawns,
        }
    }

    /// Arena layout the spec authors.
    #[must_use]
    pub const fn kind(&self) -> ArenaKind {
        self.kind
    }

    /// Grid dimensions of the map.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Seed driving the ground synthesizer.
    #[must_use]
    pub const fn ground_seed(&self) -> u64 {
        self.ground_seed
    }

    /// Seed driving obstacle variant selection.
    #[must_use]
    pub const fn obstacle_seed(&self) -> u64 {
        self.obstacle_seed
    }

    /// Declared spawn roles for the map.
    #[must_use]
    pub fn spawns(&self) -> &[SpawnSpec] {
        &self.spawns
    }
}

/// A fully assembled map: three layers plus the spawn configuration the
/// validators check it against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaMap {
    slug: String,
    display_name: String,
    theme_name: String,
    dims: GridDims,
    ground: TileGrid,
    wall_fronts: TileGrid,
    walls: TileGrid,
    spawns: Vec<SpawnSpec>,
}

impl ArenaMap {
    /// File-system friendly map identifier.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Human-readable map name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Name of the theme the walls resolved into.
    #[must_use]
    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    /// Grid dimensions of every layer.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Ground layer; every cell holds a floor or decoration id.
    #[must_use]
    pub const fn ground(&self) -> &TileGrid {
        &self.ground
    }

    /// Front-face layer derived from the walls.
    #[must_use]
    pub const fn wall_fronts(&self) -> &TileGrid {
        &self.wall_fronts
    }

    /// Resolved walls layer.
    #[must_use]
    pub const fn walls(&self) -> &TileGrid {
        &self.walls
    }

    /// Declared spawn roles.
    #[must_use]
    pub fn spawns(&self) -> &[SpawnSpec] {
        &self.spawns
    }
}

/// Picks one obstacle variant per tier from the catalog's band.
///
/// The draw is the only randomness a layout author ever observes, and it
/// is resolved here, outside the author, from its own pinned seed.
#[must_use]
pub fn pick_obstacles(catalog: &TileCatalog, seed: u64) -> ObstaclePalette {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let band = catalog.obstacles();
    let heavy = rng.gen_range(band.heavy().first()..=band.heavy().last());
    let medium = rng.gen_range(band.medium().first()..=band.medium().last());
    let light = rng.gen_range(band.light().first()..=band.light().last());
    ObstaclePalette::new(heavy, medium, light)
}

/// Runs the full assembly pipeline for one arena.
///
/// Fails only on configuration defects (an arena naming an unregistered
/// theme); the stages themselves are total.
pub fn assemble(
    spec: &ArenaSpec,
    catalog: &TileCatalog,
    rules: &RuleTable,
) -> Result<ArenaMap, ConfigError> {
    let theme = catalog.theme(spec.kind().theme_name())?.clone();
    let palette = pick_obstacles(catalog, spec.obstacle_seed());

    let mut layout = TileGrid::new(spec.dims());
    spec.kind().author(&mut layout, &palette);

    let walls = arena_forge_system_autotile::resolve(&layout, rules, &theme, catalog);
    let wall_fronts = arena_forge_system_frontface::derive(&walls, catalog);

    let mut ground =
        arena_forge_system_ground::synthesize(spec.dims(), &theme, spec.ground_seed());
    patch_ground(&mut ground, &walls, &wall_fronts, theme.primary_floor());

    Ok(ArenaMap {
        slug: spec.kind().slug().to_owned(),
        display_name: spec.kind().display_name().to_owned(),
        theme_name: theme.name().to_owned(),
        dims: spec.dims(),
        ground,
        wall_fronts,
        walls,
        spawns: spec.spawns().to_vec(),
    })
}

/// Forces the canonical floor id underneath every wall and front cell so
/// nothing busy shows through transparent sprite regions.
fn patch_ground(ground: &mut TileGrid, walls: &TileGrid, fronts: &TileGrid, floor: i32) {
    let cells = ground.cells_mut();
    for (index, cell) in cells.iter_mut().enumerate() {
        let covered = walls.cells().get(index).copied().unwrap_or(TILE_EMPTY) != TILE_EMPTY
            || fronts.cells().get(index).copied().unwrap_or(TILE_EMPTY) != TILE_EMPTY;
        if covered {
            *cell = floor;
        }
    }
}

fn spawn(role: &str, column: u32, row: u32, search: TileRect) -> SpawnSpec {
    // Targets are authored at tile centers, 32 px per tile.
    SpawnSpec::new(role, PixelPoint::new(column * 32 + 16, row * 32 + 16), search)
}

/// The shippable arena roster with pinned seeds and spawn configuration.
#[must_use]
pub fn builtin_roster() -> Vec<ArenaSpec> {
    let dims = GridDims::new(ARENA_COLUMNS, ARENA_ROWS);
    vec![
        ArenaSpec::new(
            ArenaKind::IvyCourt,
            dims,
            IVY_GROUND_SEED,
            IVY_OBSTACLE_SEED,
            vec![
                spawn(
                    "attacker",
                    26,
                    18,
                    TileRect::new(CellCoord::new(20, 15), CellCoord::new(30, 22)),
                ),
                spawn(
                    "defender_north",
                    20,
                    5,
                    TileRect::new(CellCoord::new(16, 2), CellCoord::new(24, 8)),
                ),
                spawn(
                    "defender_south",
                    29,
                    32,
                    TileRect::new(CellCoord::new(25, 29), CellCoord::new(33, 35)),
                ),
            ],
        ),
        ArenaSpec::new(
            ArenaKind::StoneKeep,
            dims,
            STONE_GROUND_SEED,
            STONE_OBSTACLE_SEED,
            vec![
                spawn(
                    "attacker",
                    25,
                    12,
                    TileRect::new(CellCoord::new(20, 11), CellCoord::new(29, 13)),
                ),
                spawn(
                    "defender_west",
                    8,
                    5,
                    TileRect::new(CellCoord::new(3, 3), CellCoord::new(12, 8)),
                ),
                spawn(
                    "defender_east",
                    41,
                    32,
                    TileRect::new(CellCoord::new(37, 29), CellCoord::new(45, 34)),
                ),
            ],
        ),
        ArenaSpec::new(
            ArenaKind::TimberRow,
            dims,
            TIMBER_GROUND_SEED,
            TIMBER_OBSTACLE_SEED,
            vec![
                spawn(
                    "attacker",
                    25,
                    19,
                    TileRect::new(CellCoord::new(21, 17), CellCoord::new(28, 20)),
                ),
                spawn(
                    "defender_northwest",
                    15,
                    10,
                    TileRect::new(CellCoord::new(13, 8), CellCoord::new(18, 12)),
                ),
                spawn(
                    "defender_southeast",
                    34,
                    27,
                    TileRect::new(CellCoord::new(31, 25), CellCoord::new(36, 30)),
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{builtin_roster, pick_obstacles};
    use arena_forge_core::catalog::TileCatalog;

    #[test]
    fn roster_names_and_themes_are_distinct() {
        let roster = builtin_roster();
        assert_eq!(roster.len(), 3);

        let slugs: std::collections::BTreeSet<_> =
            roster.iter().map(|spec| spec.kind().slug()).collect();
        assert_eq!(slugs.len(), 3);

        for spec in &roster {
            assert_eq!(spec.spawns().len(), 3, "each arena declares three roles");
        }
    }

    #[test]
    fn obstacle_picks_are_deterministic_and_in_band() {
        let catalog = TileCatalog::standard();
        let first = pick_obstacles(&catalog, 7);
        let second = pick_obstacles(&catalog, 7);
        assert_eq!(first, second);

        let band = catalog.obstacles();
        assert!(band.heavy().contains(first.heavy()));
        assert!(band.medium().contains(first.medium()));
        assert!(band.light().contains(first.light()));
    }
}
