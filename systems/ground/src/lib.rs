#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded ground-layer synthesizer.
//!
//! Fills every cell of the floor layer from a theme's weighted palette
//! using one ChaCha8 stream seeded per map, so identical
//! `(dims, theme, seed)` inputs reproduce identical layers on every host.
//! The synthesizer is unaware of the walls layer; patching the canonical
//! floor id underneath walls is the assembly pipeline's job.

use arena_forge_core::{catalog::ThemeConfig, GridDims, TileGrid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const PRIMARY_WEIGHT: f64 = 0.60;
const SECONDARY_WEIGHT: f64 = 0.20;
const TERTIARY_WEIGHT: f64 = 0.10;
const QUATERNARY_WEIGHT: f64 = 0.05;

/// Synthesizes a fully populated ground layer.
///
/// Per cell: 60% primary floor, 20% secondary, 10% tertiary, 5%
/// quaternary, 5% a uniformly chosen decoration id. No cell is ever left
/// empty.
#[must_use]
pub fn synthesize(dims: GridDims, theme: &ThemeConfig, seed: u64) -> TileGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let floors = theme.floor_ids();
    let decos = theme.deco_ids();

    let mut ground = TileGrid::new(dims);
    for cell in ground.cells_mut() {
        let roll: f64 = rng.gen();
        *cell = if roll < PRIMARY_WEIGHT {
            floors[0]
        } else if roll < PRIMARY_WEIGHT + SECONDARY_WEIGHT {
            floors[1]
        } else if roll < PRIMARY_WEIGHT + SECONDARY_WEIGHT + TERTIARY_WEIGHT {
            floors[2]
        } else if roll < PRIMARY_WEIGHT + SECONDARY_WEIGHT + TERTIARY_WEIGHT + QUATERNARY_WEIGHT {
            floors[3]
        } else {
            decos[rng.gen_range(0..decos.len())]
        };
    }
    ground
}

#[cfg(test)]
mod tests {
    use super::synthesize;
    use arena_forge_core::{catalog::TileCatalog, GridDims};

    #[test]
    fn every_cell_receives_a_palette_id() {
        let catalog = TileCatalog::standard();
        let theme = catalog.theme("ivy").expect("standard theme");
        let ground = synthesize(GridDims::new(50, 38), theme, 100);

        let floors = theme.floor_ids();
        let decos = theme.deco_ids();
        for &value in ground.cells() {
            assert!(
                floors.contains(&value) || decos.contains(&value),
                "cell value {value} is outside the theme palette",
            );
        }
    }

    #[test]
    fn primary_floor_dominates_the_distribution() {
        let catalog = TileCatalog::standard();
        let theme = catalog.theme("timber").expect("standard theme");
        let ground = synthesize(GridDims::new(100, 100), theme, 7);

        let primary = ground
            .cells()
            .iter()
            .filter(|&&value| value == theme.primary_floor())
            .count();
        let total = ground.cells().len();

        // 60% expected; a wide band keeps the test robust to stream drift.
        assert!(
            primary > total / 2,
            "primary floor covered only {primary} of {total} cells",
        );
    }
}
