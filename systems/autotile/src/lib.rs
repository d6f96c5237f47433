#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Auto-tile resolver rewriting wall sentinels into themed atlas ids.
//!
//! Resolution is two-phase: every sentinel's neighbor signature is computed
//! against the immutable input grid and collected into a mapping, and only
//! then is the mapping applied. A single-pass raster rewrite would let a
//! cell's resolution observe an already-rewritten neighbor, making the
//! output depend on traversal order; the snapshot makes traversal order
//! irrelevant.

use arena_forge_core::{
    catalog::{ThemeConfig, TileCatalog},
    is_wall_sentinel,
    rules::{NeighborSignature, RuleTable},
    CellCoord, TileGrid,
};

/// Computes the 8-neighbor occupancy signature for one cell.
///
/// A neighbor is solid when it is a wall sentinel or an obstacle id;
/// out-of-bounds neighbors count as solid so border walls resolve as if
/// the map continued outward.
#[must_use]
pub fn signature_at(grid: &TileGrid, cell: CellCoord, catalog: &TileCatalog) -> NeighborSignature {
    NeighborSignature::from_fn(|dir| {
        let (delta_column, delta_row) = dir.offset();
        match cell.offset(delta_column, delta_row) {
            None => true,
            Some(neighbor) => match grid.get(neighbor) {
                None => true,
                Some(value) => is_wall_sentinel(value) || catalog.is_obstacle(value),
            },
        }
    })
}

/// Atlas id produced for a sentinel matching `sprite_index`, or the
/// theme's isolated default when no rule matched.
#[must_use]
pub const fn resolved_id(sprite_index: Option<u32>, theme: &ThemeConfig) -> i32 {
    match sprite_index {
        Some(sprite) => sprite as i32 + 1 + theme.wall_offset(),
        None => 1 + theme.wall_offset(),
    }
}

/// Resolves every wall sentinel in the grid to a themed atlas id.
///
/// Non-sentinel cells (obstacles and open cells) pass through untouched.
/// The returned grid contains no sentinels.
#[must_use]
pub fn resolve(
    grid: &TileGrid,
    rules: &RuleTable,
    theme: &ThemeConfig,
    catalog: &TileCatalog,
) -> TileGrid {
    let mut resolutions: Vec<(usize, i32)> = Vec::new();

    for cell in grid.dims().iter_coords() {
        let Some(value) = grid.get(cell) else {
            continue;
        };
        if !is_wall_sentinel(value) {
            continue;
        }

        let signature = signature_at(grid, cell, catalog);
        let id = resolved_id(rules.first_match(&signature), theme);
        if let Some(index) = grid.dims().index_of(cell) {
            resolutions.push((index, id));
        }
    }

    let mut resolved = grid.clone();
    let cells = resolved.cells_mut();
    for (index, id) in resolutions {
        cells[index] = id;
    }
    resolved
}
