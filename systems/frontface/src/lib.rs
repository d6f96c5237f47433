#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Front-face layer deriver.
//!
//! Walls are drawn as top-down canopies; to fake depth, a south-facing
//! front tile is placed one row below every canopy whose southern neighbor
//! is open. A canopy directly above another solid cell produces nothing;
//! the cell below it is occluded by that cell's own canopy. The derivation
//! reads only the resolved walls layer and emits a fresh layer; the ground
//! layer is never consulted.

use arena_forge_core::{catalog::TileCatalog, CellCoord, TileGrid, TILE_EMPTY};

/// Derives the `WallFronts` layer from the resolved walls layer.
///
/// Wall canopies gain the catalog's wall-front offset, obstacles the
/// obstacle-front offset; ids in neither band produce no front face.
#[must_use]
pub fn derive(walls: &TileGrid, catalog: &TileCatalog) -> TileGrid {
    let mut fronts = TileGrid::new(walls.dims());

    for cell in walls.dims().iter_coords() {
        let Some(id) = walls.get(cell) else {
            continue;
        };
        if id == TILE_EMPTY {
            continue;
        }
        let Some(front) = catalog.front_id(id) else {
            continue;
        };

        let below = CellCoord::new(cell.column(), cell.row() + 1);
        if walls.get(below) == Some(TILE_EMPTY) {
            fronts.set(below, front);
        }
    }

    fronts
}

#[cfg(test)]
mod tests {
    use super::derive;
    use arena_forge_core::{catalog::TileCatalog, CellCoord, GridDims, TileGrid, TILE_EMPTY};

    #[test]
    fn canopy_over_open_cell_gains_a_front_face() {
        let catalog = TileCatalog::standard();
        let mut walls = TileGrid::new(GridDims::new(4, 4));
        walls.set(CellCoord::new(1, 1), 5);

        let fronts = derive(&walls, &catalog);
        assert_eq!(fronts.get(CellCoord::new(1, 2)), Some(5 + 48));
        assert_eq!(fronts.get(CellCoord::new(1, 1)), Some(0));
    }

    #[test]
    fn obstacles_use_their_own_front_offset() {
        let catalog = TileCatalog::standard();
        let mut walls = TileGrid::new(GridDims::new(4, 4));
        walls.set(CellCoord::new(2, 0), 293);

        let fronts = derive(&walls, &catalog);
        assert_eq!(fronts.get(CellCoord::new(2, 1)), Some(293 + 8));
    }

    #[test]
    fn occupied_southern_neighbors_suppress_the_front() {
        let catalog = TileCatalog::standard();
        let mut walls = TileGrid::new(GridDims::new(4, 5));
        walls.set(CellCoord::new(1, 1), 5);
        walls.set(CellCoord::new(1, 2), 6);

        let fronts = derive(&walls, &catalog);
        assert_eq!(
            fronts.get(CellCoord::new(1, 2)),
            Some(0),
            "the upper canopy is occluded by the one below it",
        );
        assert_eq!(
            fronts.get(CellCoord::new(1, 3)),
            Some(6 + 48),
            "only the bottom canopy of the stack projects a front",
        );
    }

    #[test]
    fn bottom_row_canopies_emit_nothing() {
        let catalog = TileCatalog::standard();
        let mut walls = TileGrid::new(GridDims::new(3, 3));
        walls.set(CellCoord::new(1, 2), 5);

        let fronts = derive(&walls, &catalog);
        assert!(fronts.cells().iter().all(|&value| value == TILE_EMPTY));
    }

    #[test]
    fn unknown_id_ranges_produce_no_front() {
        let catalog = TileCatalog::standard();
        let mut walls = TileGrid::new(GridDims::new(3, 3));
        // Floor and front-face ids can never appear in a walls layer the
        // pipeline produced, but a hand-edited layer might carry them.
        walls.set(CellCoord::new(1, 0), 305);
        walls.set(CellCoord::new(0, 0), 60);

        let fronts = derive(&walls, &catalog);
        assert!(fronts.cells().iter().all(|&value| value == TILE_EMPTY));
    }

    #[test]
    fn fronts_appear_only_below_solid_cells_over_open_ground() {
        let catalog = TileCatalog::standard();
        let dims = GridDims::new(10, 8);
        let mut walls = TileGrid::new(dims);
        for cell in dims.iter_coords() {
            if (cell.column() * 5 + cell.row() * 3) % 4 == 0 {
                walls.set(cell, 17);
            }
        }

        let fronts = derive(&walls, &catalog);
        for cell in dims.iter_coords() {
            let front = fronts.get(cell).expect("in bounds");
            if front == TILE_EMPTY {
                continue;
            }
            let above = cell
                .offset(0, -1)
                .and_then(|above| walls.get(above))
                .unwrap_or(TILE_EMPTY);
            assert_ne!(above, TILE_EMPTY, "front at {cell:?} has no canopy above");
            assert_eq!(
                walls.get(cell),
                Some(TILE_EMPTY),
                "front at {cell:?} overlaps a solid cell",
            );
        }
    }
}
