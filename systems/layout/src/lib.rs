#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic layout authors that stamp wall sentinels and obstacle ids
//! onto a blank walls grid, one author per arena.
//!
//! Every author is a pure function of the grid dimensions and the obstacle
//! palette chosen by the caller; no randomness happens here. Authors give
//! no connectivity guarantee; the validation system is the gate that
//! catches a sealed pocket before a map ships.

use arena_forge_core::{catalog::ObstaclePalette, CellCoord, TileGrid, WALL_SENTINEL};

/// Built-in arenas the roster can author.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArenaKind {
    /// Open garden: long corridors, corner clusters, a wide central
    /// clearing. Favors fast flanking play.
    IvyCourt,
    /// Chambered fortress: four corner rooms and a central chamber joined
    /// by narrow doorways. Favors defensive positioning.
    StoneKeep,
    /// Symmetric yard: center-cross spines with diagonal baffles and
    /// breakable barriers at the spine gaps. Balanced.
    TimberRow,
}

impl ArenaKind {
    /// Every built-in arena in roster order.
    pub const ALL: [Self; 3] = [Self::IvyCourt, Self::StoneKeep, Self::TimberRow];

    /// File-system friendly identifier used for artifact names.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::IvyCourt => "ivy_court",
            Self::StoneKeep => "stone_keep",
            Self::TimberRow => "timber_row",
        }
    }

    /// Human-readable arena name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::IvyCourt => "Ivy Court",
            Self::StoneKeep => "Stone Keep",
            Self::TimberRow => "Timber Row",
        }
    }

    /// Name of the catalog theme the arena resolves into.
    #[must_use]
    pub const fn theme_name(&self) -> &'static str {
        match self {
            Self::IvyCourt => "ivy",
            Self::StoneKeep => "stone",
            Self::TimberRow => "timber",
        }
    }

    /// Stamps the arena's perimeter and interior pattern onto the grid.
    pub fn author(&self, grid: &mut TileGrid, obstacles: &ObstaclePalette) {
        stamp_perimeter(grid);
        match self {
            Self::IvyCourt => ivy_court(grid, obstacles),
            Self::StoneKeep => stone_keep(grid, obstacles),
            Self::TimberRow => timber_row(grid, obstacles),
        }
    }
}

/// Stamps a one-tile sentinel border around the full grid.
fn stamp_perimeter(grid: &mut TileGrid) {
    let columns = grid.dims().columns();
    let rows = grid.dims().rows();
    for column in 0..columns {
        grid.set(CellCoord::new(column, 0), WALL_SENTINEL);
        grid.set(CellCoord::new(column, rows.saturating_sub(1)), WALL_SENTINEL);
    }
    for row in 0..rows {
        grid.set(CellCoord::new(0, row), WALL_SENTINEL);
        grid.set(CellCoord::new(columns.saturating_sub(1), row), WALL_SENTINEL);
    }
}

/// Writes one cell, ignoring coordinates outside the grid.
fn set(grid: &mut TileGrid, x: i32, y: i32, value: i32) {
    if x < 0 || y < 0 {
        return;
    }
    grid.set(CellCoord::new(x as u32, y as u32), value);
}

/// Fills an inclusive rectangle, clamped to the grid bounds.
fn fill_rect(grid: &mut TileGrid, x1: i32, y1: i32, x2: i32, y2: i32, value: i32) {
    for y in y1.max(0)..=y2 {
        for x in x1.max(0)..=x2 {
            set(grid, x, y, value);
        }
    }
}

/// Fills a horizontal run at row `y` from `x1` to `x2` inclusive.
fn h_line(grid: &mut TileGrid, x1: i32, x2: i32, y: i32, value: i32) {
    fill_rect(grid, x1, y, x2, y, value);
}

/// Fills a vertical run at column `x` from `y1` to `y2` inclusive.
fn v_line(grid: &mut TileGrid, x: i32, y1: i32, y2: i32, value: i32) {
    fill_rect(grid, x, y1, x, y2, value);
}

/// Ivy Court: a north-south corridor on the left third, an east-west
/// corridor through the middle, clusters in all four corners, and light
/// obstacles marking the corridor mouths.
fn ivy_court(grid: &mut TileGrid, obstacles: &ObstaclePalette) {
    // North-south corridor walls, gap at rows 15-22.
    v_line(grid, 12, 2, 14, WALL_SENTINEL);
    v_line(grid, 13, 2, 14, WALL_SENTINEL);
    v_line(grid, 12, 23, 35, WALL_SENTINEL);
    v_line(grid, 13, 23, 35, WALL_SENTINEL);

    // East-west corridor walls, gap at columns 19-29.
    h_line(grid, 2, 18, 17, WALL_SENTINEL);
    h_line(grid, 2, 18, 18, WALL_SENTINEL);
    h_line(grid, 30, 47, 17, WALL_SENTINEL);
    h_line(grid, 30, 47, 18, WALL_SENTINEL);

    // Corner clusters, heavy anchors with medium skirts.
    fill_rect(grid, 3, 3, 6, 6, obstacles.heavy());
    fill_rect(grid, 3, 8, 5, 10, obstacles.medium());
    fill_rect(grid, 8, 3, 10, 5, obstacles.medium());

    fill_rect(grid, 43, 3, 46, 6, obstacles.heavy());
    fill_rect(grid, 43, 8, 45, 10, obstacles.medium());
    fill_rect(grid, 39, 3, 41, 5, obstacles.medium());

    fill_rect(grid, 3, 31, 6, 34, obstacles.heavy());
    fill_rect(grid, 3, 27, 5, 29, obstacles.medium());
    fill_rect(grid, 8, 32, 10, 34, obstacles.medium());

    fill_rect(grid, 43, 31, 46, 34, obstacles.heavy());
    fill_rect(grid, 43, 27, 45, 29, obstacles.medium());
    fill_rect(grid, 39, 32, 41, 34, obstacles.medium());

    // Light obstacles at the corridor mouths.
    set(grid, 11, 15, obstacles.light());
    set(grid, 14, 15, obstacles.light());
    set(grid, 11, 22, obstacles.light());
    set(grid, 14, 22, obstacles.light());
    set(grid, 19, 16, obstacles.light());
    set(grid, 29, 16, obstacles.light());
    set(grid, 19, 19, obstacles.light());
    set(grid, 29, 19, obstacles.light());

    // Short wall stubs on the right third.
    fill_rect(grid, 35, 8, 37, 8, WALL_SENTINEL);
    fill_rect(grid, 35, 29, 37, 29, WALL_SENTINEL);

    // Medium cover near the central clearing.
    fill_rect(grid, 22, 10, 23, 11, obstacles.medium());
    fill_rect(grid, 26, 10, 27, 11, obstacles.medium());
    fill_rect(grid, 22, 26, 23, 27, obstacles.medium());
    fill_rect(grid, 26, 26, 27, 27, obstacles.medium());

    // Scattered light cover in the open quarters.
    set(grid, 17, 7, obstacles.light());
    set(grid, 32, 7, obstacles.light());
    set(grid, 17, 30, obstacles.light());
    set(grid, 32, 30, obstacles.light());
    set(grid, 24, 19, obstacles.light());
}

/// Stone Keep: a walled central chamber with four doorways, four corner
/// rooms with their own doorways, heavy obstacles guarding the chamber
/// mouths, and medium cover inside each room.
fn stone_keep(grid: &mut TileGrid, obstacles: &ObstaclePalette) {
    // Central chamber shell.
    h_line(grid, 18, 31, 14, WALL_SENTINEL);
    h_line(grid, 18, 31, 15, WALL_SENTINEL);
    h_line(grid, 18, 31, 22, WALL_SENTINEL);
    h_line(grid, 18, 31, 23, WALL_SENTINEL);
    v_line(grid, 18, 14, 23, WALL_SENTINEL);
    v_line(grid, 19, 14, 23, WALL_SENTINEL);
    v_line(grid, 30, 14, 23, WALL_SENTINEL);
    v_line(grid, 31, 14, 23, WALL_SENTINEL);

    // Chamber doorways, two tiles wide.
    fill_rect(grid, 23, 14, 26, 15, 0);
    fill_rect(grid, 23, 22, 26, 23, 0);
    fill_rect(grid, 18, 18, 19, 19, 0);
    fill_rect(grid, 30, 18, 31, 19, 0);

    // Top-left room.
    h_line(grid, 2, 14, 10, WALL_SENTINEL);
    h_line(grid, 2, 14, 11, WALL_SENTINEL);
    v_line(grid, 14, 2, 11, WALL_SENTINEL);
    v_line(grid, 15, 2, 11, WALL_SENTINEL);
    fill_rect(grid, 7, 10, 9, 11, 0);
    fill_rect(grid, 14, 5, 15, 7, 0);

    // Top-right room.
    h_line(grid, 35, 47, 10, WALL_SENTINEL);
    h_line(grid, 35, 47, 11, WALL_SENTINEL);
    v_line(grid, 34, 2, 11, WALL_SENTINEL);
    v_line(grid, 35, 2, 11, WALL_SENTINEL);
    fill_rect(grid, 40, 10, 42, 11, 0);
    fill_rect(grid, 34, 5, 35, 7, 0);

    // Bottom-left room.
    h_line(grid, 2, 14, 26, WALL_SENTINEL);
    h_line(grid, 2, 14, 27, WALL_SENTINEL);
    v_line(grid, 14, 26, 35, WALL_SENTINEL);
    v_line(grid, 15, 26, 35, WALL_SENTINEL);
    fill_rect(grid, 7, 26, 9, 27, 0);
    fill_rect(grid, 14, 30, 15, 32, 0);

    // Bottom-right room.
    h_line(grid, 35, 47, 26, WALL_SENTINEL);
    h_line(grid, 35, 47, 27, WALL_SENTINEL);
    v_line(grid, 34, 26, 35, WALL_SENTINEL);
    v_line(grid, 35, 26, 35, WALL_SENTINEL);
    fill_rect(grid, 40, 26, 42, 27, 0);
    fill_rect(grid, 34, 30, 35, 32, 0);

    // Heavy obstacles guarding the chamber doorways.
    set(grid, 22, 13, obstacles.heavy());
    set(grid, 27, 13, obstacles.heavy());
    set(grid, 22, 24, obstacles.heavy());
    set(grid, 27, 24, obstacles.heavy());
    set(grid, 17, 17, obstacles.heavy());
    set(grid, 17, 20, obstacles.heavy());
    set(grid, 32, 17, obstacles.heavy());
    set(grid, 32, 20, obstacles.heavy());

    // Medium cover inside the rooms.
    fill_rect(grid, 5, 4, 6, 5, obstacles.medium());
    fill_rect(grid, 10, 7, 11, 8, obstacles.medium());
    fill_rect(grid, 43, 4, 44, 5, obstacles.medium());
    fill_rect(grid, 38, 7, 39, 8, obstacles.medium());
    fill_rect(grid, 5, 32, 6, 33, obstacles.medium());
    fill_rect(grid, 10, 29, 11, 30, obstacles.medium());
    fill_rect(grid, 43, 32, 44, 33, obstacles.medium());
    fill_rect(grid, 38, 29, 39, 30, obstacles.medium());

    // Light obstacles in the corridor transitions.
    set(grid, 16, 6, obstacles.light());
    set(grid, 33, 6, obstacles.light());
    set(grid, 16, 31, obstacles.light());
    set(grid, 33, 31, obstacles.light());

    // Wall stubs giving corridor cover north and south.
    fill_rect(grid, 24, 3, 25, 5, WALL_SENTINEL);
    fill_rect(grid, 24, 32, 25, 34, WALL_SENTINEL);

    // Light obstacles inside the chamber.
    set(grid, 23, 17, obstacles.light());
    set(grid, 26, 17, obstacles.light());
    set(grid, 23, 20, obstacles.light());
    set(grid, 26, 20, obstacles.light());
}

/// Timber Row: gapped cross spines through the center, diagonal baffles
/// toward each corner, heavy pillars around the middle, and breakable
/// medium barriers filling one tile of each spine gap.
fn timber_row(grid: &mut TileGrid, obstacles: &ObstaclePalette) {
    let cx = grid.dims().columns() as i32 / 2;
    let cy = grid.dims().rows() as i32 / 2;

    // Vertical spine with traversal gaps.
    v_line(grid, cx - 1, 2, 7, WALL_SENTINEL);
    v_line(grid, cx, 2, 7, WALL_SENTINEL);
    v_line(grid, cx - 1, 12, 16, WALL_SENTINEL);
    v_line(grid, cx, 12, 16, WALL_SENTINEL);
    v_line(grid, cx - 1, 21, 25, WALL_SENTINEL);
    v_line(grid, cx, 21, 25, WALL_SENTINEL);
    v_line(grid, cx - 1, 30, 35, WALL_SENTINEL);
    v_line(grid, cx, 30, 35, WALL_SENTINEL);

    // Horizontal spine with traversal gaps.
    h_line(grid, 2, 8, cy - 1, WALL_SENTINEL);
    h_line(grid, 2, 8, cy, WALL_SENTINEL);
    h_line(grid, 13, 20, cy - 1, WALL_SENTINEL);
    h_line(grid, 13, 20, cy, WALL_SENTINEL);
    h_line(grid, 29, 36, cy - 1, WALL_SENTINEL);
    h_line(grid, 29, 36, cy, WALL_SENTINEL);
    h_line(grid, 41, 47, cy - 1, WALL_SENTINEL);
    h_line(grid, 41, 47, cy, WALL_SENTINEL);

    // Diagonal baffles, two cells thick, one per corner.
    for i in 0..6 {
        set(grid, 6 + i, 5 + i, WALL_SENTINEL);
        set(grid, 7 + i, 5 + i, WALL_SENTINEL);
        set(grid, 42 - i, 5 + i, WALL_SENTINEL);
        set(grid, 41 - i, 5 + i, WALL_SENTINEL);
        set(grid, 6 + i, 32 - i, WALL_SENTINEL);
        set(grid, 7 + i, 32 - i, WALL_SENTINEL);
        set(grid, 42 - i, 32 - i, WALL_SENTINEL);
        set(grid, 41 - i, 32 - i, WALL_SENTINEL);
    }

    // Heavy pillars framing the center.
    fill_rect(grid, cx - 4, cy - 4, cx - 3, cy - 3, obstacles.heavy());
    fill_rect(grid, cx + 2, cy - 4, cx + 3, cy - 3, obstacles.heavy());
    fill_rect(grid, cx - 4, cy + 2, cx - 3, cy + 3, obstacles.heavy());
    fill_rect(grid, cx + 2, cy + 2, cx + 3, cy + 3, obstacles.heavy());

    // Medium cover inside each quadrant.
    fill_rect(grid, 5, 5, 6, 6, obstacles.medium());
    fill_rect(grid, 4, 13, 5, 14, obstacles.medium());
    fill_rect(grid, 43, 5, 44, 6, obstacles.medium());
    fill_rect(grid, 44, 13, 45, 14, obstacles.medium());
    fill_rect(grid, 5, 31, 6, 32, obstacles.medium());
    fill_rect(grid, 4, 23, 5, 24, obstacles.medium());
    fill_rect(grid, 43, 31, 44, 32, obstacles.medium());
    fill_rect(grid, 44, 23, 45, 24, obstacles.medium());

    // Light obstacles at the spine gap entrances.
    set(grid, cx - 2, 8, obstacles.light());
    set(grid, cx + 1, 8, obstacles.light());
    set(grid, cx - 2, 29, obstacles.light());
    set(grid, cx + 1, 29, obstacles.light());
    set(grid, 9, cy - 2, obstacles.light());
    set(grid, 9, cy + 1, obstacles.light());
    set(grid, 40, cy - 2, obstacles.light());
    set(grid, 40, cy + 1, obstacles.light());

    // Breakable barriers closing one tile of each spine gap.
    set(grid, cx - 1, 8, obstacles.medium());
    set(grid, cx, 8, obstacles.medium());
    set(grid, cx - 1, 29, obstacles.medium());
    set(grid, cx, 29, obstacles.medium());
    set(grid, 9, cy - 1, obstacles.medium());
    set(grid, 9, cy, obstacles.medium());
    set(grid, 40, cy - 1, obstacles.medium());
    set(grid, 40, cy, obstacles.medium());

    // Light cover in the open quadrant space.
    set(grid, 15, 6, obstacles.light());
    set(grid, 34, 6, obstacles.light());
    set(grid, 15, 31, obstacles.light());
    set(grid, 34, 31, obstacles.light());
}
