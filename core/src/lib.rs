#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Arena Forge pipeline.
//!
//! This crate defines the grid abstraction that every stage operates on,
//! together with the configuration values (tile catalog and auto-tile rule
//! table) that travel explicitly through the pipeline instead of living as
//! ambient module constants. Layout authors stamp wall sentinels and
//! obstacle ids onto a [`TileGrid`], the resolver rewrites sentinels into
//! themed atlas ids, and the validators read the finished layers back
//! through the same types.

pub mod catalog;
pub mod rules;

use serde::{Deserialize, Serialize};

/// Cell value denoting an empty/open tile in every layer.
pub const TILE_EMPTY: i32 = 0;

/// Layout-time placeholder for "generic solid wall, resolve me later".
///
/// Any negative cell value is treated as a wall sentinel so future layout
/// tooling can encode extra information in the magnitude without changing
/// the resolver contract.
pub const WALL_SENTINEL: i32 = -1;

/// Reports whether a cell value is an unresolved wall sentinel.
#[must_use]
pub const fn is_wall_sentinel(value: i32) -> bool {
    value < 0
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Applies a signed offset, returning `None` when the result would leave
    /// the non-negative coordinate space.
    #[must_use]
    pub fn offset(&self, delta_column: i32, delta_row: i32) -> Option<Self> {
        let column = self.column.checked_add_signed(delta_column)?;
        let row = self.row.checked_add_signed(delta_row)?;
        Some(Self { column, row })
    }
}

/// Rectangular dimensions of a tile grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    columns: u32,
    rows: u32,
}

impl GridDims {
    /// Creates a new dimension descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns laid out in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows laid out in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Reports whether the coordinate falls inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Flat row-major index of the coordinate, or `None` when out of bounds.
    #[must_use]
    pub fn index_of(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Coordinate addressed by a flat row-major index, or `None` when the
    /// index falls beyond the grid.
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Option<CellCoord> {
        if self.columns == 0 || index >= self.cell_count() {
            return None;
        }
        let width = self.columns as usize;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Iterator over every coordinate in row-major scan order.
    pub fn iter_coords(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        let rows = self.rows;
        (0..rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }
}

/// Flat row-major field of tile ids backing a single map layer.
///
/// Grids are value types: a stage receives the grids it needs, produces a
/// new grid (or mutates one it exclusively owns), and never shares mutable
/// structure with another layer. Cell values follow the layer conventions
/// described by the catalog: `0` open, negative sentinel, positive atlas
/// id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    dims: GridDims,
    cells: Vec<i32>,
}

impl TileGrid {
    /// Creates a grid of the provided dimensions with every cell empty.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![TILE_EMPTY; dims.cell_count()],
        }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Value stored at the coordinate, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<i32> {
        self.dims
            .index_of(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Writes a value at the coordinate; out-of-bounds writes are ignored,
    /// mirroring the clamped stamping helpers layout authors rely on.
    pub fn set(&mut self, cell: CellCoord, value: i32) {
        if let Some(index) = self.dims.index_of(cell) {
            self.cells[index] = value;
        }
    }

    /// Dense cell storage in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Mutable access to the dense cell storage for the stage that owns the
    /// grid during its pipeline turn.
    #[must_use]
    pub fn cells_mut(&mut self) -> &mut [i32] {
        &mut self.cells
    }
}

/// Pixel-space coordinate used by spawn configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    x: u32,
    y: u32,
}

impl PixelPoint {
    /// Creates a new pixel coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel offset from the map origin.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical pixel offset from the map origin.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Converts the pixel position into the tile cell containing it.
    ///
    /// A zero tile size cannot address any tile; the origin cell is returned
    /// so callers never observe a division failure.
    #[must_use]
    pub const fn to_cell(&self, tile_size_px: u32) -> CellCoord {
        if tile_size_px == 0 {
            return CellCoord::new(0, 0);
        }
        CellCoord::new(self.x / tile_size_px, self.y / tile_size_px)
    }
}

/// Axis-aligned inclusive rectangle expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    min: CellCoord,
    max: CellCoord,
}

impl TileRect {
    /// Constructs a rectangle from inclusive corner coordinates.
    ///
    /// Corners are normalized so iteration order never depends on argument
    /// order.
    #[must_use]
    pub fn new(a: CellCoord, b: CellCoord) -> Self {
        let min = CellCoord::new(a.column().min(b.column()), a.row().min(b.row()));
        let max = CellCoord::new(a.column().max(b.column()), a.row().max(b.row()));
        Self { min, max }
    }

    /// Inclusive upper-left corner.
    #[must_use]
    pub const fn min(&self) -> CellCoord {
        self.min
    }

    /// Inclusive lower-right corner.
    #[must_use]
    pub const fn max(&self) -> CellCoord {
        self.max
    }

    /// Reports whether the coordinate lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() >= self.min.column()
            && cell.column() <= self.max.column()
            && cell.row() >= self.min.row()
            && cell.row() <= self.max.row()
    }

    /// Iterator over the contained coordinates in row-major scan order.
    pub fn iter_coords(&self) -> impl Iterator<Item = CellCoord> {
        let min = self.min;
        let max = self.max;
        (min.row()..=max.row()).flat_map(move |row| {
            (min.column()..=max.column()).map(move |column| CellCoord::new(column, row))
        })
    }
}

/// Declared spawn location for one role, checked by the spawn validator.
///
/// The target pixel is the authored position entities materialize at; the
/// search rectangle is the region a fallback position may be recovered from
/// when the authored pixel has drifted onto solid ground.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnSpec {
    role: String,
    target: PixelPoint,
    search: TileRect,
}

impl SpawnSpec {
    /// Creates a new spawn descriptor.
    #[must_use]
    pub fn new(role: impl Into<String>, target: PixelPoint, search: TileRect) -> Self {
        Self {
            role: role.into(),
            target,
            search,
        }
    }

    /// Label identifying the role in validation reports.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Authored spawn position in map pixels.
    #[must_use]
    pub const fn target(&self) -> PixelPoint {
        self.target
    }

    /// Inclusive tile rectangle a fallback spawn may be recovered from.
    #[must_use]
    pub const fn search(&self) -> TileRect {
        self.search
    }
}
