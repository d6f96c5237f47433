#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Read-only validators that gate a finished map before it ships.
//!
//! Three checks run over the resolved walls layer: connectivity (the open
//! region must form exactly one 4-connected component), perimeter (every
//! border cell must be solid), and spawn safety (each declared role must
//! have a clear landing zone, plus a recoverable fallback inside its
//! search region). Failures never abort generation; they accumulate into
//! an aggregated report so every defective map in a run is enumerated at
//! the end.

use std::collections::VecDeque;
use std::fmt;

use arena_forge_core::{
    catalog::TileCatalog, is_wall_sentinel, CellCoord, SpawnSpec, TileGrid, TILE_EMPTY,
};

/// Result of the flood-fill connectivity check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectivityOutcome {
    total_open: usize,
    reached: usize,
    unreachable: Vec<CellCoord>,
}

impl ConnectivityOutcome {
    /// Number of open cells in the walls layer.
    #[must_use]
    pub const fn total_open(&self) -> usize {
        self.total_open
    }

    /// Number of open cells reachable from the scan-order seed.
    #[must_use]
    pub const fn reached(&self) -> usize {
        self.reached
    }

    /// Open cells the flood fill never reached.
    #[must_use]
    pub fn unreachable(&self) -> &[CellCoord] {
        &self.unreachable
    }

    /// True when the open region is a single connected component.
    ///
    /// A layer without any open cell passes trivially.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.reached == self.total_open
    }
}

/// Breadth-first reachability check over the open cells of a walls layer.
///
/// Treats `0` as open and anything else as solid. One dense visited
/// buffer and one queue; no per-cell allocation or adjacency recompute.
#[must_use]
pub fn check_connectivity(walls: &TileGrid) -> ConnectivityOutcome {
    let dims = walls.dims();
    let columns = dims.columns() as usize;
    let cells = walls.cells();

    let total_open = cells.iter().filter(|&&value| value == TILE_EMPTY).count();
    let Some(start) = cells.iter().position(|&value| value == TILE_EMPTY) else {
        return ConnectivityOutcome {
            total_open: 0,
            reached: 0,
            unreachable: Vec::new(),
        };
    };

    let mut visited = vec![false; cells.len()];
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);
    let mut reached = 1_usize;

    while let Some(index) = queue.pop_front() {
        let column = index % columns;
        let row = index / columns;

        let mut neighbors = [None; 4];
        if row > 0 {
            neighbors[0] = Some(index - columns);
        }
        if row + 1 < dims.rows() as usize {
            neighbors[1] = Some(index + columns);
        }
        if column > 0 {
            neighbors[2] = Some(index - 1);
        }
        if column + 1 < columns {
            neighbors[3] = Some(index + 1);
        }

        for neighbor in neighbors.into_iter().flatten() {
            if !visited[neighbor] && cells[neighbor] == TILE_EMPTY {
                visited[neighbor] = true;
                reached += 1;
                queue.push_back(neighbor);
            }
        }
    }

    let unreachable = if reached == total_open {
        Vec::new()
    } else {
        cells
            .iter()
            .enumerate()
            .filter(|&(index, &value)| value == TILE_EMPTY && !visited[index])
            .filter_map(|(index, _)| dims.coord_of(index))
            .collect()
    };

    ConnectivityOutcome {
        total_open,
        reached,
        unreachable,
    }
}

/// Result of the perimeter integrity check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerimeterOutcome {
    breaches: Vec<CellCoord>,
}

impl PerimeterOutcome {
    /// Border cells found open.
    #[must_use]
    pub fn breaches(&self) -> &[CellCoord] {
        &self.breaches
    }

    /// True when every border cell is solid.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.breaches.is_empty()
    }
}

/// Verifies that every border cell of the walls layer is solid.
#[must_use]
pub fn check_perimeter(walls: &TileGrid) -> PerimeterOutcome {
    let dims = walls.dims();
    let mut breaches = Vec::new();

    for cell in dims.iter_coords() {
        let on_border = cell.column() == 0
            || cell.column() + 1 == dims.columns()
            || cell.row() == 0
            || cell.row() + 1 == dims.rows();
        if on_border && walls.get(cell) == Some(TILE_EMPTY) {
            breaches.push(cell);
        }
    }

    PerimeterOutcome { breaches }
}

/// Result of the two spawn checks for one role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnOutcome {
    role: String,
    target_cell: CellCoord,
    target_clear: bool,
    fallback: Option<CellCoord>,
}

impl SpawnOutcome {
    /// Role label the outcome belongs to.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Tile the authored spawn pixel maps into.
    #[must_use]
    pub const fn target_cell(&self) -> CellCoord {
        self.target_cell
    }

    /// Whether the target tile and its buffer zone are entirely open.
    #[must_use]
    pub const fn target_clear(&self) -> bool {
        self.target_clear
    }

    /// First clear tile found by the search-region scan, if any.
    #[must_use]
    pub const fn fallback(&self) -> Option<CellCoord> {
        self.fallback
    }

    /// True when the authored target is clear and a fallback exists.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.target_clear && self.fallback.is_some()
    }
}

/// Reports whether the `(2·buffer+1)²` neighborhood around `center` is
/// entirely open for spawning.
///
/// Out-of-bounds cells count as solid. Wall canopies of every theme and
/// obstacle ids are solid; front faces live in their own layer and ground
/// tiles never block, so neither is consulted here.
#[must_use]
pub fn is_clear_for_spawn(
    walls: &TileGrid,
    catalog: &TileCatalog,
    center: CellCoord,
    buffer: u32,
) -> bool {
    let reach = buffer as i32;
    for delta_row in -reach..=reach {
        for delta_column in -reach..=reach {
            let open = center
                .offset(delta_column, delta_row)
                .and_then(|cell| walls.get(cell))
                .map(|value| !catalog.is_solid_for_spawn(value) && !is_wall_sentinel(value));
            if open != Some(true) {
                return false;
            }
        }
    }
    true
}

/// Runs both spawn checks for one declared role.
///
/// Check 1 converts the authored pixel into a tile and demands a clear
/// buffer zone around it, catching a spawn point that drifted onto solid
/// ground as the layout evolved. Check 2 independently scans the search
/// region in row-major order for the first clear tile, proving a valid
/// spawn exists even when the authored pixel is stale.
#[must_use]
pub fn check_spawn(
    walls: &TileGrid,
    catalog: &TileCatalog,
    spec: &SpawnSpec,
    buffer: u32,
) -> SpawnOutcome {
    let target_cell = spec.target().to_cell(catalog.geometry().tile_size_px());
    let target_clear = is_clear_for_spawn(walls, catalog, target_cell, buffer);

    let fallback = spec
        .search()
        .iter_coords()
        .find(|&cell| is_clear_for_spawn(walls, catalog, cell, buffer));

    SpawnOutcome {
        role: spec.role().to_owned(),
        target_cell,
        target_clear,
        fallback,
    }
}

/// Validation results for a single map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapReport {
    map: String,
    connectivity: ConnectivityOutcome,
    perimeter: PerimeterOutcome,
    spawns: Vec<SpawnOutcome>,
}

impl MapReport {
    /// Bundles the per-check outcomes for one map.
    #[must_use]
    pub fn new(
        map: impl Into<String>,
        connectivity: ConnectivityOutcome,
        perimeter: PerimeterOutcome,
        spawns: Vec<SpawnOutcome>,
    ) -> Self {
        Self {
            map: map.into(),
            connectivity,
            perimeter,
            spawns,
        }
    }

    /// Name of the validated map.
    #[must_use]
    pub fn map(&self) -> &str {
        &self.map
    }

    /// Connectivity outcome.
    #[must_use]
    pub const fn connectivity(&self) -> &ConnectivityOutcome {
        &self.connectivity
    }

    /// Perimeter outcome.
    #[must_use]
    pub const fn perimeter(&self) -> &PerimeterOutcome {
        &self.perimeter
    }

    /// Spawn outcomes in role declaration order.
    #[must_use]
    pub fn spawns(&self) -> &[SpawnOutcome] {
        &self.spawns
    }

    /// True when every check on the map passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.connectivity.passed()
            && self.perimeter.passed()
            && self.spawns.iter().all(SpawnOutcome::passed)
    }

    fn push_failures(&self, out: &mut Vec<String>) {
        if !self.connectivity.passed() {
            out.push(format!(
                "{}: layout defect: {} of {} open cells unreachable",
                self.map,
                self.connectivity.total_open() - self.connectivity.reached(),
                self.connectivity.total_open(),
            ));
        }
        if !self.perimeter.passed() {
            out.push(format!(
                "{}: layout defect: {} open border cell(s)",
                self.map,
                self.perimeter.breaches().len(),
            ));
        }
        for spawn in &self.spawns {
            if !spawn.target_clear() {
                out.push(format!(
                    "{}: spawn defect: role '{}' target at {:?} blocked",
                    self.map,
                    spawn.role(),
                    spawn.target_cell(),
                ));
            }
            if spawn.fallback().is_none() {
                out.push(format!(
                    "{}: spawn defect: role '{}' has no clear tile in its search region",
                    self.map,
                    spawn.role(),
                ));
            }
        }
    }
}

/// Aggregated validation results across every map in a generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    maps: Vec<MapReport>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self { maps: Vec::new() }
    }

    /// Appends one map's results.
    pub fn push(&mut self, report: MapReport) {
        self.maps.push(report);
    }

    /// Per-map reports in generation order.
    #[must_use]
    pub fn maps(&self) -> &[MapReport] {
        &self.maps
    }

    /// True when every map passed every check.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.maps.iter().all(MapReport::passed)
    }

    /// Every failure across the run, one line per defect.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        let mut out = Vec::new();
        for map in &self.maps {
            map.push_failures(&mut out);
        }
        out
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failures = self.failures();
        if failures.is_empty() {
            return write!(f, "all {} map(s) passed validation", self.maps.len());
        }
        writeln!(f, "{} validation failure(s):", failures.len())?;
        for line in &failures {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{check_connectivity, check_perimeter};
    use arena_forge_core::{CellCoord, GridDims, TileGrid};

    #[test]
    fn fully_solid_layer_passes_trivially() {
        let mut walls = TileGrid::new(GridDims::new(4, 4));
        for cell in walls.cells_mut() {
            *cell = 5;
        }

        let outcome = check_connectivity(&walls);
        assert!(outcome.passed());
        assert_eq!(outcome.total_open(), 0);
    }

    #[test]
    fn open_border_cells_are_reported_as_breaches() {
        let mut walls = TileGrid::new(GridDims::new(4, 4));
        for cell in walls.dims().iter_coords() {
            walls.set(cell, 5);
        }
        walls.set(CellCoord::new(2, 0), 0);

        let outcome = check_perimeter(&walls);
        assert!(!outcome.passed());
        assert_eq!(outcome.breaches(), &[CellCoord::new(2, 0)]);
    }
}
