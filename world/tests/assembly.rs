use arena_forge_core::{catalog::TileCatalog, rules::RuleTable, TILE_EMPTY};
use arena_forge_system_validation::{
    check_connectivity, check_perimeter, check_spawn, MapReport, ValidationReport,
};
use arena_forge_world::{assemble, builtin_roster};

fn empty_rules() -> RuleTable {
    RuleTable::new(Vec::new(), 48).expect("empty table is valid")
}

#[test]
fn assembly_leaves_no_sentinels_in_the_walls_layer() {
    let catalog = TileCatalog::standard();
    let rules = empty_rules();

    for spec in builtin_roster() {
        let map = assemble(&spec, &catalog, &rules).expect("roster themes are registered");
        assert!(
            map.walls().cells().iter().all(|&value| value >= 0),
            "{} shipped an unresolved sentinel",
            map.slug(),
        );
    }
}

#[test]
fn walls_resolve_into_the_arena_theme_band_or_obstacles() {
    let catalog = TileCatalog::standard();
    let rules = empty_rules();

    for spec in builtin_roster() {
        let map = assemble(&spec, &catalog, &rules).expect("assemble");
        let theme = catalog.theme(map.theme_name()).expect("registered theme");
        let span = catalog.canopy_span(theme);

        for &value in map.walls().cells() {
            if value == TILE_EMPTY {
                continue;
            }
            assert!(
                span.contains(value) || catalog.is_obstacle(value),
                "{} wall id {value} is outside theme '{}' and the obstacle band",
                map.slug(),
                map.theme_name(),
            );
        }
    }
}

#[test]
fn ground_layer_is_fully_populated_and_patched_under_cover() {
    let catalog = TileCatalog::standard();
    let rules = empty_rules();

    for spec in builtin_roster() {
        let map = assemble(&spec, &catalog, &rules).expect("assemble");
        let theme = catalog.theme(map.theme_name()).expect("registered theme");

        for (index, &ground) in map.ground().cells().iter().enumerate() {
            assert_ne!(ground, TILE_EMPTY, "{} ground cell {index} is empty", map.slug());

            let covered = map.walls().cells()[index] != TILE_EMPTY
                || map.wall_fronts().cells()[index] != TILE_EMPTY;
            if covered {
                assert_eq!(
                    ground,
                    theme.primary_floor(),
                    "{} cell {index} under cover must use the primary floor",
                    map.slug(),
                );
            }
        }
    }
}

#[test]
fn fronts_only_appear_below_solid_cells() {
    let catalog = TileCatalog::standard();
    let rules = empty_rules();

    for spec in builtin_roster() {
        let map = assemble(&spec, &catalog, &rules).expect("assemble");
        let columns = map.dims().columns() as usize;

        for (index, &front) in map.wall_fronts().cells().iter().enumerate() {
            if front == TILE_EMPTY {
                continue;
            }
            assert!(index >= columns, "front in the top row has no canopy above");
            assert_ne!(
                map.walls().cells()[index - columns],
                TILE_EMPTY,
                "{} front at {index} lacks a canopy above",
                map.slug(),
            );
            assert_eq!(
                map.walls().cells()[index],
                TILE_EMPTY,
                "{} front at {index} overlaps a solid wall cell",
                map.slug(),
            );
        }
    }
}

#[test]
fn assembly_is_deterministic() {
    let catalog = TileCatalog::standard();
    let rules = empty_rules();

    for spec in builtin_roster() {
        let first = assemble(&spec, &catalog, &rules).expect("assemble");
        let second = assemble(&spec, &catalog, &rules).expect("assemble");
        assert_eq!(first, second, "repeated assembly diverged");
    }
}

#[test]
fn every_roster_arena_passes_all_validators() {
    let catalog = TileCatalog::standard();
    let rules = empty_rules();
    let mut report = ValidationReport::new();

    for spec in builtin_roster() {
        let map = assemble(&spec, &catalog, &rules).expect("assemble");
        let spawns = map
            .spawns()
            .iter()
            .map(|spawn| check_spawn(map.walls(), &catalog, spawn, 1))
            .collect();
        report.push(MapReport::new(
            map.slug(),
            check_connectivity(map.walls()),
            check_perimeter(map.walls()),
            spawns,
        ));
    }

    assert!(report.passed(), "{report}");
}
