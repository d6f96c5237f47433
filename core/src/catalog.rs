//! Tile catalog describing themed id bands, obstacle tiers, and atlas
//! geometry.
//!
//! The catalog is an explicit configuration value constructed once and
//! passed into every stage that needs id-range answers, so resolution and
//! validation stay pure functions of their inputs. Construction validates
//! the band layout eagerly: overlapping theme ranges would corrupt the
//! shared atlas, so they fail the run before any grid work begins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling pipeline configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Two themes would write resolved ids into intersecting atlas bands.
    #[error("themes '{first}' and '{second}' occupy overlapping canopy id ranges")]
    ThemeRangeOverlap {
        /// Name of the first offending theme.
        first: String,
        /// Name of the second offending theme.
        second: String,
    },
    /// A theme's canopy band collides with the shared obstacle band.
    #[error("theme '{theme}' canopy range collides with the obstacle band")]
    ObstacleRangeOverlap {
        /// Name of the offending theme.
        theme: String,
    },
    /// An auto-tile rule addresses a sprite outside the per-theme block.
    #[error(
        "rule {rule_index} selects sprite {sprite_index}, outside the {limit}-sprite theme block"
    )]
    SpriteIndexOutOfRange {
        /// Position of the offending rule in table order.
        rule_index: usize,
        /// Sprite index the rule requested.
        sprite_index: u32,
        /// Number of sprites available per theme block.
        limit: u32,
    },
    /// A map references a theme the catalog does not know.
    #[error("no theme named '{name}' is registered in the catalog")]
    UnknownTheme {
        /// Requested theme name.
        name: String,
    },
}

/// Inclusive span of atlas tile ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdSpan {
    first: i32,
    last: i32,
}

impl IdSpan {
    /// Creates a new inclusive id span.
    #[must_use]
    pub const fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// First id contained in the span.
    #[must_use]
    pub const fn first(&self) -> i32 {
        self.first
    }

    /// Last id contained in the span.
    #[must_use]
    pub const fn last(&self) -> i32 {
        self.last
    }

    /// Reports whether the id falls inside the span.
    #[must_use]
    pub const fn contains(&self, id: i32) -> bool {
        id >= self.first && id <= self.last
    }

    /// Reports whether two spans share at least one id.
    #[must_use]
    pub const fn overlaps(&self, other: &IdSpan) -> bool {
        self.first <= other.last && other.first <= self.last
    }
}

/// Pixel geometry of the shared tile atlas referenced by map artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasGeometry {
    tile_size_px: u32,
    columns: u32,
    rows: u32,
}

impl AtlasGeometry {
    /// Creates a new atlas geometry descriptor.
    #[must_use]
    pub const fn new(tile_size_px: u32, columns: u32, rows: u32) -> Self {
        Self {
            tile_size_px,
            columns,
            rows,
        }
    }

    /// Edge length of a single square tile in pixels.
    #[must_use]
    pub const fn tile_size_px(&self) -> u32 {
        self.tile_size_px
    }

    /// Number of tile columns in the atlas image.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows in the atlas image.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of tiles hosted by the atlas.
    #[must_use]
    pub const fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Width of the atlas image in pixels.
    #[must_use]
    pub const fn image_width_px(&self) -> u32 {
        self.columns * self.tile_size_px
    }

    /// Height of the atlas image in pixels.
    #[must_use]
    pub const fn image_height_px(&self) -> u32 {
        self.rows * self.tile_size_px
    }
}

/// Destructibility tier of an obstacle tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleTier {
    /// Slow to break; used for anchoring cover.
    Heavy,
    /// Mid-tier cover.
    Medium,
    /// Quick to break; used for soft chokepoints.
    Light,
}

/// Atlas band hosting the obstacle sprites shared by every theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleBand {
    heavy: IdSpan,
    medium: IdSpan,
    light: IdSpan,
    front_offset: i32,
}

impl ObstacleBand {
    /// Creates a new obstacle band descriptor.
    #[must_use]
    pub const fn new(heavy: IdSpan, medium: IdSpan, light: IdSpan, front_offset: i32) -> Self {
        Self {
            heavy,
            medium,
            light,
            front_offset,
        }
    }

    /// Ids available for the heavy tier.
    #[must_use]
    pub const fn heavy(&self) -> IdSpan {
        self.heavy
    }

    /// Ids available for the medium tier.
    #[must_use]
    pub const fn medium(&self) -> IdSpan {
        self.medium
    }

    /// Ids available for the light tier.
    #[must_use]
    pub const fn light(&self) -> IdSpan {
        self.light
    }

    /// Additive offset mapping an obstacle id to its front-face id.
    #[must_use]
    pub const fn front_offset(&self) -> i32 {
        self.front_offset
    }

    /// Span covering every obstacle id across all tiers.
    #[must_use]
    pub fn full_span(&self) -> IdSpan {
        let first = self.heavy.first().min(self.medium.first()).min(self.light.first());
        let last = self.heavy.last().max(self.medium.last()).max(self.light.last());
        IdSpan::new(first, last)
    }

    /// Tier of the provided id, when it belongs to the band.
    #[must_use]
    pub fn tier_of(&self, id: i32) -> Option<ObstacleTier> {
        if self.heavy.contains(id) {
            Some(ObstacleTier::Heavy)
        } else if self.medium.contains(id) {
            Some(ObstacleTier::Medium)
        } else if self.light.contains(id) {
            Some(ObstacleTier::Light)
        } else {
            None
        }
    }
}

/// One obstacle id per tier, chosen by the caller for a single map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstaclePalette {
    heavy: i32,
    medium: i32,
    light: i32,
}

impl ObstaclePalette {
    /// Creates a new per-map obstacle palette.
    #[must_use]
    pub const fn new(heavy: i32, medium: i32, light: i32) -> Self {
        Self {
            heavy,
            medium,
            light,
        }
    }

    /// Id stamped for heavy obstacle cells.
    #[must_use]
    pub const fn heavy(&self) -> i32 {
        self.heavy
    }

    /// Id stamped for medium obstacle cells.
    #[must_use]
    pub const fn medium(&self) -> i32 {
        self.medium
    }

    /// Id stamped for light obstacle cells.
    #[must_use]
    pub const fn light(&self) -> i32 {
        self.light
    }
}

/// Named theme configuration selecting the id ranges a map writes into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    name: String,
    wall_offset: i32,
    floor_ids: [i32; 4],
    deco_ids: [i32; 4],
}

impl ThemeConfig {
    /// Creates a new theme configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, wall_offset: i32, floor_ids: [i32; 4], deco_ids: [i32; 4]) -> Self {
        Self {
            name: name.into(),
            wall_offset,
            floor_ids,
            deco_ids,
        }
    }

    /// Name the roster refers to the theme by.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Additive offset applied to every resolved wall id.
    #[must_use]
    pub const fn wall_offset(&self) -> i32 {
        self.wall_offset
    }

    /// Weighted floor palette in primary-to-quaternary order.
    #[must_use]
    pub const fn floor_ids(&self) -> [i32; 4] {
        self.floor_ids
    }

    /// Decoration ids sprinkled into the ground layer.
    #[must_use]
    pub const fn deco_ids(&self) -> [i32; 4] {
        self.deco_ids
    }

    /// Canonical floor id patched underneath walls and front faces.
    #[must_use]
    pub const fn primary_floor(&self) -> i32 {
        self.floor_ids[0]
    }
}

/// Complete tile-id configuration for one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileCatalog {
    geometry: AtlasGeometry,
    tiles_per_theme: u32,
    wall_front_offset: i32,
    themes: Vec<ThemeConfig>,
    obstacles: ObstacleBand,
}

impl TileCatalog {
    /// Assembles a catalog, failing fast when any theme band intersects
    /// another theme or the obstacle band.
    pub fn new(
        geometry: AtlasGeometry,
        tiles_per_theme: u32,
        wall_front_offset: i32,
        themes: Vec<ThemeConfig>,
        obstacles: ObstacleBand,
    ) -> Result<Self, ConfigError> {
        let catalog = Self {
            geometry,
            tiles_per_theme,
            wall_front_offset,
            themes,
            obstacles,
        };

        for (position, theme) in catalog.themes.iter().enumerate() {
            let span = catalog.canopy_span(theme);
            for other in catalog.themes.iter().skip(position + 1) {
                if span.overlaps(&catalog.canopy_span(other)) {
                    return Err(ConfigError::ThemeRangeOverlap {
                        first: theme.name().to_owned(),
                        second: other.name().to_owned(),
                    });
                }
            }
            if span.overlaps(&catalog.obstacles.full_span()) {
                return Err(ConfigError::ObstacleRangeOverlap {
                    theme: theme.name().to_owned(),
                });
            }
        }

        Ok(catalog)
    }

    /// The catalog shipped with the built-in arena roster: three themes in
    /// 48-sprite bands plus a shared obstacle row, matching the unified
    /// 8x44 atlas.
    #[must_use]
    pub fn standard() -> Self {
        let themes = vec![
            ThemeConfig::new("ivy", 0, [305, 306, 307, 308], [309, 310, 311, 312]),
            ThemeConfig::new("stone", 96, [313, 314, 315, 316], [317, 318, 319, 320]),
            ThemeConfig::new("timber", 192, [321, 322, 323, 324], [325, 326, 327, 328]),
        ];
        let obstacles = ObstacleBand::new(
            IdSpan::new(289, 291),
            IdSpan::new(292, 294),
            IdSpan::new(295, 296),
            8,
        );
        Self::new(AtlasGeometry::new(32, 8, 44), 48, 48, themes, obstacles)
            .expect("standard catalog bands are disjoint")
    }

    /// Pixel geometry of the shared atlas.
    #[must_use]
    pub const fn geometry(&self) -> AtlasGeometry {
        self.geometry
    }

    /// Number of auto-tile sprites reserved per theme.
    #[must_use]
    pub const fn tiles_per_theme(&self) -> u32 {
        self.tiles_per_theme
    }

    /// Additive offset mapping a wall canopy id to its front-face id.
    #[must_use]
    pub const fn wall_front_offset(&self) -> i32 {
        self.wall_front_offset
    }

    /// Obstacle band shared by every theme.
    #[must_use]
    pub const fn obstacles(&self) -> ObstacleBand {
        self.obstacles
    }

    /// Registered themes in declaration order.
    #[must_use]
    pub fn themes(&self) -> &[ThemeConfig] {
        &self.themes
    }

    /// Looks a theme up by name.
    pub fn theme(&self, name: &str) -> Result<&ThemeConfig, ConfigError> {
        self.themes
            .iter()
            .find(|theme| theme.name() == name)
            .ok_or_else(|| ConfigError::UnknownTheme {
                name: name.to_owned(),
            })
    }

    /// Canopy id span the resolver writes into for the given theme.
    #[must_use]
    pub fn canopy_span(&self, theme: &ThemeConfig) -> IdSpan {
        IdSpan::new(
            theme.wall_offset() + 1,
            theme.wall_offset() + self.tiles_per_theme as i32,
        )
    }

    /// Reports whether the id is a wall canopy of any registered theme.
    #[must_use]
    pub fn is_wall_canopy(&self, id: i32) -> bool {
        self.themes
            .iter()
            .any(|theme| self.canopy_span(theme).contains(id))
    }

    /// Reports whether the id belongs to the obstacle band.
    #[must_use]
    pub fn is_obstacle(&self, id: i32) -> bool {
        self.obstacles.full_span().contains(id)
    }

    /// Solid-for-spawn predicate: canopies of every theme plus obstacles
    /// block spawning; front faces and ground tiles do not.
    #[must_use]
    pub fn is_solid_for_spawn(&self, id: i32) -> bool {
        self.is_wall_canopy(id) || self.is_obstacle(id)
    }

    /// Front-face id derived from a walls-layer id, when one exists.
    #[must_use]
    pub fn front_id(&self, id: i32) -> Option<i32> {
        if self.is_wall_canopy(id) {
            Some(id + self.wall_front_offset)
        } else if self.is_obstacle(id) {
            Some(id + self.obstacles.front_offset())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AtlasGeometry, ConfigError, IdSpan, ObstacleBand, ObstacleTier, ThemeConfig, TileCatalog,
    };

    fn single_theme_catalog(offset: i32) -> Result<TileCatalog, ConfigError> {
        TileCatalog::new(
            AtlasGeometry::new(32, 8, 44),
            48,
            48,
            vec![
                ThemeConfig::new("a", 0, [305, 306, 307, 308], [309, 310, 311, 312]),
                ThemeConfig::new("b", offset, [313, 314, 315, 316], [317, 318, 319, 320]),
            ],
            ObstacleBand::new(IdSpan::new(289, 291), IdSpan::new(292, 294), IdSpan::new(295, 296), 8),
        )
    }

    #[test]
    fn standard_catalog_constructs_and_registers_three_themes() {
        let catalog = TileCatalog::standard();
        assert_eq!(catalog.themes().len(), 3);
        assert_eq!(catalog.geometry().tile_count(), 352);
        assert_eq!(catalog.geometry().image_width_px(), 256);
        assert_eq!(catalog.geometry().image_height_px(), 1408);
    }

    #[test]
    fn overlapping_theme_offsets_are_rejected() {
        let error = single_theme_catalog(24).expect_err("offset 24 intersects offset 0");
        assert_eq!(
            error,
            ConfigError::ThemeRangeOverlap {
                first: "a".to_owned(),
                second: "b".to_owned(),
            },
        );
    }

    #[test]
    fn theme_band_colliding_with_obstacles_is_rejected() {
        let error = single_theme_catalog(288).expect_err("offset 288 lands on the obstacle row");
        assert_eq!(
            error,
            ConfigError::ObstacleRangeOverlap {
                theme: "b".to_owned(),
            },
        );
    }

    #[test]
    fn canopy_membership_spans_all_themes() {
        let catalog = TileCatalog::standard();
        assert!(catalog.is_wall_canopy(1));
        assert!(catalog.is_wall_canopy(48));
        assert!(catalog.is_wall_canopy(97));
        assert!(catalog.is_wall_canopy(240));
        assert!(!catalog.is_wall_canopy(49), "front faces are not canopies");
        assert!(!catalog.is_wall_canopy(289), "obstacles are not canopies");
        assert!(!catalog.is_wall_canopy(305), "floors are not canopies");
    }

    #[test]
    fn obstacle_tiers_partition_the_band() {
        let catalog = TileCatalog::standard();
        assert_eq!(catalog.obstacles().tier_of(289), Some(ObstacleTier::Heavy));
        assert_eq!(catalog.obstacles().tier_of(292), Some(ObstacleTier::Medium));
        assert_eq!(catalog.obstacles().tier_of(296), Some(ObstacleTier::Light));
        assert_eq!(catalog.obstacles().tier_of(297), None);
    }

    #[test]
    fn front_ids_use_the_category_specific_offset() {
        let catalog = TileCatalog::standard();
        assert_eq!(catalog.front_id(5), Some(53), "wall canopy gains +48");
        assert_eq!(catalog.front_id(100), Some(148));
        assert_eq!(catalog.front_id(290), Some(298), "obstacle gains +8");
        assert_eq!(catalog.front_id(310), None, "decoration has no front face");
        assert_eq!(catalog.front_id(0), None);
    }

    #[test]
    fn spawn_solidity_ignores_front_faces_and_ground() {
        let catalog = TileCatalog::standard();
        assert!(catalog.is_solid_for_spawn(17));
        assert!(catalog.is_solid_for_spawn(193));
        assert!(catalog.is_solid_for_spawn(295));
        assert!(!catalog.is_solid_for_spawn(65), "wall front is walkable");
        assert!(!catalog.is_solid_for_spawn(305), "floor is walkable");
        assert!(!catalog.is_solid_for_spawn(0));
    }

    #[test]
    fn unknown_theme_lookup_reports_the_requested_name() {
        let catalog = TileCatalog::standard();
        let error = catalog.theme("lava").expect_err("no lava theme");
        assert_eq!(
            error,
            ConfigError::UnknownTheme {
                name: "lava".to_owned(),
            },
        );
    }
}
