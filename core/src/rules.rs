//! Auto-tile rule table consumed by the wall resolver.
//!
//! The wire format is an ordered JSON array of records pairing a sprite
//! index with required neighbor presences keyed by compass label. Table
//! order is tie-break priority, so the table preserves declaration order
//! and matching walks it front to back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ConfigError;

/// The eight compass directions used by neighbor signatures.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CompassDir {
    /// Toward decreasing row indices.
    #[serde(rename = "N")]
    North,
    /// Diagonal toward decreasing rows and increasing columns.
    #[serde(rename = "NE")]
    NorthEast,
    /// Toward increasing column indices.
    #[serde(rename = "E")]
    East,
    /// Diagonal toward increasing rows and columns.
    #[serde(rename = "SE")]
    SouthEast,
    /// Toward increasing row indices.
    #[serde(rename = "S")]
    South,
    /// Diagonal toward increasing rows and decreasing columns.
    #[serde(rename = "SW")]
    SouthWest,
    /// Toward decreasing column indices.
    #[serde(rename = "W")]
    West,
    /// Diagonal toward decreasing rows and columns.
    #[serde(rename = "NW")]
    NorthWest,
}

impl CompassDir {
    /// Every direction in clockwise order starting from north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// `(delta_column, delta_row)` step toward the neighbor.
    #[must_use]
    pub const fn offset(&self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Stable position of the direction within [`CompassDir::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::North => 0,
            Self::NorthEast => 1,
            Self::East => 2,
            Self::SouthEast => 3,
            Self::South => 4,
            Self::SouthWest => 5,
            Self::West => 6,
            Self::NorthWest => 7,
        }
    }
}

/// Solid/open occupancy of the eight neighbors around one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborSignature {
    solid: [bool; 8],
}

impl NeighborSignature {
    /// Builds a signature by sampling every direction through the closure.
    #[must_use]
    pub fn from_fn(mut probe: impl FnMut(CompassDir) -> bool) -> Self {
        let mut solid = [false; 8];
        for dir in CompassDir::ALL {
            solid[dir.index()] = probe(dir);
        }
        Self { solid }
    }

    /// Marks one direction solid or open.
    pub fn set(&mut self, dir: CompassDir, is_solid: bool) {
        self.solid[dir.index()] = is_solid;
    }

    /// Reports whether the neighbor in the direction is solid.
    #[must_use]
    pub const fn is_solid(&self, dir: CompassDir) -> bool {
        self.solid[dir.index()]
    }
}

/// One ordered auto-tile rule: required neighbor pattern and target sprite.
///
/// Directions absent from `neighbors` are unconstrained; present entries
/// must match the signature exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoTileRule {
    /// Zero-based sprite index within a theme's 48-sprite block.
    pub sprite_index: u32,
    /// Required solid (`true`) or open (`false`) presence per direction.
    pub neighbors: BTreeMap<CompassDir, bool>,
}

impl AutoTileRule {
    /// Reports whether every constrained direction matches the signature.
    #[must_use]
    pub fn matches(&self, signature: &NeighborSignature) -> bool {
        self.neighbors
            .iter()
            .all(|(dir, expected)| signature.is_solid(*dir) == *expected)
    }
}

/// Ordered auto-tile rule table; first full match wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<AutoTileRule>,
}

impl RuleTable {
    /// Wraps parsed rules, rejecting any sprite index that would escape the
    /// per-theme sprite block.
    pub fn new(rules: Vec<AutoTileRule>, tiles_per_theme: u32) -> Result<Self, ConfigError> {
        for (rule_index, rule) in rules.iter().enumerate() {
            if rule.sprite_index >= tiles_per_theme {
                return Err(ConfigError::SpriteIndexOutOfRange {
                    rule_index,
                    sprite_index: rule.sprite_index,
                    limit: tiles_per_theme,
                });
            }
        }
        Ok(Self { rules })
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[AutoTileRule] {
        &self.rules
    }

    /// Sprite index of the first rule matching the signature, if any.
    #[must_use]
    pub fn first_match(&self, signature: &NeighborSignature) -> Option<u32> {
        self.rules
            .iter()
            .find(|rule| rule.matches(signature))
            .map(|rule| rule.sprite_index)
    }
}

#[cfg(test)]
mod tests {
    use super::{AutoTileRule, CompassDir, NeighborSignature, RuleTable};
    use crate::catalog::ConfigError;
    use std::collections::BTreeMap;

    fn rule(sprite_index: u32, constraints: &[(CompassDir, bool)]) -> AutoTileRule {
        AutoTileRule {
            sprite_index,
            neighbors: constraints.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn offsets_cover_all_eight_directions_exactly_once() {
        let mut seen = std::collections::BTreeSet::new();
        for dir in CompassDir::ALL {
            assert!(seen.insert(dir.offset()), "duplicate offset for {dir:?}");
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn unconstrained_directions_do_not_affect_matching() {
        let rule = rule(3, &[(CompassDir::North, true), (CompassDir::South, false)]);

        let mut signature = NeighborSignature::default();
        signature.set(CompassDir::North, true);
        signature.set(CompassDir::East, true);
        signature.set(CompassDir::NorthWest, true);

        assert!(rule.matches(&signature), "E and NW are unconstrained");

        signature.set(CompassDir::South, true);
        assert!(!rule.matches(&signature), "S is constrained open");
    }

    #[test]
    fn first_match_respects_table_order() {
        let table = RuleTable::new(
            vec![
                rule(7, &[(CompassDir::North, true), (CompassDir::East, true)]),
                rule(9, &[(CompassDir::North, true)]),
            ],
            48,
        )
        .expect("valid table");

        let mut signature = NeighborSignature::default();
        signature.set(CompassDir::North, true);
        signature.set(CompassDir::East, true);

        assert_eq!(table.first_match(&signature), Some(7));

        signature.set(CompassDir::East, false);
        assert_eq!(table.first_match(&signature), Some(9));

        signature.set(CompassDir::North, false);
        assert_eq!(table.first_match(&signature), None);
    }

    #[test]
    fn out_of_block_sprite_indices_fail_fast() {
        let error = RuleTable::new(vec![rule(48, &[])], 48).expect_err("sprite 48 escapes block");
        assert_eq!(
            error,
            ConfigError::SpriteIndexOutOfRange {
                rule_index: 0,
                sprite_index: 48,
                limit: 48,
            },
        );
    }

    #[test]
    fn rule_table_json_preserves_declaration_order() {
        let json = r#"[
            {"spriteIndex": 9, "neighbors": {"N": false, "E": true, "W": true, "S": true}},
            {"spriteIndex": 0, "neighbors": {}}
        ]"#;
        let rules: Vec<AutoTileRule> = serde_json::from_str(json).expect("parse rule table");
        let table = RuleTable::new(rules, 48).expect("valid table");

        assert_eq!(table.rules().len(), 2);
        assert_eq!(table.rules()[0].sprite_index, 9);
        assert_eq!(
            table.rules()[0].neighbors.get(&CompassDir::North),
            Some(&false),
        );
        assert_eq!(table.rules()[1].sprite_index, 0);
    }

    #[test]
    fn rules_round_trip_through_json() {
        let original = rule(
            5,
            &[
                (CompassDir::North, false),
                (CompassDir::SouthEast, false),
                (CompassDir::SouthWest, false),
                (CompassDir::East, true),
            ],
        );
        let json = serde_json::to_string(&original).expect("serialize");
        let restored: AutoTileRule = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, original);
    }
}
