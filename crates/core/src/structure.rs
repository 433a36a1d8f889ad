//! Structure templates expanded by the chunk generator.
//!
//! A template is a fixed list of block offsets relative to its anchor (the
//! surface block of the qualifying column) plus one `override` flag applied
//! uniformly: when set, template blocks replace existing terrain; when clear
//! they only fill air.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{blocks, BlockId};

/// Name of the built-in tree template.
pub const BASE_TREE: &str = "BaseTree";

/// One block of a structure template, relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureBlock {
    /// Offset east of the anchor.
    pub x: i32,
    /// Offset above the anchor.
    pub y: i32,
    /// Offset south of the anchor.
    pub z: i32,
    /// Block id to place.
    pub id: BlockId,
}

/// A named, fixed structure shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureTemplate {
    /// When true, template blocks replace non-air terrain.
    #[serde(rename = "override")]
    pub override_existing: bool,
    /// Block offsets making up the structure.
    pub data: Vec<StructureBlock>,
}

/// Structure templates keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructureTable(HashMap<String, StructureTemplate>);

impl StructureTable {
    /// Table with no templates (disables structure placement).
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Option<&StructureTemplate> {
        self.0.get(name)
    }

    /// Insert or replace a template.
    pub fn insert(&mut self, name: impl Into<String>, template: StructureTemplate) {
        self.0.insert(name.into(), template);
    }
}

impl Default for StructureTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert(BASE_TREE, base_tree());
        table
    }
}

/// The classic oak: four trunk logs, a two-layer canopy, and a cap leaf.
fn base_tree() -> StructureTemplate {
    let mut data = Vec::new();

    for dy in 1..=4 {
        data.push(StructureBlock {
            x: 0,
            y: dy,
            z: 0,
            id: blocks::OAK_LOG,
        });
    }

    for dy in 4..=5 {
        for dx in -1..=1 {
            for dz in -1..=1 {
                // Trunk occupies the center of the lower canopy layer.
                if dx == 0 && dz == 0 && dy == 4 {
                    continue;
                }
                // Clip lower corners for a rounded silhouette.
                if dy == 4 && dx != 0 && dz != 0 {
                    continue;
                }
                data.push(StructureBlock {
                    x: dx,
                    y: dy,
                    z: dz,
                    id: blocks::OAK_LEAVES,
                });
            }
        }
    }

    data.push(StructureBlock {
        x: 0,
        y: 6,
        z: 0,
        id: blocks::OAK_LEAVES,
    });

    StructureTemplate {
        override_existing: false,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_contains_base_tree() {
        let table = StructureTable::default();
        let tree = table.get(BASE_TREE).expect("BaseTree registered");
        assert!(!tree.override_existing);
        assert!(!tree.data.is_empty());
    }

    #[test]
    fn base_tree_grows_upward_only() {
        let tree = base_tree();
        assert!(tree.data.iter().all(|b| b.y >= 1));
        let logs = tree
            .data
            .iter()
            .filter(|b| b.id == blocks::OAK_LOG)
            .count();
        assert_eq!(logs, 4);
    }

    #[test]
    fn template_round_trips_through_serde() {
        let table = StructureTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let back: StructureTable = serde_json::from_str(&json).unwrap();
        let tree = back.get(BASE_TREE).unwrap();
        assert_eq!(tree.data.len(), table.get(BASE_TREE).unwrap().data.len());
    }

    #[test]
    fn override_flag_reads_from_renamed_key() {
        let json = r#"{"Obelisk": {"override": true, "data": [{"x": 0, "y": 1, "z": 0, "id": 1}]}}"#;
        let table: StructureTable = serde_json::from_str(json).unwrap();
        assert!(table.get("Obelisk").unwrap().override_existing);
    }
}
