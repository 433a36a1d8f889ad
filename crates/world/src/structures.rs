//! Structure planning: scan chunk columns for placement sites and expand
//! templates into a pending override set.
//!
//! Planning never writes the volume directly. The voxel pass merges pending
//! entries after terrain classification so that the template's `override`
//! flag can arbitrate against the generated block.

use std::collections::HashMap;

use swampgen_core::{blocks, BlockId, GenerationConfig, BASE_TREE};

use crate::classify::BlockClassifier;
use crate::height::HeightOracle;
use crate::seed::TerrainField;
use crate::volume::BlockKey;

/// One block queued by a planned structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStructure {
    /// Block id to place.
    pub id: BlockId,
    /// When true, replaces non-air terrain; otherwise only fills air.
    pub override_existing: bool,
}

/// Pending structure blocks keyed by world coordinate.
///
/// Overlapping structures within one chunk pass silently overwrite earlier
/// entries at the same key; the last-scanned site wins.
pub type PendingStructures = HashMap<BlockKey, PendingStructure>;

/// Scans columns for tree sites and expands the tree template.
pub struct StructurePlanner<'a> {
    field: &'a dyn TerrainField,
    config: &'a GenerationConfig,
}

impl<'a> StructurePlanner<'a> {
    /// Build a planner over a terrain field.
    pub fn new(field: &'a dyn TerrainField, config: &'a GenerationConfig) -> Self {
        Self { field, config }
    }

    /// Plan structures for the padded column range starting at `offsets`.
    ///
    /// A column qualifies when its surface block is vegetated (grass or
    /// dirt), the voxel above is air, and the placement score falls inside
    /// the symmetric band `[-tree_freq/100, +tree_freq/100]`.
    pub fn plan(
        &self,
        oracle: &mut HeightOracle<'_>,
        classifier: &BlockClassifier<'_>,
        offsets: [i32; 3],
    ) -> PendingStructures {
        let mut pending = PendingStructures::new();

        let Some(template) = self.config.structures.get(BASE_TREE) else {
            return pending;
        };

        let band = self.config.noise.tree_freq / 100.0;
        let padded = self.config.padded_size() as i32;

        for x in offsets[0]..offsets[0] + padded {
            for z in offsets[2]..offsets[2] + padded {
                let max_height = oracle.highest(x, z);
                if max_height < offsets[1] || max_height >= offsets[1] + padded {
                    continue;
                }

                let surface = classifier.block_at(x, max_height, z, max_height);
                if !matches!(surface, blocks::GRASS | blocks::DIRT) {
                    continue;
                }
                if classifier.block_at(x, max_height + 1, z, max_height) != blocks::AIR {
                    continue;
                }

                let score = self.field.plant_score(x, z);
                if score < -band || score > band {
                    continue;
                }

                for block in &template.data {
                    pending.insert(
                        BlockKey::new(x + block.x, max_height + block.y, z + block.z),
                        PendingStructure {
                            id: block.id,
                            override_existing: template.override_existing,
                        },
                    );
                }
            }
        }

        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::BlockOverrideMap;
    use swampgen_core::{StructureBlock, StructureTemplate};

    /// Flat grass world with a controllable placement score.
    struct PlantedField {
        surface: i32,
        score: f64,
    }

    impl TerrainField for PlantedField {
        fn is_solid(&self, _x: i32, y: i32, _z: i32) -> bool {
            y <= self.surface
        }

        fn plant_score(&self, _x: i32, _z: i32) -> f64 {
            self.score
        }
    }

    fn test_config() -> GenerationConfig {
        GenerationConfig {
            size: 4,
            neighbor_width: 1,
            water_level: 2,
            max_world_height: 20,
            ..GenerationConfig::default()
        }
    }

    fn plan_with(field: &PlantedField, config: &GenerationConfig) -> PendingStructures {
        let overrides = BlockOverrideMap::new();
        let mut oracle = HeightOracle::new(field, config, &overrides);
        let classifier = BlockClassifier::new(field, config, &overrides);
        let planner = StructurePlanner::new(field, config);
        planner.plan(&mut oracle, &classifier, [-1, -1, -1])
    }

    #[test]
    fn qualifying_columns_expand_the_template() {
        let field = PlantedField {
            surface: 3,
            score: 0.0,
        };
        let config = test_config();
        let pending = plan_with(&field, &config);

        assert!(!pending.is_empty());
        // Trunk base sits one block above the surface.
        let trunk = pending
            .get(&BlockKey::new(0, 4, 0))
            .expect("trunk block planned");
        assert_eq!(trunk.id, blocks::OAK_LOG);
        assert!(!trunk.override_existing);
    }

    #[test]
    fn score_outside_band_plants_nothing() {
        // Default band is ±0.02; a score of 0.5 is far outside.
        let field = PlantedField {
            surface: 3,
            score: 0.5,
        };
        let config = test_config();
        assert!(plan_with(&field, &config).is_empty());
    }

    #[test]
    fn band_edges_are_inclusive() {
        let config = test_config();
        let band = config.noise.tree_freq / 100.0;
        let field = PlantedField {
            surface: 3,
            score: band,
        };
        assert!(!plan_with(&field, &config).is_empty());
    }

    #[test]
    fn submerged_surfaces_grow_nothing() {
        // The height probe bottoms out at the water line, so a drowned
        // column reads as water at its apparent top and never qualifies.
        let field = PlantedField {
            surface: 2,
            score: 0.0,
        };
        let config = GenerationConfig {
            water_level: 6,
            ..test_config()
        };
        assert!(plan_with(&field, &config).is_empty());
    }

    #[test]
    fn surfaces_out_of_chunk_range_are_skipped() {
        let field = PlantedField {
            surface: 15,
            score: 0.0,
        };
        // Padded y range is [-1, 5); a surface at 15 is out of reach.
        let config = test_config();
        assert!(plan_with(&field, &config).is_empty());
    }

    #[test]
    fn later_sites_overwrite_earlier_collisions() {
        // A wide template guarantees adjacent qualifying columns collide.
        let mut config = test_config();
        let template = StructureTemplate {
            override_existing: true,
            data: vec![
                StructureBlock {
                    x: 0,
                    y: 1,
                    z: 0,
                    id: 30,
                },
                StructureBlock {
                    x: 1,
                    y: 1,
                    z: 0,
                    id: 31,
                },
            ],
        };
        config.structures.insert(BASE_TREE, template);

        let field = PlantedField {
            surface: 3,
            score: 0.0,
        };
        let pending = plan_with(&field, &config);

        // Column x+1 plants after column x, so its anchor block (id 30)
        // replaces the neighbor's overhang (id 31) at the shared key.
        let shared = pending.get(&BlockKey::new(1, 4, 0)).unwrap();
        assert_eq!(shared.id, 30);
    }

    #[test]
    fn missing_template_disables_planting() {
        let mut config = test_config();
        config.structures = swampgen_core::StructureTable::empty();
        let field = PlantedField {
            surface: 3,
            score: 0.0,
        };
        assert!(plan_with(&field, &config).is_empty());
    }
}
