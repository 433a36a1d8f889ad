//! Block classification: coordinate plus column height to block id.

use swampgen_core::{blocks, BlockId, GenerationConfig};

use crate::seed::TerrainField;
use crate::volume::{BlockKey, BlockOverrideMap};

/// Depth of the sub-surface band below the column top.
const UNDER_TOP_DEPTH: i32 = 3;

/// Applies the surface, shoreline, and water rules of the classic generator.
pub struct BlockClassifier<'a> {
    field: &'a dyn TerrainField,
    config: &'a GenerationConfig,
    overrides: &'a BlockOverrideMap,
}

impl<'a> BlockClassifier<'a> {
    /// Build a classifier over a terrain field and the chunk's edit map.
    pub fn new(
        field: &'a dyn TerrainField,
        config: &'a GenerationConfig,
        overrides: &'a BlockOverrideMap,
    ) -> Self {
        Self {
            field,
            config,
            overrides,
        }
    }

    /// Block id for world `(x, y, z)` given the column's highest solid y.
    ///
    /// An explicit edit wins unconditionally. Outside the vertical world
    /// bounds everything is air. Solid voxels become beach at an exposed
    /// water-level shoreline, the configured top/under-top at the column
    /// surface, under-top through the sub-surface band, and stone below.
    /// Vacant voxels at or below water level flood with water.
    pub fn block_at(&self, x: i32, y: i32, z: i32, max_height: i32) -> BlockId {
        if let Some(&id) = self.overrides.get(&BlockKey::new(x, y, z)) {
            return id;
        }

        if y > self.config.max_world_height || y <= 0 {
            return blocks::AIR;
        }

        let surface = &self.config.surface;
        let water_level = self.config.water_level;

        if self.field.is_solid(x, y, z) {
            // Shoreline: a sea-level voxel open to the sky with at least one
            // open horizontal side. Neighbor probes are pure terrain; edits
            // do not reshape beaches.
            if y == water_level
                && !self.field.is_solid(x, y + 1, z)
                && (!self.field.is_solid(x, y, z - 1)
                    || !self.field.is_solid(x - 1, y, z)
                    || !self.field.is_solid(x + 1, y, z)
                    || !self.field.is_solid(x, y, z + 1))
            {
                surface.beach
            } else if y == max_height {
                if y < water_level {
                    surface.under_top
                } else {
                    surface.top
                }
            } else if y >= max_height - UNDER_TOP_DEPTH && y < max_height {
                surface.under_top
            } else {
                blocks::STONE
            }
        } else if y <= water_level {
            blocks::WATER
        } else {
            blocks::AIR
        }
    }
}
