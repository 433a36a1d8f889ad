//! Column height queries over the terrain density field.
//!
//! The oracle owns a per-generation-call cache of highest-solid heights.
//! It is created fresh for every chunk generation and discarded with it;
//! cached entries are never invalidated within a call because the highest
//! solid height of a column is a pure function of `(x, z, seed)`.

use std::collections::HashMap;

use swampgen_core::GenerationConfig;

use crate::seed::TerrainField;
use crate::volume::{BlockKey, BlockOverrideMap, ColumnKey};

/// Cached column height lookups for one chunk generation call.
pub struct HeightOracle<'a> {
    field: &'a dyn TerrainField,
    config: &'a GenerationConfig,
    overrides: &'a BlockOverrideMap,
    cache: HashMap<ColumnKey, i32>,
}

impl<'a> HeightOracle<'a> {
    /// Create an oracle with an empty cache.
    pub fn new(
        field: &'a dyn TerrainField,
        config: &'a GenerationConfig,
        overrides: &'a BlockOverrideMap,
    ) -> Self {
        Self {
            field,
            config,
            overrides,
            cache: HashMap::new(),
        }
    }

    /// Solidity with explicit edits applied: a nonzero override is solid, a
    /// zero override is carved out, anything else falls back to the field.
    pub fn is_solid_with_overrides(&self, x: i32, y: i32, z: i32) -> bool {
        match self.overrides.get(&BlockKey::new(x, y, z)) {
            Some(&id) => id != 0,
            None => self.field.is_solid(x, y, z),
        }
    }

    /// Topmost solid y of the column, by linear scan from the world ceiling.
    ///
    /// Every y gets inspected, so this is only worth using where a pass must
    /// touch the whole column anyway. The result lands in the same cache
    /// [`Self::highest`] reads.
    pub fn naive_highest(&mut self, x: i32, z: i32) -> i32 {
        let mut height = 0;
        for y in (0..=self.config.max_world_height).rev() {
            if self.field.is_solid(x, y, z) {
                height = y;
                break;
            }
        }

        self.cache.insert(ColumnKey::new(x, z), height);
        height
    }

    /// Highest solid y of the column, by binary search over
    /// `[water_level, max_world_height]`.
    ///
    /// The probe looks for a solid voxel with two vacant voxels above it,
    /// which tells the true ground surface apart from a stray one-voxel
    /// overhang. Precondition: the density field crosses the solid/air
    /// boundary exactly once per column within the searched range. The
    /// smooth single-surface field upholds this; terrain features that break
    /// it (caves, overhangs deeper than two voxels) silently return a wrong
    /// height, and detecting that would cost as much as the naive scan this
    /// path exists to avoid.
    pub fn highest(&mut self, x: i32, z: i32) -> i32 {
        let key = ColumnKey::new(x, z);
        if let Some(&height) = self.cache.get(&key) {
            return height;
        }

        let mut high = self.config.max_world_height;
        let mut low = self.config.water_level;
        let mut middle = (low + high).div_euclid(2);

        while low <= high {
            if self.is_solid_with_overrides(x, middle, z)
                && !self.is_solid_with_overrides(x, middle + 1, z)
                && !self.is_solid_with_overrides(x, middle + 2, z)
            {
                break;
            }

            if !self.is_solid_with_overrides(x, middle, z) {
                high = middle - 1;
            } else {
                // middle and middle+1 are ruled out together.
                low = middle + 2;
            }

            middle = (low + high).div_euclid(2);
        }

        self.cache.insert(key, middle);
        middle
    }
}
