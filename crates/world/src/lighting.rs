//! Directional face lighting via breadth-first search over liquid columns.
//!
//! For every face of a non-liquid interior voxel that touches liquid, the
//! propagator walks the connected liquid surface looking for a column open
//! to the sky. Light starts at 15 and loses one level per column hop, so a
//! face deep inside a covered pool shades darker than one near open water.

use std::collections::{HashSet, VecDeque};

use swampgen_core::{blocks, BlockId, GenerationConfig};

use crate::classify::BlockClassifier;
use crate::height::HeightOracle;
use crate::volume::{ColumnKey, VoxelVolume, FACE_COUNT, FACE_DIRS};

/// Maximum light level (0-15 range).
pub const MAX_LIGHT_LEVEL: u8 = 15;

/// BFS node: a liquid surface position with its remaining light.
#[derive(Debug, Clone, Copy)]
struct LightNode {
    x: i32,
    y: i32,
    z: i32,
    level: u8,
}

/// Computes per-face light levels against a generated voxel volume.
pub struct LightPropagator<'a> {
    voxels: &'a VoxelVolume,
    config: &'a GenerationConfig,
    offsets: [i32; 3],
}

impl<'a> LightPropagator<'a> {
    /// Build a propagator over the padded volume anchored at `offsets`.
    pub fn new(voxels: &'a VoxelVolume, config: &'a GenerationConfig, offsets: [i32; 3]) -> Self {
        Self {
            voxels,
            config,
            offsets,
        }
    }

    /// Block id at world coordinates: read from the volume when the
    /// position falls inside the padded range, otherwise synthesize it from
    /// the column height and the classifier. Out-of-volume queries never
    /// touch volume storage.
    pub fn loaded_block(
        &self,
        x: i32,
        y: i32,
        z: i32,
        oracle: &mut HeightOracle<'_>,
        classifier: &BlockClassifier<'_>,
    ) -> BlockId {
        let rx = x - self.offsets[0];
        let ry = y - self.offsets[1];
        let rz = z - self.offsets[2];
        if self.voxels.contains(rx, ry, rz) {
            return self.voxels.get_i(rx, rz, ry);
        }

        let max_height = oracle.highest(x, z);
        classifier.block_at(x, y, z, max_height)
    }

    /// Light levels for the six faces of the voxel at world `(x, y, z)`.
    ///
    /// A face is searched only when its adjacent voxel is liquid. The search
    /// is a single-origin BFS over the horizontal directions; it terminates
    /// because light strictly decreases per hop and visited columns are
    /// never re-entered. Faces with no exposed column in reach stay 0.
    pub fn face_lights(
        &self,
        x: i32,
        y: i32,
        z: i32,
        oracle: &mut HeightOracle<'_>,
        classifier: &BlockClassifier<'_>,
    ) -> [u8; FACE_COUNT] {
        let mut lights = [0u8; FACE_COUNT];

        for (face, (dx, dy, dz)) in FACE_DIRS.iter().enumerate() {
            let start = LightNode {
                x: x + dx,
                y: y + dy,
                z: z + dz,
                level: MAX_LIGHT_LEVEL,
            };

            let id = self.loaded_block(start.x, start.y, start.z, oracle, classifier);
            if !self.config.is_liquid(id) {
                continue;
            }

            let mut visited: HashSet<ColumnKey> = HashSet::new();
            visited.insert(ColumnKey::new(start.x, start.z));
            let mut queue = VecDeque::new();
            queue.push_back(start);

            while let Some(node) = queue.pop_front() {
                if oracle.highest(node.x, node.z) < node.y {
                    // Open to the sky: this column's level is the answer.
                    lights[face] = node.level;
                    break;
                }

                for (hx, _, hz) in &FACE_DIRS[1..5] {
                    let nx = node.x + hx;
                    let nz = node.z + hz;
                    if visited.contains(&ColumnKey::new(nx, nz)) || node.level == 0 {
                        continue;
                    }

                    // Adjacent pools can sit at different surface heights;
                    // climb both columns until they are liquid at the same
                    // y. The air id seeds the scan so the climb starts from
                    // the neighbor's state at the current height.
                    let mut y_probe = node.y;
                    let mut near = blocks::AIR;
                    let mut far = self.loaded_block(nx, y_probe, nz, oracle, classifier);
                    while self.config.is_liquid(near) && !self.config.is_liquid(far) {
                        y_probe += 1;
                        near = self.loaded_block(node.x, y_probe, node.z, oracle, classifier);
                        far = self.loaded_block(nx, y_probe, nz, oracle, classifier);
                    }
                    if !self.config.is_liquid(near) || !self.config.is_liquid(far) {
                        continue;
                    }

                    visited.insert(ColumnKey::new(nx, nz));
                    queue.push_back(LightNode {
                        x: nx,
                        y: y_probe,
                        z: nz,
                        level: node.level - 1,
                    });
                }
            }
        }

        lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::TerrainField;
    use crate::volume::BlockOverrideMap;
    use swampgen_core::blocks;

    /// Column heights controlled per x coordinate; z is ignored.
    struct RidgeField {
        heights: Vec<(i32, i32)>,
        default_height: i32,
    }

    impl RidgeField {
        fn height_at(&self, x: i32) -> i32 {
            self.heights
                .iter()
                .find(|(col, _)| *col == x)
                .map(|(_, h)| *h)
                .unwrap_or(self.default_height)
        }
    }

    impl TerrainField for RidgeField {
        fn is_solid(&self, x: i32, y: i32, _z: i32) -> bool {
            y <= self.height_at(x)
        }

        fn plant_score(&self, _x: i32, _z: i32) -> f64 {
            1.0
        }
    }

    fn test_config(size: usize) -> GenerationConfig {
        GenerationConfig {
            size,
            neighbor_width: 1,
            water_level: 8,
            max_world_height: 20,
            ..GenerationConfig::default()
        }
    }

    /// A solid padded volume with a few liquid voxels poked in.
    fn solid_volume(side: usize, water: &[(usize, usize, usize)]) -> VoxelVolume {
        let mut volume = VoxelVolume::new(side);
        for x in 0..side {
            for z in 0..side {
                for y in 0..side {
                    volume.set(x, z, y, blocks::STONE);
                }
            }
        }
        for &(x, z, y) in water {
            volume.set(x, z, y, blocks::WATER);
        }
        volume
    }

    #[test]
    fn exposed_neighbor_column_lights_fully() {
        // Underwater columns probe to water_level - 1 = 7, so water at
        // world y = 8 counts as open to the sky.
        let config = test_config(8);
        let field = RidgeField {
            heights: vec![],
            default_height: 5,
        };
        let overrides = BlockOverrideMap::new();
        let mut oracle = HeightOracle::new(&field, &config, &overrides);
        let classifier = BlockClassifier::new(&field, &config, &overrides);

        let offsets = [-1, -1, -1];
        // Water at world (1, 8, 1) = local (2, 2, 9).
        let volume = solid_volume(10, &[(2, 2, 9)]);
        let propagator = LightPropagator::new(&volume, &config, offsets);

        // Solid voxel west of the water, world (0, 8, 1).
        let lights = propagator.face_lights(0, 8, 1, &mut oracle, &classifier);
        assert_eq!(lights[1], MAX_LIGHT_LEVEL, "+x face sees exposed water");
    }

    #[test]
    fn light_decays_one_level_per_hop() {
        // Water channel at y = 8 along x: columns 1..=3, covered except the
        // far end. Terrain: columns 1 and 2 are capped high, column 3 open.
        let config = test_config(8);
        let field = RidgeField {
            heights: vec![(1, 20), (2, 20), (3, 7)],
            default_height: 20,
        };
        let overrides = BlockOverrideMap::new();
        let mut oracle = HeightOracle::new(&field, &config, &overrides);
        let classifier = BlockClassifier::new(&field, &config, &overrides);

        let offsets = [-1, -1, -1];
        // Local coords = world + 1.
        let volume = solid_volume(10, &[(2, 1, 9), (3, 1, 9), (4, 1, 9)]);
        let propagator = LightPropagator::new(&volume, &config, offsets);

        // Solid voxel at world (0, 8, 0); its +x neighbor is the channel
        // mouth at world (1, 8, 0). Exposure is two hops away at x = 3.
        let lights = propagator.face_lights(0, 8, 0, &mut oracle, &classifier);
        assert_eq!(lights[1], MAX_LIGHT_LEVEL - 2);
        // Other faces touch solid stone and stay dark.
        assert_eq!(lights[0], 0);
        assert_eq!(lights[5], 0);
    }

    #[test]
    fn enclosed_pocket_terminates_dark() {
        // A 2x2 water pocket sealed on every side, with terrain far above:
        // the search must drain and leave the face at 0.
        let config = test_config(8);
        let field = RidgeField {
            heights: vec![],
            default_height: 20,
        };
        let overrides = BlockOverrideMap::new();
        let mut oracle = HeightOracle::new(&field, &config, &overrides);
        let classifier = BlockClassifier::new(&field, &config, &overrides);

        let offsets = [-1, -1, -1];
        let volume = solid_volume(
            10,
            &[(4, 4, 6), (4, 5, 6), (5, 4, 6), (5, 5, 6)],
        );
        let propagator = LightPropagator::new(&volume, &config, offsets);

        // Solid voxel west of the pocket, world (2, 5, 3).
        let lights = propagator.face_lights(2, 5, 3, &mut oracle, &classifier);
        assert_eq!(lights, [0u8; FACE_COUNT]);
    }

    #[test]
    fn all_levels_stay_in_range() {
        let config = test_config(8);
        let field = RidgeField {
            heights: vec![(3, 7)],
            default_height: 20,
        };
        let overrides = BlockOverrideMap::new();
        let mut oracle = HeightOracle::new(&field, &config, &overrides);
        let classifier = BlockClassifier::new(&field, &config, &overrides);

        let offsets = [-1, -1, -1];
        let volume = solid_volume(10, &[(2, 1, 9), (3, 1, 9), (4, 1, 9)]);
        let propagator = LightPropagator::new(&volume, &config, offsets);

        for y in 7..=9 {
            let lights = propagator.face_lights(0, y, 0, &mut oracle, &classifier);
            assert!(lights.iter().all(|&l| l <= MAX_LIGHT_LEVEL));
        }
    }

    #[test]
    fn out_of_volume_reads_synthesize_from_terrain() {
        let config = test_config(4);
        let field = RidgeField {
            heights: vec![],
            default_height: 5,
        };
        let overrides = BlockOverrideMap::new();
        let mut oracle = HeightOracle::new(&field, &config, &overrides);
        let classifier = BlockClassifier::new(&field, &config, &overrides);

        let offsets = [-1, -1, -1];
        let volume = solid_volume(6, &[]);
        let propagator = LightPropagator::new(&volume, &config, offsets);

        // Far outside the padded volume: solid below the surface, water in
        // the flooded band, air above.
        assert_eq!(
            propagator.loaded_block(50, 3, 50, &mut oracle, &classifier),
            blocks::STONE
        );
        assert_eq!(
            propagator.loaded_block(50, 7, 50, &mut oracle, &classifier),
            blocks::WATER
        );
        assert_eq!(
            propagator.loaded_block(50, 12, 50, &mut oracle, &classifier),
            blocks::AIR
        );
    }
}
