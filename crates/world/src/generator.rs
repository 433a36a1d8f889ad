//! The classic chunk generator: terrain, structures, and lighting in one
//! deterministic pass per chunk.

use tracing::{debug, instrument};

use swampgen_core::{blocks, GenerationConfig};

use crate::classify::BlockClassifier;
use crate::height::HeightOracle;
use crate::lighting::LightPropagator;
use crate::seed::{derive_seed, NoiseSuite, TerrainField};
use crate::smooth::face_shading;
use crate::structures::StructurePlanner;
use crate::volume::{
    BlockKey, BlockOverrideMap, ChunkPos, LightingVolume, SmoothLightingVolume, VoxelVolume,
    FACE_COUNT,
};

/// The three volumes produced for one chunk.
pub struct GeneratedChunk {
    /// Padded block-type volume.
    pub voxels: VoxelVolume,
    /// Directional face light for the chunk interior.
    pub lighting: LightingVolume,
    /// Smooth corner shading for the chunk interior.
    pub smooth_lighting: SmoothLightingVolume,
}

/// One generator instance per world seed, reused across many chunks.
///
/// The instance is immutable after construction: every per-chunk cache lives
/// in the generation call itself, so `&ClassicGenerator` can be shared
/// across worker threads without locks.
pub struct ClassicGenerator {
    config: GenerationConfig,
    suite: NoiseSuite,
    seed: i32,
}

impl ClassicGenerator {
    /// Derive the numeric seed from `seed_str` and seed the noise suite.
    ///
    /// The config must already be validated; see
    /// [`GenerationConfig::validate`].
    pub fn new(seed_str: &str, config: GenerationConfig) -> Self {
        let seed = derive_seed(seed_str);
        let suite = NoiseSuite::new(seed, config.noise.clone());
        debug!(seed, "seeded classic generator");
        Self {
            config,
            suite,
            seed,
        }
    }

    /// The derived numeric world seed.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// The generation config this instance was built with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate the voxel and lighting volumes for one chunk.
    ///
    /// `overrides` carries the chunk's explicit world edits; pass an empty
    /// map when there are none. Deterministic: the same seed, config,
    /// chunk, and overrides always produce bit-identical volumes.
    #[instrument(skip(self, overrides), fields(chunk = %chunk, seed = self.seed))]
    pub fn generate(&self, chunk: ChunkPos, overrides: &BlockOverrideMap) -> GeneratedChunk {
        generate_with_field(&self.suite, &self.config, chunk, overrides)
    }
}

/// World-space origin of the padded volume for `chunk`.
fn chunk_offsets(config: &GenerationConfig, chunk: ChunkPos) -> [i32; 3] {
    let size = config.size as i32;
    let nw = config.neighbor_width as i32;
    [
        chunk.x * size - nw,
        chunk.y * size - nw,
        chunk.z * size - nw,
    ]
}

/// Generate a chunk against an explicit terrain field.
///
/// This is the full pipeline behind [`ClassicGenerator::generate`], exposed
/// so deterministic fields can stand in for the seeded noise.
pub fn generate_with_field(
    field: &dyn TerrainField,
    config: &GenerationConfig,
    chunk: ChunkPos,
    overrides: &BlockOverrideMap,
) -> GeneratedChunk {
    let mut oracle = HeightOracle::new(field, config, overrides);

    let mut voxels = VoxelVolume::new(config.padded_size());
    set_voxel_data(&mut voxels, chunk, field, config, overrides, &mut oracle);

    let (lighting, smooth_lighting) =
        set_lighting_data(&voxels, chunk, field, config, overrides, &mut oracle);

    GeneratedChunk {
        voxels,
        lighting,
        smooth_lighting,
    }
}

/// Fill the padded voxel volume for `chunk`.
///
/// Terrain classification runs first, then pending structure blocks merge
/// in: a structure block lands only on air unless its template overrides,
/// and never on an explicitly edited voxel.
pub fn set_voxel_data(
    volume: &mut VoxelVolume,
    chunk: ChunkPos,
    field: &dyn TerrainField,
    config: &GenerationConfig,
    overrides: &BlockOverrideMap,
    oracle: &mut HeightOracle<'_>,
) {
    let offsets = chunk_offsets(config, chunk);
    let classifier = BlockClassifier::new(field, config, overrides);
    let planner = StructurePlanner::new(field, config);

    let pending = planner.plan(oracle, &classifier, offsets);
    debug!(pending = pending.len(), "planned structure blocks");

    let padded = config.padded_size() as i32;
    for x in 0..padded {
        let wx = offsets[0] + x;
        for z in 0..padded {
            let wz = offsets[2] + z;
            let max_height = oracle.highest(wx, wz);
            for y in 0..padded {
                let wy = offsets[1] + y;
                let mut id = classifier.block_at(wx, wy, wz, max_height);

                let key = BlockKey::new(wx, wy, wz);
                if !overrides.contains_key(&key) {
                    if let Some(structure) = pending.get(&key) {
                        if id == blocks::AIR || structure.override_existing {
                            id = structure.id;
                        }
                    }
                }

                volume.set(x as usize, z as usize, y as usize, id);
            }
        }
    }
}

/// Compute both lighting volumes for the chunk interior.
///
/// Liquid voxels carry no lighting of their own; every non-liquid interior
/// voxel gets six directional levels and, where a face touches liquid,
/// smooth corner shading.
pub fn set_lighting_data(
    voxels: &VoxelVolume,
    chunk: ChunkPos,
    field: &dyn TerrainField,
    config: &GenerationConfig,
    overrides: &BlockOverrideMap,
    oracle: &mut HeightOracle<'_>,
) -> (LightingVolume, SmoothLightingVolume) {
    let offsets = chunk_offsets(config, chunk);
    let classifier = BlockClassifier::new(field, config, overrides);
    let propagator = LightPropagator::new(voxels, config, offsets);

    let mut lighting = LightingVolume::new(config.size);
    let mut smooth = SmoothLightingVolume::new(config.size);

    let nw = config.neighbor_width;
    for x in nw..config.size + nw {
        for z in nw..config.size + nw {
            for y in nw..config.size + nw {
                if config.is_liquid(voxels.get(x, z, y)) {
                    continue;
                }

                let wx = offsets[0] + x as i32;
                let wy = offsets[1] + y as i32;
                let wz = offsets[2] + z as i32;

                let lights = propagator.face_lights(wx, wy, wz, oracle, &classifier);
                for (face, level) in lights.iter().enumerate() {
                    lighting.set(x - nw, z - nw, y - nw, face, *level);
                }

                let shades = face_shading(voxels, x, z, y, config);
                for face in 0..FACE_COUNT {
                    if let Some(shading) = &shades[face] {
                        smooth.set_face(x - nw, z - nw, y - nw, face, shading);
                    }
                }
            }
        }
    }

    (lighting, smooth)
}
