//! Seed derivation and the seeded noise suite.
//!
//! A world is identified by an arbitrary seed string. The string is folded
//! into a 32-bit seed which in turn seeds the terrain, tree-placement,
//! rainfall, and temperature noise sources. Same string, same terrain —
//! always.

use noise::{NoiseFn, Perlin, Simplex};
use swampgen_core::NoiseParams;

/// Solidity threshold for the terrain density field.
const SOLID_THRESHOLD: f64 = -0.2;

/// Fold a seed string into a numeric seed.
///
/// Iterates the string's UTF-16 code units accumulating `hash * 31 + code`
/// with wrapping 32-bit semantics, so any length of input produces a stable
/// integer. The empty string hashes to 0.
pub fn derive_seed(seed: &str) -> i32 {
    let mut hash: i32 = 0;
    for code in seed.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(code));
    }
    hash
}

/// The terrain queries the generation pipeline needs from a noise source.
///
/// The production implementation is [`NoiseSuite`]; tests substitute fixed
/// fields to pin classifier and lighting behavior.
pub trait TerrainField {
    /// Whether the voxel at world `(x, y, z)` is solid ground.
    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool;

    /// Placement score for surface structures at column `(x, z)`, in [-1, 1].
    fn plant_score(&self, x: i32, z: i32) -> f64;
}

/// Seeded noise sources for one world.
///
/// Construction is cheap and deterministic; the suite is immutable afterwards
/// and may be shared freely across worker threads.
pub struct NoiseSuite {
    terrain: Perlin,
    tree: Simplex,
    rainfall: Perlin,
    temperature: Perlin,
    params: NoiseParams,
}

impl NoiseSuite {
    /// Seed all noise sources from a numeric world seed.
    ///
    /// Rainfall and temperature derive their own seeds (`seed * 2` and
    /// `seed / 2`, flooring) so the biome fields decorrelate from terrain.
    pub fn new(seed: i32, params: NoiseParams) -> Self {
        Self {
            terrain: Perlin::new(seed as u32),
            tree: Simplex::new(seed as u32),
            rainfall: Perlin::new(seed.wrapping_mul(2) as u32),
            temperature: Perlin::new(seed.div_euclid(2) as u32),
            params,
        }
    }

    /// Multi-octave 3D terrain noise at pre-scaled coordinates.
    ///
    /// Sums `octaves` layers with amplitude decaying by `persistence` and
    /// frequency growing by `lacunarity`, normalizes by the accumulated
    /// amplitude, then applies `amplifier` and `height_offset`.
    pub fn octave_perlin3(&self, x: f64, y: f64, z: f64) -> f64 {
        let scale = self.params.scale;
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..self.params.octaves {
            total += self.terrain.get([
                x * frequency * scale,
                y * frequency * scale,
                z * frequency * scale,
            ]) * amplitude;

            max_value += amplitude;

            amplitude *= self.params.persistence;
            frequency *= self.params.lacunarity;
        }

        (total / max_value) * self.params.amplifier + self.params.height_offset
    }

    /// Terrain density at pre-scaled coordinates: octave noise minus a
    /// vertical gradient, which keeps the ground a single continuous surface
    /// instead of floating islands.
    fn density(&self, x: f64, y: f64, z: f64) -> f64 {
        self.octave_perlin3(x, y, z) - (y * 4.0) / self.params.scale
    }

    /// Rainfall sample for biome work.
    pub fn sample_rainfall(&self, x: f64, z: f64) -> f64 {
        self.rainfall.get([x, z])
    }

    /// Temperature sample for biome work.
    pub fn sample_temperature(&self, x: f64, z: f64) -> f64 {
        self.temperature.get([x, z])
    }
}

impl TerrainField for NoiseSuite {
    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        let s = self.params.scale;
        self.density(
            f64::from(x) * s / 100.0,
            f64::from(y) * s / 100.0,
            f64::from(z) * s / 100.0,
        ) >= SOLID_THRESHOLD
    }

    fn plant_score(&self, x: i32, z: i32) -> f64 {
        self.tree.get([
            f64::from(x) / self.params.tree_scale,
            f64::from(z) / self.params.tree_scale,
        ])
    }
}
