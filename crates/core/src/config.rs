//! Static generation configuration.
//!
//! One validated config is shared by every chunk generated for a world. The
//! generator assumes a validated config; callers run [`GenerationConfig::validate`]
//! once before constructing a generator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::structure::StructureTable;
use crate::{blocks, BlockId};

/// Noise constants for the classic swampland tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Horizontal/vertical coordinate scale applied before sampling.
    pub scale: f64,
    /// Number of octaves (layers of detail).
    pub octaves: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Constant density offset raising the ground surface.
    pub height_offset: f64,
    /// Scale applied to the normalized octave sum.
    pub amplifier: f64,
    /// Width of the tree-placement score band, in hundredths.
    pub tree_freq: f64,
    /// Coordinate divisor for the tree-placement simplex sample.
    pub tree_scale: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            height_offset: 2.5,
            amplifier: 1.0,
            tree_freq: 2.0,
            tree_scale: 30.0,
        }
    }
}

/// Block roles assigned by the surface classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceBlocks {
    /// Block placed at the top of a column above water level.
    pub top: BlockId,
    /// Block for the sub-surface band and submerged column tops.
    pub under_top: BlockId,
    /// Block for shoreline edges at water level.
    pub beach: BlockId,
}

impl Default for SurfaceBlocks {
    fn default() -> Self {
        Self {
            top: blocks::GRASS,
            under_top: blocks::DIRT,
            beach: blocks::SAND,
        }
    }
}

/// Static configuration consumed by the chunk generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Chunk edge length in voxels.
    pub size: usize,
    /// Padding halo generated around the chunk for seamless meshing.
    pub neighbor_width: usize,
    /// Sea level in world-y blocks.
    pub water_level: i32,
    /// Highest world-y the terrain field is evaluated at.
    pub max_world_height: i32,
    /// Block ids light passes through. Air belongs here: the lighting
    /// search crosses open columns the same way it crosses water.
    pub liquid_blocks: Vec<BlockId>,
    /// Noise constants.
    pub noise: NoiseParams,
    /// Surface block roles.
    pub surface: SurfaceBlocks,
    /// Structure templates keyed by name.
    pub structures: StructureTable,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            size: 16,
            neighbor_width: 1,
            water_level: 62,
            max_world_height: 128,
            liquid_blocks: vec![blocks::AIR, blocks::WATER],
            noise: NoiseParams::default(),
            surface: SurfaceBlocks::default(),
            structures: StructureTable::default(),
        }
    }
}

impl GenerationConfig {
    /// Volume edge length including the halo on both sides.
    pub fn padded_size(&self) -> usize {
        self.size + 2 * self.neighbor_width
    }

    /// True when light passes through the given block id.
    pub fn is_liquid(&self, id: BlockId) -> bool {
        self.liquid_blocks.contains(&id)
    }

    /// Check the config invariants the generator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.neighbor_width == 0 {
            return Err(ConfigError::ZeroNeighborWidth);
        }
        if self.noise.octaves == 0 {
            return Err(ConfigError::ZeroOctaves);
        }
        if self.water_level >= self.max_world_height {
            return Err(ConfigError::WaterAboveWorld {
                water_level: self.water_level,
                max_world_height: self.max_world_height,
            });
        }
        if self.liquid_blocks.is_empty() {
            return Err(ConfigError::EmptyLiquidSet);
        }
        Ok(())
    }
}

/// Config invariant violations reported by [`GenerationConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `size` must be at least 1.
    #[error("chunk size must be at least 1")]
    ZeroSize,
    /// `neighbor_width` must be at least 1 so face-neighbor sampling stays in bounds.
    #[error("neighbor width must be at least 1")]
    ZeroNeighborWidth,
    /// `octaves` must be at least 1.
    #[error("noise octaves must be at least 1")]
    ZeroOctaves,
    /// The height probe searches `[water_level, max_world_height]`.
    #[error("water level {water_level} must be below max world height {max_world_height}")]
    WaterAboveWorld {
        /// Configured sea level.
        water_level: i32,
        /// Configured world ceiling.
        max_world_height: i32,
    },
    /// An empty liquid set would disable both lighting passes.
    #[error("liquid block set must not be empty")]
    EmptyLiquidSet,
}
