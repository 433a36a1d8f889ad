//! Common block IDs used by the classic generator.

use crate::BlockId;

/// Air / empty voxel.
pub const AIR: BlockId = 0;
/// Generic stone filling the column interior.
pub const STONE: BlockId = 1;
/// Grass surface block.
pub const GRASS: BlockId = 2;
/// Dirt sub-surface block.
pub const DIRT: BlockId = 3;
/// Sand, used for shoreline shaping.
pub const SAND: BlockId = 4;
/// Still water.
pub const WATER: BlockId = 9;
/// Oak log for tree trunks.
pub const OAK_LOG: BlockId = 17;
/// Oak leaves for tree canopies.
pub const OAK_LEAVES: BlockId = 18;
