#![warn(missing_docs)]
//! Deterministic testing surfaces: volume fingerprints and JSONL metric
//! sinks for comparing generation runs bit for bit.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use crc32fast::Hasher;
use serde::Serialize;

use swampgen_world::{GeneratedChunk, LightingVolume, SmoothLightingVolume, VoxelVolume};

/// Per-chunk metric record captured by headless runs.
#[derive(Debug, Serialize)]
pub struct ChunkRecord {
    /// Chunk coordinates [x, y, z].
    pub chunk: [i32; 3],
    /// Fingerprint of the padded voxel volume.
    pub voxel_crc: u32,
    /// Fingerprint of the directional lighting volume.
    pub lighting_crc: u32,
    /// Fingerprint of the smooth lighting volume.
    pub smooth_crc: u32,
    /// Non-air voxels in the padded volume.
    pub solid: usize,
    /// Water voxels in the padded volume.
    pub water: usize,
}

impl ChunkRecord {
    /// Summarize a generated chunk.
    pub fn capture(chunk: [i32; 3], generated: &GeneratedChunk) -> Self {
        let solid = generated
            .voxels
            .as_slice()
            .iter()
            .filter(|&&id| id != swampgen_core::blocks::AIR)
            .count();
        let water = generated
            .voxels
            .as_slice()
            .iter()
            .filter(|&&id| id == swampgen_core::blocks::WATER)
            .count();
        Self {
            chunk,
            voxel_crc: voxel_fingerprint(&generated.voxels),
            lighting_crc: lighting_fingerprint(&generated.lighting),
            smooth_crc: smooth_fingerprint(&generated.smooth_lighting),
            solid,
            water,
        }
    }
}

/// CRC32 of the padded voxel volume in storage order.
pub fn voxel_fingerprint(volume: &VoxelVolume) -> u32 {
    let mut hasher = Hasher::new();
    for id in volume.as_slice() {
        hasher.update(&id.to_le_bytes());
    }
    hasher.finalize()
}

/// CRC32 of the directional lighting volume.
pub fn lighting_fingerprint(volume: &LightingVolume) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(volume.as_slice());
    hasher.finalize()
}

/// CRC32 of the smooth lighting volume (corner values then flip flags).
pub fn smooth_fingerprint(volume: &SmoothLightingVolume) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(volume.values());
    hasher.update(volume.flips());
    hasher.finalize()
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append a record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
