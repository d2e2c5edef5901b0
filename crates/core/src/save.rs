//! Save-record contract shared with the gameplay shell, plus the
//! per-life spawn selection that depends on it.
//!
//! The generator itself never reads or writes this file; the record
//! only feeds it a seed, and feeds spawn selection a death count.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rng::SeededRandom;
use crate::worldgen::{SpawnPoint, WorldRecord};

pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Upgrades {
    pub max_hearts: u32,
    pub double_jump: bool,
    pub map_radius: u32,
    pub damage_reduction: u32,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self { max_hearts: 3, double_jump: false, map_radius: 0, damage_reduction: 0 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RunStats {
    pub times_surface_reached: u64,
    pub total_shards_collected: u64,
    pub enemies_defeated: u64,
}

/// Persistent progress for one world. `world_seed` drives generation;
/// `death_count` combines with it to pick a deterministic spawn point
/// per life.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    pub format_version: u32,
    pub world_seed: u32,
    #[serde(default)]
    pub death_count: u32,
    /// Room ids in `d{band}r{index}` form.
    #[serde(default)]
    pub discovered_rooms: BTreeSet<String>,
    #[serde(default)]
    pub upgrades: Upgrades,
    #[serde(default)]
    pub banked_shards: u64,
    #[serde(default)]
    pub stats: RunStats,
}

impl SaveRecord {
    pub fn new(world_seed: u32) -> Self {
        Self {
            format_version: SAVE_FORMAT_VERSION,
            world_seed,
            death_count: 0,
            discovered_rooms: BTreeSet::new(),
            upgrades: Upgrades::default(),
            banked_shards: 0,
            stats: RunStats::default(),
        }
    }

    /// Writes via a temp file and rename so a crash never leaves a
    /// truncated save behind.
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let record: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if record.format_version != SAVE_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported save format version {}", record.format_version),
            ));
        }
        Ok(record)
    }
}

/// Deterministic spawn point for the current life: a separate stream
/// seeded from `world_seed + death_count` picks uniformly from the
/// world's full spawn list. Returns `None` only for a world with no
/// spawn points at all.
pub fn life_spawn_point<'a>(world: &'a WorldRecord, save: &SaveRecord) -> Option<&'a SpawnPoint> {
    if world.spawn_points.is_empty() {
        return None;
    }
    let mut rng = SeededRandom::new(save.world_seed.wrapping_add(save.death_count));
    Some(rng.pick(&world.spawn_points))
}
