//! Procedural world generation domain split into coherent submodules.

pub mod model;

mod assemble;
mod assign;
mod generator;
mod graph;
mod repair;

pub use generator::WorldGenerator;
pub use model::{
    Connection, DEPTH_BANDS, ROOM_TILE_HEIGHT, ROOM_TILE_WIDTH, ROOMS_PER_BAND, Room, SpawnPoint,
    WorldRecord,
};

use crate::templates::TemplateLibrary;

pub fn generate_world(seed: u32, library: &TemplateLibrary) -> WorldRecord {
    WorldGenerator::new(seed, library).generate()
}
