pub mod rng;
pub mod save;
pub mod templates;
pub mod types;
pub mod worldgen;

pub use rng::SeededRandom;
pub use save::{SaveRecord, life_spawn_point};
pub use templates::{Template, TemplateLibrary};
pub use types::*;
pub use worldgen::{Connection, Room, SpawnPoint, WorldGenerator, WorldRecord, generate_world};
