//! Final aggregation of rooms, connections, and spawn points into the
//! immutable world record.

use crate::types::TilePos;

use super::graph::RoomGraph;
use super::model::{SpawnPoint, WorldRecord};

/// Translates template spawn entries to world coordinates, derives
/// per-room spawnability and per-spawn safety, and seals everything
/// into the record handed to gameplay collaborators.
pub(super) fn assemble_world(seed: u32, graph: RoomGraph, reachable_rooms: usize) -> WorldRecord {
    let RoomGraph { depth_bands, rooms_per_band, mut rooms, connections } = graph;

    let mut spawn_points = Vec::new();
    for room in &mut rooms {
        let Some(template) = &room.template else { continue };
        let safe = template.entities.enemies.is_empty();

        for spawn in &template.entities.spawns {
            spawn_points.push(SpawnPoint {
                room: room.id,
                pos: TilePos { x: room.origin.x + spawn.x, y: room.origin.y + spawn.y },
                depth: room.id.band,
                safe,
            });
        }
        room.spawnable = !template.entities.spawns.is_empty();
    }

    WorldRecord {
        seed,
        depth_bands,
        rooms_per_band,
        surface_band: 0,
        rooms,
        connections,
        spawn_points,
        reachable_rooms,
    }
}
