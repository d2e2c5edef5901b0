//! Public data model for generated worlds: rooms, connections, spawn
//! points, and the immutable record handed to gameplay collaborators.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::templates::Template;
use crate::types::{Direction, DoorSignature, RoomId, TilePos};

pub const ROOM_TILE_WIDTH: i32 = 20;
pub const ROOM_TILE_HEIGHT: i32 = 12;
pub const DEPTH_BANDS: usize = 8;
pub const ROOMS_PER_BAND: usize = 8;

/// One room on the band grid. Neighbor ids are relational
/// back-references into the world's room collection, never ownership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Top-left corner in world tile space.
    pub origin: TilePos,
    pub neighbors: BTreeSet<RoomId>,
    /// Doors in the order they were added; no duplicates.
    pub doors: Vec<Direction>,
    pub template: Option<Template>,
    pub spawnable: bool,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            origin: TilePos {
                x: id.index as i32 * ROOM_TILE_WIDTH,
                y: id.band as i32 * ROOM_TILE_HEIGHT,
            },
            neighbors: BTreeSet::new(),
            doors: Vec::new(),
            template: None,
            spawnable: false,
        }
    }

    pub fn door_signature(&self) -> DoorSignature {
        DoorSignature::from_directions(&self.doors)
    }

    pub fn contains_tile(&self, pos: TilePos) -> bool {
        pos.x >= self.origin.x
            && pos.x < self.origin.x + ROOM_TILE_WIDTH
            && pos.y >= self.origin.y
            && pos.y < self.origin.y + ROOM_TILE_HEIGHT
    }
}

/// A door link between two rooms, recorded once per link in creation
/// order. The pair is undirected; `from`/`to` only preserve which side
/// the link was made from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: RoomId,
    pub to: RoomId,
    pub from_door: Direction,
    pub to_door: Direction,
}

/// Candidate player placement in world tile space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub room: RoomId,
    pub pos: TilePos,
    pub depth: usize,
    /// True iff the owning room's template has no enemies.
    pub safe: bool,
}

/// The immutable output of a generation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldRecord {
    pub seed: u32,
    pub depth_bands: usize,
    pub rooms_per_band: usize,
    /// The shallowest band; gameplay treats it as the surface.
    pub surface_band: usize,
    /// Band-major, index-ascending; exactly one room per grid position.
    pub rooms: Vec<Room>,
    pub connections: Vec<Connection>,
    pub spawn_points: Vec<SpawnPoint>,
    /// Size of the component reachable from room d0r0. Diagnostic only;
    /// components the spine repair leaves unreached stay unreached.
    pub reachable_rooms: usize,
}

impl WorldRecord {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        if id.band >= self.depth_bands || id.index >= self.rooms_per_band {
            return None;
        }
        self.rooms.get(id.band * self.rooms_per_band + id.index)
    }

    /// Ids of all rooms reachable from `start` over the undirected
    /// adjacency graph.
    pub fn reachable_from(&self, start: RoomId) -> BTreeSet<RoomId> {
        let mut seen = BTreeSet::from([start]);
        let mut open = VecDeque::from([start]);
        while let Some(current) = open.pop_front() {
            let Some(room) = self.room(current) else { continue };
            for &neighbor in &room.neighbors {
                if seen.insert(neighbor) {
                    open.push_back(neighbor);
                }
            }
        }
        seen
    }

    /// Whether any deepest-band room reaches any surface-band room.
    pub fn has_surface_path(&self) -> bool {
        let deepest = self.depth_bands - 1;
        (0..self.rooms_per_band).any(|index| {
            self.reachable_from(RoomId { band: deepest, index })
                .iter()
                .any(|id| id.band == self.surface_band)
        })
    }

    /// Stable byte encoding of everything gameplay can observe, used
    /// for fingerprinting and determinism checks.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.depth_bands as u32).to_le_bytes());
        bytes.extend((self.rooms_per_band as u32).to_le_bytes());
        bytes.extend((self.surface_band as u32).to_le_bytes());

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend((room.id.band as u32).to_le_bytes());
            bytes.extend((room.id.index as u32).to_le_bytes());
            bytes.extend(room.origin.x.to_le_bytes());
            bytes.extend(room.origin.y.to_le_bytes());
            bytes.push(room.door_signature().bits());
            bytes.push(u8::from(room.spawnable));
            match &room.template {
                None => bytes.push(0),
                Some(template) => {
                    bytes.push(1);
                    bytes.extend((template.id.len() as u32).to_le_bytes());
                    bytes.extend(template.id.as_bytes());
                    for row in &template.tiles {
                        bytes.extend(row.as_bytes());
                    }
                }
            }
        }

        bytes.extend((self.connections.len() as u32).to_le_bytes());
        for connection in &self.connections {
            bytes.extend((connection.from.band as u32).to_le_bytes());
            bytes.extend((connection.from.index as u32).to_le_bytes());
            bytes.extend((connection.to.band as u32).to_le_bytes());
            bytes.extend((connection.to.index as u32).to_le_bytes());
        }

        bytes.extend((self.spawn_points.len() as u32).to_le_bytes());
        for spawn in &self.spawn_points {
            bytes.extend(spawn.pos.x.to_le_bytes());
            bytes.extend(spawn.pos.y.to_le_bytes());
            bytes.push(u8::from(spawn.safe));
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_origin_follows_the_fixed_footprint() {
        let room = Room::new(RoomId { band: 2, index: 5 });
        assert_eq!(room.origin, TilePos { x: 100, y: 24 });
        assert!(room.contains_tile(TilePos { x: 100, y: 24 }));
        assert!(room.contains_tile(TilePos { x: 119, y: 35 }));
        assert!(!room.contains_tile(TilePos { x: 120, y: 24 }));
        assert!(!room.contains_tile(TilePos { x: 100, y: 36 }));
    }

    #[test]
    fn room_lookup_rejects_out_of_grid_ids() {
        let record = WorldRecord {
            seed: 0,
            depth_bands: 2,
            rooms_per_band: 2,
            surface_band: 0,
            rooms: vec![
                Room::new(RoomId { band: 0, index: 0 }),
                Room::new(RoomId { band: 0, index: 1 }),
                Room::new(RoomId { band: 1, index: 0 }),
                Room::new(RoomId { band: 1, index: 1 }),
            ],
            connections: Vec::new(),
            spawn_points: Vec::new(),
            reachable_rooms: 1,
        };

        let found = record.room(RoomId { band: 1, index: 1 }).expect("room exists");
        assert_eq!(found.id, RoomId { band: 1, index: 1 });
        assert!(record.room(RoomId { band: 2, index: 0 }).is_none());
        assert!(record.room(RoomId { band: 0, index: 2 }).is_none());
    }
}
