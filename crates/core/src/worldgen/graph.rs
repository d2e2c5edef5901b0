//! Probabilistic room-grid construction: bands, indices, and door links.

use crate::rng::SeededRandom;
use crate::types::{Direction, RoomId};

use super::model::{Connection, Room};

pub(super) const HORIZONTAL_LINK_CHANCE: f64 = 0.7;
pub(super) const VERTICAL_LINK_CHANCE: f64 = 0.6;

/// Mutable room grid under construction. Rooms live in one flat
/// band-major vec; links only touch neighbor sets and door lists.
pub(super) struct RoomGraph {
    pub(super) depth_bands: usize,
    pub(super) rooms_per_band: usize,
    pub(super) rooms: Vec<Room>,
    pub(super) connections: Vec<Connection>,
}

impl RoomGraph {
    pub(super) fn new(depth_bands: usize, rooms_per_band: usize) -> Self {
        let mut rooms = Vec::with_capacity(depth_bands * rooms_per_band);
        for band in 0..depth_bands {
            for index in 0..rooms_per_band {
                rooms.push(Room::new(RoomId { band, index }));
            }
        }
        Self { depth_bands, rooms_per_band, rooms, connections: Vec::new() }
    }

    pub(super) fn room(&self, id: RoomId) -> &Room {
        &self.rooms[self.slot(id)]
    }

    pub(super) fn are_linked(&self, a: RoomId, b: RoomId) -> bool {
        self.room(a).neighbors.contains(&b)
    }

    /// Links two rooms: neighbor back-references both ways, a door on
    /// each side (skipped if already present), and one appended
    /// connection record.
    pub(super) fn link(
        &mut self,
        from: RoomId,
        to: RoomId,
        from_door: Direction,
        to_door: Direction,
    ) {
        let from_slot = self.slot(from);
        let to_slot = self.slot(to);

        self.rooms[from_slot].neighbors.insert(to);
        self.rooms[to_slot].neighbors.insert(from);

        if !self.rooms[from_slot].doors.contains(&from_door) {
            self.rooms[from_slot].doors.push(from_door);
        }
        if !self.rooms[to_slot].doors.contains(&to_door) {
            self.rooms[to_slot].doors.push(to_door);
        }

        self.connections.push(Connection { from, to, from_door, to_door });
    }

    fn slot(&self, id: RoomId) -> usize {
        debug_assert!(id.band < self.depth_bands && id.index < self.rooms_per_band);
        id.band * self.rooms_per_band + id.index
    }
}

/// Lays out the grid and runs the two deterministic link passes. One
/// PRNG draw per candidate pair, taken whether or not the link forms,
/// so identical seeds reproduce identical topology.
pub(super) fn build_room_graph(
    rng: &mut SeededRandom,
    depth_bands: usize,
    rooms_per_band: usize,
) -> RoomGraph {
    let mut graph = RoomGraph::new(depth_bands, rooms_per_band);

    // Horizontal pass: adjacent pairs within each band, E/W doors.
    for band in 0..depth_bands {
        for index in 0..rooms_per_band.saturating_sub(1) {
            if rng.chance(HORIZONTAL_LINK_CHANCE) {
                graph.link(
                    RoomId { band, index },
                    RoomId { band, index: index + 1 },
                    Direction::E,
                    Direction::W,
                );
            }
        }
    }

    // Vertical pass: same index across consecutive bands, S/N doors.
    for band in 0..depth_bands.saturating_sub(1) {
        for index in 0..rooms_per_band {
            if rng.chance(VERTICAL_LINK_CHANCE) {
                graph.link(
                    RoomId { band, index },
                    RoomId { band: band + 1, index },
                    Direction::S,
                    Direction::N,
                );
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_exactly_one_room_per_position() {
        let graph = RoomGraph::new(4, 5);
        assert_eq!(graph.rooms.len(), 20);
        for band in 0..4 {
            for index in 0..5 {
                assert_eq!(graph.room(RoomId { band, index }).id, RoomId { band, index });
            }
        }
    }

    #[test]
    fn link_is_symmetric_and_never_duplicates_doors() {
        let mut graph = RoomGraph::new(2, 2);
        let upper = RoomId { band: 0, index: 0 };
        let lower = RoomId { band: 1, index: 0 };

        graph.link(upper, lower, Direction::S, Direction::N);
        graph.link(upper, lower, Direction::S, Direction::N);

        assert!(graph.are_linked(upper, lower));
        assert!(graph.are_linked(lower, upper));
        assert_eq!(graph.room(upper).doors, vec![Direction::S]);
        assert_eq!(graph.room(lower).doors, vec![Direction::N]);
        // Connection records are append-only, one per link call.
        assert_eq!(graph.connections.len(), 2);
    }

    #[test]
    fn same_seed_builds_identical_topology() {
        let mut left_rng = SeededRandom::new(77);
        let mut right_rng = SeededRandom::new(77);
        let left = build_room_graph(&mut left_rng, 8, 8);
        let right = build_room_graph(&mut right_rng, 8, 8);
        assert_eq!(left.rooms, right.rooms);
        assert_eq!(left.connections, right.connections);
    }

    #[test]
    fn passes_only_produce_grid_adjacent_links() {
        let mut rng = SeededRandom::new(3);
        let graph = build_room_graph(&mut rng, 8, 8);
        for connection in &graph.connections {
            let band_gap = connection.from.band.abs_diff(connection.to.band);
            let index_gap = connection.from.index.abs_diff(connection.to.index);
            assert_eq!(band_gap + index_gap, 1, "non-adjacent link: {connection:?}");
            if band_gap == 1 {
                assert_eq!(connection.from_door, Direction::S);
                assert_eq!(connection.to_door, Direction::N);
            } else {
                assert_eq!(connection.from_door, Direction::E);
                assert_eq!(connection.to_door, Direction::W);
            }
        }
    }

    #[test]
    fn neighbor_back_references_are_symmetric() {
        let mut rng = SeededRandom::new(1234);
        let graph = build_room_graph(&mut rng, 8, 8);
        for room in &graph.rooms {
            assert!(room.neighbors.len() <= 4, "at most one neighbor per side");
            for &neighbor in &room.neighbors {
                assert!(graph.room(neighbor).neighbors.contains(&room.id));
            }
        }
    }
}
