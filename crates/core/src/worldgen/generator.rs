//! High-level world generation orchestration composing the graph
//! builder, connectivity repair, template assignment, and assembly.

use crate::rng::SeededRandom;
use crate::templates::TemplateLibrary;

use super::assemble::assemble_world;
use super::assign::assign_templates;
use super::graph::build_room_graph;
use super::model::{DEPTH_BANDS, ROOMS_PER_BAND, WorldRecord};
use super::repair::{ensure_surface_path, reachable_component_size};

/// World generator for one seed and one fully loaded template library.
///
/// Holds no mutable state: `generate` builds its RNG and accumulators
/// locally, so calling it repeatedly is idempotent and a single
/// instance never mixes state between runs.
pub struct WorldGenerator<'a> {
    seed: u32,
    library: &'a TemplateLibrary,
    depth_bands: usize,
    rooms_per_band: usize,
}

impl<'a> WorldGenerator<'a> {
    pub fn new(seed: u32, library: &'a TemplateLibrary) -> Self {
        Self { seed, library, depth_bands: DEPTH_BANDS, rooms_per_band: ROOMS_PER_BAND }
    }

    /// Overrides the grid dimensions. Both must be at least one.
    pub fn with_grid(mut self, depth_bands: usize, rooms_per_band: usize) -> Self {
        debug_assert!(depth_bands >= 1 && rooms_per_band >= 1);
        self.depth_bands = depth_bands;
        self.rooms_per_band = rooms_per_band;
        self
    }

    pub fn generate(&self) -> WorldRecord {
        let mut rng = SeededRandom::new(self.seed);

        let mut graph = build_room_graph(&mut rng, self.depth_bands, self.rooms_per_band);
        ensure_surface_path(&mut graph);
        let reachable_rooms = reachable_component_size(&graph);

        assign_templates(&mut graph, &mut rng, self.library);

        assemble_world(self.seed, graph, reachable_rooms)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::{RoomId, TilePos};
    use crate::worldgen::model::{ROOM_TILE_HEIGHT, ROOM_TILE_WIDTH};

    #[test]
    fn same_seed_produces_byte_identical_worlds() {
        let library = TemplateLibrary::build_default();
        let first = WorldGenerator::new(123_456, &library).generate();
        let second = WorldGenerator::new(123_456, &library).generate();
        assert_eq!(first.canonical_bytes(), second.canonical_bytes());
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn one_generator_instance_is_reusable() {
        let library = TemplateLibrary::build_default();
        let generator = WorldGenerator::new(42, &library);
        assert_eq!(generator.generate(), generator.generate());
    }

    #[test]
    fn different_seeds_produce_different_worlds() {
        let library = TemplateLibrary::build_default();
        let first = WorldGenerator::new(1, &library).generate();
        let second = WorldGenerator::new(2, &library).generate();
        assert_ne!(first.canonical_bytes(), second.canonical_bytes());
    }

    #[test]
    fn every_grid_position_gets_one_room_with_a_matching_template() {
        let library = TemplateLibrary::build_default();
        let world = WorldGenerator::new(7, &library).generate();

        assert_eq!(world.rooms.len(), world.depth_bands * world.rooms_per_band);
        for band in 0..world.depth_bands {
            for index in 0..world.rooms_per_band {
                let id = RoomId { band, index };
                let room = world.room(id).expect("one room per grid position");
                assert_eq!(room.id, id);

                let template =
                    room.template.as_ref().expect("every room receives a template");
                assert_eq!(
                    template.door_signature(),
                    room.door_signature(),
                    "door signature must equal the assigned template's ({})",
                    template.id
                );
            }
        }
    }

    #[test]
    fn seed_one_world_connects_the_deepest_band_to_the_surface() {
        let library = TemplateLibrary::build_default();
        let world = WorldGenerator::new(1, &library).generate();
        assert_eq!(world.depth_bands, 8);
        assert_eq!(world.rooms_per_band, 8);
        assert!(world.has_surface_path());
    }

    #[test]
    fn spawn_points_stay_inside_their_rooms() {
        let library = TemplateLibrary::build_default();
        let world = WorldGenerator::new(31_337, &library).generate();
        assert!(!world.spawn_points.is_empty());

        for spawn in &world.spawn_points {
            let room = world.room(spawn.room).expect("spawn references a real room");
            let local = TilePos { x: spawn.pos.x - room.origin.x, y: spawn.pos.y - room.origin.y };
            assert!((0..ROOM_TILE_WIDTH).contains(&local.x), "{spawn:?}");
            assert!((0..ROOM_TILE_HEIGHT).contains(&local.y), "{spawn:?}");
            assert_eq!(spawn.depth, spawn.room.band);
        }
    }

    #[test]
    fn safe_spawns_come_from_enemy_free_templates() {
        let library = TemplateLibrary::build_default();
        let world = WorldGenerator::new(2_024, &library).generate();
        for spawn in &world.spawn_points {
            let room = world.room(spawn.room).expect("room exists");
            let template = room.template.as_ref().expect("room has a template");
            assert_eq!(spawn.safe, template.entities.enemies.is_empty());
        }
    }

    #[test]
    fn empty_library_worlds_are_all_fallback_and_still_connected() {
        let library = TemplateLibrary { templates: Vec::new() };
        let world = WorldGenerator::new(9, &library).generate();

        for room in &world.rooms {
            let template = room.template.as_ref().expect("fallback covers every room");
            assert_eq!(template.id, "empty");
        }
        assert!(world.has_surface_path());
        // Every fallback room carries its center spawn.
        assert_eq!(world.spawn_points.len(), world.rooms.len());
    }

    #[test]
    fn library_contents_do_not_disturb_topology() {
        // Template selection happens after all topology draws, so two
        // libraries yield identical rooms and connections for a seed.
        let default_library = TemplateLibrary::build_default();
        let empty_library = TemplateLibrary { templates: Vec::new() };

        let with_default = WorldGenerator::new(555, &default_library).generate();
        let with_empty = WorldGenerator::new(555, &empty_library).generate();

        assert_eq!(with_default.connections, with_empty.connections);
        for (left, right) in with_default.rooms.iter().zip(&with_empty.rooms) {
            assert_eq!(left.doors, right.doors);
            assert_eq!(left.neighbors, right.neighbors);
        }
    }

    #[test]
    fn reachable_room_diagnostic_never_exceeds_the_grid() {
        let library = TemplateLibrary::build_default();
        for seed in [0_u32, 1, 77, 4_096] {
            let world = WorldGenerator::new(seed, &library).generate();
            assert!(world.reachable_rooms >= 1);
            assert!(world.reachable_rooms <= world.rooms.len());
        }
    }

    #[test]
    fn tiny_grids_generate_without_panicking() {
        let library = TemplateLibrary::build_default();
        let world = WorldGenerator::new(5, &library).with_grid(1, 1).generate();
        assert_eq!(world.rooms.len(), 1);
        assert!(world.connections.is_empty());
        assert!(world.has_surface_path(), "a single band is its own surface");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_worlds_uphold_the_core_invariants(seed in any::<u32>()) {
            let library = TemplateLibrary::build_default();
            let world = WorldGenerator::new(seed, &library).generate();

            prop_assert!(world.has_surface_path(), "seed={seed} lost surface reachability");

            for room in &world.rooms {
                let template = room.template.as_ref().expect("template assigned");
                prop_assert_eq!(template.door_signature(), room.door_signature());
                for &neighbor in &room.neighbors {
                    let other = world.room(neighbor).expect("neighbor ids stay on the grid");
                    prop_assert!(other.neighbors.contains(&room.id));
                }
            }

            for spawn in &world.spawn_points {
                let room = world.room(spawn.room).expect("spawn room exists");
                prop_assert!(room.contains_tile(spawn.pos), "{:?}", spawn);
            }
        }
    }
}
