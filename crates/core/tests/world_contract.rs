use std::collections::BTreeSet;

use core::templates::TemplateLibrary;
use core::types::RoomId;
use core::worldgen::{DEPTH_BANDS, ROOMS_PER_BAND};
use core::generate_world;

#[test]
fn default_grid_shape_matches_the_published_constants() {
    let library = TemplateLibrary::build_default();
    let world = generate_world(0, &library);
    assert_eq!(world.depth_bands, DEPTH_BANDS);
    assert_eq!(world.rooms_per_band, ROOMS_PER_BAND);
    assert_eq!(world.rooms.len(), DEPTH_BANDS * ROOMS_PER_BAND);
    assert_eq!(world.surface_band, 0);
}

#[test]
fn room_identities_are_unique_across_the_grid() {
    let library = TemplateLibrary::build_default();
    let world = generate_world(97, &library);

    let ids: BTreeSet<RoomId> = world.rooms.iter().map(|room| room.id).collect();
    assert_eq!(ids.len(), world.rooms.len());
}

#[test]
fn connections_reference_real_mutually_linked_rooms() {
    let library = TemplateLibrary::build_default();
    let world = generate_world(31, &library);

    for connection in &world.connections {
        let from = world.room(connection.from).expect("connection endpoints exist");
        let to = world.room(connection.to).expect("connection endpoints exist");
        assert!(from.neighbors.contains(&to.id));
        assert!(to.neighbors.contains(&from.id));
        assert!(from.doors.contains(&connection.from_door));
        assert!(to.doors.contains(&connection.to_door));
    }
}

#[test]
fn deepest_band_reaches_the_surface_for_a_seed_sample() {
    let library = TemplateLibrary::build_default();
    for seed in [1_u32, 2, 3, 40, 99, 321, 1_024, 999_999] {
        let world = generate_world(seed, &library);
        assert!(world.has_surface_path(), "seed={seed} lost the surface path");
    }
}

#[test]
fn reachability_diagnostic_agrees_with_a_recount() {
    let library = TemplateLibrary::build_default();
    let world = generate_world(64, &library);

    let recounted = world.reachable_from(RoomId { band: 0, index: 0 }).len();
    assert_eq!(world.reachable_rooms, recounted);
}
