//! Surface reachability checks and the forced vertical spine repair.
//!
//! Repair consumes no PRNG draws: its outcome depends only on the grid
//! shape, so topology generated before it is never perturbed by
//! whether it triggers.

use std::collections::{BTreeSet, VecDeque};

use crate::types::{Direction, RoomId};

use super::graph::RoomGraph;

/// Guarantees at least one path from the deepest band to the surface
/// band. Returns true when the spine had to be forced.
pub(super) fn ensure_surface_path(graph: &mut RoomGraph) -> bool {
    let surface_rooms: Vec<RoomId> =
        (0..graph.rooms_per_band).map(|index| RoomId { band: 0, index }).collect();
    let deepest = graph.depth_bands - 1;

    for index in 0..graph.rooms_per_band {
        if reaches_any(graph, RoomId { band: deepest, index }, &surface_rooms) {
            return false;
        }
    }

    force_spine(graph);
    true
}

fn reaches_any(graph: &RoomGraph, start: RoomId, targets: &[RoomId]) -> bool {
    let mut seen = BTreeSet::from([start]);
    let mut open = VecDeque::from([start]);

    while let Some(current) = open.pop_front() {
        if targets.contains(&current) {
            return true;
        }
        for &neighbor in &graph.room(current).neighbors {
            if seen.insert(neighbor) {
                open.push_back(neighbor);
            }
        }
    }

    false
}

/// Forces a vertical chain of S/N links through the center index.
/// Links already present are left alone, so re-running the repair adds
/// zero connections.
fn force_spine(graph: &mut RoomGraph) {
    let center = graph.rooms_per_band / 2;
    for band in 0..graph.depth_bands - 1 {
        let upper = RoomId { band, index: center };
        let lower = RoomId { band: band + 1, index: center };
        if !graph.are_linked(upper, lower) {
            graph.link(upper, lower, Direction::S, Direction::N);
        }
    }
}

/// Size of the component reachable from the first room. Diagnostic
/// only; components the spine leaves unreached stay unreached.
pub(super) fn reachable_component_size(graph: &RoomGraph) -> usize {
    let Some(first) = graph.rooms.first() else {
        return 0;
    };
    let start = first.id;

    let mut seen = BTreeSet::from([start]);
    let mut open = VecDeque::from([start]);
    while let Some(current) = open.pop_front() {
        for &neighbor in &graph.room(current).neighbors {
            if seen.insert(neighbor) {
                open.push_back(neighbor);
            }
        }
    }
    seen.len()
}
