//! Door-signature template matching with weighted selection and
//! fallback synthesis.

use crate::rng::SeededRandom;
use crate::templates::{
    EntityManifest, SpawnPlacement, TEMPLATE_COLUMNS, TEMPLATE_ROWS, Template, TemplateLibrary,
};
use crate::types::{Direction, DoorSignature};

use super::graph::RoomGraph;

/// Assigns a template to every room. Rooms iterate in band-major grid
/// order; a weighted draw happens only for rooms with at least one
/// compatible template, so fallback synthesis never shifts the stream.
/// Returns how many rooms fell back to a synthesized template.
pub(super) fn assign_templates(
    graph: &mut RoomGraph,
    rng: &mut SeededRandom,
    library: &TemplateLibrary,
) -> usize {
    let mut fallback_count = 0;

    for room in &mut graph.rooms {
        let signature = room.door_signature();
        let compatible = library.matching(signature);

        let template = if compatible.is_empty() {
            fallback_count += 1;
            synthesize_fallback(signature)
        } else {
            select_weighted(rng, &compatible).clone()
        };
        room.template = Some(template);
    }

    fallback_count
}

/// Accumulator/threshold weighted selection over candidates in library
/// order: draw in `[0, total_weight)`, subtract each weight until the
/// remainder drops to or below zero.
fn select_weighted<'a>(rng: &mut SeededRandom, candidates: &[&'a Template]) -> &'a Template {
    let total_weight: u32 = candidates.iter().map(|template| template.weight).sum();
    let mut remainder = rng.range_f64(0.0, f64::from(total_weight));

    for template in candidates {
        remainder -= f64::from(template.weight);
        if remainder <= 0.0 {
            return template;
        }
    }
    // The draw is strictly below the weight total, so the loop always
    // crosses zero; this arm is unreachable in practice.
    candidates[candidates.len() - 1]
}

/// Synthesizes the plain room used when no template matches: solid
/// border with a 2-tile gap centered on each signed side, open
/// interior, one spawn at the geometric center, no enemies or pickups.
/// Consumes no PRNG draws.
pub(super) fn synthesize_fallback(signature: DoorSignature) -> Template {
    let mut tiles = Vec::with_capacity(TEMPLATE_ROWS);
    for y in 0..TEMPLATE_ROWS {
        let mut row = String::with_capacity(TEMPLATE_COLUMNS);
        for x in 0..TEMPLATE_COLUMNS {
            row.push(if fallback_tile_is_wall(signature, x, y) { '#' } else { '.' });
        }
        tiles.push(row);
    }

    Template {
        id: "empty".to_string(),
        doors: signature.directions(),
        tiles,
        entities: EntityManifest {
            enemies: Vec::new(),
            pickups: Vec::new(),
            spawns: vec![SpawnPlacement { x: 10, y: 6 }],
        },
        weight: 1,
    }
}

fn fallback_tile_is_wall(signature: DoorSignature, x: usize, y: usize) -> bool {
    let border =
        y == 0 || y == TEMPLATE_ROWS - 1 || x == 0 || x == TEMPLATE_COLUMNS - 1;
    if !border {
        return false;
    }

    let north_gap = signature.contains(Direction::N) && y == 0 && (9..=10).contains(&x);
    let south_gap =
        signature.contains(Direction::S) && y == TEMPLATE_ROWS - 1 && (9..=10).contains(&x);
    let west_gap = signature.contains(Direction::W) && x == 0 && (5..=6).contains(&y);
    let east_gap =
        signature.contains(Direction::E) && x == TEMPLATE_COLUMNS - 1 && (5..=6).contains(&y);

    !(north_gap || south_gap || west_gap || east_gap)
}
