//! Reusable room blueprints and the library that holds them.
//!
//! A library is loaded in full before generation starts, either from a
//! JSON file authored alongside the game assets or from the built-in
//! default pack. Load failures abort generation at the caller; content
//! mistakes are the authoring tool's concern (`Template::validate`),
//! never something the generator recovers from at runtime.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Direction, DoorSignature, TileKind};

pub const TEMPLATE_COLUMNS: usize = 20;
pub const TEMPLATE_ROWS: usize = 12;

/// Enemy or pickup placement at a template-local tile offset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPlacement {
    pub kind: String,
    pub x: i32,
    pub y: i32,
}

/// Candidate player placement at a template-local tile offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPlacement {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityManifest {
    pub enemies: Vec<EntityPlacement>,
    pub pickups: Vec<EntityPlacement>,
    pub spawns: Vec<SpawnPlacement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub doors: Vec<Direction>,
    /// 12 rows of 20 glyphs each; see `TileKind::from_glyph`.
    pub tiles: Vec<String>,
    #[serde(default)]
    pub entities: EntityManifest,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl Template {
    pub fn door_signature(&self) -> DoorSignature {
        DoorSignature::from_directions(&self.doors)
    }

    /// Tile at a template-local position; out-of-range reads are walls.
    pub fn tile_at(&self, x: usize, y: usize) -> TileKind {
        self.tiles
            .get(y)
            .and_then(|row| row.chars().nth(x))
            .map_or(TileKind::Wall, TileKind::from_glyph)
    }

    /// Content checks for authoring tooling. Returns one message per
    /// problem found; an empty list means the template is well-formed.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.tiles.len() != TEMPLATE_ROWS {
            problems
                .push(format!("{}: expected {TEMPLATE_ROWS} rows, got {}", self.id, self.tiles.len()));
        }
        for (row_index, row) in self.tiles.iter().enumerate() {
            let columns = row.chars().count();
            if columns != TEMPLATE_COLUMNS {
                problems.push(format!(
                    "{}: row {row_index} has {columns} columns, expected {TEMPLATE_COLUMNS}",
                    self.id
                ));
            }
        }

        if self.weight == 0 {
            problems.push(format!("{}: weight must be positive", self.id));
        }

        let signature = self.door_signature();
        for (direction, cells) in door_gap_cells(signature) {
            for (x, y) in cells {
                if self.tile_at(x, y) == TileKind::Wall {
                    problems.push(format!(
                        "{}: door {direction:?} gap at ({x}, {y}) is walled off",
                        self.id
                    ));
                }
            }
        }

        let in_bounds = |x: i32, y: i32| {
            (0..TEMPLATE_COLUMNS as i32).contains(&x) && (0..TEMPLATE_ROWS as i32).contains(&y)
        };
        for placement in self.entities.enemies.iter().chain(&self.entities.pickups) {
            if !in_bounds(placement.x, placement.y) {
                problems.push(format!(
                    "{}: {} placed outside the room at ({}, {})",
                    self.id, placement.kind, placement.x, placement.y
                ));
            }
        }
        for spawn in &self.entities.spawns {
            if !in_bounds(spawn.x, spawn.y) {
                problems.push(format!(
                    "{}: spawn placed outside the room at ({}, {})",
                    self.id, spawn.x, spawn.y
                ));
            }
        }

        problems
    }
}

/// The 2-tile border gap each door direction requires, centered per side.
fn door_gap_cells(signature: DoorSignature) -> Vec<(Direction, [(usize, usize); 2])> {
    let right = TEMPLATE_COLUMNS - 1;
    let bottom = TEMPLATE_ROWS - 1;
    signature
        .directions()
        .into_iter()
        .map(|direction| {
            let cells = match direction {
                Direction::N => [(9, 0), (10, 0)],
                Direction::S => [(9, bottom), (10, bottom)],
                Direction::W => [(0, 5), (0, 6)],
                Direction::E => [(right, 5), (right, 6)],
            };
            (direction, cells)
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLibrary {
    pub templates: Vec<Template>,
}

impl TemplateLibrary {
    /// Loads a library from a JSON file. The file must parse in full
    /// before any generation may start; parse failures surface as
    /// `InvalidData` and no partial library is ever returned.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Templates whose door signature set-equals the given one, in
    /// library order. Superset or subset matches are deliberately
    /// excluded.
    pub fn matching(&self, signature: DoorSignature) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|template| template.door_signature() == signature)
            .collect()
    }

    pub fn build_default() -> Self {
        let rows = |rows: [&str; TEMPLATE_ROWS]| rows.iter().map(|row| (*row).to_string()).collect();

        Self {
            templates: vec![
                Template {
                    id: "corridor".to_string(),
                    doors: vec![Direction::E, Direction::W],
                    tiles: rows([
                        "####################",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "....................",
                        "....................",
                        "#..................#",
                        "#......====........#",
                        "#..................#",
                        "#..[]..........[]..#",
                        "####################",
                    ]),
                    entities: EntityManifest {
                        enemies: Vec::new(),
                        pickups: vec![EntityPlacement { kind: "shard".to_string(), x: 10, y: 7 }],
                        spawns: vec![SpawnPlacement { x: 3, y: 9 }],
                    },
                    weight: 2,
                },
                Template {
                    id: "corridor_spikes".to_string(),
                    doors: vec![Direction::E, Direction::W],
                    tiles: rows([
                        "####################",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "#.....=======......#",
                        "....................",
                        "....................",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "#....^^^^....^^^^..#",
                        "####################",
                    ]),
                    entities: EntityManifest {
                        enemies: vec![EntityPlacement { kind: "alien1".to_string(), x: 10, y: 9 }],
                        pickups: Vec::new(),
                        spawns: Vec::new(),
                    },
                    weight: 1,
                },
                Template {
                    id: "flooded_gallery".to_string(),
                    doors: vec![Direction::E, Direction::W],
                    tiles: rows([
                        "####################",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "....................",
                        "....................",
                        "#..................#",
                        "#....~~~~~~........#",
                        "#..................#",
                        "#..................#",
                        "####################",
                    ]),
                    entities: EntityManifest {
                        enemies: vec![EntityPlacement { kind: "alien2".to_string(), x: 14, y: 9 }],
                        pickups: vec![EntityPlacement { kind: "shard".to_string(), x: 15, y: 4 }],
                        spawns: Vec::new(),
                    },
                    weight: 1,
                },
                Template {
                    id: "shaft".to_string(),
                    doors: vec![Direction::N, Direction::S],
                    tiles: rows([
                        "#########..#########",
                        "#..................#",
                        "#.......==.........#",
                        "#..................#",
                        "#....==............#",
                        "#..................#",
                        "#..........==......#",
                        "#..................#",
                        "#......==..........#",
                        "#..................#",
                        "#..................#",
                        "#########..#########",
                    ]),
                    entities: EntityManifest::default(),
                    weight: 1,
                },
                Template {
                    id: "crossroads".to_string(),
                    doors: vec![Direction::N, Direction::E, Direction::S, Direction::W],
                    tiles: rows([
                        "#########..#########",
                        "#..................#",
                        "#..................#",
                        "#...====....====...#",
                        "#..................#",
                        "....................",
                        "....................",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "#########..#########",
                    ]),
                    entities: EntityManifest {
                        enemies: Vec::new(),
                        pickups: vec![EntityPlacement { kind: "shard".to_string(), x: 4, y: 2 }],
                        spawns: vec![SpawnPlacement { x: 10, y: 8 }],
                    },
                    weight: 1,
                },
                Template {
                    id: "haven_east".to_string(),
                    doors: vec![Direction::E],
                    tiles: rows([
                        "####################",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "#...................",
                        "#...................",
                        "#..................#",
                        "#.......====.......#",
                        "#..................#",
                        "#..................#",
                        "####################",
                    ]),
                    entities: EntityManifest {
                        enemies: Vec::new(),
                        pickups: Vec::new(),
                        spawns: vec![SpawnPlacement { x: 4, y: 9 }],
                    },
                    weight: 1,
                },
                Template {
                    id: "haven_west".to_string(),
                    doors: vec![Direction::W],
                    tiles: rows([
                        "####################",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "#..................#",
                        "...................#",
                        "...................#",
                        "#..................#",
                        "#.......====.......#",
                        "#..................#",
                        "#..................#",
                        "####################",
                    ]),
                    entities: EntityManifest {
                        enemies: Vec::new(),
                        pickups: Vec::new(),
                        spawns: vec![SpawnPlacement { x: 15, y: 9 }],
                    },
                    weight: 1,
                },
            ],
        }
    }
}
