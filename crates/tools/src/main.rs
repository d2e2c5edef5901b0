use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use game_core::templates::TemplateLibrary;
use game_core::{SaveRecord, generate_world, life_spawn_point};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a world and print a summary, or the full record as JSON
    Generate {
        /// World seed
        #[arg(short, long)]
        seed: u32,
        /// Template library JSON file; the built-in pack when omitted
        #[arg(short, long)]
        templates: Option<PathBuf>,
        /// Dump the whole world record as pretty JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a template library file for authoring mistakes
    Validate {
        /// Template library JSON file
        #[arg(short, long)]
        templates: PathBuf,
    },
    /// Print the current life's spawn point for a save file
    Spawn {
        /// Save file path; the platform data directory when omitted
        #[arg(short, long)]
        save: Option<PathBuf>,
        /// Template library JSON file; the built-in pack when omitted
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Generate { seed, templates, json } => generate(seed, templates.as_deref(), json),
        Command::Validate { templates } => validate(&templates),
        Command::Spawn { save, templates } => spawn(save, templates.as_deref()),
    }
}

fn load_library(path: Option<&Path>) -> Result<TemplateLibrary> {
    match path {
        Some(path) => TemplateLibrary::load(path)
            .with_context(|| format!("Failed to load template library: {}", path.display())),
        None => Ok(TemplateLibrary::build_default()),
    }
}

fn generate(seed: u32, templates: Option<&Path>, json: bool) -> Result<()> {
    let library = load_library(templates)?;
    let world = generate_world(seed, &library);

    if json {
        println!("{}", serde_json::to_string_pretty(&world)?);
        return Ok(());
    }

    println!("World for seed {seed}:");
    println!("  Grid: {} bands x {} rooms", world.depth_bands, world.rooms_per_band);
    println!("  Connections: {}", world.connections.len());
    println!("  Spawn points: {}", world.spawn_points.len());
    println!("  Reachable from d0r0: {} of {} rooms", world.reachable_rooms, world.rooms.len());
    println!("  Fingerprint: {:016x}", world.fingerprint());

    Ok(())
}

fn validate(templates: &Path) -> Result<()> {
    let library = TemplateLibrary::load(templates)
        .with_context(|| format!("Failed to load template library: {}", templates.display()))?;

    let mut problem_count = 0_usize;
    for template in &library.templates {
        for problem in template.validate() {
            println!("{problem}");
            problem_count += 1;
        }
    }

    if problem_count > 0 {
        bail!("{} template problem(s) in {}", problem_count, templates.display());
    }
    println!("{} template(s) OK", library.templates.len());
    Ok(())
}

fn spawn(save: Option<PathBuf>, templates: Option<&Path>) -> Result<()> {
    let save_path = match save {
        Some(path) => path,
        None => default_save_path().context("No platform data directory available")?,
    };
    let record = SaveRecord::load(&save_path)
        .with_context(|| format!("Failed to load save file: {}", save_path.display()))?;

    let library = load_library(templates)?;
    let world = generate_world(record.world_seed, &library);

    let Some(point) = life_spawn_point(&world, &record) else {
        bail!("world for seed {} has no spawn points", record.world_seed);
    };
    println!(
        "Life {} spawns in {} at ({}, {}) [{}]",
        record.death_count,
        point.room,
        point.pos.x,
        point.pos.y,
        if point.safe { "safe" } else { "contested" }
    );

    Ok(())
}

fn default_save_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "Undersurface").map(|proj_dirs| {
        let mut path = proj_dirs.data_dir().to_path_buf();
        path.push("save.json");
        path
    })
}
