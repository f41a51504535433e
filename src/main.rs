#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dungeon::{CarveStart, DoorGrouping, Dungeon, DungeonConfig, Stage};

/// Generate a dungeon layout and print it.
#[derive(Parser, Debug)]
#[command(name = "dungeon", version, about, long_about = None)]
struct Args {
    /// TOML file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stage width in cells
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Stage height in cells
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Number of room placement attempts
    #[arg(short, long)]
    rooms: Option<u32>,

    /// Seed for a reproducible dungeon
    #[arg(short, long)]
    seed: Option<u64>,

    /// Which empty cells may start a corridor
    #[arg(long, value_enum)]
    carve_start: Option<CarveStart>,

    /// How door candidates are grouped
    #[arg(long, value_enum)]
    door_grouping: Option<DoorGrouping>,

    /// Print JSON instead of the text map
    #[arg(long)]
    json: bool,

    /// Print each generation phase to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<(DungeonConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => DungeonConfig::load(path)?,
            None => DungeonConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(rooms) = self.rooms {
            config.room_attempts = rooms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(rule) = self.carve_start {
            config.carve_start = rule;
        }
        if let Some(grouping) = self.door_grouping {
            config.door_grouping = grouping;
        }
        config.verbose |= self.verbose;
        config.validate()?;
        Ok((config, self.json))
    }
}

fn main() -> Result<()> {
    let (config, json) = Args::parse().into_config()?;

    let mut stage = Stage::new(config.width, config.height)?;
    let mut dungeon_generator = Dungeon::with_config(&mut stage, &config)?;
    let report = dungeon_generator.generate();
    let seed = dungeon_generator.seed();
    let rooms = dungeon_generator.rooms().to_vec();

    if json {
        let out = serde_json::json!({
            "seed": seed,
            "rooms": rooms,
            "stage": stage,
        });
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{stage}");
    }
    eprintln!("seed {seed}: {report}");
    Ok(())
}
