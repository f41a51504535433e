//! Procedural dungeon layouts: rooms, winding corridors and the doors between
//! them, generated on a fixed-size grid of tiles.
//!
//! ```
//! use dungeon::{Dungeon, Stage, Tile};
//!
//! let mut stage = Stage::new(25, 25).unwrap();
//! let mut generator = Dungeon::new(&mut stage, 100).unwrap();
//! let report = generator.generate();
//! assert_eq!(report.rooms, generator.rooms().len());
//! assert!(stage.count(Tile::Room) > 0 || report.rooms == 0);
//! ```

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod config;
pub mod corridor;
pub mod doors;
pub mod dungeon;
pub mod error;
pub mod rng;
pub mod room;
pub mod stage;

pub use config::{CarveStart, DoorGrouping, DungeonConfig};
pub use dungeon::{Dungeon, GenerationReport};
pub use error::DungeonError;
pub use rng::DungeonRng;
pub use room::Room;
pub use stage::{Stage, Tile, Vector};
