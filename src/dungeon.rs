use std::{fmt::Display, ops::Range};

use serde::Serialize;

use crate::{
    config::{CarveStart, DoorGrouping, DungeonConfig},
    corridor, doors,
    error::DungeonError,
    rng::DungeonRng,
    room::Room,
    stage::{Stage, Tile},
};

/// What a generation pass produced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub rooms: usize,
    pub corridors: usize,
    pub corridor_cells: usize,
    pub doors: usize,
    /// Empty cells left once the pass finished.
    pub unresolved: usize,
}

impl Display for GenerationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rooms, {} corridors ({} cells), {} doors, {} unresolved",
            self.rooms, self.corridors, self.corridor_cells, self.doors, self.unresolved
        )
    }
}

/// Generates a dungeon on a borrowed [`Stage`].
///
/// A pass places rooms, fills the free space with corridors and then opens
/// doors. Calling [`Dungeon::generate`] again starts over from an empty stage.
pub struct Dungeon<'a> {
    n_room_tries: u32,
    room_size: Range<i32>,
    carve_start: CarveStart,
    door_grouping: DoorGrouping,
    start_retry_limit: u32,
    verbose: bool,
    rooms: Vec<Room>,
    generated: bool,
    rng: DungeonRng,
    stage: &'a mut Stage,
}

impl<'a> Dungeon<'a> {
    /// A generator with default settings and an entropy-seeded RNG.
    pub fn new(stage: &'a mut Stage, n_room_tries: u32) -> Result<Self, DungeonError> {
        let config = DungeonConfig {
            room_attempts: n_room_tries,
            ..DungeonConfig::default()
        };
        Self::with_config(stage, &config)
    }

    /// The stage size in `config` is ignored; `stage` is used as it is.
    pub fn with_config(stage: &'a mut Stage, config: &DungeonConfig) -> Result<Self, DungeonError> {
        config.validate_generator()?;
        Ok(Self {
            n_room_tries: config.room_attempts,
            room_size: config.min_room_size..config.max_room_size,
            carve_start: config.carve_start,
            door_grouping: config.door_grouping,
            start_retry_limit: config.start_retry_limit,
            verbose: config.verbose,
            rooms: Vec::new(),
            generated: false,
            rng: config
                .seed
                .map_or_else(DungeonRng::from_entropy, DungeonRng::new),
            stage,
        })
    }

    #[must_use]
    pub fn with_rng(mut self, rng: DungeonRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn generate(&mut self) -> GenerationReport {
        if self.generated {
            self.stage.reset();
            self.rooms.clear();
            self.generated = false;
        }

        self.progress("Adding rooms");
        let rooms = self.place_rooms();
        self.show_stage();

        // Fill in all of the empty space with corridors.
        self.progress("Carving corridors");
        let (corridors, corridor_cells) = self.carve_corridors();
        self.show_stage();

        self.progress("Placing doors");
        let doors = self.place_doors();
        self.show_stage();

        self.generated = true;
        GenerationReport {
            rooms,
            corridors,
            corridor_cells,
            doors,
            unresolved: self.stage.count(Tile::Empty),
        }
    }

    /// Make the configured number of room attempts. Returns how many rooms
    /// were placed.
    pub fn place_rooms(&mut self) -> usize {
        let before = self.rooms.len();
        if self.stage.width() < 2 || self.stage.height() < 2 {
            return 0;
        }
        for _ in 0..self.n_room_tries {
            let width = self.rng.range(self.room_size.clone());
            let height = self.rng.range(self.room_size.clone());
            let x = self.rng.range(1..self.stage.width());
            let y = self.rng.range(1..self.stage.height());
            self.try_place_room(Room::new(x, y, width, height));
        }
        self.rooms.len() - before
    }

    /// Place `room` if it fits inside the stage with room for its wall ring
    /// and covers only empty cells.
    pub fn try_place_room(&mut self, room: Room) -> bool {
        if room.width < 1
            || room.height < 1
            || room.left() < 1
            || room.top() < 1
            || room.right() >= self.stage.width()
            || room.bottom() >= self.stage.height()
        {
            return false;
        }

        if room.cells().any(|pos| self.stage.get(pos) != Tile::Empty) {
            return false;
        }

        for pos in room.cells() {
            self.stage.set(pos, Tile::Room);
        }
        for pos in room.ring() {
            self.stage.set(pos, Tile::Wall);
        }
        self.rooms.push(room);
        true
    }

    /// Carve corridors until no start cell is left. Returns the number of
    /// corridors and the number of cells they cover.
    pub fn carve_corridors(&mut self) -> (usize, usize) {
        let mut corridors = 0;
        let mut cells = 0;
        while corridor::has_start(self.stage, self.carve_start) {
            let Some(start) = corridor::pick_start(
                self.stage,
                &mut self.rng,
                self.carve_start,
                self.start_retry_limit,
            ) else {
                break;
            };
            let path = corridor::carve_path(self.stage, start, &mut self.rng);
            corridor::commit_path(self.stage, &path);
            corridors += 1;
            cells += path.len();
        }
        (corridors, cells)
    }

    pub fn place_doors(&mut self) -> usize {
        doors::place_doors(self.stage, &mut self.rng, self.door_grouping)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn stage(&self) -> &Stage {
        self.stage
    }

    pub const fn is_generated(&self) -> bool {
        self.generated
    }

    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    fn progress(&self, phase: &str) {
        if self.verbose {
            eprintln!("{phase}");
        }
    }

    fn show_stage(&self) {
        if self.verbose {
            eprintln!("stage: \n{}", self.stage);
        }
    }
}
