//! Corridor carving.
//!
//! A corridor is grown from a single empty cell by a randomized depth-first
//! walk. A cell may only join the path if it touches at most one cell already
//! in it, so every carved corridor is a one-cell-wide tree: it branches but
//! never loops or widens.

use crate::{
    config::CarveStart,
    rng::DungeonRng,
    stage::{Stage, Tile, Vector, CARDINALS, SURROUNDING},
};

/// Whether an empty interior cell may seed a new corridor under `rule`.
pub fn is_start(stage: &Stage, pos: Vector, rule: CarveStart) -> bool {
    if stage.get(pos) != Tile::Empty {
        return false;
    }
    let blocker = match rule {
        CarveStart::AwayFromWalls => Tile::Wall,
        CarveStart::AwayFromRooms => Tile::Room,
    };
    stage
        .neighbours(pos, &SURROUNDING)
        .all(|n| stage.get(n) != blocker)
}

pub fn has_start(stage: &Stage, rule: CarveStart) -> bool {
    stage.interior().any(|pos| is_start(stage, pos, rule))
}

/// Pick where the next corridor begins.
///
/// Random interior cells are tried until an empty one turns up. After
/// `retry_limit` misses in a row the pick is made directly among the cells
/// that satisfy `rule`, which is `None` only when there are none.
pub fn pick_start(
    stage: &Stage,
    rng: &mut DungeonRng,
    rule: CarveStart,
    retry_limit: u32,
) -> Option<Vector> {
    if stage.width() < 3 || stage.height() < 3 {
        return None;
    }
    for _ in 0..retry_limit {
        let pos = Vector(
            rng.range(1..stage.width() - 1),
            rng.range(1..stage.height() - 1),
        );
        if stage.get(pos) == Tile::Empty {
            return Some(pos);
        }
    }
    let starts: Vec<Vector> = stage
        .interior()
        .filter(|&pos| is_start(stage, pos, rule))
        .collect();
    rng.choose(&starts).copied()
}

struct PathCarver<'s> {
    stage: &'s Stage,
    /// Cells in visiting order.
    path: Vec<Vector>,
    /// Indexed like the stage's tiles.
    in_path: Vec<bool>,
    /// Indices into `path` of the current branch. Exhausted cells are popped.
    frontier: Vec<usize>,
}

impl<'s> PathCarver<'s> {
    fn new(stage: &'s Stage, start: Vector) -> Self {
        let mut in_path = vec![false; stage.tiles().len()];
        in_path[stage.index_of(start)] = true;
        Self {
            stage,
            path: vec![start],
            in_path,
            frontier: vec![0],
        }
    }

    fn in_path(&self, pos: Vector) -> bool {
        self.stage.contains(pos) && self.in_path[self.stage.index_of(pos)]
    }

    /// Corridors stay one cell away from the outer border.
    const fn in_region(&self, pos: Vector) -> bool {
        pos.0 >= 1
            && pos.0 <= self.stage.width() - 2
            && pos.1 >= 1
            && pos.1 <= self.stage.height() - 2
    }

    fn can_carve(&self, pos: Vector) -> bool {
        if !self.in_region(pos) || self.stage.get(pos) != Tile::Empty || self.in_path(pos) {
            return false;
        }
        let touching = CARDINALS
            .iter()
            .filter(|&&dir| self.in_path(pos + dir))
            .count();
        touching <= 1
    }

    fn carve(mut self, rng: &mut DungeonRng) -> Vec<Vector> {
        while let Some(&current) = self.frontier.last() {
            let cell = self.path[current];
            let unmade_cells: Vec<Vector> = CARDINALS
                .iter()
                .map(|&dir| cell + dir)
                .filter(|&pos| self.can_carve(pos))
                .collect();

            if let Some(&next) = rng.choose(&unmade_cells) {
                let idx = self.stage.index_of(next);
                self.in_path[idx] = true;
                self.path.push(next);
                self.frontier.push(self.path.len() - 1);
            } else {
                self.frontier.pop();
            }
        }
        self.path
    }
}

/// Grow a corridor from `start` without touching the stage.
pub fn carve_path(stage: &Stage, start: Vector, rng: &mut DungeonRng) -> Vec<Vector> {
    PathCarver::new(stage, start).carve(rng)
}

/// Write a carved path into the stage and wall off its empty sides.
pub fn commit_path(stage: &mut Stage, path: &[Vector]) {
    for &pos in path {
        stage.set(pos, Tile::Corridor);
    }
    let view: &Stage = stage;
    let walls: Vec<Vector> = path
        .iter()
        .flat_map(|&pos| view.neighbours(pos, &CARDINALS))
        .filter(|&n| view.get(n) == Tile::Empty)
        .collect();
    for pos in walls {
        stage.set(pos, Tile::Wall);
    }
}
