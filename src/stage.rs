#![allow(clippy::cast_sign_loss)]

use std::{fmt::Display, ops::Add};

use serde::{Deserialize, Serialize};

use crate::error::DungeonError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    Room = 1,
    Wall = 2,
    Corridor = 3,
    Door = 4,
}

impl Tile {
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Room => '.',
            Self::Wall => '#',
            Self::Corridor => ',',
            Self::Door => '+',
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Room and corridor cells are the ones a door can connect.
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Room | Self::Corridor)
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        tile.code()
    }
}

impl TryFrom<u8> for Tile {
    type Error = DungeonError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Room),
            2 => Ok(Self::Wall),
            3 => Ok(Self::Corridor),
            4 => Ok(Self::Door),
            other => Err(DungeonError::UnknownTile(other)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vector(pub i32, pub i32);

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0, self.1 + other.1)
    }
}

/// East, west, north, south. Carving examines neighbours in this order.
pub const CARDINALS: [Vector; 4] = [Vector(1, 0), Vector(-1, 0), Vector(0, -1), Vector(0, 1)];

pub const SURROUNDING: [Vector; 8] = [
    Vector(1, 0),
    Vector(-1, 0),
    Vector(0, -1),
    Vector(0, 1),
    Vector(1, 1),
    Vector(1, -1),
    Vector(-1, 1),
    Vector(-1, -1),
];

/// The grid a dungeon is generated on.
///
/// Every cell always holds exactly one [`Tile`]. Reading or writing outside
/// the stage is a bug in the caller and panics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stage {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Stage {
    pub fn new(width: i32, height: i32) -> Result<Self, DungeonError> {
        if width <= 0 || height <= 0 {
            return Err(DungeonError::NonPositiveDimension { width, height });
        }
        // Cell indices are computed in i32, so the cell count must fit one.
        let len = width
            .checked_mul(height)
            .ok_or(DungeonError::StageTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            tiles: vec![Tile::Empty; len as usize],
        })
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn contains(&self, pos: Vector) -> bool {
        pos.0 >= 0 && pos.0 < self.width && pos.1 >= 0 && pos.1 < self.height
    }

    /// Row-major index of `pos`, which must be on the stage.
    pub(crate) fn index_of(&self, pos: Vector) -> usize {
        assert!(
            self.contains(pos),
            "position ({}, {}) is outside the {}x{} stage",
            pos.0,
            pos.1,
            self.width,
            self.height
        );
        (pos.1 * self.width + pos.0) as usize
    }

    pub fn get(&self, pos: Vector) -> Tile {
        self.tiles[self.index_of(pos)]
    }

    pub fn set(&mut self, pos: Vector, tile: Tile) {
        let idx = self.index_of(pos);
        self.tiles[idx] = tile;
    }

    /// Set every cell back to [`Tile::Empty`], keeping the allocation.
    pub fn reset(&mut self) {
        self.tiles.fill(Tile::Empty);
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// All positions, column by column.
    pub fn columns(&self) -> impl Iterator<Item = Vector> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Vector(x, y)))
    }

    /// Positions that do not touch the outer border.
    pub fn interior(&self) -> impl Iterator<Item = Vector> + '_ {
        (1..self.width - 1).flat_map(move |x| (1..self.height - 1).map(move |y| Vector(x, y)))
    }

    /// In-bounds positions among `offsets` applied to `pos`.
    pub fn neighbours<'a>(
        &'a self,
        pos: Vector,
        offsets: &'a [Vector],
    ) -> impl Iterator<Item = Vector> + 'a {
        offsets
            .iter()
            .map(move |&dir| pos + dir)
            .filter(move |&p| self.contains(p))
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for _ in 0..self.width + 2 {
            write!(f, "-")?;
        }
        writeln!(f)?;
        for y in 0..self.height {
            write!(f, "|")?;
            for x in 0..self.width {
                write!(f, "{}", self.get(Vector(x, y)).to_char())?;
            }
            writeln!(f, "|")?;
        }
        for _ in 0..self.width + 2 {
            write!(f, "-")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stage_is_empty() {
        let stage = Stage::new(4, 3).unwrap();
        assert_eq!(stage.width(), 4);
        assert_eq!(stage.height(), 3);
        assert_eq!(stage.count(Tile::Empty), 12);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(matches!(
            Stage::new(0, 5),
            Err(DungeonError::NonPositiveDimension { width: 0, height: 5 })
        ));
        assert!(Stage::new(5, -1).is_err());
    }

    #[test]
    fn rejects_oversized_stage() {
        assert!(matches!(
            Stage::new(100_000, 100_000),
            Err(DungeonError::StageTooLarge { width: 100_000, height: 100_000 })
        ));
        assert!(Stage::new(i32::MAX, 2).is_err());
    }

    #[test]
    fn set_then_get() {
        let mut stage = Stage::new(5, 5).unwrap();
        stage.set(Vector(4, 2), Tile::Door);
        assert_eq!(stage.get(Vector(4, 2)), Tile::Door);
        assert_eq!(stage.get(Vector(2, 4)), Tile::Empty);
    }

    #[test]
    fn reset_clears_every_cell() {
        let mut stage = Stage::new(3, 3).unwrap();
        for pos in stage.columns().collect::<Vec<_>>() {
            stage.set(pos, Tile::Wall);
        }
        stage.reset();
        assert_eq!(stage.count(Tile::Empty), 9);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn get_out_of_bounds_panics() {
        let stage = Stage::new(3, 3).unwrap();
        stage.get(Vector(3, 0));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn set_negative_panics() {
        let mut stage = Stage::new(3, 3).unwrap();
        stage.set(Vector(0, -1), Tile::Room);
    }

    #[test]
    fn neighbours_are_clamped() {
        let stage = Stage::new(3, 3).unwrap();
        assert_eq!(stage.neighbours(Vector(0, 0), &SURROUNDING).count(), 3);
        assert_eq!(stage.neighbours(Vector(1, 1), &SURROUNDING).count(), 8);
        assert_eq!(stage.neighbours(Vector(1, 0), &CARDINALS).count(), 3);
    }

    #[test]
    fn interior_skips_border() {
        let stage = Stage::new(4, 5).unwrap();
        let interior: Vec<_> = stage.interior().collect();
        assert_eq!(interior.len(), 6);
        assert!(interior.iter().all(|p| p.0 >= 1 && p.0 <= 2 && p.1 >= 1 && p.1 <= 3));
    }

    #[test]
    fn tile_codes() {
        for code in 0..5u8 {
            assert_eq!(Tile::try_from(code).unwrap().code(), code);
        }
        assert!(matches!(Tile::try_from(9), Err(DungeonError::UnknownTile(9))));
    }

    #[test]
    fn display_draws_border() {
        let mut stage = Stage::new(2, 1).unwrap();
        stage.set(Vector(1, 0), Tile::Room);
        assert_eq!(stage.to_string(), "----\n| .|\n----");
    }

    #[test]
    fn serializes_tile_codes() {
        let mut stage = Stage::new(2, 1).unwrap();
        stage.set(Vector(0, 0), Tile::Wall);
        let json = serde_json::to_string(&stage).unwrap();
        assert_eq!(json, r#"{"width":2,"height":1,"tiles":[2,0]}"#);
    }
}
