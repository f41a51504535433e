use serde::Serialize;

use crate::stage::Vector;

/// A placed rectangular room. `x`/`y` is the top-left interior cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn top(self) -> i32 {
        self.y
    }
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }
    pub const fn left(self) -> i32 {
        self.x
    }
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    pub const fn area(self) -> i32 {
        self.width * self.height
    }

    pub const fn contains(self, pos: Vector) -> bool {
        pos.0 >= self.left() && pos.0 < self.right() && pos.1 >= self.top() && pos.1 < self.bottom()
    }

    /// True when the interiors share at least one cell.
    pub const fn overlaps(self, other: Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Interior cells, row by row.
    pub fn cells(self) -> impl Iterator<Item = Vector> {
        (self.top()..self.bottom())
            .flat_map(move |y| (self.left()..self.right()).map(move |x| Vector(x, y)))
    }

    /// The one-cell ring around the interior, corners included, each cell once.
    pub fn ring(self) -> impl Iterator<Item = Vector> {
        let top = (self.left() - 1..=self.right()).map(move |x| Vector(x, self.top() - 1));
        let bottom = (self.left() - 1..=self.right()).map(move |x| Vector(x, self.bottom()));
        let left = (self.top()..self.bottom()).map(move |y| Vector(self.left() - 1, y));
        let right = (self.top()..self.bottom()).map(move |y| Vector(self.right(), y));
        top.chain(bottom).chain(left).chain(right)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn edges() {
        let room = Room::new(2, 3, 4, 5);
        assert_eq!(room.left(), 2);
        assert_eq!(room.right(), 6);
        assert_eq!(room.top(), 3);
        assert_eq!(room.bottom(), 8);
        assert_eq!(room.area(), 20);
    }

    #[test]
    fn cells_cover_interior_once() {
        let room = Room::new(1, 1, 3, 2);
        let cells: Vec<_> = room.cells().collect();
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|&c| room.contains(c)));
        assert_eq!(cells.iter().collect::<HashSet<_>>().len(), 6);
    }

    #[test]
    fn ring_surrounds_without_duplicates() {
        let room = Room::new(2, 2, 3, 3);
        let ring: Vec<_> = room.ring().collect();
        let unique: HashSet<_> = ring.iter().copied().collect();
        assert_eq!(ring.len(), 16);
        assert_eq!(unique.len(), 16);
        assert!(unique.contains(&Vector(1, 1)));
        assert!(unique.contains(&Vector(5, 5)));
        assert!(unique.contains(&Vector(1, 5)));
        assert!(unique.contains(&Vector(5, 1)));
        assert!(ring.iter().all(|&c| !room.contains(c)));
    }

    #[test]
    fn overlap() {
        let a = Room::new(1, 1, 3, 3);
        assert!(a.overlaps(Room::new(3, 3, 3, 3)));
        assert!(!a.overlaps(Room::new(4, 1, 3, 3)));
        assert!(!a.overlaps(Room::new(1, 4, 3, 3)));
    }
}
