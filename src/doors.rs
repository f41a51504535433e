//! Door placement.
//!
//! Each column is scanned top to bottom for a wall cell sandwiched between
//! two solid (room or corridor) cells. Nearby candidates are grouped and one
//! door is opened per group, so a long shared wall gets a single door.

use crate::{
    config::DoorGrouping,
    rng::DungeonRng,
    stage::{Stage, Tile, Vector},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ScanState {
    Seeking,
    AfterSolid,
    AfterWall(Vector),
}

/// Matches solid, wall, solid over a sequence of cells.
#[derive(Debug)]
pub struct DoorScanner {
    state: ScanState,
    candidates: Vec<Vector>,
}

impl Default for DoorScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DoorScanner {
    pub const fn new() -> Self {
        Self {
            state: ScanState::Seeking,
            candidates: Vec::new(),
        }
    }

    /// Forget any partial match, keeping the candidates found so far.
    pub fn restart(&mut self) {
        self.state = ScanState::Seeking;
    }

    /// Advance the matcher by one cell. A mismatch drops the partial match
    /// and uses up the cell, so it never opens a new match itself.
    pub fn feed(&mut self, pos: Vector, tile: Tile) {
        self.state = match (self.state, tile) {
            (ScanState::AfterWall(wall), tile) if tile.is_solid() => {
                self.candidates.push(wall);
                // The closing cell can open the next match.
                ScanState::AfterSolid
            }
            (ScanState::AfterSolid, Tile::Wall) => ScanState::AfterWall(pos),
            (ScanState::Seeking, tile) if tile.is_solid() => ScanState::AfterSolid,
            _ => ScanState::Seeking,
        };
    }

    pub fn into_candidates(self) -> Vec<Vector> {
        self.candidates
    }
}

/// Every wall cell with a solid cell directly above and below it.
pub fn find_candidates(stage: &Stage) -> Vec<Vector> {
    let mut scanner = DoorScanner::new();
    for x in 0..stage.width() {
        scanner.restart();
        for y in 0..stage.height() {
            let pos = Vector(x, y);
            scanner.feed(pos, stage.get(pos));
        }
    }
    scanner.into_candidates()
}

/// Disjoint sets over candidate indices.
struct Clusters {
    parent: Vec<usize>,
}

impl Clusters {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    /// Root of `i`'s set. Every index on the way is pointed at the root.
    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn merge(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

const fn touching(a: Vector, b: Vector) -> bool {
    (a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1
}

/// Split candidates into groups that will each receive one door.
///
/// Candidates are first ordered by column. With [`DoorGrouping::ScanAxis`]
/// a new group starts whenever the column jumps by more than one, even if the
/// rows are far apart. [`DoorGrouping::Connected`] instead groups candidates
/// that touch, diagonals included.
pub fn group_candidates(mut candidates: Vec<Vector>, grouping: DoorGrouping) -> Vec<Vec<Vector>> {
    candidates.sort_by_key(|pos| pos.0);
    match grouping {
        DoorGrouping::ScanAxis => {
            let mut groups: Vec<Vec<Vector>> = Vec::new();
            for pos in candidates {
                match groups.last_mut() {
                    Some(group) if group.last().is_some_and(|prev| pos.0 - prev.0 <= 1) => {
                        group.push(pos);
                    }
                    _ => groups.push(vec![pos]),
                }
            }
            groups
        }
        DoorGrouping::Connected => {
            let mut clusters = Clusters::new(candidates.len());
            for i in 0..candidates.len() {
                for j in i + 1..candidates.len() {
                    if touching(candidates[i], candidates[j]) {
                        clusters.merge(i, j);
                    }
                }
            }
            let mut slot: Vec<Option<usize>> = vec![None; candidates.len()];
            let mut groups: Vec<Vec<Vector>> = Vec::new();
            for (i, pos) in candidates.into_iter().enumerate() {
                let class = clusters.find(i);
                if let Some(g) = slot[class] {
                    groups[g].push(pos);
                } else {
                    slot[class] = Some(groups.len());
                    groups.push(vec![pos]);
                }
            }
            groups
        }
    }
}

/// Open one door per candidate group. Returns the number of doors placed.
pub fn place_doors(stage: &mut Stage, rng: &mut DungeonRng, grouping: DoorGrouping) -> usize {
    let groups = group_candidates(find_candidates(stage), grouping);
    for group in &groups {
        let door = group[rng.index(group.len())];
        stage.set(door, Tile::Door);
    }
    groups.len()
}
