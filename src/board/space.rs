//! Grid coordinates and work targets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Width and depth of the board.
pub const BOARD_SIZE: u8 = 5;

/// Top building level; a piece built at this level is always a dome.
pub const DOME_LEVEL: u8 = 3;

/// A cell of the board at a given height.
///
/// For workers `z` is the height they stand on; for building pieces it is
/// the level the piece occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Space {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Space {
    #[must_use]
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Whether both spaces share a column, regardless of height.
    #[must_use]
    pub fn same_column(self, other: Space) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Column reached by stepping `(dx, dy)`, if it is on the board.
    #[must_use]
    pub fn offset(self, dx: i8, dy: i8) -> Option<(u8, u8)> {
        let x = i16::from(self.x) + i16::from(dx);
        let y = i16::from(self.y) + i16::from(dy);
        let size = i16::from(BOARD_SIZE);
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some((x as u8, y as u8))
        } else {
            None
        }
    }

    /// Planar step from `self` towards `other`.
    #[must_use]
    pub fn direction_to(self, other: Space) -> (i8, i8) {
        (
            other.x as i8 - self.x as i8,
            other.y as i8 - self.y as i8,
        )
    }

    /// Column one step further along the line from `from` through `self`.
    #[must_use]
    pub fn beyond(self, from: Space) -> Option<(u8, u8)> {
        let (dx, dy) = from.direction_to(self);
        self.offset(dx, dy)
    }
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// What a worker does on its step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkKind {
    Move,
    Build,
}

impl WorkKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            WorkKind::Move => "move",
            WorkKind::Build => "build",
        }
    }
}

/// A validated target chosen by a player: the space plus the auxiliary
/// argument (building level for builds, nothing for moves).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Work {
    pub space: Space,
    pub arg: Option<u8>,
}

impl Work {
    #[must_use]
    pub const fn new(space: Space, arg: Option<u8>) -> Self {
        Self { space, arg }
    }
}

/// Building levels allowed on one destination.
pub type BuildArgs = SmallVec<[u8; 2]>;
