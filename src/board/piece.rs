//! Pieces: workers, building levels, the Ram figure and tokens.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

use super::space::{Space, DOME_LEVEL};

/// Unique identifier for a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Worker(Gender),
    /// Building piece; level 3 is a dome.
    Level(u8),
    /// The Golden Fleece figure.
    Ram,
    Token,
}

/// Where a piece currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Visible on the board.
    Board,
    /// On the board but hidden from opponents.
    Secret,
    /// Waiting to be placed.
    Hand,
    /// Removed from play.
    Box,
}

impl Location {
    /// Whether pieces here have a board space.
    #[must_use]
    pub fn is_placed(self) -> bool {
        matches!(self, Location::Board | Location::Secret)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub owner: Option<PlayerId>,
    pub kind: PieceKind,
    pub location: Location,
    pub space: Option<Space>,
}

impl Piece {
    #[must_use]
    pub fn is_worker(&self) -> bool {
        matches!(self.kind, PieceKind::Worker(_))
    }

    #[must_use]
    pub fn is_dome(&self) -> bool {
        self.kind == PieceKind::Level(DOME_LEVEL)
    }

    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        match self.kind {
            PieceKind::Worker(gender) => Some(gender),
            _ => None,
        }
    }

    /// Space the piece stands on, if it is placed.
    #[must_use]
    pub fn placed_space(&self) -> Option<Space> {
        if self.location.is_placed() {
            self.space
        } else {
            None
        }
    }
}
