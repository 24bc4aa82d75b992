//! In-memory board: piece storage, occupancy and reachability.
//!
//! The `Board` tracks every piece of the game, placed or not. Building
//! pieces stack in a column; the height of a column is the number of
//! building pieces in it. Workers and the Ram occupy a column; tokens do
//! not.
//!
//! Pieces live in an `im::OrdMap` so a board clones in O(1). Cancellation
//! relies on this to apply a whole range of inverses on a copy and commit
//! only on success.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{InvariantViolation, Result};
use crate::core::PlayerId;

use super::piece::{Gender, Location, Piece, PieceId, PieceKind};
use super::space::{Space, WorkKind, BOARD_SIZE, DOME_LEVEL};

/// The 5×5 board and every piece of the game.
///
/// ## Usage
///
/// ```
/// use santorini_engine::board::{Board, Gender, Location, Space, WorkKind};
/// use santorini_engine::core::PlayerId;
///
/// let mut board = Board::new();
/// let worker = board.add_worker(PlayerId(0), Gender::Female, Location::Hand);
/// board.set_piece_at(worker, Space::new(2, 2, 0), Some(Location::Board)).unwrap();
///
/// board.build_at(Space::new(2, 3, 0), 0);
/// assert_eq!(board.height_at(2, 3), 1);
///
/// let piece = board.piece(worker).unwrap().clone();
/// let moves = board.neighboring_spaces(&piece, WorkKind::Move);
/// assert_eq!(moves.len(), 8);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pieces: OrdMap<PieceId, Piece>,
    next_id: u32,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Lookup ===

    /// Get a piece, failing if it does not exist.
    pub fn piece(&self, id: PieceId) -> Result<&Piece> {
        self.pieces
            .get(&id)
            .ok_or_else(|| InvariantViolation::MissingPiece(id).into())
    }

    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// All pieces in id order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Pieces on the board (visible or secret).
    pub fn placed_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(|p| p.location.is_placed())
    }

    /// Workers of `owner` on the board, in id order.
    ///
    /// Secret workers are only included when `include_secret` is set.
    #[must_use]
    pub fn placed_workers(&self, owner: PlayerId, include_secret: bool) -> Vec<Piece> {
        self.pieces
            .values()
            .filter(|p| p.is_worker() && p.owner == Some(owner))
            .filter(|p| {
                p.location == Location::Board || (include_secret && p.location == Location::Secret)
            })
            .cloned()
            .collect()
    }

    /// Workers of `owner` still waiting to be placed.
    #[must_use]
    pub fn available_workers(&self, owner: PlayerId) -> Vec<PieceId> {
        self.pieces
            .values()
            .filter(|p| p.is_worker() && p.owner == Some(owner) && p.location == Location::Hand)
            .map(|p| p.id)
            .collect()
    }

    /// The Ram figure, if the game has one.
    #[must_use]
    pub fn ram(&self) -> Option<&Piece> {
        self.pieces.values().find(|p| p.kind == PieceKind::Ram)
    }

    /// Visible worker standing in a column.
    #[must_use]
    pub fn worker_at(&self, x: u8, y: u8) -> Option<&Piece> {
        self.pieces.values().find(|p| {
            p.is_worker()
                && p.location == Location::Board
                && p.space.is_some_and(|s| s.x == x && s.y == y)
        })
    }

    // === Geometry ===

    /// Number of building pieces in a column.
    #[must_use]
    pub fn height_at(&self, x: u8, y: u8) -> u8 {
        self.buildings_at(x, y).count() as u8
    }

    /// Column `(x, y)` at its current height.
    #[must_use]
    pub fn space_at(&self, x: u8, y: u8) -> Space {
        Space::new(x, y, self.height_at(x, y))
    }

    #[must_use]
    pub fn has_dome(&self, x: u8, y: u8) -> bool {
        self.buildings_at(x, y).any(Piece::is_dome)
    }

    /// Whether a visible worker or the Ram blocks a column.
    #[must_use]
    pub fn is_occupied(&self, x: u8, y: u8) -> bool {
        self.pieces.values().any(|p| {
            matches!(p.kind, PieceKind::Worker(_) | PieceKind::Ram)
                && p.location == Location::Board
                && p.space.is_some_and(|s| s.x == x && s.y == y)
        })
    }

    /// Planar adjacency: distinct columns at most one step apart.
    #[must_use]
    pub fn is_neighbor(a: Space, b: Space) -> bool {
        !a.same_column(b) && a.x.abs_diff(b.x) <= 1 && a.y.abs_diff(b.y) <= 1
    }

    #[must_use]
    pub fn is_perimeter(x: u8, y: u8) -> bool {
        x == 0 || y == 0 || x == BOARD_SIZE - 1 || y == BOARD_SIZE - 1
    }

    /// Unoccupied, undomed spaces at their current height.
    #[must_use]
    pub fn accessible_spaces(&self) -> Vec<Space> {
        let mut spaces = Vec::new();
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                if !self.has_dome(x, y) && !self.is_occupied(x, y) {
                    spaces.push(Space::new(x, y, self.height_at(x, y)));
                }
            }
        }
        spaces
    }

    /// Accessible spaces around a placed piece.
    ///
    /// Moves may climb at most one level; builds may target any height.
    #[must_use]
    pub fn neighboring_spaces(&self, piece: &Piece, kind: WorkKind) -> Vec<Space> {
        let Some(from) = piece.placed_space() else {
            return Vec::new();
        };
        self.accessible_spaces()
            .into_iter()
            .filter(|s| Self::is_neighbor(from, *s))
            .filter(|s| kind == WorkKind::Build || s.z <= from.z + 1)
            .collect()
    }

    /// Number of columns capped by a dome at the top level.
    #[must_use]
    pub fn complete_tower_count(&self) -> usize {
        self.pieces
            .values()
            .filter(|p| p.location == Location::Board && p.is_dome())
            .filter(|p| p.space.is_some_and(|s| s.z == DOME_LEVEL))
            .count()
    }

    // === Mutation ===

    /// Create a worker in the given location, without a space.
    pub fn add_worker(&mut self, owner: PlayerId, gender: Gender, location: Location) -> PieceId {
        self.insert(Some(owner), PieceKind::Worker(gender), location, None)
    }

    /// Create the Ram figure in the holding area.
    pub fn add_ram(&mut self) -> PieceId {
        self.insert(None, PieceKind::Ram, Location::Hand, None)
    }

    /// Create a building piece of level `arg` at `space`.
    pub fn build_at(&mut self, space: Space, arg: u8) -> PieceId {
        self.insert(None, PieceKind::Level(arg), Location::Board, Some(space))
    }

    /// Move a piece, optionally changing its location.
    ///
    /// Returns the piece as it was before the move.
    pub fn set_piece_at(
        &mut self,
        id: PieceId,
        destination: Space,
        location: Option<Location>,
    ) -> Result<Piece> {
        let piece = self
            .pieces
            .get_mut(&id)
            .ok_or(InvariantViolation::MissingPiece(id))?;
        let before = piece.clone();
        piece.space = Some(destination);
        if let Some(location) = location {
            piece.location = location;
        }
        Ok(before)
    }

    /// Put a piece in a location with an optional space.
    pub fn relocate(&mut self, id: PieceId, location: Location, space: Option<Space>) -> Result<Piece> {
        let piece = self
            .pieces
            .get_mut(&id)
            .ok_or(InvariantViolation::MissingPiece(id))?;
        let before = piece.clone();
        piece.location = location;
        piece.space = space;
        Ok(before)
    }

    /// Take a piece out of play. Returns the piece as it was.
    pub fn remove_piece(&mut self, id: PieceId) -> Result<Piece> {
        self.relocate(id, Location::Box, None)
    }

    /// Delete a piece entirely.
    ///
    /// Deleting the most recently created piece rewinds id allocation so a
    /// cancelled build followed by the same build yields the same id.
    pub fn delete_piece(&mut self, id: PieceId) -> Result<Piece> {
        let piece = self
            .pieces
            .remove(&id)
            .ok_or(InvariantViolation::MissingPiece(id))?;
        if id.raw() + 1 == self.next_id {
            self.next_id -= 1;
        }
        Ok(piece)
    }

    fn insert(
        &mut self,
        owner: Option<PlayerId>,
        kind: PieceKind,
        location: Location,
        space: Option<Space>,
    ) -> PieceId {
        let id = PieceId::new(self.next_id);
        self.next_id += 1;
        self.pieces.insert(
            id,
            Piece {
                id,
                owner,
                kind,
                location,
                space,
            },
        );
        id
    }

    fn buildings_at(&self, x: u8, y: u8) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(move |p| {
            matches!(p.kind, PieceKind::Level(_))
                && p.location == Location::Board
                && p.space.is_some_and(|s| s.x == x && s.y == y)
        })
    }
}
