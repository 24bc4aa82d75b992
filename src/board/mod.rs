//! The board collaborator: spaces, pieces and their locations.
//!
//! The rule engine never stores positions itself. Every capability and the
//! turn machine read and mutate the [`Board`], and every mutation that must
//! survive a cancel goes through the action log alongside it.

mod manager;
mod piece;
mod space;

pub use manager::Board;
pub use piece::{Gender, Location, Piece, PieceId, PieceKind};
pub use space::{BuildArgs, Space, Work, WorkKind, BOARD_SIZE, DOME_LEVEL};
