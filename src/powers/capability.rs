//! The capability contract every power implements.
//!
//! A capability overrides only the hooks it changes; every hook has a
//! no-op default. Capabilities are stateless: anything they need is
//! rederived from the board and the action log through the hook context,
//! so instances are created per dispatch and dropped right after.
//!
//! ## Hook families
//!
//! - `arg_*`: shape the legal-action snapshot. Self hooks may add or
//!   restrict; opponent hooks only see a [`WorkFilter`] and can only
//!   restrict.
//! - `player_*`: intercept execution and report how it was [`Handled`].
//! - `after_*`, `start_*`, `end_*`: fire-and-forget bookkeeping with
//!   mutable access to the game state.
//! - `state_*`: propose at most one [`Transition`] for the active player.
//! - `check_*_winning`: grant, veto or redirect wins.

use serde::{Deserialize, Serialize};

use crate::board::{Piece, PieceId, Space, Work};
use crate::core::error::Result;
use crate::hooks::{
    FirstPlayerArg, HookCtx, HookCtxMut, PlaceWorkerArg, UsePowerArg, WinArg, WorkArg, WorkFilter,
};

use super::definition::PowerId;

/// Next-state proposal of a capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Move,
    MoveAgain,
    Build,
    BuildAgain,
    /// Offer the power to the player.
    UsePower,
    /// Go to the end-of-turn confirmation.
    EndTurn,
    /// Open another turn for the same player.
    AdditionalTurn,
}

/// Outcome of a work-execution hook, ordered by precedence.
///
/// When several capabilities of a player intercept the same work, the
/// highest outcome wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Handled {
    /// Perform the default mutation.
    #[default]
    NotHandled,
    /// Perform the default mutation, keeping the worker hidden.
    Concealed,
    /// The capability performed the work itself.
    Handled,
}

/// A power variant.
#[allow(unused_variables)]
pub trait PowerCapability {
    fn id(&self) -> PowerId;

    // === Setup ===

    /// Reorder or filter first-player candidates. Runs unbound.
    fn arg_choose_first_player(&self, arg: &mut FirstPlayerArg) {}

    fn arg_player_place_worker(&self, ctx: &HookCtx<'_>, arg: &mut PlaceWorkerArg) {}

    fn arg_opponent_place_worker(&self, ctx: &HookCtx<'_>, arg: &mut PlaceWorkerArg) {}

    /// Place a piece in place of the default placement.
    fn player_place_worker(&self, ctx: &mut HookCtxMut<'_>, piece: PieceId, space: Space) -> Result<Handled> {
        Ok(Handled::NotHandled)
    }

    // === Work arguments ===

    fn arg_player_move(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {}

    fn arg_opponent_move(&self, ctx: &HookCtx<'_>, filter: &mut WorkFilter<'_>) {}

    fn arg_player_build(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {}

    fn arg_opponent_build(&self, ctx: &HookCtx<'_>, filter: &mut WorkFilter<'_>) {}

    // === Work execution ===

    fn player_move(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<Handled> {
        Ok(Handled::NotHandled)
    }

    fn player_build(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<Handled> {
        Ok(Handled::NotHandled)
    }

    fn after_player_move(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<()> {
        Ok(())
    }

    fn after_opponent_move(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<()> {
        Ok(())
    }

    fn after_player_build(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<()> {
        Ok(())
    }

    fn after_opponent_build(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<()> {
        Ok(())
    }

    // === Power use ===

    fn arg_use_power(&self, ctx: &HookCtx<'_>, arg: &mut UsePowerArg) {}

    fn use_power(&self, ctx: &mut HookCtxMut<'_>, worker: PieceId, work: &Work) -> Result<()> {
        Ok(())
    }

    // === Next state ===

    fn state_start_of_turn(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        None
    }

    fn state_after_move(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        None
    }

    fn state_after_build(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        None
    }

    fn state_after_skip(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        None
    }

    fn state_after_use_power(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        None
    }

    fn state_after_skip_power(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        None
    }

    fn state_end_of_turn(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        None
    }

    // === Winning ===

    fn check_player_winning(&self, ctx: &HookCtx<'_>, arg: &mut WinArg) {}

    fn check_opponent_winning(&self, ctx: &HookCtx<'_>, arg: &mut WinArg) {}

    // === Turn boundaries ===

    fn start_player_turn(&self, ctx: &mut HookCtxMut<'_>) -> Result<()> {
        Ok(())
    }

    fn start_opponent_turn(&self, ctx: &mut HookCtxMut<'_>) -> Result<()> {
        Ok(())
    }

    fn end_player_turn(&self, ctx: &mut HookCtxMut<'_>) -> Result<()> {
        Ok(())
    }

    fn end_opponent_turn(&self, ctx: &mut HookCtxMut<'_>) -> Result<()> {
        Ok(())
    }

    /// Veto cancellation of the active player's turn.
    fn can_cancel(&self, ctx: &HookCtx<'_>) -> bool {
        true
    }
}

/// Constructor of a capability instance.
pub type CapabilityFactory = fn() -> Box<dyn PowerCapability>;
