//! Hook contexts: the bound player plus access to the game state.

use crate::board::{Board, Piece};
use crate::core::{GameState, PlayerId, TurnOrder};
use crate::log::ActionLog;
use crate::powers::PowerId;

/// Read-only context of one capability invocation.
#[derive(Clone, Copy, Debug)]
pub struct HookCtx<'a> {
    /// The player the capability is bound to.
    pub me: PlayerId,
    pub power: PowerId,
    pub state: &'a GameState,
}

impl<'a> HookCtx<'a> {
    #[must_use]
    pub fn new(me: PlayerId, power: PowerId, state: &'a GameState) -> Self {
        Self { me, power, state }
    }

    #[must_use]
    pub fn board(&self) -> &'a Board {
        &self.state.board
    }

    #[must_use]
    pub fn log(&self) -> &'a ActionLog {
        &self.state.log
    }

    #[must_use]
    pub fn order(&self) -> &'a TurnOrder {
        &self.state.order
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.state.order.active()
    }

    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.active() == self.me
    }

    /// Visible workers this player controls.
    #[must_use]
    pub fn my_workers(&self) -> Vec<Piece> {
        let owner = self.state.order.worker_owner(self.me);
        self.state.board.placed_workers(owner, false)
    }

    /// Workers this player controls, secret ones included.
    #[must_use]
    pub fn my_workers_with_secret(&self) -> Vec<Piece> {
        let owner = self.state.order.worker_owner(self.me);
        self.state.board.placed_workers(owner, true)
    }

    /// Whether a piece belongs to a rival team.
    #[must_use]
    pub fn is_opponent_piece(&self, piece: &Piece) -> bool {
        let order = &self.state.order;
        piece
            .owner
            .is_some_and(|owner| order.team_of(owner) != order.team_of(self.me))
    }
}

/// Mutable context of one capability invocation.
#[derive(Debug)]
pub struct HookCtxMut<'a> {
    pub me: PlayerId,
    pub power: PowerId,
    pub state: &'a mut GameState,
}

impl<'a> HookCtxMut<'a> {
    pub fn new(me: PlayerId, power: PowerId, state: &'a mut GameState) -> Self {
        Self { me, power, state }
    }

    /// Read-only view for the query helpers of [`HookCtx`].
    #[must_use]
    pub fn view(&self) -> HookCtx<'_> {
        HookCtx::new(self.me, self.power, self.state)
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.state.order.active()
    }
}
