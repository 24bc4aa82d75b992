//! Apollo: move into an opponent worker's space by swapping places.

use crate::board::{Board, Location, Piece, Work, WorkKind};
use crate::core::error::Result;
use crate::hooks::{HookCtx, HookCtxMut, WorkArg, WorkOption};
use crate::powers::{Handled, PowerCapability, PowerId};

use super::opponent_worker_at;

#[derive(Clone, Copy, Debug, Default)]
pub struct Apollo;

impl PowerCapability for Apollo {
    fn id(&self) -> PowerId {
        PowerId::Apollo
    }

    fn arg_player_move(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        let board = ctx.board();
        for worker in ctx.my_workers() {
            let Some(from) = worker.space else { continue };
            let swaps: Vec<_> = board
                .placed_pieces()
                .filter(|p| p.is_worker() && p.location == Location::Board && ctx.is_opponent_piece(p))
                .filter_map(|p| p.space)
                .filter(|s| Board::is_neighbor(from, *s) && s.z <= from.z + 1)
                .map(|s| WorkOption::standard(s, WorkKind::Move))
                .collect();
            arg.worker_or_insert(&worker).works.extend(swaps);
        }
    }

    fn player_move(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<Handled> {
        let target = work.space;
        let Some(other) = opponent_worker_at(&ctx.view(), target.x, target.y) else {
            return Ok(Handled::NotHandled);
        };
        let Some(from) = worker.space else {
            return Ok(Handled::NotHandled);
        };
        let actor = ctx.active();
        ctx.state.force_piece(actor, other.id, from)?;
        ctx.state.move_worker(actor, worker.id, target, Location::Board)?;
        Ok(Handled::Handled)
    }
}
