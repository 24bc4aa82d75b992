//! Minotaur: push an opponent worker one space straight back.

use crate::board::{Location, Piece, Space, Work, WorkKind};
use crate::core::error::Result;
use crate::hooks::{HookCtx, HookCtxMut, WorkArg, WorkOption};
use crate::powers::{Handled, PowerCapability, PowerId};

use super::opponent_worker_at;

#[derive(Clone, Copy, Debug, Default)]
pub struct Minotaur;

impl Minotaur {
    /// Where a worker standing at `target` would be pushed to.
    fn push_destination(ctx: &HookCtx<'_>, from: Space, target: Space) -> Option<Space> {
        let board = ctx.board();
        let (x, y) = target.beyond(from)?;
        (!board.has_dome(x, y) && !board.is_occupied(x, y)).then(|| board.space_at(x, y))
    }
}

impl PowerCapability for Minotaur {
    fn id(&self) -> PowerId {
        PowerId::Minotaur
    }

    fn arg_player_move(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        for worker in ctx.my_workers() {
            let Some(from) = worker.space else { continue };
            let mut pushes = Vec::new();
            for dx in -1i8..=1 {
                for dy in -1i8..=1 {
                    let Some((x, y)) = from.offset(dx, dy) else { continue };
                    if (dx, dy) == (0, 0) || opponent_worker_at(ctx, x, y).is_none() {
                        continue;
                    }
                    let target = ctx.board().space_at(x, y);
                    if target.z <= from.z + 1 && Self::push_destination(ctx, from, target).is_some() {
                        pushes.push(WorkOption::standard(target, WorkKind::Move));
                    }
                }
            }
            arg.worker_or_insert(&worker).works.extend(pushes);
        }
    }

    fn player_move(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<Handled> {
        let view = ctx.view();
        let target = work.space;
        let (Some(other), Some(from)) = (opponent_worker_at(&view, target.x, target.y), worker.space) else {
            return Ok(Handled::NotHandled);
        };
        let Some(destination) = Self::push_destination(&view, from, target) else {
            return Ok(Handled::NotHandled);
        };
        let actor = ctx.active();
        ctx.state.force_piece(actor, other.id, destination)?;
        ctx.state.move_worker(actor, worker.id, target, Location::Board)?;
        Ok(Handled::Handled)
    }
}
