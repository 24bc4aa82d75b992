//! Zeus: may build a block under himself.

use crate::board::{Piece, Space, Work, DOME_LEVEL};
use crate::core::error::Result;
use crate::hooks::{HookCtx, HookCtxMut, WorkArg, WorkOption};
use crate::powers::{Handled, PowerCapability, PowerId};
use smallvec::smallvec;

#[derive(Clone, Copy, Debug, Default)]
pub struct Zeus;

impl PowerCapability for Zeus {
    fn id(&self) -> PowerId {
        PowerId::Zeus
    }

    fn arg_player_build(&self, _ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        for option in &mut arg.workers {
            let Some(here) = option.piece.space else { continue };
            if here.z < DOME_LEVEL && !option.works.iter().any(|w| w.space.same_column(here)) {
                option.works.push(WorkOption::new(here, smallvec![here.z]));
            }
        }
    }

    fn player_build(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<Handled> {
        let Some(here) = worker.space else {
            return Ok(Handled::NotHandled);
        };
        if !work.space.same_column(here) {
            return Ok(Handled::NotHandled);
        }
        let actor = ctx.active();
        let level = work.arg.unwrap_or(here.z);
        ctx.state.build(actor, worker.id, here, level)?;
        ctx.state
            .force_piece(actor, worker.id, Space::new(here.x, here.y, here.z + 1))?;
        ctx.state.record_power_stat(actor, ctx.power)?;
        Ok(Handled::Handled)
    }
}
