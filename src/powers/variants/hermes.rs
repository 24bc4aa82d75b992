//! Hermes: workers that stay on their level may each move any number of
//! times, then either worker builds.

use crate::board::WorkKind;
use crate::core::error::Result;
use crate::hooks::{HookCtx, HookCtxMut, WorkArg};
use crate::log::LogEntry;
use crate::powers::{PowerCapability, PowerId, Transition};

#[derive(Clone, Copy, Debug, Default)]
pub struct Hermes;

fn is_level(entry: &LogEntry) -> bool {
    matches!((entry.payload.from, entry.payload.to), (Some(from), Some(to)) if from.z == to.z)
}

fn all_level(ctx: &HookCtx<'_>) -> bool {
    ctx.log().last_moves(ctx.me).into_iter().all(is_level)
}

impl PowerCapability for Hermes {
    fn id(&self) -> PowerId {
        PowerId::Hermes
    }

    fn arg_player_move(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        arg.skippable = true;
        if ctx.log().last_moves(ctx.me).is_empty() {
            return;
        }
        arg.retain_works(|piece, w| piece.space.is_some_and(|from| from.z == w.space.z));
    }

    fn state_after_move(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        all_level(ctx).then_some(Transition::MoveAgain)
    }

    fn arg_player_build(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        if all_level(ctx) {
            *arg = WorkArg::for_workers(ctx.board(), &ctx.my_workers(), WorkKind::Build);
        }
    }

    fn end_player_turn(&self, ctx: &mut HookCtxMut<'_>) -> Result<()> {
        if ctx.view().log().last_moves(ctx.me).len() > 1 {
            let (actor, power) = (ctx.active(), ctx.power);
            ctx.state.record_power_stat(actor, power)?;
        }
        Ok(())
    }
}
