//! Castor & Pollux: move one worker and build as usual, or move both and
//! skip the build, or skip the move and build with both.

use crate::board::WorkKind;
use crate::core::error::Result;
use crate::hooks::{HookCtx, HookCtxMut, WorkArg};
use crate::powers::{PowerCapability, PowerId, Transition};

#[derive(Clone, Copy, Debug, Default)]
pub struct Castor;

impl PowerCapability for Castor {
    fn id(&self) -> PowerId {
        PowerId::Castor
    }

    fn arg_player_move(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        let moved: Vec<_> = ctx
            .log()
            .last_moves(ctx.me)
            .iter()
            .filter_map(|m| m.subject)
            .collect();
        if moved.len() <= 1 {
            arg.skippable = true;
        }
        arg.retain_workers(|p| !moved.contains(&p.id));
    }

    fn state_after_move(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        match ctx.log().last_moves(ctx.me).len() {
            0 => None,
            n if n == ctx.my_workers().len() => Some(Transition::EndTurn),
            _ => Some(Transition::MoveAgain),
        }
    }

    fn arg_player_build(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        let log = ctx.log();
        if log.last_moves(ctx.me).len() == 1 {
            return;
        }
        let built: Vec<_> = log
            .last_builds(ctx.me)
            .iter()
            .filter_map(|b| b.subject)
            .collect();
        *arg = WorkArg::for_workers(ctx.board(), &ctx.my_workers(), WorkKind::Build);
        arg.retain_workers(|p| !built.contains(&p.id));
    }

    fn state_after_build(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        let log = ctx.log();
        if log.last_moves(ctx.me).len() == 1 {
            return None;
        }
        (log.last_builds(ctx.me).len() < ctx.my_workers().len()).then_some(Transition::BuildAgain)
    }

    fn end_player_turn(&self, ctx: &mut HookCtxMut<'_>) -> Result<()> {
        if ctx.view().log().last_moves(ctx.me).len() != 1 {
            let (actor, power) = (ctx.active(), ctx.power);
            ctx.state.record_power_stat(actor, power)?;
        }
        Ok(())
    }
}
