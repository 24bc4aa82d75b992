//! Prometheus: may build before moving, then the builder moves without
//! moving up and builds again.

use crate::board::{Piece, Work};
use crate::core::error::Result;
use crate::hooks::{HookCtx, HookCtxMut, WorkArg};
use crate::powers::{PowerCapability, PowerId, Transition};

#[derive(Clone, Copy, Debug, Default)]
pub struct Prometheus;

fn has_moved(ctx: &HookCtx<'_>) -> bool {
    !ctx.log().last_moves(ctx.me).is_empty()
}

impl PowerCapability for Prometheus {
    fn id(&self) -> PowerId {
        PowerId::Prometheus
    }

    fn state_start_of_turn(&self, _ctx: &HookCtx<'_>) -> Option<Transition> {
        Some(Transition::Build)
    }

    fn arg_player_build(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        if !has_moved(ctx) {
            arg.skippable = true;
        }
    }

    fn state_after_build(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        (!has_moved(ctx)).then_some(Transition::Move)
    }

    fn state_after_skip(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        (!has_moved(ctx)).then_some(Transition::Move)
    }

    fn arg_player_move(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        let builds = ctx.log().last_builds(ctx.me);
        let Some(builder) = builds.first().and_then(|b| b.subject) else {
            return;
        };
        arg.retain_workers_by_id(&[builder]);
        arg.retain_works(|piece, w| piece.space.is_some_and(|from| w.space.z <= from.z));
    }

    fn after_player_build(&self, ctx: &mut HookCtxMut<'_>, _worker: &Piece, _work: &Work) -> Result<()> {
        if !has_moved(&ctx.view()) {
            let (actor, power) = (ctx.active(), ctx.power);
            ctx.state.record_power_stat(actor, power)?;
        }
        Ok(())
    }
}
