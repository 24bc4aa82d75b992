//! Athena: if she moved up on her last turn, opponents cannot move up.

use crate::hooks::{HookCtx, WorkFilter};
use crate::powers::{PowerCapability, PowerId};

#[derive(Clone, Copy, Debug, Default)]
pub struct Athena;

impl PowerCapability for Athena {
    fn id(&self) -> PowerId {
        PowerId::Athena
    }

    fn arg_opponent_move(&self, ctx: &HookCtx<'_>, filter: &mut WorkFilter<'_>) {
        let moved_up = ctx.log().last_moves(ctx.me).iter().any(|m| m.moved_up());
        if moved_up {
            filter.retain_works(|worker, w| worker.space.is_some_and(|s| w.space.z <= s.z));
        }
    }
}
