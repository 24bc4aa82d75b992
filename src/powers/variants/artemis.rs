//! Artemis: one additional move, not back to the initial space.

use crate::hooks::{HookCtx, WorkArg};
use crate::powers::{PowerCapability, PowerId, Transition};

#[derive(Clone, Copy, Debug, Default)]
pub struct Artemis;

impl PowerCapability for Artemis {
    fn id(&self) -> PowerId {
        PowerId::Artemis
    }

    fn arg_player_move(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        let moves = ctx.log().last_moves(ctx.me);
        let [first] = moves.as_slice() else { return };
        let (Some(worker), Some(initial)) = (first.subject, first.payload.from) else {
            return;
        };
        arg.skippable = true;
        arg.retain_workers_by_id(&[worker]);
        arg.retain_works(|_, w| !w.space.same_column(initial));
    }

    fn state_after_move(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        (ctx.log().last_moves(ctx.me).len() == 1).then_some(Transition::MoveAgain)
    }
}
