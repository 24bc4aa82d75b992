//! Demeter: one additional build, not on the same space.

use crate::hooks::{HookCtx, WorkArg};
use crate::powers::{PowerCapability, PowerId, Transition};

#[derive(Clone, Copy, Debug, Default)]
pub struct Demeter;

impl PowerCapability for Demeter {
    fn id(&self) -> PowerId {
        PowerId::Demeter
    }

    fn arg_player_build(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        let builds = ctx.log().last_builds(ctx.me);
        let [first] = builds.as_slice() else { return };
        let (Some(worker), Some(space)) = (first.subject, first.payload.to) else {
            return;
        };
        arg.skippable = true;
        arg.retain_workers_by_id(&[worker]);
        arg.retain_works(|_, w| !w.space.same_column(space));
    }

    fn state_after_build(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        (ctx.log().last_builds(ctx.me).len() == 1).then_some(Transition::BuildAgain)
    }
}
