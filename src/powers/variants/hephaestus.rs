//! Hephaestus: one additional block (not a dome) on top of the first.

use crate::board::DOME_LEVEL;
use crate::hooks::{HookCtx, WorkArg};
use crate::powers::{PowerCapability, PowerId, Transition};

#[derive(Clone, Copy, Debug, Default)]
pub struct Hephaestus;

impl PowerCapability for Hephaestus {
    fn id(&self) -> PowerId {
        PowerId::Hephaestus
    }

    fn arg_player_build(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        let builds = ctx.log().last_builds(ctx.me);
        let [first] = builds.as_slice() else { return };
        let (Some(worker), Some(space)) = (first.subject, first.payload.to) else {
            return;
        };
        arg.skippable = true;
        arg.retain_workers_by_id(&[worker]);
        arg.retain_works(|_, w| w.space.same_column(space));
        for option in &mut arg.workers {
            for work in &mut option.works {
                work.args.retain(|level| *level < DOME_LEVEL);
            }
        }
    }

    fn state_after_build(&self, ctx: &HookCtx<'_>) -> Option<Transition> {
        let builds = ctx.log().last_builds(ctx.me);
        let [first] = builds.as_slice() else { return None };
        first
            .payload
            .arg
            .is_some_and(|level| level + 1 < DOME_LEVEL)
            .then_some(Transition::BuildAgain)
    }
}
