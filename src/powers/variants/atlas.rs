//! Atlas: may build a dome at any level.

use crate::board::DOME_LEVEL;
use crate::hooks::{HookCtx, WorkArg};
use crate::powers::{PowerCapability, PowerId};

#[derive(Clone, Copy, Debug, Default)]
pub struct Atlas;

impl PowerCapability for Atlas {
    fn id(&self) -> PowerId {
        PowerId::Atlas
    }

    fn arg_player_build(&self, _ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        for worker in &mut arg.workers {
            for work in &mut worker.works {
                if !work.args.contains(&DOME_LEVEL) {
                    work.args.push(DOME_LEVEL);
                }
            }
        }
    }
}
