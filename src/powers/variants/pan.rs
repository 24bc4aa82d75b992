//! Pan: also wins by moving down two or more levels.

use crate::hooks::{HookCtx, WinArg};
use crate::log::ActionKind;
use crate::powers::{PowerCapability, PowerId};

#[derive(Clone, Copy, Debug, Default)]
pub struct Pan;

impl PowerCapability for Pan {
    fn id(&self) -> PowerId {
        PowerId::Pan
    }

    fn check_player_winning(&self, ctx: &HookCtx<'_>, arg: &mut WinArg) {
        let Some(work) = &arg.work else { return };
        if work.kind != ActionKind::Move || work.actor != ctx.me {
            return;
        }
        if let (Some(from), Some(to)) = (work.payload.from, work.payload.to) {
            if from.z >= to.z + 2 {
                arg.win = true;
            }
        }
    }
}
