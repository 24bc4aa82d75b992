//! Hera: opponents cannot win by moving into a perimeter space.

use crate::board::Board;
use crate::core::stats::{StatDelta, StatName};
use crate::hooks::{HookCtx, WinArg};
use crate::log::ActionKind;
use crate::powers::{PowerCapability, PowerId};

#[derive(Clone, Copy, Debug, Default)]
pub struct Hera;

impl PowerCapability for Hera {
    fn id(&self) -> PowerId {
        PowerId::Hera
    }

    fn check_opponent_winning(&self, ctx: &HookCtx<'_>, arg: &mut WinArg) {
        if !arg.win || ctx.order().team_of(arg.player) == ctx.order().team_of(ctx.me) {
            return;
        }
        let Some(work) = &arg.work else { return };
        let on_perimeter = work.kind == ActionKind::Move
            && work.payload.to.is_some_and(|to| Board::is_perimeter(to.x, to.y));
        if on_perimeter {
            arg.win = false;
            arg.win_stats.push(StatDelta::player(ctx.me, StatName::UsePower));
        }
    }
}
