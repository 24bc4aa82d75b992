//! Chronus: wins when five complete towers stand on the board.

use crate::hooks::{HookCtx, WinArg};
use crate::powers::{PowerCapability, PowerId};

const TOWERS_TO_WIN: usize = 5;

#[derive(Clone, Copy, Debug, Default)]
pub struct Chronus;

impl Chronus {
    fn enough_towers(ctx: &HookCtx<'_>) -> bool {
        ctx.board().complete_tower_count() >= TOWERS_TO_WIN
    }
}

impl PowerCapability for Chronus {
    fn id(&self) -> PowerId {
        PowerId::Chronus
    }

    fn check_player_winning(&self, ctx: &HookCtx<'_>, arg: &mut WinArg) {
        if Self::enough_towers(ctx) {
            arg.win = true;
        }
    }

    // The fifth tower may be completed by an opponent.
    fn check_opponent_winning(&self, ctx: &HookCtx<'_>, arg: &mut WinArg) {
        if !arg.win && Self::enough_towers(ctx) {
            arg.win = true;
            arg.player = ctx.me;
        }
    }
}
