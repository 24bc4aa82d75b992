//! Bia: moving towards an opponent worker removes it.

use crate::board::{Piece, Work};
use crate::core::error::Result;
use crate::core::stats::{StatDelta, StatName};
use crate::hooks::HookCtxMut;
use crate::powers::{PowerCapability, PowerId};

use super::opponent_worker_at;

#[derive(Clone, Copy, Debug, Default)]
pub struct Bia;

impl PowerCapability for Bia {
    fn id(&self) -> PowerId {
        PowerId::Bia
    }

    fn after_player_move(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<()> {
        let Some(from) = worker.space else { return Ok(()) };
        let Some((x, y)) = work.space.beyond(from) else { return Ok(()) };
        let Some(victim) = opponent_worker_at(&ctx.view(), x, y) else {
            return Ok(());
        };
        let actor = ctx.active();
        ctx.state
            .kill_worker(actor, victim.id, vec![StatDelta::player(actor, StatName::UsePower)])?;
        Ok(())
    }
}
