//! Selene: her female worker may build a dome at any level, even if the
//! male worker moved.

use crate::board::{Gender, Piece, Work, WorkKind, DOME_LEVEL};
use crate::core::error::Result;
use crate::hooks::{HookCtx, HookCtxMut, WorkArg, WorkOption};
use crate::powers::{Handled, PowerCapability, PowerId};
use smallvec::smallvec;

#[derive(Clone, Copy, Debug, Default)]
pub struct Selene;

impl PowerCapability for Selene {
    fn id(&self) -> PowerId {
        PowerId::Selene
    }

    fn arg_player_build(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        let Some(female) = ctx
            .my_workers()
            .into_iter()
            .find(|w| w.gender() == Some(Gender::Female))
        else {
            return;
        };
        let spaces = ctx.board().neighboring_spaces(&female, WorkKind::Build);
        let option = arg.worker_or_insert(&female);
        for space in spaces {
            match option.works.iter_mut().find(|w| w.space == space) {
                Some(work) if !work.args.contains(&DOME_LEVEL) => work.args.push(DOME_LEVEL),
                Some(_) => {}
                None => option.works.push(WorkOption::new(space, smallvec![DOME_LEVEL])),
            }
        }
    }

    fn player_build(&self, ctx: &mut HookCtxMut<'_>, worker: &Piece, work: &Work) -> Result<Handled> {
        let moved = ctx.view().log().last_move(ctx.me).and_then(|m| m.subject);
        let dome = work.arg == Some(DOME_LEVEL);
        if worker.gender() == Some(Gender::Female)
            && dome
            && (work.space.z < DOME_LEVEL || moved != Some(worker.id))
        {
            let (actor, power) = (ctx.active(), ctx.power);
            ctx.state.record_power_stat(actor, power)?;
        }
        Ok(Handled::NotHandled)
    }
}
