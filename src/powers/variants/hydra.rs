//! Hydra: at the end of the turn, gain a worker if no two workers
//! neighbor each other, otherwise lose one.

use crate::board::{Board, Gender, Piece, PieceId, Work, WorkKind};
use crate::core::error::Result;
use crate::core::stats::{StatDelta, StatName};
use crate::hooks::{HookCtx, HookCtxMut, UsePowerArg, WorkOption, WorkerOption};
use crate::powers::{PowerCapability, PowerId, Transition};

#[derive(Clone, Copy, Debug, Default)]
pub struct Hydra;

impl Hydra {
    fn is_independent_set(workers: &[Piece]) -> bool {
        workers.iter().all(|a| {
            workers.iter().all(|b| match (a.space, b.space) {
                (Some(sa), Some(sb)) => !Board::is_neighbor(sa, sb),
                _ => true,
            })
        })
    }
}

impl PowerCapability for Hydra {
    fn id(&self) -> PowerId {
        PowerId::Hydra
    }

    fn state_after_build(&self, _ctx: &HookCtx<'_>) -> Option<Transition> {
        Some(Transition::UsePower)
    }

    fn arg_use_power(&self, ctx: &HookCtx<'_>, arg: &mut UsePowerArg) {
        arg.power = Some(PowerId::Hydra);
        arg.skippable = false;
        let workers = ctx.my_workers();

        if Self::is_independent_set(&workers) {
            let moved = ctx.log().last_move(ctx.me).and_then(|m| m.subject);
            let Some(worker) = workers.into_iter().find(|w| Some(w.id) == moved) else {
                arg.workers.clear();
                return;
            };
            let spaces = ctx.board().neighboring_spaces(&worker, WorkKind::Build);
            let lowest = spaces.iter().map(|s| s.z).min();
            let works = spaces
                .into_iter()
                .filter(|s| Some(s.z) == lowest)
                .map(|s| WorkOption::standard(s, WorkKind::Move))
                .collect();
            arg.workers = vec![WorkerOption::new(worker, works)];
        } else {
            arg.workers = workers
                .into_iter()
                .filter_map(|w| {
                    let here = w.space?;
                    Some(WorkerOption::new(w, vec![WorkOption::standard(here, WorkKind::Move)]))
                })
                .collect();
        }
    }

    fn use_power(&self, ctx: &mut HookCtxMut<'_>, worker: PieceId, work: &Work) -> Result<()> {
        let actor = ctx.active();
        if Self::is_independent_set(&ctx.view().my_workers()) {
            let owner = ctx.state.order.worker_owner(ctx.me);
            ctx.state
                .create_worker(actor, owner, Gender::Male, work.space, Vec::new())?;
        } else {
            ctx.state
                .kill_worker(actor, worker, vec![StatDelta::player(actor, StatName::UsePower)])?;
        }
        Ok(())
    }

    fn state_after_use_power(&self, _ctx: &HookCtx<'_>) -> Option<Transition> {
        Some(Transition::EndTurn)
    }

    fn state_after_skip_power(&self, _ctx: &HookCtx<'_>) -> Option<Transition> {
        Some(Transition::EndTurn)
    }
}
