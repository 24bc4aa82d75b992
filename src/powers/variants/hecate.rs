//! Hecate: workers are hidden from opponents. An opponent action that
//! touches a hidden worker's space is undone, together with the rest of
//! that turn.

use tracing::warn;

use crate::board::{Location, Piece, Space, Work, WorkKind};
use crate::core::error::Result;
use crate::hooks::{FirstPlayerArg, HookCtx, HookCtxMut, PlaceWorkerArg, WorkArg};
use crate::log::{ActionKind, LogEntry, Payload, Tag};
use crate::powers::{Handled, PowerCapability, PowerId};

#[derive(Clone, Copy, Debug, Default)]
pub struct Hecate;

impl Hecate {
    /// Options of the hidden workers, never onto a hidden worker's space.
    fn secret_arg(ctx: &HookCtx<'_>, arg: &mut WorkArg, workers: Vec<Piece>) {
        let hidden = ctx.my_workers_with_secret();
        *arg = WorkArg::for_workers(ctx.board(), &workers, arg.kind);
        arg.retain_works(|_, w| {
            !hidden
                .iter()
                .any(|h| h.space.is_some_and(|s| s.same_column(w.space)))
        });
    }

    /// Space an entry touched, if it was an opponent action.
    fn touched_space(entry: &LogEntry, hidden: &[Piece]) -> Option<Space> {
        if entry.subject.is_some_and(|id| hidden.iter().any(|h| h.id == id)) {
            return None;
        }
        match entry.kind {
            ActionKind::Move
            | ActionKind::Force
            | ActionKind::Build
            | ActionKind::PlaceWorker
            | ActionKind::PlaceToken
            | ActionKind::MoveToken => entry.payload.to,
            ActionKind::Removal => entry.payload.from,
            _ => None,
        }
    }
}

impl PowerCapability for Hecate {
    fn id(&self) -> PowerId {
        PowerId::Hecate
    }

    // Hecate never plays first.
    fn arg_choose_first_player(&self, arg: &mut FirstPlayerArg) {
        arg.powers.retain(|p| *p != PowerId::Hecate);
    }

    fn arg_player_place_worker(&self, ctx: &HookCtx<'_>, arg: &mut PlaceWorkerArg) {
        let hidden = ctx.my_workers_with_secret();
        arg.spaces
            .retain(|s| !hidden.iter().any(|h| h.space.is_some_and(|h| h.same_column(*s))));
        arg.location = Location::Secret;
    }

    fn arg_player_move(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        Self::secret_arg(ctx, arg, ctx.my_workers_with_secret());
    }

    fn arg_player_build(&self, ctx: &HookCtx<'_>, arg: &mut WorkArg) {
        let Some(moved) = ctx.log().last_move(ctx.me).and_then(|m| m.subject) else {
            *arg = WorkArg::new(WorkKind::Build);
            return;
        };
        let workers = ctx
            .my_workers_with_secret()
            .into_iter()
            .filter(|w| w.id == moved)
            .collect();
        Self::secret_arg(ctx, arg, workers);
    }

    fn player_move(&self, _ctx: &mut HookCtxMut<'_>, _worker: &Piece, _work: &Work) -> Result<Handled> {
        Ok(Handled::Concealed)
    }

    fn end_opponent_turn(&self, ctx: &mut HookCtxMut<'_>) -> Result<()> {
        let view = ctx.view();
        let active = view.active();
        let hidden = view.my_workers_with_secret();
        let conflict = view
            .log()
            .turn_entries(active)
            .into_iter()
            .rev()
            .find_map(|entry| {
                let touched = Self::touched_space(entry, &hidden)?;
                let worker = hidden
                    .iter()
                    .find(|h| h.space.is_some_and(|s| s.same_column(touched)))?;
                Some((entry.seq, worker.clone()))
            });
        let Some((seq, worker)) = conflict else {
            return Ok(());
        };

        warn!(player = %active, seq = %seq, "hidden worker conflict, turn cancelled");
        ctx.state.cancel_turn(active, Some(seq))?;
        let mut payload = Payload::new().with_power(PowerId::Hecate);
        if let Some(space) = worker.space {
            payload = payload.with_to(space);
        }
        ctx.state.log.record_tag(active, Tag::Conflict, payload, Vec::new())?;
        Ok(())
    }
}
