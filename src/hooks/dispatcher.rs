//! Hook dispatch: the fixed self-then-opponents invocation order.
//!
//! ## Dispatch order
//!
//! 1. The active player's bound capabilities, in registration order.
//! 2. Each remaining opponent in seating order after the active player,
//!    each one's capabilities in registration order.
//!
//! Capabilities are instantiated per call and never receive the
//! dispatcher, so a hook cannot re-enter dispatch.
//!
//! ## Next-state resolution
//!
//! Only the active player's capabilities are asked. Zero proposals leave
//! the default spine in charge; a single distinct proposal wins; two or
//! more distinct proposals are a [`RuleConflictError`].

use tracing::{debug, warn};

use crate::board::WorkKind;
use crate::core::error::{InvariantViolation, Result, RuleConflictError};
use crate::core::{GameState, PlayerId};
use crate::powers::{BoundPower, Handled, PowerCapability, PowerId, Transition};

use super::arg::{FirstPlayerArg, WinArg, WorkArg, WorkFilter};
use super::context::{HookCtx, HookCtxMut};

/// Extension points that propose the next turn state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateHook {
    StartOfTurn,
    AfterMove,
    AfterBuild,
    AfterSkip,
    AfterUsePower,
    AfterSkipPower,
    EndOfTurn,
}

impl StateHook {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StateHook::StartOfTurn => "stateStartOfTurn",
            StateHook::AfterMove => "stateAfterMove",
            StateHook::AfterBuild => "stateAfterBuild",
            StateHook::AfterSkip => "stateAfterSkip",
            StateHook::AfterUsePower => "stateAfterUsePower",
            StateHook::AfterSkipPower => "stateAfterSkipPower",
            StateHook::EndOfTurn => "stateEndOfTurn",
        }
    }
}

impl std::fmt::Display for StateHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Invokes bound capabilities at extension points.
#[derive(Clone, Copy, Debug, Default)]
pub struct HookDispatcher;

impl HookDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Owner of a bound power; unbound capabilities cannot take part in
    /// player hooks.
    pub fn owner_of(bound: &BoundPower) -> Result<PlayerId> {
        bound
            .owner
            .ok_or_else(|| InvariantViolation::Unbound(bound.id).into())
    }

    /// Bound powers of the active player, then of each opponent.
    fn participants(state: &GameState) -> (Vec<BoundPower>, Vec<BoundPower>) {
        let active = state.order.active();
        let mine = state.holdings.powers_of(active).to_vec();
        let theirs = state
            .order
            .opponents(active)
            .into_iter()
            .flat_map(|p| state.holdings.powers_of(p).to_vec())
            .collect();
        (mine, theirs)
    }

    /// Run `player_hook` on the active player's capabilities, then
    /// `opponent_hook` on every opponent's.
    pub fn apply_hooks<A, P, O>(
        &self,
        state: &GameState,
        arg: &mut A,
        player_hook: P,
        opponent_hook: O,
    ) -> Result<()>
    where
        P: Fn(&dyn PowerCapability, &HookCtx<'_>, &mut A),
        O: Fn(&dyn PowerCapability, &HookCtx<'_>, &mut A),
    {
        let (mine, theirs) = Self::participants(state);
        for bound in &mine {
            let ctx = HookCtx::new(Self::owner_of(bound)?, bound.id, state);
            player_hook(bound.instantiate().as_ref(), &ctx, arg);
        }
        for bound in &theirs {
            let ctx = HookCtx::new(Self::owner_of(bound)?, bound.id, state);
            opponent_hook(bound.instantiate().as_ref(), &ctx, arg);
        }
        Ok(())
    }

    /// Run a hook on the active player's capabilities only.
    pub fn apply_player_hooks<A, P>(&self, state: &GameState, arg: &mut A, player_hook: P) -> Result<()>
    where
        P: Fn(&dyn PowerCapability, &HookCtx<'_>, &mut A),
    {
        self.apply_hooks(state, arg, player_hook, |_, _, _| {})
    }

    /// Compute a move or build argument: self hooks may add or restrict,
    /// opponent hooks only restrict.
    pub fn apply_work_hooks(&self, state: &GameState, arg: &mut WorkArg) -> Result<()> {
        let (mine, theirs) = Self::participants(state);
        for bound in &mine {
            let ctx = HookCtx::new(Self::owner_of(bound)?, bound.id, state);
            let cap = bound.instantiate();
            match arg.kind {
                WorkKind::Move => cap.arg_player_move(&ctx, arg),
                WorkKind::Build => cap.arg_player_build(&ctx, arg),
            }
        }
        for bound in &theirs {
            let ctx = HookCtx::new(Self::owner_of(bound)?, bound.id, state);
            let cap = bound.instantiate();
            let mut filter = WorkFilter::new(arg);
            match filter.kind() {
                WorkKind::Move => cap.arg_opponent_move(&ctx, &mut filter),
                WorkKind::Build => cap.arg_opponent_build(&ctx, &mut filter),
            }
        }
        debug!(kind = arg.kind.name(), workers = arg.workers.len(), "work hooks applied");
        Ok(())
    }

    /// Mutating variant of [`Self::apply_hooks`].
    pub fn apply_mut<P, O>(&self, state: &mut GameState, player_hook: P, opponent_hook: O) -> Result<()>
    where
        P: Fn(&dyn PowerCapability, &mut HookCtxMut<'_>) -> Result<()>,
        O: Fn(&dyn PowerCapability, &mut HookCtxMut<'_>) -> Result<()>,
    {
        let (mine, theirs) = Self::participants(state);
        for bound in &mine {
            let mut ctx = HookCtxMut::new(Self::owner_of(bound)?, bound.id, state);
            player_hook(bound.instantiate().as_ref(), &mut ctx)?;
        }
        for bound in &theirs {
            let mut ctx = HookCtxMut::new(Self::owner_of(bound)?, bound.id, state);
            opponent_hook(bound.instantiate().as_ref(), &mut ctx)?;
        }
        Ok(())
    }

    /// Ask the active player's capabilities to intercept a work and keep
    /// the highest outcome.
    pub fn fold_handled<P>(&self, state: &mut GameState, hook: P) -> Result<Handled>
    where
        P: Fn(&dyn PowerCapability, &mut HookCtxMut<'_>) -> Result<Handled>,
    {
        let (mine, _) = Self::participants(state);
        let mut handled = Handled::NotHandled;
        for bound in &mine {
            let mut ctx = HookCtxMut::new(Self::owner_of(bound)?, bound.id, state);
            handled = handled.max(hook(bound.instantiate().as_ref(), &mut ctx)?);
        }
        debug!(handled = ?handled, "work interception folded");
        Ok(handled)
    }

    /// Resolve the next state proposed at `hook`.
    pub fn resolve_next_state(&self, state: &GameState, hook: StateHook) -> Result<Option<Transition>> {
        Ok(self.resolve_with_source(state, hook)?.map(|(_, t)| t))
    }

    /// Like [`Self::resolve_next_state`], also naming the proposing power.
    pub fn resolve_with_source(
        &self,
        state: &GameState,
        hook: StateHook,
    ) -> Result<Option<(PowerId, Transition)>> {
        let active = state.order.active();
        let mut proposals: Vec<(PowerId, Transition)> = Vec::new();
        for bound in state.holdings.powers_of(active) {
            let ctx = HookCtx::new(Self::owner_of(bound)?, bound.id, state);
            if let Some(t) = Self::call_state_hook(bound.instantiate().as_ref(), &ctx, hook) {
                proposals.push((bound.id, t));
            }
        }

        let first = proposals.first().copied();
        if proposals.iter().any(|(_, t)| Some(*t) != first.map(|(_, f)| f)) {
            warn!(player = %active, hook = %hook, proposals = ?proposals, "conflicting next state");
            return Err(RuleConflictError::ConflictingNextState {
                hook,
                player: active,
                proposals,
            }
            .into());
        }
        if let Some((power, t)) = first {
            debug!(player = %active, hook = %hook, power = %power, next = ?t, "next state proposed");
        }
        Ok(first)
    }

    fn call_state_hook(cap: &dyn PowerCapability, ctx: &HookCtx<'_>, hook: StateHook) -> Option<Transition> {
        match hook {
            StateHook::StartOfTurn => cap.state_start_of_turn(ctx),
            StateHook::AfterMove => cap.state_after_move(ctx),
            StateHook::AfterBuild => cap.state_after_build(ctx),
            StateHook::AfterSkip => cap.state_after_skip(ctx),
            StateHook::AfterUsePower => cap.state_after_use_power(ctx),
            StateHook::AfterSkipPower => cap.state_after_skip_power(ctx),
            StateHook::EndOfTurn => cap.state_end_of_turn(ctx),
        }
    }

    /// Win check: self grants first, then opponent vetoes or redirects.
    pub fn check_winning(&self, state: &GameState, arg: &mut WinArg) -> Result<()> {
        self.apply_hooks(
            state,
            arg,
            |cap, ctx, arg| cap.check_player_winning(ctx, arg),
            |cap, ctx, arg| cap.check_opponent_winning(ctx, arg),
        )
    }

    /// Whether any capability in play vetoes cancelling `player`'s turn.
    pub fn allows_cancel(&self, state: &GameState, player: PlayerId) -> Result<bool> {
        for seat in state.order.remaining() {
            for bound in state.holdings.powers_of(seat) {
                let ctx = HookCtx::new(Self::owner_of(bound)?, bound.id, state);
                if !bound.instantiate().can_cancel(&ctx) {
                    debug!(player = %player, power = %bound.id, "cancel vetoed");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Log eligibility plus capability vetoes.
    pub fn can_cancel(&self, state: &GameState, player: PlayerId) -> Result<bool> {
        Ok(state.log.can_cancel(player) && self.allows_cancel(state, player)?)
    }

    /// Filter first-player candidates through each offered power, unbound.
    pub fn arg_choose_first_player(&self, offer: &[PowerId]) -> Result<FirstPlayerArg> {
        let mut arg = FirstPlayerArg {
            powers: offer.to_vec(),
        };
        for &id in offer {
            let bound = BoundPower::from_catalog(id, None)?;
            bound.instantiate().arg_choose_first_player(&mut arg);
        }
        Ok(arg)
    }
}
