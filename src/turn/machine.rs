//! The turn state machine.
//!
//! The machine owns the game state and walks the turn spine. At each
//! step it asks the [`HookDispatcher`] for the legal-action snapshot and
//! next-state overrides, and consults the [`ActionLog`] for skip and
//! cancel eligibility.
//!
//! ## Pausing
//!
//! The machine pauses whenever a player must choose (placement, a work,
//! a power target, end-of-turn confirmation) and resumes on the matching
//! command. Commands are validated against the snapshot computed when the
//! pause began; a rejected command leaves the state untouched.
//!
//! ## Losing
//!
//! A player with no legal work who can neither skip nor cancel loses. In
//! three-player games they are eliminated and play continues; otherwise
//! the opposing side wins.
//!
//! [`ActionLog`]: crate::log::ActionLog

use tracing::{debug, info};

use crate::board::{Location, PieceId, Space, WorkKind, DOME_LEVEL};
use crate::core::error::{Result, UserActionError};
use crate::core::stats::{StatName, StatScope};
use crate::core::{GameConfig, GameState, PlayerId};
use crate::hooks::{
    FirstPlayerArg, HookCtxMut, HookDispatcher, PlaceWorkerArg, StateHook, UsePowerArg, WinArg, WorkArg,
};
use crate::log::{ActionKind, LogEntry, Payload, Tag};
use crate::powers::{Handled, PowerId, Transition};

use super::phase::{GameResult, TurnPhase};

/// Drives one game from worker placement to its result.
///
/// ## Example
///
/// ```
/// use santorini_engine::core::{GameConfig, PlayerId, PowerOption};
/// use santorini_engine::board::Space;
/// use santorini_engine::turn::{TurnMachine, TurnPhase};
///
/// let config = GameConfig::new(2).with_powers(PowerOption::None);
/// let mut machine = TurnMachine::with_powers(config, &[], PlayerId(0)).unwrap();
///
/// for (x, y) in [(0, 0), (4, 4), (0, 4), (4, 0)] {
///     let worker = machine.arg_place_worker().unwrap().worker.unwrap();
///     machine.place_worker(worker, Space::new(x, y, 0)).unwrap();
/// }
/// assert_eq!(machine.phase(), TurnPhase::Move);
/// assert!(!machine.can_cancel().unwrap());
/// assert_eq!(machine.active(), PlayerId(0));
/// ```
#[derive(Debug)]
pub struct TurnMachine {
    state: GameState,
    dispatcher: HookDispatcher,
    phase: TurnPhase,
    work_arg: Option<WorkArg>,
    power_arg: Option<UsePowerArg>,
    /// Whether the active player's turn boundary is already logged.
    turn_opened: bool,
    result: Option<GameResult>,
}

impl TurnMachine {
    /// Take over a prepared state and begin worker placement.
    pub fn new(state: GameState) -> Result<Self> {
        let mut machine = Self {
            state,
            dispatcher: HookDispatcher::new(),
            phase: TurnPhase::PlaceWorker,
            work_arg: None,
            power_arg: None,
            turn_opened: false,
            result: None,
        };
        machine.next_placement()?;
        Ok(machine)
    }

    /// Fresh table with the given powers granted.
    pub fn with_powers(config: GameConfig, powers: &[(PlayerId, PowerId)], first: PlayerId) -> Result<Self> {
        let mut state = GameState::new(config, first)?;
        for &(player, power) in powers {
            state.holdings.grant(player, power)?;
        }
        Self::new(state)
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the machine, returning the game state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.state.order.active()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// First-player candidates among `offer`.
    pub fn arg_choose_first_player(&self, offer: &[PowerId]) -> Result<FirstPlayerArg> {
        self.dispatcher.arg_choose_first_player(offer)
    }

    /// Next piece to place and where it may go.
    pub fn arg_place_worker(&self) -> Result<PlaceWorkerArg> {
        self.expect_phase("argPlaceWorker", |p| p == TurnPhase::PlaceWorker)?;
        let active = self.active();
        let piece = self.next_piece_to_place(active);
        let mut arg = PlaceWorkerArg::new(piece, self.state.board.accessible_spaces());
        if self.is_ram(piece) {
            return Ok(arg);
        }
        self.dispatcher.apply_hooks(
            &self.state,
            &mut arg,
            |cap, ctx, arg| cap.arg_player_place_worker(ctx, arg),
            |cap, ctx, arg| cap.arg_opponent_place_worker(ctx, arg),
        )?;
        Ok(arg)
    }

    pub fn arg_player_move(&self) -> Result<&WorkArg> {
        self.expect_phase("argPlayerMove", |p| {
            matches!(p, TurnPhase::Move | TurnPhase::MoveAgain)
        })?;
        self.pending_work()
    }

    pub fn arg_player_build(&self) -> Result<&WorkArg> {
        self.expect_phase("argPlayerBuild", |p| {
            matches!(p, TurnPhase::Build | TurnPhase::BuildAgain)
        })?;
        self.pending_work()
    }

    pub fn arg_use_power(&self) -> Result<&UsePowerArg> {
        self.expect_phase("argUsePower", |p| p == TurnPhase::UsePowerOffer)?;
        self.power_arg.as_ref().ok_or_else(|| self.wrong_phase("argUsePower"))
    }

    /// Whether the active player may cancel their turn now.
    pub fn can_cancel(&self) -> Result<bool> {
        Ok(self.phase.allows_cancel() && self.dispatcher.can_cancel(&self.state, self.active())?)
    }

    // === Commands ===

    /// Put the next piece of the active player on the board.
    pub fn place_worker(&mut self, piece: PieceId, space: Space) -> Result<()> {
        self.ensure_running()?;
        let arg = self.arg_place_worker()?;
        if arg.worker != Some(piece) {
            return Err(UserActionError::WrongPiece(piece).into());
        }
        let target = arg
            .find(space)
            .ok_or(UserActionError::IllegalTarget { worker: piece, space })?;
        let location = if self.is_ram(Some(piece)) {
            Location::Board
        } else {
            arg.location
        };

        let active = self.active();
        let dispatcher = self.dispatcher;
        let handled = if self.is_ram(Some(piece)) {
            Handled::NotHandled
        } else {
            dispatcher.fold_handled(&mut self.state, |cap, ctx| cap.player_place_worker(ctx, piece, target))?
        };
        if handled != Handled::Handled {
            self.state.place_piece(active, piece, target, location)?;
        }
        debug!(player = %active, piece = %piece, "piece placed");
        self.next_placement()
    }

    /// Perform a move or build offered by the current snapshot.
    pub fn work(&mut self, worker: PieceId, space: Space, arg: Option<u8>) -> Result<()> {
        self.ensure_running()?;
        self.expect_phase("work", TurnPhase::is_work)?;
        let pending = self.pending_work()?;
        let kind = pending.kind;
        let work = pending
            .find(worker, space, arg)
            .ok_or(UserActionError::IllegalTarget { worker, space })?;

        let active = self.active();
        let piece = self.state.board.piece(worker)?.clone();
        let dispatcher = self.dispatcher;
        info!(player = %active, worker = %worker, to = %work.space, kind = kind.name(), "work");

        match kind {
            WorkKind::Move => {
                let handled =
                    dispatcher.fold_handled(&mut self.state, |cap, ctx| cap.player_move(ctx, &piece, &work))?;
                let location = match handled {
                    Handled::NotHandled => Some(Location::Board),
                    Handled::Concealed => Some(Location::Secret),
                    Handled::Handled => None,
                };
                if let Some(location) = location {
                    self.state.move_worker(active, worker, work.space, location)?;
                }
                dispatcher.apply_mut(
                    &mut self.state,
                    |cap, ctx| cap.after_player_move(ctx, &piece, &work),
                    |cap, ctx| cap.after_opponent_move(ctx, &piece, &work),
                )?;
            }
            WorkKind::Build => {
                let handled =
                    dispatcher.fold_handled(&mut self.state, |cap, ctx| cap.player_build(ctx, &piece, &work))?;
                if handled != Handled::Handled {
                    let level = work.arg.unwrap_or(work.space.z);
                    self.state.build(active, worker, work.space, level)?;
                }
                dispatcher.apply_mut(
                    &mut self.state,
                    |cap, ctx| cap.after_player_build(ctx, &piece, &work),
                    |cap, ctx| cap.after_opponent_build(ctx, &piece, &work),
                )?;
            }
        }

        let (hook, default, trigger) = match kind {
            WorkKind::Move => (
                StateHook::AfterMove,
                Transition::Build,
                self.state.log.last_move(active).cloned(),
            ),
            WorkKind::Build => (
                StateHook::AfterBuild,
                Transition::EndTurn,
                self.state.log.last_build(active).cloned(),
            ),
        };
        let next = dispatcher.resolve_next_state(&self.state, hook)?.unwrap_or(default);
        if self.check_win(trigger, false)? {
            return Ok(());
        }
        self.follow(next)
    }

    /// Skip an optional work.
    pub fn skip_work(&mut self) -> Result<()> {
        self.ensure_running()?;
        self.expect_phase("skipWork", TurnPhase::is_work)?;
        if !self.work_arg.as_ref().is_some_and(|a| a.skippable) {
            return Err(UserActionError::NotSkippable.into());
        }

        let active = self.active();
        self.state
            .log
            .record_tag(active, Tag::SkippedWork, Payload::new(), Vec::new())?;
        debug!(player = %active, phase = %self.phase, "work skipped");
        let default = match self.phase {
            TurnPhase::Move | TurnPhase::MoveAgain => Transition::Build,
            _ => Transition::EndTurn,
        };
        let next = self
            .dispatcher
            .resolve_next_state(&self.state, StateHook::AfterSkip)?
            .unwrap_or(default);
        self.follow(next)
    }

    /// Use the offered power on one of its targets.
    pub fn use_power(&mut self, worker: PieceId, space: Space) -> Result<()> {
        self.ensure_running()?;
        self.expect_phase("usePower", |p| p == TurnPhase::UsePowerOffer)?;
        let pending = self.power_arg.as_ref().ok_or_else(|| self.wrong_phase("usePower"))?;
        let power = pending.power.ok_or_else(|| self.wrong_phase("usePower"))?;
        let work = pending
            .find(worker, space)
            .ok_or(UserActionError::IllegalTarget { worker, space })?;

        let active = self.active();
        let bound = self
            .state
            .holdings
            .powers_of(active)
            .iter()
            .find(|b| b.id == power)
            .copied()
            .ok_or(UserActionError::PowerNotOffered(power))?;
        let me = HookDispatcher::owner_of(&bound)?;

        // A failed power leaves the offer open.
        bound
            .instantiate()
            .use_power(&mut HookCtxMut::new(me, power, &mut self.state), worker, &work)?;
        self.state.log.record_tag(
            active,
            Tag::UsedPower,
            Payload::new().with_power(power).with_to(work.space),
            Vec::new(),
        )?;
        self.enter(TurnPhase::UsePowerResolve);
        info!(player = %active, power = %power, "power used");

        let next = self
            .dispatcher
            .resolve_next_state(&self.state, StateHook::AfterUsePower)?
            .unwrap_or(Transition::EndTurn);
        if self.check_win(None, false)? {
            return Ok(());
        }
        self.follow(next)
    }

    /// Decline an optional power.
    pub fn skip_power(&mut self) -> Result<()> {
        self.ensure_running()?;
        self.expect_phase("skipPower", |p| p == TurnPhase::UsePowerOffer)?;
        let Some(pending) = self.power_arg.as_ref().filter(|a| a.skippable) else {
            return Err(UserActionError::NotSkippable.into());
        };

        let active = self.active();
        let mut payload = Payload::new();
        if let Some(power) = pending.power {
            payload = payload.with_power(power);
        }
        self.state
            .log
            .record_tag(active, Tag::SkippedPower, payload, Vec::new())?;
        let next = self
            .dispatcher
            .resolve_next_state(&self.state, StateHook::AfterSkipPower)?
            .unwrap_or(Transition::EndTurn);
        self.follow(next)
    }

    /// Undo everything the active player did this turn and restart it.
    pub fn cancel_previous_works(&mut self) -> Result<()> {
        self.ensure_running()?;
        self.expect_phase("cancel", TurnPhase::allows_cancel)?;
        let active = self.active();
        if !self.dispatcher.can_cancel(&self.state, active)? {
            return Err(UserActionError::NothingToCancel.into());
        }
        self.state.cancel_turn(active, None)?;
        self.start_of_turn()
    }

    /// Confirm the end of the turn.
    pub fn confirm_turn(&mut self) -> Result<()> {
        self.ensure_running()?;
        self.expect_phase("confirmTurn", |p| p == TurnPhase::PreEndOfTurn)?;

        self.enter(TurnPhase::WinCheck);
        if self.check_win(None, true)? {
            return Ok(());
        }

        self.enter(TurnPhase::EndOfTurn);
        let dispatcher = self.dispatcher;
        dispatcher.apply_mut(
            &mut self.state,
            |cap, ctx| cap.end_player_turn(ctx),
            |cap, ctx| cap.end_opponent_turn(ctx),
        )?;

        match dispatcher.resolve_with_source(&self.state, StateHook::EndOfTurn)? {
            Some((power, Transition::AdditionalTurn)) => {
                let active = self.active();
                self.state.log.additional_turn(active, power)?;
                self.turn_opened = true;
                self.start_of_turn()
            }
            _ => self.next_player(),
        }
    }

    /// The active player concedes.
    pub fn resign(&mut self) -> Result<()> {
        self.ensure_running()?;
        let active = self.active();
        info!(player = %active, "resigned");
        self.lose(active)
    }

    // === Spine ===

    fn enter(&mut self, phase: TurnPhase) {
        debug!(player = %self.active(), phase = %phase, "phase");
        self.phase = phase;
    }

    fn next_piece_to_place(&self, seat: PlayerId) -> Option<PieceId> {
        let board = &self.state.board;
        if seat == self.state.order.first_player() {
            if let Some(ram) = board.ram().filter(|r| r.location == Location::Hand) {
                return Some(ram.id);
            }
        }
        board.available_workers(seat).first().copied()
    }

    fn is_ram(&self, piece: Option<PieceId>) -> bool {
        piece.is_some_and(|id| self.state.board.ram().is_some_and(|r| r.id == id))
    }

    /// Hand placement to the next seat with pieces left, or start play.
    fn next_placement(&mut self) -> Result<()> {
        let n = self.state.player_count();
        let mut seat = self.active();
        for _ in 0..n {
            if self.next_piece_to_place(seat).is_some() {
                self.state.order.set_active(seat);
                self.enter(TurnPhase::PlaceWorker);
                return Ok(());
            }
            seat = seat.next_seat(n);
        }
        let first = self.state.order.first_player();
        self.state.order.set_active(first);
        info!(first = %first, "placement complete");
        self.start_of_turn()
    }

    fn start_of_turn(&mut self) -> Result<()> {
        self.enter(TurnPhase::StartOfTurn);
        self.work_arg = None;
        self.power_arg = None;
        let active = self.active();
        if !self.turn_opened {
            self.state.log.start_turn(active)?;
            self.turn_opened = true;
        }
        self.state.check_golden_fleece(active)?;

        let dispatcher = self.dispatcher;
        dispatcher.apply_mut(
            &mut self.state,
            |cap, ctx| cap.start_player_turn(ctx),
            |cap, ctx| cap.start_opponent_turn(ctx),
        )?;
        let next = dispatcher
            .resolve_next_state(&self.state, StateHook::StartOfTurn)?
            .unwrap_or(Transition::Move);
        self.follow(next)
    }

    fn follow(&mut self, next: Transition) -> Result<()> {
        match next {
            Transition::Move => self.enter_work(TurnPhase::Move),
            Transition::MoveAgain => self.enter_work(TurnPhase::MoveAgain),
            Transition::Build => self.enter_work(TurnPhase::Build),
            Transition::BuildAgain => self.enter_work(TurnPhase::BuildAgain),
            Transition::UsePower => self.enter_use_power(),
            Transition::EndTurn | Transition::AdditionalTurn => {
                self.pre_end_of_turn();
                Ok(())
            }
        }
    }

    fn enter_work(&mut self, phase: TurnPhase) -> Result<()> {
        self.enter(phase);
        self.power_arg = None;
        let kind = match phase {
            TurnPhase::Move | TurnPhase::MoveAgain => WorkKind::Move,
            _ => WorkKind::Build,
        };
        let arg = self.compute_work_arg(kind)?;
        let active = self.active();

        if !arg.is_empty() {
            self.work_arg = Some(arg);
            return Ok(());
        }
        if arg.skippable {
            debug!(player = %active, phase = %phase, "nothing to do, skipping");
            self.work_arg = Some(arg);
            return self.skip_work();
        }
        if arg.cancelable {
            info!(player = %active, phase = %phase, "no legal work, waiting for cancel");
            self.work_arg = Some(arg);
            return Ok(());
        }
        info!(player = %active, phase = %phase, "no legal work");
        self.work_arg = None;
        self.lose(active)
    }

    /// Standard options, then self and opponent hooks.
    fn compute_work_arg(&self, kind: WorkKind) -> Result<WorkArg> {
        let active = self.active();
        let owner = self.state.order.worker_owner(active);
        let mut workers = self.state.board.placed_workers(owner, false);
        if kind == WorkKind::Build {
            if let Some(moved) = self.state.log.last_move(active).and_then(|m| m.subject) {
                workers.retain(|w| w.id == moved);
            }
        }

        let mut arg = WorkArg::for_workers(&self.state.board, &workers, kind);
        self.dispatcher.apply_work_hooks(&self.state, &mut arg)?;
        arg.clean();
        arg.cancelable = self.dispatcher.can_cancel(&self.state, active)?;
        Ok(arg)
    }

    fn enter_use_power(&mut self) -> Result<()> {
        self.enter(TurnPhase::UsePowerOffer);
        self.work_arg = None;
        let active = self.active();
        let mut arg = UsePowerArg::default();
        self.dispatcher
            .apply_player_hooks(&self.state, &mut arg, |cap, ctx, arg| cap.arg_use_power(ctx, arg))?;
        arg.cancelable = self.dispatcher.can_cancel(&self.state, active)?;

        if !arg.is_empty() {
            self.power_arg = Some(arg);
            return Ok(());
        }
        if arg.skippable {
            self.power_arg = Some(arg);
            return self.skip_power();
        }
        if arg.cancelable {
            info!(player = %active, "no power target, waiting for cancel");
            self.power_arg = Some(arg);
            return Ok(());
        }
        self.power_arg = None;
        self.lose(active)
    }

    /// Record which power each player holds. Safe to run more than once.
    fn pre_end_of_turn(&mut self) {
        self.enter(TurnPhase::PreEndOfTurn);
        self.work_arg = None;
        self.power_arg = None;
        for player in PlayerId::all(self.state.player_count()) {
            if let Some(power) = self.state.holdings.powers_of(player).first() {
                self.state.log.set_stat(
                    StatScope::Player(player),
                    StatName::PlayerPower,
                    i32::from(power.id.raw()),
                );
            }
        }
    }

    fn next_player(&mut self) -> Result<()> {
        self.enter(TurnPhase::NextPlayer);
        self.turn_opened = false;
        let next = self.state.order.advance();
        info!(player = %next, round = self.state.order.round(), "next player");
        self.start_of_turn()
    }

    // === Winning and losing ===

    /// Run the win check. Returns whether the active player's turn is over.
    fn check_win(&mut self, work: Option<LogEntry>, end_of_turn: bool) -> Result<bool> {
        let active = self.active();
        let mut arg = WinArg::new(active, work, end_of_turn);
        if let Some(entry) = &arg.work {
            let climbed = entry.kind == ActionKind::Move
                && entry.actor == active
                && matches!(
                    (entry.payload.from, entry.payload.to),
                    (Some(from), Some(to)) if from.z < to.z && to.z == DOME_LEVEL
                );
            arg.win = climbed;
        }
        self.dispatcher.check_winning(&self.state, &mut arg)?;
        self.state.log.add_unlogged_stats(&arg.win_stats);

        if arg.win {
            self.win(arg.player);
            return Ok(true);
        }
        for loser in arg.losers {
            self.lose(loser)?;
            if self.is_over() {
                return Ok(true);
            }
        }
        Ok(self.state.order.is_eliminated(active))
    }

    fn win(&mut self, player: PlayerId) {
        let result = if self.state.player_count() == 4 {
            GameResult::Winners(self.state.order.teammates(player))
        } else {
            GameResult::Winner(player)
        };
        self.finish(result);
    }

    fn lose(&mut self, player: PlayerId) -> Result<()> {
        info!(player = %player, "player loses");
        let active = self.active();
        if self.state.player_count() != 3 {
            let order = &self.state.order;
            let team = order.team_of(player);
            let winners: Vec<_> = PlayerId::all(order.player_count())
                .filter(|p| order.team_of(*p) != team)
                .collect();
            let result = match winners.as_slice() {
                [single] => GameResult::Winner(*single),
                _ => GameResult::Winners(winners),
            };
            self.finish(result);
            return Ok(());
        }

        for worker in self.state.board.placed_workers(player, true) {
            self.state.kill_worker(active, worker.id, Vec::new())?;
        }
        self.state.order.eliminate(player);
        self.enter(TurnPhase::PlayerEliminated);
        info!(player = %player, "player eliminated");

        if let [survivor] = self.state.order.remaining().as_slice() {
            self.finish(GameResult::Winner(*survivor));
            return Ok(());
        }
        if player == active {
            self.pre_end_of_turn();
            return self.next_player();
        }
        Ok(())
    }

    fn finish(&mut self, result: GameResult) {
        info!(result = ?result, "game over");
        self.state.log.game_end_stats(&self.state.board);
        self.work_arg = None;
        self.power_arg = None;
        self.result = Some(result);
        self.enter(TurnPhase::GameEnd);
    }

    // === Validation ===

    fn ensure_running(&self) -> Result<()> {
        if self.is_over() {
            return Err(UserActionError::GameOver.into());
        }
        Ok(())
    }

    fn wrong_phase(&self, action: &'static str) -> crate::core::EngineError {
        UserActionError::WrongPhase {
            action,
            phase: self.phase.name(),
        }
        .into()
    }

    fn expect_phase(&self, action: &'static str, allowed: impl Fn(TurnPhase) -> bool) -> Result<()> {
        if allowed(self.phase) {
            Ok(())
        } else {
            Err(self.wrong_phase(action))
        }
    }

    fn pending_work(&self) -> Result<&WorkArg> {
        self.work_arg.as_ref().ok_or_else(|| self.wrong_phase("work"))
    }
}
