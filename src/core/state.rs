//! Complete game state and its logged mutations.
//!
//! ## GameState
//!
//! - Configuration and turn order
//! - The board with every piece
//! - The action log with statistics
//! - Which player holds which power
//!
//! Every board or holding mutation during a turn goes through one of the
//! helpers below so that it lands in the action log and can be undone.

use tracing::{debug, info};

use crate::board::{Board, Gender, Location, PieceId, Space};
use crate::log::{ActionKind, ActionLog, LogEntry, Payload, SequenceId, Tag};
use crate::powers::{PowerHoldings, PowerId};

use super::config::GameConfig;
use super::error::Result;
use super::player::PlayerId;
use super::stats::{StatDelta, StatName};
use super::turn_order::TurnOrder;

/// Board, log, seating and power holdings of one game.
#[derive(Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub board: Board,
    pub log: ActionLog,
    pub order: TurnOrder,
    pub holdings: PowerHoldings,
}

impl GameState {
    /// Fresh table: each worker owner gets a female and a male worker in
    /// hand, plus the Ram figure in Golden Fleece games.
    pub fn new(config: GameConfig, first: PlayerId) -> Result<Self> {
        config.validate()?;
        let n = config.player_count;
        let order = TurnOrder::new(n, first);
        let mut board = Board::new();
        for player in PlayerId::all(n).filter(|p| order.worker_owner(*p) == *p) {
            board.add_worker(player, Gender::Female, Location::Hand);
            board.add_worker(player, Gender::Male, Location::Hand);
        }
        if config.powers.is_golden_fleece() {
            board.add_ram();
        }
        Ok(Self {
            holdings: PowerHoldings::new(n),
            config,
            board,
            log: ActionLog::new(),
            order,
        })
    }

    /// Replace the action log, e.g. with one backed by a store.
    #[must_use]
    pub fn with_log(mut self, log: ActionLog) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    // === Logged mutations ===

    /// Move a worker and record it.
    pub fn move_worker(
        &mut self,
        actor: PlayerId,
        worker: PieceId,
        to: Space,
        location: Location,
    ) -> Result<SequenceId> {
        let saved = self.board.clone();
        let before = self.board.set_piece_at(worker, to, Some(location))?;
        let payload = with_origin(Payload::new().with_to(to), before.space).with_location(before.location);
        let recorded = self
            .log
            .record(actor, Some(worker), ActionKind::Move, payload, Vec::new());
        self.commit(saved, recorded)
    }

    /// Displace a piece on behalf of a power.
    pub fn force_piece(&mut self, actor: PlayerId, piece: PieceId, to: Space) -> Result<SequenceId> {
        let saved = self.board.clone();
        let before = self.board.set_piece_at(piece, to, None)?;
        let payload = with_origin(Payload::new().with_to(to), before.space).with_location(before.location);
        debug!(piece = %piece, to = %to, "piece forced");
        let recorded = self
            .log
            .record(actor, Some(piece), ActionKind::Force, payload, Vec::new());
        self.commit(saved, recorded)
    }

    /// Build level `arg` at `space` with `worker`.
    pub fn build(&mut self, actor: PlayerId, worker: PieceId, space: Space, arg: u8) -> Result<PieceId> {
        let from = self.board.piece(worker)?.space;
        let saved = self.board.clone();
        let created = self.board.build_at(space, arg);
        let payload = with_origin(Payload::new(), from)
            .with_to(space)
            .with_arg(arg)
            .with_created(created);
        let recorded = self
            .log
            .record(actor, Some(worker), ActionKind::Build, payload, Vec::new());
        self.commit(saved, recorded)?;
        Ok(created)
    }

    /// Take a worker out of the game.
    pub fn kill_worker(&mut self, actor: PlayerId, worker: PieceId, stats: Vec<StatDelta>) -> Result<SequenceId> {
        let saved = self.board.clone();
        let before = self.board.remove_piece(worker)?;
        let payload = with_origin(Payload::new(), before.space).with_location(before.location);
        let recorded = self
            .log
            .record(actor, Some(worker), ActionKind::Removal, payload, stats);
        let seq = self.commit(saved, recorded)?;
        info!(piece = %worker, "worker removed");
        Ok(seq)
    }

    /// Put a piece from its holding area onto the board.
    pub fn place_piece(
        &mut self,
        actor: PlayerId,
        piece: PieceId,
        to: Space,
        location: Location,
    ) -> Result<SequenceId> {
        let saved = self.board.clone();
        let before = self.board.set_piece_at(piece, to, Some(location))?;
        let payload = Payload::new().with_to(to).with_location(before.location);
        let recorded = self
            .log
            .record(actor, Some(piece), ActionKind::PlaceWorker, payload, Vec::new());
        self.commit(saved, recorded)
    }

    /// Create a new worker for `owner` directly on the board.
    pub fn create_worker(
        &mut self,
        actor: PlayerId,
        owner: PlayerId,
        gender: Gender,
        to: Space,
        stats: Vec<StatDelta>,
    ) -> Result<PieceId> {
        let saved = self.board.clone();
        let id = self.board.add_worker(owner, gender, Location::Board);
        self.board.set_piece_at(id, to, None)?;
        let payload = Payload::new()
            .with_to(to)
            .with_created(id)
            .with_location(Location::Board);
        let recorded = self
            .log
            .record(actor, Some(id), ActionKind::PlaceWorker, payload, stats);
        self.commit(saved, recorded)?;
        Ok(id)
    }

    /// Count one use of a power without any board effect.
    pub fn record_power_stat(&mut self, actor: PlayerId, power: PowerId) -> Result<SequenceId> {
        self.log.record_tag(
            actor,
            Tag::Stats,
            Payload::new().with_power(power),
            vec![StatDelta::player(actor, StatName::UsePower)],
        )
    }

    /// Undo the current turn of `player`, optionally only back to `stop_at`.
    pub fn cancel_turn(&mut self, player: PlayerId, stop_at: Option<SequenceId>) -> Result<Vec<LogEntry>> {
        self.log
            .cancel(player, &mut self.board, &mut self.holdings, stop_at)
    }

    // === Golden Fleece ===

    /// Grant the Ram power to players whose workers neighbor the Ram and
    /// revoke it from the others.
    pub fn check_golden_fleece(&mut self, actor: PlayerId) -> Result<()> {
        let Some(power) = self.holdings.shared() else {
            return Ok(());
        };
        let Some(ram) = self.board.ram().and_then(|r| r.placed_space()) else {
            return Ok(());
        };

        for player in self.order.remaining() {
            let owner = self.order.worker_owner(player);
            let near = self
                .board
                .placed_workers(owner, true)
                .iter()
                .filter_map(|w| w.space)
                .any(|s| Board::is_neighbor(s, ram));
            let holds = self.holdings.holds(player, power);
            let payload = Payload::new().with_power(power).with_beneficiary(player);

            if near && !holds {
                let saved = self.holdings.clone();
                self.holdings.grant(player, power)?;
                if let Err(err) = self.log.record_tag(actor, Tag::PowerGranted, payload, Vec::new()) {
                    self.holdings = saved;
                    return Err(err);
                }
                info!(player = %player, power = %power, "ram grants power");
            } else if !near && holds {
                let saved = self.holdings.clone();
                self.holdings.revoke(player, power);
                if let Err(err) = self.log.record_tag(actor, Tag::PowerRevoked, payload, Vec::new()) {
                    self.holdings = saved;
                    return Err(err);
                }
                info!(player = %player, power = %power, "ram power lost");
            }
        }
        Ok(())
    }

    /// Keep a board change only if its log entry was recorded.
    fn commit(&mut self, saved: Board, recorded: Result<SequenceId>) -> Result<SequenceId> {
        if recorded.is_err() {
            self.board = saved;
        }
        recorded
    }
}

fn with_origin(payload: Payload, from: Option<Space>) -> Payload {
    match from {
        Some(from) => payload.with_from(from),
        None => payload,
    }
}
