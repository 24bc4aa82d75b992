//! The append-only action log with exact rollback.
//!
//! Every board or holding mutation of a turn is recorded here together
//! with the statistic deltas it caused. The log is partitioned by turn
//! boundaries (`TurnStart` / `AdditionalTurn` entries); cancelling walks
//! the current turn newest-first and applies each entry's inverse.
//!
//! ## Invariants
//!
//! - Sequence ids are strictly increasing.
//! - Replaying the inverses of a contiguous newest-first range restores
//!   the board, the holdings and the logged statistics to their state
//!   before the range.
//! - Cancellation never removes a boundary entry.

use std::ops::Range;

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::board::{Board, Location, PieceId, DOME_LEVEL};
use crate::core::error::{InvariantViolation, Result, UserActionError};
use crate::core::stats::{StatDelta, StatName, StatScope, Stats};
use crate::core::PlayerId;
use crate::powers::{PowerHoldings, PowerId};

use super::entry::{ActionKind, LogEntry, Payload, SequenceId, Tag};
use super::store::LogStore;

/// Ordered record of every mutation plus game statistics.
///
/// ## Example
///
/// ```
/// use santorini_engine::board::{Board, Gender, Location, Space};
/// use santorini_engine::core::stats::StatName;
/// use santorini_engine::core::PlayerId;
/// use santorini_engine::log::{ActionKind, ActionLog, Payload};
/// use santorini_engine::powers::PowerHoldings;
///
/// let me = PlayerId(0);
/// let mut board = Board::new();
/// let worker = board.add_worker(me, Gender::Male, Location::Hand);
/// board.set_piece_at(worker, Space::new(0, 0, 0), Some(Location::Board)).unwrap();
///
/// let mut log = ActionLog::new();
/// log.start_turn(me).unwrap();
/// assert!(!log.can_cancel(me));
///
/// board.set_piece_at(worker, Space::new(1, 0, 0), None).unwrap();
/// let payload = Payload::new()
///     .with_from(Space::new(0, 0, 0))
///     .with_to(Space::new(1, 0, 0))
///     .with_location(Location::Board);
/// log.record(me, Some(worker), ActionKind::Move, payload, Vec::new()).unwrap();
/// assert_eq!(log.stats().player(me, StatName::Move), 1);
///
/// let mut holdings = PowerHoldings::new(2);
/// log.cancel(me, &mut board, &mut holdings, None).unwrap();
/// assert_eq!(board.piece(worker).unwrap().space, Some(Space::new(0, 0, 0)));
/// assert_eq!(log.stats().player(me, StatName::Move), 0);
/// ```
#[derive(Debug)]
pub struct ActionLog {
    entries: Vector<LogEntry>,
    /// Positions of each player's entries per kind, oldest first.
    index: FxHashMap<(PlayerId, ActionKind), Vec<usize>>,
    stats: Stats,
    next_seq: u64,
    store: Option<Box<dyn LogStore>>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    /// Create an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vector::new(),
            index: FxHashMap::default(),
            stats: Stats::new(),
            next_seq: 1,
            store: None,
        }
    }

    /// Create an empty log persisting every entry to `store`.
    #[must_use]
    pub fn with_store(store: Box<dyn LogStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    /// Rebuild a log from its persisted records.
    ///
    /// Logged statistics are recomputed from the entries; counters that
    /// bypass the log (win stats, restarts) start from zero.
    pub fn restore(store: Box<dyn LogStore>) -> Result<Self> {
        let records = store.load()?;
        let mut log = Self::new();
        for entry in records {
            log.next_seq = entry.seq.raw() + 1;
            log.push(entry);
        }
        log.store = Some(store);
        Ok(log)
    }

    // === Recording ===

    /// Append an entry and apply its statistic deltas.
    ///
    /// Moves and builds derive their own deltas; `extra` is appended after
    /// them.
    pub fn record(
        &mut self,
        actor: PlayerId,
        subject: Option<PieceId>,
        kind: ActionKind,
        payload: Payload,
        extra: Vec<StatDelta>,
    ) -> Result<SequenceId> {
        let mut stat_deltas = derived_stats(actor, kind, &payload);
        stat_deltas.extend(extra);

        let seq = SequenceId::new(self.next_seq);
        let boundary = if kind.is_boundary() {
            Some(seq)
        } else {
            self.last_boundary()
        };
        let entry = LogEntry {
            seq,
            boundary,
            actor,
            subject,
            kind,
            payload,
            stat_deltas,
        };

        if let Some(store) = self.store.as_mut() {
            store.append(&entry)?;
        }
        debug!(seq = seq.raw(), player = %actor, kind = ?kind, "log append");
        self.next_seq += 1;
        self.push(entry);
        Ok(seq)
    }

    /// Open a turn for `player`.
    pub fn start_turn(&mut self, player: PlayerId) -> Result<SequenceId> {
        info!(player = %player, "turn start");
        self.record(player, None, ActionKind::TurnStart, Payload::new(), Vec::new())
    }

    /// Open an additional turn granted by `power`.
    pub fn additional_turn(&mut self, player: PlayerId, power: PowerId) -> Result<SequenceId> {
        info!(player = %player, power = %power, "additional turn");
        self.record(
            player,
            None,
            ActionKind::AdditionalTurn,
            Payload::new().with_power(power),
            vec![StatDelta::player(player, StatName::UsePower)],
        )
    }

    /// Record a tagged generic entry.
    pub fn record_tag(
        &mut self,
        actor: PlayerId,
        tag: Tag,
        payload: Payload,
        stats: Vec<StatDelta>,
    ) -> Result<SequenceId> {
        self.record(actor, None, ActionKind::Generic, payload.with_tag(tag), stats)
    }

    /// Apply deltas outside the log. They survive any cancel.
    pub fn add_unlogged_stats(&mut self, deltas: &[StatDelta]) {
        self.stats.apply_all(deltas);
    }

    pub fn set_stat(&mut self, scope: StatScope, name: StatName, value: i32) {
        self.stats.set(scope, name, value);
    }

    /// Final statistics computed from the board.
    pub fn game_end_stats(&mut self, board: &Board) {
        let towers = board.complete_tower_count() as i32;
        self.stats.set(StatScope::Table, StatName::BuildTower, towers);
    }

    fn push(&mut self, entry: LogEntry) {
        self.stats.apply_all(&entry.stat_deltas);
        self.index
            .entry((entry.actor, entry.kind))
            .or_default()
            .push(self.entries.len());
        self.entries.push_back(entry);
    }

    // === Turn range ===

    fn last_boundary(&self) -> Option<SequenceId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.kind.is_boundary())
            .map(|e| e.seq)
    }

    fn boundary_position(&self, player: PlayerId) -> Option<usize> {
        let starts = self.index.get(&(player, ActionKind::TurnStart));
        let extra = self.index.get(&(player, ActionKind::AdditionalTurn));
        let last = |v: Option<&Vec<usize>>| v.and_then(|v| v.last().copied());
        match (last(starts), last(extra)) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    /// Positions of the player's most recent turn, up to the next boundary.
    fn turn_range(&self, player: PlayerId) -> Option<Range<usize>> {
        let start = self.boundary_position(player)? + 1;
        let end = (start..self.entries.len())
            .find(|&i| self.entries[i].kind.is_boundary())
            .unwrap_or(self.entries.len());
        Some(start..end)
    }

    /// Sequence id of the player's most recent turn boundary.
    #[must_use]
    pub fn boundary_of(&self, player: PlayerId) -> Option<SequenceId> {
        self.boundary_position(player).map(|i| self.entries[i].seq)
    }

    /// Entries of the player's most recent turn, newest first.
    #[must_use]
    pub fn turn_entries(&self, player: PlayerId) -> Vec<&LogEntry> {
        match self.turn_range(player) {
            Some(range) => range
                .rev()
                .map(|i| &self.entries[i])
                .filter(|e| e.actor == player)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether the player's current turn holds anything worth cancelling.
    ///
    /// Capability vetoes are checked by the hook dispatcher, not here.
    #[must_use]
    pub fn can_cancel(&self, player: PlayerId) -> bool {
        self.turn_entries(player).iter().any(|e| e.is_cancelable())
    }

    // === Cancellation ===

    /// Undo the player's current turn, newest first.
    ///
    /// Without `stop_at`, every entry after the turn boundary is undone and
    /// the player's `turnRestarted` counter is bumped. With `stop_at`, the
    /// unwind stops after undoing that entry, which must lie inside the
    /// current turn.
    ///
    /// The whole range is applied to copies of the board and holdings and
    /// committed only if every inverse succeeds. Returns the removed
    /// entries, newest first.
    pub fn cancel(
        &mut self,
        player: PlayerId,
        board: &mut Board,
        holdings: &mut PowerHoldings,
        stop_at: Option<SequenceId>,
    ) -> Result<Vec<LogEntry>> {
        let Some(range) = self.turn_range(player) else {
            return match stop_at {
                Some(stop_at) => Err(InvariantViolation::CancelPastBoundary { player, stop_at }.into()),
                None => Err(UserActionError::NothingToCancel.into()),
            };
        };
        if range.end != self.entries.len() {
            return Err(InvariantViolation::NoActiveTurn(player).into());
        }

        let target = match stop_at {
            Some(stop_at) => range
                .clone()
                .find(|&i| self.entries[i].seq == stop_at)
                .ok_or(InvariantViolation::CancelPastBoundary { player, stop_at })?,
            None => {
                if !self.can_cancel(player) {
                    return Err(UserActionError::NothingToCancel.into());
                }
                range.start
            }
        };

        let mut next_board = board.clone();
        let mut next_holdings = holdings.clone();
        let mut removed = Vec::with_capacity(self.entries.len() - target);
        for i in (target..self.entries.len()).rev() {
            let entry = &self.entries[i];
            invert(entry, &mut next_board, &mut next_holdings)?;
            removed.push(entry.clone());
        }

        let oldest = self.entries[target].seq;
        if let Some(store) = self.store.as_mut() {
            store.truncate_from(oldest)?;
        }

        *board = next_board;
        *holdings = next_holdings;
        for entry in &removed {
            self.stats.revert_all(&entry.stat_deltas);
            if let Some(positions) = self.index.get_mut(&(entry.actor, entry.kind)) {
                positions.pop();
            }
        }
        self.entries.truncate(target);
        self.next_seq = oldest.raw();

        if stop_at.is_none() {
            self.stats
                .apply(&StatDelta::player(player, StatName::TurnRestarted));
        }
        info!(
            player = %player,
            removed = removed.len(),
            partial = stop_at.is_some(),
            "turn cancelled"
        );
        Ok(removed)
    }

    // === Queries ===

    #[must_use]
    pub fn entries(&self) -> &Vector<LogEntry> {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[must_use]
    pub fn entry(&self, seq: SequenceId) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.seq == seq)
    }

    /// Every entry of one player and kind, oldest first.
    pub fn entries_of(&self, player: PlayerId, kind: ActionKind) -> impl Iterator<Item = &LogEntry> {
        self.index
            .get(&(player, kind))
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }

    /// Works of the player's most recent turn, newest first.
    #[must_use]
    pub fn last_works(
        &self,
        player: PlayerId,
        kinds: &[ActionKind],
        limit: Option<usize>,
    ) -> Vec<&LogEntry> {
        self.turn_entries(player)
            .into_iter()
            .filter(|e| kinds.contains(&e.kind))
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    #[must_use]
    pub fn last_moves(&self, player: PlayerId) -> Vec<&LogEntry> {
        self.last_works(player, &[ActionKind::Move], None)
    }

    #[must_use]
    pub fn last_move(&self, player: PlayerId) -> Option<&LogEntry> {
        self.last_works(player, &[ActionKind::Move], Some(1)).pop()
    }

    #[must_use]
    pub fn last_builds(&self, player: PlayerId) -> Vec<&LogEntry> {
        self.last_works(player, &[ActionKind::Build], None)
    }

    #[must_use]
    pub fn last_build(&self, player: PlayerId) -> Option<&LogEntry> {
        self.last_works(player, &[ActionKind::Build], Some(1)).pop()
    }

    /// Most recent move or build of the turn.
    #[must_use]
    pub fn last_work(&self, player: PlayerId) -> Option<&LogEntry> {
        self.last_works(player, &[ActionKind::Move, ActionKind::Build], Some(1))
            .pop()
    }

    /// Most recent move of one worker since the last boundary.
    #[must_use]
    pub fn last_move_of_worker(&self, player: PlayerId, worker: PieceId) -> Option<&LogEntry> {
        self.last_moves(player)
            .into_iter()
            .find(|e| e.subject == Some(worker))
    }

    #[must_use]
    pub fn last_tagged(&self, player: PlayerId, tag: Tag) -> Option<&LogEntry> {
        self.turn_entries(player)
            .into_iter()
            .find(|e| e.tag() == Some(tag))
    }

    /// Whether the player's current turn was opened by an additional-turn grant.
    #[must_use]
    pub fn is_additional_turn(&self, player: PlayerId) -> bool {
        self.entries
            .iter()
            .rev()
            .find(|e| e.kind.is_boundary())
            .is_some_and(|e| e.actor == player && e.kind == ActionKind::AdditionalTurn)
    }
}

fn derived_stats(actor: PlayerId, kind: ActionKind, payload: &Payload) -> Vec<StatDelta> {
    match kind {
        ActionKind::Move => {
            let mut deltas = vec![
                StatDelta::table(StatName::Move),
                StatDelta::player(actor, StatName::Move),
            ];
            if let (Some(from), Some(to)) = (payload.from, payload.to) {
                if to.z > from.z {
                    deltas.push(StatDelta::player(actor, StatName::MoveUp));
                } else if to.z < from.z {
                    deltas.push(StatDelta::player(actor, StatName::MoveDown));
                }
            }
            deltas
        }
        ActionKind::Build => {
            let name = if payload.arg == Some(DOME_LEVEL) {
                StatName::BuildDome
            } else {
                StatName::BuildBlock
            };
            vec![StatDelta::table(name), StatDelta::player(actor, name)]
        }
        _ => Vec::new(),
    }
}

/// Apply the inverse of one entry.
fn invert(entry: &LogEntry, board: &mut Board, holdings: &mut PowerHoldings) -> Result<()> {
    let payload = &entry.payload;
    match entry.kind {
        ActionKind::Move | ActionKind::Force | ActionKind::MoveToken | ActionKind::Removal => {
            if let Some(id) = entry.subject {
                let location = payload.location.unwrap_or(Location::Board);
                board.relocate(id, location, payload.from)?;
            }
        }
        ActionKind::Build => {
            if let Some(created) = payload.created {
                board.delete_piece(created)?;
            }
        }
        ActionKind::PlaceWorker | ActionKind::PlaceToken => {
            if let Some(created) = payload.created {
                board.delete_piece(created)?;
            } else if let Some(id) = entry.subject {
                let location = payload.location.unwrap_or(Location::Hand);
                board.relocate(id, location, payload.from)?;
            }
        }
        ActionKind::Generic => {
            let player = payload.beneficiary.unwrap_or(entry.actor);
            match (payload.tag, payload.power) {
                (Some(Tag::PowerGranted), Some(power)) => {
                    holdings.revoke(player, power);
                }
                (Some(Tag::PowerRevoked), Some(power)) => {
                    holdings.grant(player, power)?;
                }
                _ => {}
            }
        }
        ActionKind::TurnStart | ActionKind::AdditionalTurn => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Gender, Space};
    use crate::log::MemoryLogStore;

    const ME: PlayerId = PlayerId(0);

    fn setup() -> (Board, PieceId, PowerHoldings) {
        let mut board = Board::new();
        let worker = board.add_worker(ME, Gender::Male, Location::Hand);
        board
            .set_piece_at(worker, Space::new(0, 0, 0), Some(Location::Board))
            .unwrap();
        (board, worker, PowerHoldings::new(2))
    }

    fn move_to(log: &mut ActionLog, board: &mut Board, worker: PieceId, to: Space) -> SequenceId {
        let before = board.set_piece_at(worker, to, None).unwrap();
        let payload = Payload::new()
            .with_from(before.space.unwrap())
            .with_to(to)
            .with_location(before.location);
        log.record(ME, Some(worker), ActionKind::Move, payload, Vec::new())
            .unwrap()
    }

    fn build(log: &mut ActionLog, board: &mut Board, worker: PieceId, at: Space, arg: u8) -> PieceId {
        let created = board.build_at(at, arg);
        let payload = Payload::new().with_to(at).with_arg(arg).with_created(created);
        log.record(ME, Some(worker), ActionKind::Build, payload, Vec::new())
            .unwrap();
        created
    }

    #[test]
    fn test_sequence_ids_increase() {
        let mut log = ActionLog::new();
        let a = log.start_turn(ME).unwrap();
        let b = log
            .record_tag(ME, Tag::SkippedWork, Payload::new(), Vec::new())
            .unwrap();
        assert!(b > a);
        assert_eq!(log.entry(b).unwrap().boundary, Some(a));
    }

    #[test]
    fn test_can_cancel_after_boundary() {
        let (mut board, worker, _) = setup();
        let mut log = ActionLog::new();
        assert!(!log.can_cancel(ME));

        log.start_turn(ME).unwrap();
        assert!(!log.can_cancel(ME));

        move_to(&mut log, &mut board, worker, Space::new(1, 0, 0));
        assert!(log.can_cancel(ME));
    }

    #[test]
    fn test_markers_do_not_enable_cancel() {
        let mut log = ActionLog::new();
        log.start_turn(ME).unwrap();
        log.record_tag(
            ME,
            Tag::Stats,
            Payload::new(),
            vec![StatDelta::player(ME, StatName::UsePower)],
        )
        .unwrap();
        assert!(!log.can_cancel(ME));
    }

    #[test]
    fn test_full_cancel_restores_board_and_stats() {
        let (mut board, worker, mut holdings) = setup();
        let mut log = ActionLog::new();
        log.start_turn(ME).unwrap();
        let board_before = board.clone();
        let stats_before = log.stats().clone();

        move_to(&mut log, &mut board, worker, Space::new(1, 0, 0));
        build(&mut log, &mut board, worker, Space::new(1, 1, 0), 0);
        assert_eq!(log.stats().table(StatName::BuildBlock), 1);

        let removed = log.cancel(ME, &mut board, &mut holdings, None).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].kind, ActionKind::Build);
        assert_eq!(board, board_before);
        assert_eq!(log.stats().table(StatName::Move), stats_before.table(StatName::Move));
        assert_eq!(log.stats().player(ME, StatName::TurnRestarted), 1);
        assert_eq!(log.len(), 1);
        assert!(!log.can_cancel(ME));
    }

    #[test]
    fn test_nothing_to_cancel() {
        let (mut board, _, mut holdings) = setup();
        let mut log = ActionLog::new();
        log.start_turn(ME).unwrap();

        let err = log.cancel(ME, &mut board, &mut holdings, None).unwrap_err();
        assert_eq!(err, UserActionError::NothingToCancel.into());
    }

    #[test]
    fn test_partial_cancel_stops_at_entry() {
        let (mut board, worker, mut holdings) = setup();
        let mut log = ActionLog::new();
        log.start_turn(ME).unwrap();
        move_to(&mut log, &mut board, worker, Space::new(1, 0, 0));
        let second = move_to(&mut log, &mut board, worker, Space::new(2, 0, 0));
        build(&mut log, &mut board, worker, Space::new(3, 0, 0), 0);

        let removed = log
            .cancel(ME, &mut board, &mut holdings, Some(second))
            .unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(board.piece(worker).unwrap().space, Some(Space::new(1, 0, 0)));
        assert_eq!(log.stats().player(ME, StatName::TurnRestarted), 0);
        assert!(log.can_cancel(ME));
    }

    #[test]
    fn test_stop_outside_turn_is_rejected() {
        let (mut board, worker, mut holdings) = setup();
        let mut log = ActionLog::new();
        let boundary = log.start_turn(ME).unwrap();
        move_to(&mut log, &mut board, worker, Space::new(1, 0, 0));

        let err = log
            .cancel(ME, &mut board, &mut holdings, Some(boundary))
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_failed_inverse_leaves_state_untouched() {
        let (mut board, worker, mut holdings) = setup();
        let mut log = ActionLog::new();
        log.start_turn(ME).unwrap();
        move_to(&mut log, &mut board, worker, Space::new(1, 0, 0));
        let created = build(&mut log, &mut board, worker, Space::new(1, 1, 0), 0);

        // A mutation that bypassed the log.
        board.delete_piece(created).unwrap();
        let snapshot = board.clone();

        let err = log.cancel(ME, &mut board, &mut holdings, None).unwrap_err();
        assert_eq!(err, InvariantViolation::MissingPiece(created).into());
        assert_eq!(board, snapshot);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_queries_are_scoped_to_the_turn() {
        let (mut board, worker, _) = setup();
        let mut log = ActionLog::new();
        log.start_turn(ME).unwrap();
        move_to(&mut log, &mut board, worker, Space::new(1, 0, 0));
        log.start_turn(PlayerId(1)).unwrap();
        log.start_turn(ME).unwrap();
        assert!(log.last_move(ME).is_none());

        move_to(&mut log, &mut board, worker, Space::new(2, 0, 0));
        build(&mut log, &mut board, worker, Space::new(3, 0, 0), 3);
        assert_eq!(log.last_moves(ME).len(), 1);
        assert_eq!(log.last_work(ME).unwrap().kind, ActionKind::Build);
        assert!(log.last_move_of_worker(ME, worker).is_some());
        assert_eq!(log.entries_of(ME, ActionKind::Move).count(), 2);
        assert_eq!(log.stats().player(ME, StatName::BuildDome), 1);
    }

    #[test]
    fn test_previous_turn_visible_to_opponents() {
        let (mut board, worker, _) = setup();
        let mut log = ActionLog::new();
        log.start_turn(ME).unwrap();
        move_to(&mut log, &mut board, worker, Space::new(1, 0, 0));
        log.start_turn(PlayerId(1)).unwrap();

        assert_eq!(log.last_moves(ME).len(), 1);
        assert!(!log.can_cancel(PlayerId(1)));
    }

    #[test]
    fn test_additional_turn_boundary() {
        let (mut board, worker, mut holdings) = setup();
        let mut log = ActionLog::new();
        log.start_turn(ME).unwrap();
        move_to(&mut log, &mut board, worker, Space::new(1, 0, 0));
        log.additional_turn(ME, PowerId::Tyche).unwrap();
        assert!(log.is_additional_turn(ME));
        assert!(log.last_move(ME).is_none());
        assert!(matches!(
            log.cancel(ME, &mut board, &mut holdings, None),
            Err(crate::core::error::EngineError::UserAction(_))
        ));
    }

    #[test]
    fn test_power_grant_is_reverted() {
        let (mut board, _, mut holdings) = setup();
        let mut log = ActionLog::new();
        log.start_turn(ME).unwrap();
        holdings.grant(ME, PowerId::Apollo).unwrap();
        log.record_tag(
            ME,
            Tag::PowerGranted,
            Payload::new().with_power(PowerId::Apollo).with_beneficiary(ME),
            Vec::new(),
        )
        .unwrap();
        log.record_tag(ME, Tag::SkippedWork, Payload::new(), Vec::new())
            .unwrap();

        log.cancel(ME, &mut board, &mut holdings, None).unwrap();
        assert!(!holdings.holds(ME, PowerId::Apollo));
    }

    #[test]
    fn test_store_follows_log() {
        let (mut board, worker, mut holdings) = setup();
        let mut log = ActionLog::with_store(Box::new(MemoryLogStore::new()));
        log.start_turn(ME).unwrap();
        move_to(&mut log, &mut board, worker, Space::new(1, 0, 0));
        log.cancel(ME, &mut board, &mut holdings, None).unwrap();
        move_to(&mut log, &mut board, worker, Space::new(0, 1, 0));

        let store = log.store.take().unwrap();
        let restored = ActionLog::restore(store).unwrap();
        assert_eq!(restored.entries(), log.entries());
        assert_eq!(restored.stats().player(ME, StatName::Move), 1);
    }

    #[test]
    fn test_game_end_stats() {
        let mut board = Board::new();
        for z in 0..=DOME_LEVEL {
            board.build_at(Space::new(4, 4, z), z);
        }
        let mut log = ActionLog::new();
        log.game_end_stats(&board);
        assert_eq!(log.stats().table(StatName::BuildTower), 1);
    }
}
