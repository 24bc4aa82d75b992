//! Action log tests: exact rollback through the game state helpers.

use proptest::prelude::*;

use santorini_engine::board::{Location, PieceId, Space};
use santorini_engine::core::{
    EngineError, GameConfig, GameState, PlayerId, StatDelta, StatName, UserActionError,
};
use santorini_engine::log::{ActionKind, ActionLog, LogEntry, MemoryLogStore, Tag};
use santorini_engine::powers::PowerId;

const A: PlayerId = PlayerId(0);
const B: PlayerId = PlayerId(1);

/// Two placed workers for A, one for B; A's turn is open.
fn opened() -> (GameState, PieceId, PieceId) {
    let mut state = GameState::new(GameConfig::new(2), A).unwrap();
    let mine = state.board.available_workers(A);
    let theirs = state.board.available_workers(B);
    state.place_piece(A, mine[0], Space::new(0, 0, 0), Location::Board).unwrap();
    state.place_piece(A, mine[1], Space::new(4, 4, 0), Location::Board).unwrap();
    state.place_piece(B, theirs[0], Space::new(2, 2, 0), Location::Board).unwrap();
    state.log.start_turn(A).unwrap();
    (state, mine[0], theirs[0])
}

#[test]
fn test_cancel_move_and_build() {
    let (mut state, worker, _) = opened();
    let board = state.board.clone();

    state
        .move_worker(A, worker, Space::new(1, 0, 0), Location::Board)
        .unwrap();
    let created = state.build(A, worker, Space::new(1, 1, 0), 0).unwrap();
    assert_eq!(state.log.stats().player(A, StatName::Move), 1);
    assert_eq!(state.log.stats().player(A, StatName::BuildBlock), 1);
    assert!(state.log.can_cancel(A));

    state.cancel_turn(A, None).unwrap();

    let piece = state.board.piece(worker).unwrap();
    assert_eq!(piece.space, Some(Space::new(0, 0, 0)));
    assert!(state.board.get(created).is_none());
    assert_eq!(state.board, board);
    assert_eq!(state.log.stats().player(A, StatName::Move), 0);
    assert_eq!(state.log.stats().player(A, StatName::BuildBlock), 0);
    assert_eq!(state.log.entries().last().unwrap().kind, ActionKind::TurnStart);
    assert!(!state.log.can_cancel(A));
}

#[test]
fn test_cancel_without_works_is_refused() {
    let (mut state, _, _) = opened();
    let len = state.log.len();
    let err = state.cancel_turn(A, None).unwrap_err();
    assert_eq!(err, EngineError::UserAction(UserActionError::NothingToCancel));
    assert_eq!(state.log.len(), len);
}

#[test]
fn test_removal_restores_the_victim() {
    let (mut state, worker, victim) = opened();
    state
        .move_worker(A, worker, Space::new(1, 1, 0), Location::Board)
        .unwrap();
    state
        .kill_worker(A, victim, vec![StatDelta::player(A, StatName::UsePower)])
        .unwrap();
    assert_eq!(state.board.piece(victim).unwrap().location, Location::Box);

    state.cancel_turn(A, None).unwrap();
    let piece = state.board.piece(victim).unwrap();
    assert_eq!(piece.location, Location::Board);
    assert_eq!(piece.space, Some(Space::new(2, 2, 0)));
    assert_eq!(state.log.stats().player(A, StatName::UsePower), 0);
}

/// Play `steps` with one worker, skipping blocked columns. Returns whether
/// anything was recorded.
fn play(state: &mut GameState, worker: PieceId, steps: &[(u8, u8, bool)]) -> bool {
    let mut acted = false;
    for &(x, y, is_build) in steps {
        if state.board.is_occupied(x, y) || state.board.has_dome(x, y) {
            continue;
        }
        let space = state.board.space_at(x, y);
        if is_build {
            state.build(A, worker, space, space.z).unwrap();
        } else {
            state.move_worker(A, worker, space, Location::Board).unwrap();
        }
        acted = true;
    }
    acted
}

fn turn_tail(state: &GameState, from: usize) -> Vec<LogEntry> {
    state.log.entries().iter().skip(from).cloned().collect()
}

#[test]
fn test_same_sequence_after_cancel() {
    let (mut state, worker, _) = opened();
    let start_board = state.board.clone();
    let start_stats = state.log.stats().clone();
    let len = state.log.len();
    let steps = [(1, 0, false), (2, 0, true), (2, 0, true), (1, 1, false)];

    play(&mut state, worker, &steps);
    let board = state.board.clone();
    let stats = state.log.stats().clone();
    let entries = turn_tail(&state, len);
    assert_eq!(stats.player(A, StatName::Move), 2);
    assert_eq!(stats.player(A, StatName::BuildBlock), 2);

    state.cancel_turn(A, None).unwrap();
    let mut restarted = start_stats;
    restarted.apply(&StatDelta::player(A, StatName::TurnRestarted));
    assert_eq!(state.board, start_board);
    assert_eq!(state.log.stats(), &restarted);

    play(&mut state, worker, &steps);
    let mut replayed = stats;
    replayed.apply(&StatDelta::player(A, StatName::TurnRestarted));
    assert_eq!(state.board, board);
    assert_eq!(state.log.stats(), &replayed);
    assert_eq!(turn_tail(&state, len), entries);
}

#[test]
fn test_markers_survive_as_non_cancelable() {
    let (mut state, _, _) = opened();
    state
        .record_power_stat(A, PowerId::Selene)
        .unwrap();
    assert_eq!(state.log.last_tagged(A, Tag::Stats).map(|e| e.actor), Some(A));
    assert!(!state.log.can_cancel(A));
}

#[test]
fn test_cancel_with_store() {
    let mut state = GameState::new(GameConfig::new(2), A)
        .unwrap()
        .with_log(ActionLog::with_store(Box::new(MemoryLogStore::new())));
    let worker = state.board.available_workers(A)[0];
    state.place_piece(A, worker, Space::new(0, 0, 0), Location::Board).unwrap();
    state.log.start_turn(A).unwrap();
    state
        .move_worker(A, worker, Space::new(1, 1, 0), Location::Board)
        .unwrap();
    state.cancel_turn(A, None).unwrap();
    assert_eq!(state.log.len(), 2);
}

proptest! {
    /// Any run of moves and builds inside one turn is undone exactly.
    #[test]
    fn cancel_replays_back_to_the_boundary(
        steps in prop::collection::vec((0u8..5, 0u8..5, any::<bool>()), 1..12)
    ) {
        let (mut state, worker, _) = opened();
        let board = state.board.clone();
        let stats = state.log.stats().clone();
        let len = state.log.len();

        prop_assume!(play(&mut state, worker, &steps));

        state.cancel_turn(A, None).unwrap();
        let mut expected = stats;
        expected.apply(&StatDelta::player(A, StatName::TurnRestarted));

        prop_assert_eq!(&state.board, &board);
        prop_assert_eq!(state.log.stats(), &expected);
        prop_assert_eq!(state.log.len(), len);
    }

    /// Replaying a cancelled turn reproduces the same board, statistics
    /// and entries.
    #[test]
    fn replay_after_cancel_is_deterministic(
        steps in prop::collection::vec((0u8..5, 0u8..5, any::<bool>()), 1..12)
    ) {
        let (mut state, worker, _) = opened();
        let len = state.log.len();
        prop_assume!(play(&mut state, worker, &steps));
        let board = state.board.clone();
        let mut stats = state.log.stats().clone();
        let entries = turn_tail(&state, len);

        state.cancel_turn(A, None).unwrap();
        prop_assert_eq!(state.log.len(), len);
        play(&mut state, worker, &steps);

        stats.apply(&StatDelta::player(A, StatName::TurnRestarted));
        prop_assert_eq!(&state.board, &board);
        prop_assert_eq!(state.log.stats(), &stats);
        prop_assert_eq!(turn_tail(&state, len), entries);
    }
}
