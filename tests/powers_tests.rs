//! Power behaviour tests.
//!
//! Each test seats two players, grants powers, and plays through the turn
//! machine to check how a capability changes the flow.

use std::sync::Once;

use santorini_engine::board::{Location, PieceId, Space, DOME_LEVEL};
use santorini_engine::core::{GameConfig, GameState, PlayerId, StatName};
use santorini_engine::log::{ActionKind, Tag};
use santorini_engine::powers::PowerId;
use santorini_engine::turn::{GameResult, TurnMachine, TurnPhase};

static INIT_LOGGING: Once = Once::new();

fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        if std::env::var("TEST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
                .init();
        }
    });
}

const A: PlayerId = PlayerId(0);
const B: PlayerId = PlayerId(1);

fn table(
    powers: &[(PlayerId, PowerId)],
    heights: &[(u8, u8, u8)],
    spots: &[(u8, u8)],
) -> (TurnMachine, Vec<PieceId>) {
    init_test_logging();
    let mut state = GameState::new(GameConfig::new(2), A).unwrap();
    for &(player, power) in powers {
        state.holdings.grant(player, power).unwrap();
    }
    for &(x, y, height) in heights {
        for level in 0..height {
            state.board.build_at(Space::new(x, y, level), level);
        }
    }

    let mut machine = TurnMachine::new(state).unwrap();
    let mut placed = Vec::new();
    for &(x, y) in spots {
        let worker = machine.arg_place_worker().unwrap().worker.unwrap();
        machine.place_worker(worker, Space::new(x, y, 0)).unwrap();
        placed.push(worker);
    }
    (machine, placed)
}

fn at(x: u8, y: u8) -> Space {
    Space::new(x, y, 0)
}

fn column(machine: &TurnMachine, worker: PieceId) -> Option<(u8, u8)> {
    let piece = machine.state().board.piece(worker).unwrap();
    piece.space.map(|s| (s.x, s.y))
}

#[test]
fn test_bia_removes_worker_beyond() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Bia)],
        &[(1, 1, 1), (2, 2, 2)],
        &[(1, 1), (4, 0), (3, 3), (0, 4)],
    );
    let (mover, victim) = (placed[0], placed[2]);
    let placement = machine
        .state()
        .log
        .entries()
        .iter()
        .find(|e| e.subject == Some(victim))
        .cloned()
        .unwrap();

    machine.work(mover, at(2, 2), None).unwrap();

    let state = machine.state();
    assert_eq!(state.board.piece(victim).unwrap().location, Location::Box);
    let last = state.log.entries().last().unwrap();
    assert_eq!(last.kind, ActionKind::Removal);
    assert_eq!(last.subject, Some(victim));
    assert_eq!(last.payload.from, Some(Space::new(3, 3, 0)));

    let untouched = state.log.entry(placement.seq).unwrap();
    assert_eq!(*untouched, placement);
    assert_eq!(state.log.stats().player(A, StatName::UsePower), 1);
    assert_eq!(machine.phase(), TurnPhase::Build);
}

#[test]
fn test_bia_kill_is_cancelled() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Bia)],
        &[],
        &[(1, 1), (4, 0), (3, 3), (0, 4)],
    );
    machine.work(placed[0], at(2, 2), None).unwrap();
    machine.cancel_previous_works().unwrap();

    assert_eq!(column(&machine, placed[2]), Some((3, 3)));
    assert_eq!(machine.state().board.piece(placed[2]).unwrap().location, Location::Board);
    assert_eq!(machine.state().log.stats().player(A, StatName::UsePower), 0);
}

#[test]
fn test_artemis_moves_again() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Artemis)],
        &[],
        &[(0, 0), (4, 4), (0, 4), (4, 0)],
    );
    let worker = placed[0];
    machine.work(worker, at(1, 1), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::MoveAgain);

    let arg = machine.arg_player_move().unwrap();
    assert!(arg.skippable);
    assert_eq!(arg.workers.len(), 1);
    assert!(arg.workers[0].works.iter().all(|w| !w.space.same_column(at(0, 0))));

    let err = machine.work(worker, at(0, 0), None);
    assert!(err.is_err());

    machine.skip_work().unwrap();
    assert_eq!(machine.phase(), TurnPhase::Build);
    assert!(machine.state().log.last_tagged(A, Tag::SkippedWork).is_some());
}

#[test]
fn test_artemis_second_move_then_build() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Artemis)],
        &[],
        &[(0, 0), (4, 4), (0, 4), (4, 0)],
    );
    let worker = placed[0];
    machine.work(worker, at(1, 1), None).unwrap();
    machine.work(worker, at(2, 2), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::Build);
    assert_eq!(machine.state().log.last_moves(A).len(), 2);
}

#[test]
fn test_demeter_builds_twice_elsewhere() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Demeter)],
        &[],
        &[(0, 0), (4, 4), (0, 4), (4, 0)],
    );
    let worker = placed[0];
    machine.work(worker, at(1, 1), None).unwrap();
    machine.work(worker, at(2, 2), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::BuildAgain);

    let arg = machine.arg_player_build().unwrap();
    assert!(arg.skippable);
    assert!(arg.workers[0].works.iter().all(|w| !w.space.same_column(at(2, 2))));

    machine.work(worker, at(2, 1), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::PreEndOfTurn);
    assert_eq!(machine.state().board.height_at(2, 1), 1);
}

#[test]
fn test_apollo_swaps_places() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Apollo)],
        &[],
        &[(0, 0), (4, 4), (1, 1), (0, 4)],
    );
    machine.work(placed[0], at(1, 1), None).unwrap();

    assert_eq!(column(&machine, placed[0]), Some((1, 1)));
    assert_eq!(column(&machine, placed[2]), Some((0, 0)));
    let kinds: Vec<_> = machine.state().log.turn_entries(A).iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ActionKind::Move, ActionKind::Force]);
}

#[test]
fn test_minotaur_pushes() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Minotaur)],
        &[],
        &[(1, 1), (4, 0), (2, 2), (0, 4)],
    );
    machine.work(placed[0], at(2, 2), None).unwrap();
    assert_eq!(column(&machine, placed[0]), Some((2, 2)));
    assert_eq!(column(&machine, placed[2]), Some((3, 3)));
}

#[test]
fn test_athena_stops_opponents_climbing() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Athena)],
        &[(1, 1, 1), (3, 4, 1)],
        &[(0, 0), (2, 0), (4, 4), (0, 4)],
    );
    machine.work(placed[0], at(1, 1), None).unwrap();
    machine.work(placed[0], at(2, 2), None).unwrap();
    machine.confirm_turn().unwrap();
    assert_eq!(machine.active(), B);

    let arg = machine.arg_player_move().unwrap();
    let climbs = arg
        .workers
        .iter()
        .flat_map(|w| w.works.iter().map(move |o| (w.piece.space, o.space)))
        .filter(|(from, to)| from.is_some_and(|f| to.z > f.z))
        .count();
    assert_eq!(climbs, 0);
    assert!(machine.work(placed[2], at(3, 4), None).is_err());
}

#[test]
fn test_pan_wins_by_dropping() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Pan)],
        &[(1, 1, 2)],
        &[(1, 1), (4, 4), (0, 4), (4, 0)],
    );
    machine.work(placed[0], at(2, 2), None).unwrap();
    assert_eq!(machine.result(), Some(&GameResult::Winner(A)));
}

#[test]
fn test_hera_blocks_perimeter_win() {
    let (mut machine, placed) = table(
        &[(B, PowerId::Hera)],
        &[(1, 1, 2), (0, 1, 3)],
        &[(1, 1), (4, 4), (2, 4), (4, 0)],
    );
    machine.work(placed[0], at(0, 1), None).unwrap();

    assert!(machine.result().is_none());
    assert_eq!(machine.phase(), TurnPhase::Build);
    assert_eq!(machine.state().log.stats().player(B, StatName::UsePower), 1);
}

#[test]
fn test_hydra_grows_a_worker() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Hydra)],
        &[],
        &[(0, 0), (4, 4), (0, 4), (4, 0)],
    );
    let worker = placed[0];
    machine.work(worker, at(1, 1), None).unwrap();
    machine.work(worker, at(2, 2), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::UsePowerOffer);

    let arg = machine.arg_use_power().unwrap();
    assert_eq!(arg.power, Some(PowerId::Hydra));
    assert!(!arg.skippable);
    assert!(arg.workers[0].works.iter().all(|w| w.space.z == 0));
    assert!(machine.skip_power().is_err());

    machine.use_power(worker, at(0, 0)).unwrap();
    assert_eq!(machine.phase(), TurnPhase::PreEndOfTurn);
    assert_eq!(machine.state().board.placed_workers(A, false).len(), 3);
    assert!(machine.state().log.last_tagged(A, Tag::UsedPower).is_some());

    machine.cancel_previous_works().unwrap();
    assert_eq!(machine.state().board.placed_workers(A, false).len(), 2);
    assert_eq!(machine.phase(), TurnPhase::Move);
}

#[test]
fn test_hecate_conflict_cancels_opponent_turn() {
    let (mut machine, placed) = table(
        &[(B, PowerId::Hecate)],
        &[],
        &[(0, 0), (4, 4), (1, 1), (0, 4)],
    );
    let hidden = machine.state().board.piece(placed[2]).unwrap();
    assert_eq!(hidden.location, Location::Secret);

    // The hidden worker does not block the move.
    machine.work(placed[0], at(1, 1), None).unwrap();
    machine.work(placed[0], at(2, 2), None).unwrap();
    machine.confirm_turn().unwrap();

    assert_eq!(column(&machine, placed[0]), Some((0, 0)));
    assert_eq!(machine.state().board.height_at(2, 2), 0);
    let conflict = machine
        .state()
        .log
        .entries()
        .iter()
        .find(|e| e.tag() == Some(Tag::Conflict))
        .unwrap();
    assert_eq!(conflict.actor, A);
    assert_eq!(conflict.payload.power, Some(PowerId::Hecate));
    assert_eq!(machine.active(), B);
}

#[test]
fn test_hecate_moves_in_secret() {
    let (mut machine, placed) = table(
        &[(B, PowerId::Hecate)],
        &[],
        &[(0, 0), (4, 4), (2, 2), (0, 4)],
    );
    machine.work(placed[0], at(1, 0), None).unwrap();
    machine.work(placed[0], at(2, 0), None).unwrap();
    machine.confirm_turn().unwrap();
    assert_eq!(machine.active(), B);

    machine.work(placed[2], at(3, 3), None).unwrap();
    let piece = machine.state().board.piece(placed[2]).unwrap();
    assert_eq!(piece.location, Location::Secret);
    assert_eq!(column(&machine, placed[2]), Some((3, 3)));
    assert_eq!(machine.phase(), TurnPhase::Build);
}

#[test]
fn test_atlas_domes_the_ground() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Atlas)],
        &[],
        &[(0, 0), (4, 4), (0, 4), (4, 0)],
    );
    machine.work(placed[0], at(1, 1), None).unwrap();
    machine.work(placed[0], at(2, 2), Some(DOME_LEVEL)).unwrap();

    let board = &machine.state().board;
    assert!(board.has_dome(2, 2));
    assert_eq!(board.height_at(2, 2), 1);
    assert_eq!(board.complete_tower_count(), 0);
    assert_eq!(machine.state().log.stats().player(A, StatName::BuildDome), 1);
}

#[test]
fn test_hephaestus_stacks_a_second_block() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Hephaestus)],
        &[],
        &[(0, 0), (4, 4), (0, 4), (4, 0)],
    );
    let worker = placed[0];
    machine.work(worker, at(1, 1), None).unwrap();
    machine.work(worker, at(2, 2), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::BuildAgain);

    let arg = machine.arg_player_build().unwrap();
    assert!(arg.skippable);
    assert_eq!(arg.workers[0].works.len(), 1);
    assert!(machine.work(worker, at(2, 1), None).is_err());

    machine.work(worker, at(2, 2), None).unwrap();
    assert_eq!(machine.state().board.height_at(2, 2), 2);
    assert_eq!(machine.phase(), TurnPhase::PreEndOfTurn);
}

#[test]
fn test_zeus_builds_under_himself() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Zeus)],
        &[],
        &[(0, 0), (4, 4), (0, 4), (4, 0)],
    );
    let worker = placed[0];
    machine.work(worker, at(1, 1), None).unwrap();
    machine.work(worker, at(1, 1), None).unwrap();

    let state = machine.state();
    assert_eq!(state.board.height_at(1, 1), 1);
    assert_eq!(state.board.piece(worker).unwrap().space, Some(Space::new(1, 1, 1)));
    assert_eq!(state.log.stats().player(A, StatName::UsePower), 1);
    assert!(machine.result().is_none());
}

#[test]
fn test_castor_moves_both_workers() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Castor)],
        &[],
        &[(0, 0), (0, 4), (4, 4), (4, 0)],
    );
    assert!(machine.arg_player_move().unwrap().skippable);

    machine.work(placed[0], at(1, 1), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::MoveAgain);
    let arg = machine.arg_player_move().unwrap();
    assert_eq!(arg.workers.len(), 1);
    assert_eq!(arg.workers[0].piece.id, placed[1]);

    machine.work(placed[1], at(1, 3), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::PreEndOfTurn);
    machine.confirm_turn().unwrap();
    assert_eq!(machine.state().log.stats().player(A, StatName::UsePower), 1);
}

#[test]
fn test_chronus_wins_on_fifth_tower() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Chronus)],
        &[(4, 0, 4), (4, 1, 4), (4, 2, 4), (4, 3, 4), (2, 1, 3)],
        &[(0, 0), (0, 4), (2, 4), (3, 4)],
    );
    assert_eq!(machine.state().board.complete_tower_count(), 4);

    machine.work(placed[0], at(1, 1), None).unwrap();
    assert!(machine.result().is_none());
    machine.work(placed[0], at(2, 1), Some(DOME_LEVEL)).unwrap();
    assert_eq!(machine.result(), Some(&GameResult::Winner(A)));
}

#[test]
fn test_maenads_flank_at_end_of_turn() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Maenads)],
        &[],
        &[(1, 1), (3, 4), (2, 2), (4, 0)],
    );
    machine.work(placed[1], at(3, 3), None).unwrap();
    assert!(machine.result().is_none());
    machine.work(placed[1], at(4, 4), None).unwrap();
    assert!(machine.result().is_none());

    machine.confirm_turn().unwrap();
    assert_eq!(machine.result(), Some(&GameResult::Winner(A)));
}

#[test]
fn test_hermes_travels_with_both_workers() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Hermes)],
        &[],
        &[(0, 0), (0, 4), (4, 4), (4, 0)],
    );
    assert!(machine.arg_player_move().unwrap().skippable);

    machine.work(placed[0], at(1, 1), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::MoveAgain);
    machine.work(placed[1], at(1, 3), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::MoveAgain);
    machine.skip_work().unwrap();

    assert_eq!(machine.phase(), TurnPhase::Build);
    assert_eq!(machine.arg_player_build().unwrap().workers.len(), 2);
    machine.work(placed[0], at(2, 2), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::PreEndOfTurn);
    machine.confirm_turn().unwrap();
    assert_eq!(machine.state().log.stats().player(A, StatName::UsePower), 1);
}

#[test]
fn test_hermes_climbing_ends_travel() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Hermes)],
        &[(1, 0, 1)],
        &[(0, 0), (0, 4), (4, 4), (4, 0)],
    );
    machine.work(placed[0], at(0, 1), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::MoveAgain);
    let arg = machine.arg_player_move().unwrap();
    assert!(arg.workers.iter().all(|w| w.works.iter().all(|o| o.space.z == 0)));
    assert!(machine.work(placed[0], at(1, 0), None).is_err());

    machine.cancel_previous_works().unwrap();
    machine.work(placed[0], at(1, 0), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::Build);
    let arg = machine.arg_player_build().unwrap();
    assert_eq!(arg.workers.len(), 1);
    assert_eq!(arg.workers[0].piece.id, placed[0]);
}

#[test]
fn test_prometheus_builds_before_moving() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Prometheus)],
        &[(1, 1, 1)],
        &[(0, 0), (0, 4), (4, 4), (4, 0)],
    );
    assert_eq!(machine.phase(), TurnPhase::Build);
    let arg = machine.arg_player_build().unwrap();
    assert!(arg.skippable);
    assert_eq!(arg.workers.len(), 2);

    machine.work(placed[0], at(1, 0), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::Move);
    assert_eq!(machine.state().log.stats().player(A, StatName::UsePower), 1);
    let arg = machine.arg_player_move().unwrap();
    assert_eq!(arg.workers.len(), 1);
    assert_eq!(arg.workers[0].piece.id, placed[0]);
    assert!(arg.workers[0].works.iter().all(|w| w.space.z == 0));

    machine.work(placed[0], at(0, 1), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::Build);
    machine.work(placed[0], at(1, 0), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::PreEndOfTurn);
    assert_eq!(machine.state().board.height_at(1, 0), 2);
}

#[test]
fn test_prometheus_skips_the_early_build() {
    let (mut machine, placed) = table(
        &[(A, PowerId::Prometheus)],
        &[(1, 1, 1)],
        &[(0, 0), (0, 4), (4, 4), (4, 0)],
    );
    machine.skip_work().unwrap();
    assert_eq!(machine.phase(), TurnPhase::Move);
    let arg = machine.arg_player_move().unwrap();
    assert_eq!(arg.workers.len(), 2);

    machine.work(placed[0], at(1, 1), None).unwrap();
    assert_eq!(machine.phase(), TurnPhase::Build);
    machine.work(placed[0], at(2, 2), None).unwrap();
    machine.confirm_turn().unwrap();
    assert_eq!(machine.state().log.stats().player(A, StatName::UsePower), 0);
    assert_eq!(machine.active(), B);
}
