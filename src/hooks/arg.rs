//! Extension arguments threaded through one hook chain.
//!
//! Each argument is created fresh by the turn machine, passed by exclusive
//! borrow to every capability in dispatch order, and consumed once the
//! chain returns. No capability keeps a reference past its own call.

use smallvec::smallvec;

use crate::board::{Board, BuildArgs, Location, Piece, PieceId, Space, Work, WorkKind};
use crate::core::stats::StatDelta;
use crate::core::PlayerId;
use crate::log::LogEntry;
use crate::powers::PowerId;

/// One destination with its allowed auxiliary arguments.
///
/// For builds `args` holds the levels that may be built there; moves and
/// power targets leave it empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkOption {
    pub space: Space,
    pub args: BuildArgs,
}

impl WorkOption {
    #[must_use]
    pub fn new(space: Space, args: BuildArgs) -> Self {
        Self { space, args }
    }

    /// Default option for a work kind: builds add the next level.
    #[must_use]
    pub fn standard(space: Space, kind: WorkKind) -> Self {
        match kind {
            WorkKind::Move => Self::new(space, BuildArgs::new()),
            WorkKind::Build => Self::new(space, smallvec![space.z]),
        }
    }
}

/// A worker and every destination it may act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerOption {
    /// Snapshot of the worker when the argument was computed.
    pub piece: Piece,
    pub works: Vec<WorkOption>,
}

impl WorkerOption {
    #[must_use]
    pub fn new(piece: Piece, works: Vec<WorkOption>) -> Self {
        Self { piece, works }
    }
}

/// Legal (worker, destination, argument) triples for a move or build step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkArg {
    pub kind: WorkKind,
    pub workers: Vec<WorkerOption>,
    pub skippable: bool,
    pub cancelable: bool,
}

impl WorkArg {
    /// Empty argument: nothing to do, not skippable.
    #[must_use]
    pub fn new(kind: WorkKind) -> Self {
        Self {
            kind,
            workers: Vec::new(),
            skippable: false,
            cancelable: false,
        }
    }

    /// Standard options of `workers` on the board.
    #[must_use]
    pub fn for_workers(board: &Board, workers: &[Piece], kind: WorkKind) -> Self {
        let mut arg = Self::new(kind);
        arg.workers = workers
            .iter()
            .map(|piece| {
                let works = board
                    .neighboring_spaces(piece, kind)
                    .into_iter()
                    .map(|space| WorkOption::standard(space, kind))
                    .collect();
                WorkerOption::new(piece.clone(), works)
            })
            .collect();
        arg
    }

    #[must_use]
    pub fn worker(&self, id: PieceId) -> Option<&WorkerOption> {
        self.workers.iter().find(|w| w.piece.id == id)
    }

    /// Options of a worker, inserting an empty entry if it is missing.
    pub fn worker_or_insert(&mut self, piece: &Piece) -> &mut WorkerOption {
        let pos = match self.workers.iter().position(|w| w.piece.id == piece.id) {
            Some(pos) => pos,
            None => {
                self.workers.push(WorkerOption::new(piece.clone(), Vec::new()));
                self.workers.len() - 1
            }
        };
        &mut self.workers[pos]
    }

    pub fn retain_workers<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Piece) -> bool,
    {
        self.workers.retain(|w| keep(&w.piece));
    }

    /// Keep only the listed workers.
    pub fn retain_workers_by_id(&mut self, ids: &[PieceId]) {
        self.retain_workers(|p| ids.contains(&p.id));
    }

    pub fn retain_works<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Piece, &WorkOption) -> bool,
    {
        for worker in &mut self.workers {
            let piece = &worker.piece;
            worker.works.retain(|w| keep(piece, w));
        }
    }

    /// Drop workers left without any destination.
    pub fn clean(&mut self) {
        if self.kind == WorkKind::Build {
            for worker in &mut self.workers {
                worker.works.retain(|w| !w.args.is_empty());
            }
        }
        self.workers.retain(|w| !w.works.is_empty());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workers.iter().all(|w| w.works.is_empty())
    }

    /// Validate a chosen target. Columns are matched by `(x, y)`.
    #[must_use]
    pub fn find(&self, worker: PieceId, space: Space, arg: Option<u8>) -> Option<Work> {
        find_work(&self.workers, self.kind, worker, space, arg)
    }
}

/// Restrict-only view of a [`WorkArg`] handed to opponent hooks.
#[derive(Debug)]
pub struct WorkFilter<'a> {
    arg: &'a mut WorkArg,
}

impl<'a> WorkFilter<'a> {
    pub fn new(arg: &'a mut WorkArg) -> Self {
        Self { arg }
    }

    #[must_use]
    pub fn kind(&self) -> WorkKind {
        self.arg.kind
    }

    #[must_use]
    pub fn workers(&self) -> &[WorkerOption] {
        &self.arg.workers
    }

    pub fn retain_workers<F>(&mut self, keep: F)
    where
        F: FnMut(&Piece) -> bool,
    {
        self.arg.retain_workers(keep);
    }

    pub fn retain_works<F>(&mut self, keep: F)
    where
        F: FnMut(&Piece, &WorkOption) -> bool,
    {
        self.arg.retain_works(keep);
    }

    /// Remove a building level from every destination.
    pub fn forbid_arg(&mut self, level: u8) {
        for worker in &mut self.arg.workers {
            for work in &mut worker.works {
                work.args.retain(|a| *a != level);
            }
        }
    }
}

/// Worker placement: which piece goes next and where it may go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceWorkerArg {
    pub worker: Option<PieceId>,
    pub spaces: Vec<Space>,
    pub location: Location,
}

impl PlaceWorkerArg {
    #[must_use]
    pub fn new(worker: Option<PieceId>, spaces: Vec<Space>) -> Self {
        Self {
            worker,
            spaces,
            location: Location::Board,
        }
    }

    #[must_use]
    pub fn find(&self, space: Space) -> Option<Space> {
        self.spaces.iter().copied().find(|s| s.same_column(space))
    }
}

/// Targets offered by an optional power step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsePowerArg {
    pub power: Option<PowerId>,
    pub workers: Vec<WorkerOption>,
    pub skippable: bool,
    pub cancelable: bool,
}

impl Default for UsePowerArg {
    fn default() -> Self {
        Self {
            power: None,
            workers: Vec::new(),
            skippable: true,
            cancelable: false,
        }
    }
}

impl UsePowerArg {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.power.is_none() || self.workers.iter().all(|w| w.works.is_empty())
    }

    #[must_use]
    pub fn find(&self, worker: PieceId, space: Space) -> Option<Work> {
        find_work(&self.workers, WorkKind::Move, worker, space, None)
    }
}

/// First-player candidates, in preference order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FirstPlayerArg {
    pub powers: Vec<PowerId>,
}

/// Win check record.
///
/// Self hooks may set `win` or add `losers`; opponent hooks run afterwards
/// and may clear `win` or change `player`. `win_stats` are applied outside
/// the action log and survive cancellation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinArg {
    pub win: bool,
    pub player: PlayerId,
    /// The work that triggered the check, if any.
    pub work: Option<LogEntry>,
    pub losers: Vec<PlayerId>,
    pub win_stats: Vec<StatDelta>,
    pub end_of_turn: bool,
}

impl WinArg {
    #[must_use]
    pub fn new(player: PlayerId, work: Option<LogEntry>, end_of_turn: bool) -> Self {
        Self {
            win: false,
            player,
            work,
            losers: Vec::new(),
            win_stats: Vec::new(),
            end_of_turn,
        }
    }

    pub fn add_loser(&mut self, player: PlayerId) {
        if !self.losers.contains(&player) {
            self.losers.push(player);
        }
    }
}

fn find_work(
    workers: &[WorkerOption],
    kind: WorkKind,
    worker: PieceId,
    space: Space,
    arg: Option<u8>,
) -> Option<Work> {
    let option = workers.iter().find(|w| w.piece.id == worker)?;
    let target = option.works.iter().find(|w| w.space.same_column(space))?;
    match kind {
        WorkKind::Move => Some(Work::new(target.space, None)),
        WorkKind::Build => {
            let level = arg.or_else(|| target.args.first().copied())?;
            target
                .args
                .contains(&level)
                .then(|| Work::new(target.space, Some(level)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Gender;

    fn board_with_worker() -> (Board, Piece) {
        let mut board = Board::new();
        let id = board.add_worker(PlayerId(0), Gender::Female, Location::Hand);
        board
            .set_piece_at(id, Space::new(0, 0, 0), Some(Location::Board))
            .unwrap();
        board.build_at(Space::new(1, 0, 0), 0);
        let piece = board.piece(id).unwrap().clone();
        (board, piece)
    }

    #[test]
    fn test_for_workers_build_levels() {
        let (board, piece) = board_with_worker();
        let arg = WorkArg::for_workers(&board, &[piece.clone()], WorkKind::Build);

        assert_eq!(arg.workers[0].works.len(), 3);
        let work = arg.find(piece.id, Space::new(1, 0, 9), None).unwrap();
        assert_eq!(work, Work::new(Space::new(1, 0, 1), Some(1)));
        assert!(arg.find(piece.id, Space::new(1, 0, 1), Some(3)).is_none());
        assert!(arg.find(piece.id, Space::new(4, 4, 0), None).is_none());
    }

    #[test]
    fn test_filter_only_restricts() {
        let (board, piece) = board_with_worker();
        let mut arg = WorkArg::for_workers(&board, &[piece], WorkKind::Move);
        let before = arg.workers[0].works.len();

        let mut filter = WorkFilter::new(&mut arg);
        filter.retain_works(|_, w| w.space.z == 0);
        assert_eq!(filter.workers()[0].works.len(), before - 1);

        filter.retain_workers(|_| false);
        arg.clean();
        assert!(arg.is_empty());
    }

    #[test]
    fn test_clean_drops_empty_builds() {
        let (board, piece) = board_with_worker();
        let mut arg = WorkArg::for_workers(&board, &[piece], WorkKind::Build);
        WorkFilter::new(&mut arg).forbid_arg(0);
        arg.clean();
        assert_eq!(arg.workers[0].works.len(), 1);
    }

    #[test]
    fn test_win_arg_losers_are_unique() {
        let mut arg = WinArg::new(PlayerId(0), None, true);
        arg.add_loser(PlayerId(1));
        arg.add_loser(PlayerId(1));
        assert_eq!(arg.losers, vec![PlayerId(1)]);
    }
}
