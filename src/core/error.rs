//! Engine error families.
//!
//! Every failure surfaced by the engine belongs to one of three families:
//!
//! - [`UserActionError`]: the acting player asked for something illegal.
//!   Recoverable; state is left untouched.
//! - [`RuleConflictError`]: two capabilities disagree, or setup cannot honor
//!   its quota. Fatal; indicates a composition defect in the rule set.
//! - [`InvariantViolation`]: a capability or the engine broke an internal
//!   contract. Fatal; indicates a logic bug.
//!
//! The top-level [`EngineError`] wraps the three transparently so callers can
//! use `?` everywhere and still match on the family. Failures of the log's
//! persistence seam surface as [`EngineError::Store`].

use thiserror::Error;

use crate::board::{PieceId, Space};
use crate::hooks::StateHook;
use crate::log::{SequenceId, StoreError};
use crate::powers::{PowerId, Transition};

use super::config::{PowerOption, SetupMode};
use super::PlayerId;

/// Result alias used throughout the engine.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;

/// Top-level engine error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    UserAction(#[from] UserActionError),
    #[error(transparent)]
    RuleConflict(#[from] RuleConflictError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Whether the error must propagate to operators instead of the player.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, EngineError::UserAction(_))
    }
}

/// Recoverable errors reported back to the acting player.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UserActionError {
    #[error("illegal target: piece {worker} cannot act on {space}")]
    IllegalTarget { worker: PieceId, space: Space },
    #[error("this action cannot be skipped")]
    NotSkippable,
    #[error("nothing to cancel")]
    NothingToCancel,
    #[error("{0} is banned against the current selection")]
    BannedPower(PowerId),
    #[error("{0} is not currently offered")]
    PowerNotOffered(PowerId),
    #[error("{action} is not allowed while in {phase}")]
    WrongPhase { action: &'static str, phase: &'static str },
    #[error("piece {0} cannot be placed now")]
    WrongPiece(PieceId),
    #[error("the offer must contain exactly {expected} powers (has {actual})")]
    OfferSize { expected: usize, actual: usize },
    #[error("{0} is already in the offer")]
    AlreadyOffered(PowerId),
    #[error("{0} is not in the offer")]
    NotInOffer(PowerId),
    #[error("the game is over")]
    GameOver,
    #[error("{0} players cannot sit at this table (2 to 4)")]
    UnsupportedPlayerCount(usize),
    #[error("{powers:?} with {setup:?} setup needs {required} powers for {players} players, only {available} can be drawn")]
    UnsupportedSetup {
        powers: PowerOption,
        setup: SetupMode,
        players: usize,
        available: usize,
        required: usize,
    },
}

/// Fatal capability-composition defects.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleConflictError {
    #[error("{player}: capabilities disagree on {hook}: {proposals:?}")]
    ConflictingNextState {
        hook: StateHook,
        player: PlayerId,
        proposals: Vec<(PowerId, Transition)>,
    },
    #[error("fair offer stopped short: expected {expected} powers, drew {actual}")]
    OfferQuota { expected: usize, actual: usize },
}

/// Fatal internal contract violations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("cancel would unwind past the turn boundary of {player} (stop at {stop_at})")]
    CancelPastBoundary { player: PlayerId, stop_at: SequenceId },
    #[error("piece {0} is not on the board")]
    MissingPiece(PieceId),
    #[error("{0} was invoked while unbound")]
    Unbound(PowerId),
    #[error("{0} has no capability implementation")]
    NotImplemented(PowerId),
    #[error("no capability proposed a state after {0}")]
    MissingNextState(StateHook),
    #[error("no turn is open for {0}")]
    NoActiveTurn(PlayerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality() {
        let user: EngineError = UserActionError::NothingToCancel.into();
        assert!(!user.is_fatal());

        let conflict: EngineError = RuleConflictError::OfferQuota { expected: 4, actual: 3 }.into();
        assert!(conflict.is_fatal());

        let bug: EngineError = InvariantViolation::MissingPiece(PieceId::new(7)).into();
        assert!(bug.is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = EngineError::from(UserActionError::NothingToCancel);
        assert_eq!(err.to_string(), "nothing to cancel");

        let err = EngineError::from(RuleConflictError::OfferQuota { expected: 2, actual: 1 });
        assert_eq!(
            err.to_string(),
            "fair offer stopped short: expected 2 powers, drew 1"
        );
    }
}
