//! Turn phases and game results.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Where the turn machine currently stands.
///
/// ```text
/// PlaceWorker* → StartOfTurn → Move → (MoveAgain)* → Build → (BuildAgain)*
///   → UsePowerOffer → UsePowerResolve → PreEndOfTurn → WinCheck → EndOfTurn
///   → NextPlayer → StartOfTurn ...
/// ```
///
/// `GameEnd` is terminal; `PlayerEliminated` is passed through when a
/// player leaves a three-player game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    PlaceWorker,
    StartOfTurn,
    Move,
    MoveAgain,
    Build,
    BuildAgain,
    UsePowerOffer,
    UsePowerResolve,
    PreEndOfTurn,
    WinCheck,
    EndOfTurn,
    NextPlayer,
    GameEnd,
    PlayerEliminated,
}

impl TurnPhase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TurnPhase::PlaceWorker => "placeWorker",
            TurnPhase::StartOfTurn => "startOfTurn",
            TurnPhase::Move => "move",
            TurnPhase::MoveAgain => "moveAgain",
            TurnPhase::Build => "build",
            TurnPhase::BuildAgain => "buildAgain",
            TurnPhase::UsePowerOffer => "usePowerOffer",
            TurnPhase::UsePowerResolve => "usePowerResolve",
            TurnPhase::PreEndOfTurn => "preEndOfTurn",
            TurnPhase::WinCheck => "winCheck",
            TurnPhase::EndOfTurn => "endOfTurn",
            TurnPhase::NextPlayer => "nextPlayer",
            TurnPhase::GameEnd => "gameEnd",
            TurnPhase::PlayerEliminated => "playerEliminated",
        }
    }

    /// Whether the phase waits for a move or build choice.
    #[must_use]
    pub fn is_work(self) -> bool {
        matches!(
            self,
            TurnPhase::Move | TurnPhase::MoveAgain | TurnPhase::Build | TurnPhase::BuildAgain
        )
    }

    /// Whether the player may cancel their turn from this phase.
    #[must_use]
    pub fn allows_cancel(self) -> bool {
        self.is_work() || matches!(self, TurnPhase::UsePowerOffer | TurnPhase::PreEndOfTurn)
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Game result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_predicates() {
        assert!(TurnPhase::MoveAgain.is_work());
        assert!(!TurnPhase::UsePowerOffer.is_work());
        assert!(TurnPhase::PreEndOfTurn.allows_cancel());
        assert!(!TurnPhase::StartOfTurn.allows_cancel());
        assert_eq!(TurnPhase::BuildAgain.to_string(), "buildAgain");
    }

    #[test]
    fn test_game_result_winners() {
        let team = GameResult::Winners(vec![PlayerId(1), PlayerId(3)]);
        assert!(team.is_winner(PlayerId(3)));
        assert!(!team.is_winner(PlayerId(0)));
        assert!(!GameResult::Draw.is_winner(PlayerId(0)));
    }

    #[test]
    fn test_result_serialization() {
        let result = GameResult::Winners(vec![PlayerId(0), PlayerId(2)]);
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: GameResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }
}
