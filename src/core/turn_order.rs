//! Turn-order provider: active player, opponents, teammates.
//!
//! ## Teams
//!
//! - 2 players: one team per player
//! - 3 players: one team per player, losers are eliminated
//! - 4 players: seats 0/2 and 1/3 form teams and share the workers of the
//!   lower seat (the team's worker owner)

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Seating, team and elimination bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    player_count: usize,
    active: PlayerId,
    first: PlayerId,
    round: u32,
    eliminated: Vec<PlayerId>,
}

impl TurnOrder {
    /// Create a turn order where `first` opens every round.
    #[must_use]
    pub fn new(player_count: usize, first: PlayerId) -> Self {
        assert!((2..=4).contains(&player_count), "Player count must be 2-4");
        Self {
            player_count,
            active: first,
            first,
            round: 0,
            eliminated: Vec::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    pub fn set_active(&mut self, player: PlayerId) {
        self.active = player;
    }

    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first
    }

    pub fn set_first_player(&mut self, player: PlayerId) {
        self.first = player;
        self.active = player;
    }

    /// Number of completed passes through the first player.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Team index of a seat.
    #[must_use]
    pub fn team_of(&self, player: PlayerId) -> u8 {
        if self.player_count == 4 {
            player.0 % 2
        } else {
            player.0
        }
    }

    /// Seat whose workers this player moves.
    #[must_use]
    pub fn worker_owner(&self, player: PlayerId) -> PlayerId {
        PlayerId(self.team_of(player))
    }

    /// Teammates of a player, the player included, in seating order.
    #[must_use]
    pub fn teammates(&self, player: PlayerId) -> Vec<PlayerId> {
        let team = self.team_of(player);
        PlayerId::all(self.player_count)
            .filter(|p| self.team_of(*p) == team)
            .collect()
    }

    /// Remaining opponents of a player in seating order, starting after them.
    #[must_use]
    pub fn opponents(&self, player: PlayerId) -> Vec<PlayerId> {
        let team = self.team_of(player);
        (1..self.player_count)
            .map(|offset| PlayerId(((player.index() + offset) % self.player_count) as u8))
            .filter(|p| self.team_of(*p) != team && !self.is_eliminated(*p))
            .collect()
    }

    #[must_use]
    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.eliminated.contains(&player)
    }

    pub fn eliminate(&mut self, player: PlayerId) {
        if !self.is_eliminated(player) {
            self.eliminated.push(player);
        }
    }

    /// Players still in the game, in seating order.
    #[must_use]
    pub fn remaining(&self) -> Vec<PlayerId> {
        PlayerId::all(self.player_count)
            .filter(|p| !self.is_eliminated(*p))
            .collect()
    }

    /// Activate the next non-eliminated seat, counting rounds at the first player.
    pub fn advance(&mut self) -> PlayerId {
        let mut next = self.active;
        for _ in 0..self.player_count {
            next = next.next_seat(self.player_count);
            if next == self.first {
                self.round += 1;
            }
            if !self.is_eliminated(next) {
                break;
            }
        }
        self.active = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_player_opponents() {
        let order = TurnOrder::new(2, PlayerId(0));
        assert_eq!(order.opponents(PlayerId(0)), vec![PlayerId(1)]);
        assert_eq!(order.teammates(PlayerId(1)), vec![PlayerId(1)]);
    }

    #[test]
    fn test_four_player_teams() {
        let order = TurnOrder::new(4, PlayerId(0));
        assert_eq!(order.teammates(PlayerId(2)), vec![PlayerId(0), PlayerId(2)]);
        assert_eq!(order.opponents(PlayerId(2)), vec![PlayerId(3), PlayerId(1)]);
        assert_eq!(order.worker_owner(PlayerId(3)), PlayerId(1));
    }

    #[test]
    fn test_advance_skips_eliminated() {
        let mut order = TurnOrder::new(3, PlayerId(0));
        order.eliminate(PlayerId(1));

        assert_eq!(order.advance(), PlayerId(2));
        assert_eq!(order.advance(), PlayerId(0));
        assert_eq!(order.round(), 1);
        assert_eq!(order.opponents(PlayerId(0)), vec![PlayerId(2)]);
        assert_eq!(order.remaining(), vec![PlayerId(0), PlayerId(2)]);
    }
}
