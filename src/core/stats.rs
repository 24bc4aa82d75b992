//! Game statistics.
//!
//! Counters are scoped either to the table or to one player. Every
//! counter change that belongs to a turn travels inside a log entry as a
//! [`StatDelta`], so cancelling the entry negates it exactly. A few
//! counters are set outside the log (win-check stats, end-of-game tower
//! count, turn restarts) and are never reverted.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::PlayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatScope {
    Table,
    Player(PlayerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatName {
    /// Id of the power a player holds.
    PlayerPower,
    UsePower,
    Move,
    MoveUp,
    MoveDown,
    BuildBlock,
    BuildDome,
    BuildTower,
    TurnRestarted,
}

impl StatName {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            StatName::PlayerPower => "playerPower",
            StatName::UsePower => "usePower",
            StatName::Move => "move",
            StatName::MoveUp => "moveUp",
            StatName::MoveDown => "moveDown",
            StatName::BuildBlock => "buildBlock",
            StatName::BuildDome => "buildDome",
            StatName::BuildTower => "buildTower",
            StatName::TurnRestarted => "turnRestarted",
        }
    }
}

impl std::fmt::Display for StatName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One signed change to one counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatDelta {
    pub scope: StatScope,
    pub name: StatName,
    pub amount: i32,
}

impl StatDelta {
    #[must_use]
    pub const fn new(scope: StatScope, name: StatName, amount: i32) -> Self {
        Self { scope, name, amount }
    }

    #[must_use]
    pub const fn table(name: StatName) -> Self {
        Self::new(StatScope::Table, name, 1)
    }

    #[must_use]
    pub const fn player(player: PlayerId, name: StatName) -> Self {
        Self::new(StatScope::Player(player), name, 1)
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self::new(self.scope, self.name, -self.amount)
    }
}

/// Counter storage. Missing counters read as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    values: FxHashMap<(StatScope, StatName), i32>,
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, scope: StatScope, name: StatName) -> i32 {
        self.values.get(&(scope, name)).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn table(&self, name: StatName) -> i32 {
        self.get(StatScope::Table, name)
    }

    #[must_use]
    pub fn player(&self, player: PlayerId, name: StatName) -> i32 {
        self.get(StatScope::Player(player), name)
    }

    pub fn set(&mut self, scope: StatScope, name: StatName, value: i32) {
        self.values.insert((scope, name), value);
    }

    pub fn apply(&mut self, delta: &StatDelta) {
        let value = self.values.entry((delta.scope, delta.name)).or_insert(0);
        *value += delta.amount;
        if *value == 0 {
            self.values.remove(&(delta.scope, delta.name));
        }
    }

    pub fn apply_all(&mut self, deltas: &[StatDelta]) {
        for delta in deltas {
            self.apply(delta);
        }
    }

    /// Undo a list of deltas, newest first.
    pub fn revert_all(&mut self, deltas: &[StatDelta]) {
        for delta in deltas.iter().rev() {
            self.apply(&delta.negated());
        }
    }

    /// Non-zero counters, for inspection.
    pub fn iter(&self) -> impl Iterator<Item = (StatScope, StatName, i32)> + '_ {
        self.values.iter().map(|(&(scope, name), &v)| (scope, name, v))
    }
}
